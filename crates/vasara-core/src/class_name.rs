//! Class name hashing for scoping toolkit styles away from host-page CSS.

/// Prefix carried by every hashed class name.
pub const CLASS_PREFIX: &str = "vasara-";

/// Class names used by the toolkit's DOM and stylesheet.
pub mod class {
    pub const MODAL_WINDOW: &str = "modal-window";
    pub const HEADER: &str = "modal-window-header";
    pub const HEADER_TITLE: &str = "modal-window-header-title";
    pub const HEADER_BUTTONS: &str = "modal-window-header-buttons";
    pub const HEADER_BUTTON: &str = "modal-window-header-button";
    pub const GHOST_BUTTON: &str = "ghost-button";
    pub const CLOSE_BUTTON: &str = "close-button";
    pub const CONTENT: &str = "modal-window-content";
    pub const RESIZABLE: &str = "resizable";
    pub const GHOSTED: &str = "ghosted";

    /// The complete vocabulary, in stylesheet order.
    pub const ALL: [&str; 10] = [
        MODAL_WINDOW,
        HEADER,
        HEADER_TITLE,
        HEADER_BUTTONS,
        HEADER_BUTTON,
        GHOST_BUTTON,
        CLOSE_BUTTON,
        CONTENT,
        RESIZABLE,
        GHOSTED,
    ];
}

/// Hash a class name into its scoped token.
///
/// The hash folds UTF-16 code units with 32-bit wrapping arithmetic
/// (`h = h * 31 + c`) and renders the signed result in base 36, so the
/// same input always produces the same token.
pub fn hash_class_name(name: &str) -> String {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    format!("{}{}", CLASS_PREFIX, to_base36(hash))
}

/// Hash every space-separated class in a class attribute value.
pub fn obfuscate_class_list(list: &str) -> String {
    list.split(' ')
        .filter(|name| !name.is_empty())
        .map(hash_class_name)
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_base36(value: i32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let negative = value < 0;
    let mut magnitude = i64::from(value).unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if negative {
        digits.push(b'-');
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_class_name("modal-window"), hash_class_name("modal-window"));
        assert!(hash_class_name("modal-window").starts_with(CLASS_PREFIX));
    }

    #[test]
    fn test_known_values() {
        assert_eq!(hash_class_name(""), "vasara-0");
        // 'a' = 97
        assert_eq!(hash_class_name("a"), "vasara-2p");
        // 'a' * 31 + 'b' = 3105
        assert_eq!(hash_class_name("ab"), "vasara-2e9");
    }

    #[test]
    fn test_negative_hash_keeps_sign() {
        assert_eq!(hash_class_name(class::MODAL_WINDOW), "vasara-qw7uog");
        assert_eq!(hash_class_name(class::HEADER_BUTTONS), "vasara--u6s602");
        assert_eq!(hash_class_name(class::CONTENT), "vasara--k27rk4");
    }

    #[test]
    fn test_vocabulary_is_collision_free() {
        let tokens: HashSet<_> = class::ALL.iter().map(|name| hash_class_name(name)).collect();
        assert_eq!(tokens.len(), class::ALL.len());
    }

    #[test]
    fn test_class_list() {
        let list = obfuscate_class_list("modal-window-header-button ghost-button");
        let parts: Vec<_> = list.split(' ').collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], hash_class_name(class::HEADER_BUTTON));
        assert_eq!(parts[1], hash_class_name(class::GHOST_BUTTON));
    }

    #[test]
    fn test_base36_extremes() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(-36), "-10");
        assert_eq!(to_base36(i32::MIN), "-zik0zk");
    }
}
