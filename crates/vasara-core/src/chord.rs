//! Keyboard chord bindings.
//!
//! A chord is a set of simultaneously held keys, written as key names
//! joined by `+` (`"alt+e"`). Key order and case do not matter: the
//! canonical form is lowercase and sorted. A binding fires only when the
//! held key set equals the chord exactly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::callback::Callback;
use crate::input::KeyEvent;

/// Handler invoked when a chord is pressed.
pub type ChordHandler = Callback<KeyEvent>;

/// Canonical key combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Chord(String);

impl Chord {
    /// Parse a chord string such as `"Alt+E"` or `"ctrl++"`.
    ///
    /// An empty segment stands for the plus key, so `"ctrl++"`, `"+ctrl"`
    /// and `"ctrl+"` all name the same chord.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let keys = text
            .split('+')
            .map(|part| if part.is_empty() { "+" } else { part });
        Self::from_keys(keys)
    }

    /// Build a chord from individual key identifiers.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_lowercase()).collect();
        keys.sort();
        keys.dedup();
        Self(keys.join("+"))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no keys are part of the chord.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Chord {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for Chord {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<Chord> for String {
    fn from(chord: Chord) -> Self {
        chord.0
    }
}

/// Registry of chord bindings.
///
/// Cloning yields another handle to the same table, so handlers can
/// capture the dispatcher and rebind themselves.
#[derive(Clone, Default)]
pub struct ChordDispatcher {
    bindings: Rc<RefCell<HashMap<Chord, Vec<ChordHandler>>>>,
}

impl ChordDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the handlers of `chord`.
    pub fn register(&self, chord: impl Into<Chord>, handler: ChordHandler) {
        let chord = chord.into();
        log::debug!("Registering handler for chord '{}'", chord);
        self.bindings.borrow_mut().entry(chord).or_default().push(handler);
    }

    /// Remove `handler` from `chord`. Unknown chords or handlers are ignored.
    pub fn deregister(&self, chord: impl Into<Chord>, handler: &ChordHandler) {
        let chord = chord.into();
        let mut bindings = self.bindings.borrow_mut();
        let Some(handlers) = bindings.get_mut(&chord) else {
            return;
        };
        let Some(index) = handlers.iter().position(|h| h.ptr_eq(handler)) else {
            return;
        };
        handlers.remove(index);
        if handlers.is_empty() {
            bindings.remove(&chord);
        }
        log::debug!("Deregistered handler for chord '{}'", chord);
    }

    /// Invoke every handler bound to exactly `chord`, in registration order.
    ///
    /// Handlers see a snapshot of the binding list, so they may register or
    /// deregister bindings while running. A failing handler is logged and
    /// the remaining handlers still run. Returns the number invoked.
    pub fn dispatch(&self, chord: &Chord, event: &KeyEvent) -> usize {
        if chord.is_empty() {
            return 0;
        }
        let handlers = match self.bindings.borrow().get(chord) {
            Some(handlers) => handlers.clone(),
            None => return 0,
        };
        let context = format!("Chord '{}' handler", chord);
        for handler in &handlers {
            handler.call_logged(event, &context);
        }
        handlers.len()
    }

    /// Whether any handler is bound to `chord`.
    pub fn is_bound(&self, chord: impl Into<Chord>) -> bool {
        self.bindings.borrow().contains_key(&chord.into())
    }

    /// Number of handlers bound to `chord`.
    pub fn handler_count(&self, chord: impl Into<Chord>) -> usize {
        self.bindings
            .borrow()
            .get(&chord.into())
            .map_or(0, Vec::len)
    }

    /// All bound chords, sorted.
    pub fn bound_chords(&self) -> Vec<Chord> {
        let mut chords: Vec<Chord> = self.bindings.borrow().keys().cloned().collect();
        chords.sort();
        chords
    }
}

impl fmt::Debug for ChordDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChordDispatcher")
            .field("chords", &self.bound_chords())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> ChordHandler {
        let log = Rc::clone(log);
        Callback::new(move |_| {
            log.borrow_mut().push(name);
            Ok(())
        })
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(Chord::parse("Alt+E"), Chord::parse("e+alt"));
        assert_eq!(Chord::parse("ALT+E"), Chord::parse("e+alt"));
        assert_eq!(Chord::parse("E+alt").as_str(), "alt+e");
        assert_eq!(Chord::parse("shift+control+s").as_str(), "control+s+shift");
    }

    #[test]
    fn test_plus_key() {
        assert_eq!(Chord::parse("ctrl++").as_str(), "++ctrl");
        assert_eq!(Chord::parse("+").as_str(), "+");
        assert_eq!(Chord::parse("+ctrl"), Chord::parse("ctrl++"));
        assert_eq!(Chord::parse("Ctrl+"), Chord::parse("ctrl++"));
        assert_eq!(Chord::parse("++ctrl").as_str(), "++ctrl");
        assert!(Chord::parse("").is_empty());
        assert_eq!(Chord::from_keys(["Control", "+"]), Chord::parse("control++"));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        assert_eq!(Chord::parse("a+A+b").as_str(), "a+b");
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        dispatcher.register("a+b", recorder(&log, "first"));
        dispatcher.register("B+A", recorder(&log, "second"));

        let invoked = dispatcher.dispatch(&Chord::parse("a+b"), &KeyEvent::new("b"));

        assert_eq!(invoked, 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispatch_requires_exact_chord() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        dispatcher.register("a+b", recorder(&log, "ab"));

        assert_eq!(dispatcher.dispatch(&Chord::parse("a+b+c"), &KeyEvent::new("c")), 0);
        assert_eq!(dispatcher.dispatch(&Chord::parse("a"), &KeyEvent::new("a")), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_deregister_removes_empty_entries() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = recorder(&log, "first");
        let second = recorder(&log, "second");

        dispatcher.register("alt+e", first.clone());
        dispatcher.register("alt+e", second.clone());

        dispatcher.deregister("e+alt", &first);
        assert_eq!(dispatcher.handler_count("alt+e"), 1);

        dispatcher.dispatch(&Chord::parse("alt+e"), &KeyEvent::new("e"));
        assert_eq!(*log.borrow(), vec!["second"]);

        dispatcher.deregister("alt+e", &second);
        assert!(!dispatcher.is_bound("alt+e"));
        assert!(dispatcher.bound_chords().is_empty());
    }

    #[test]
    fn test_deregister_is_idempotent() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let kept = recorder(&log, "kept");
        let removed = recorder(&log, "removed");

        dispatcher.register("alt+w", kept);
        dispatcher.register("alt+w", removed.clone());

        dispatcher.deregister("alt+w", &removed);
        dispatcher.deregister("alt+w", &removed);
        dispatcher.deregister("never+bound", &removed);

        assert_eq!(dispatcher.handler_count("alt+w"), 1);
        dispatcher.dispatch(&Chord::parse("alt+w"), &KeyEvent::new("w"));
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn test_deregister_unregistered_handler_keeps_sole_binding() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let bound = recorder(&log, "bound");
        let stranger = recorder(&log, "stranger");

        dispatcher.register("x", bound);
        dispatcher.deregister("x", &stranger);

        assert!(dispatcher.is_bound("x"));
    }

    #[test]
    fn test_failing_handler_does_not_stop_others() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        dispatcher.register("f1", Callback::new(|_| Err("broken".into())));
        dispatcher.register("f1", recorder(&log, "after"));

        assert_eq!(dispatcher.dispatch(&Chord::parse("f1"), &KeyEvent::new("f1")), 2);
        assert_eq!(*log.borrow(), vec!["after"]);
    }

    #[test]
    fn test_handler_can_rebind_during_dispatch() {
        let dispatcher = ChordDispatcher::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner = dispatcher.clone();
        let log_ref = Rc::clone(&log);
        dispatcher.register(
            "q",
            Callback::new(move |_| {
                let log_ref = Rc::clone(&log_ref);
                inner.register(
                    "q",
                    Callback::new(move |_| {
                        log_ref.borrow_mut().push("late");
                        Ok(())
                    }),
                );
                Ok(())
            }),
        );

        // The handler added mid-dispatch only runs on the next press.
        assert_eq!(dispatcher.dispatch(&Chord::parse("q"), &KeyEvent::new("q")), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.handler_count("q"), 2);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let chord: Chord = serde_json::from_str("\"E+Alt\"").unwrap();
        assert_eq!(chord.as_str(), "alt+e");
        assert_eq!(serde_json::to_string(&chord).unwrap(), "\"alt+e\"");
    }
}
