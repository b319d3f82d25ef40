//! Shared caller-supplied callbacks.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Failure reported by a caller-supplied handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::Failed(message.to_string())
    }
}

/// Result returned by every handler.
pub type HandlerResult = Result<(), HandlerError>;

/// A shared callable compared by identity.
///
/// Clones refer to the same closure, so a clone can later be used to
/// deregister the original.
pub struct Callback<E: ?Sized>(Rc<dyn Fn(&E) -> HandlerResult>);

impl<E: ?Sized> Callback<E> {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&E) -> HandlerResult + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the closure.
    pub fn call(&self, event: &E) -> HandlerResult {
        (self.0)(event)
    }

    /// Invoke the closure, logging a failure instead of returning it.
    pub fn call_logged(&self, event: &E, context: &str) -> bool {
        match self.call(event) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}: {}", context, e);
                false
            }
        }
    }

    /// Whether two callbacks wrap the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<E: ?Sized> Clone for Callback<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E: ?Sized> PartialEq for Callback<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<E: ?Sized> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_identity() {
        let a: Callback<()> = Callback::new(|_| Ok(()));
        let b: Callback<()> = Callback::new(|_| Ok(()));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_call_logged_reports_failure() {
        let hits = Rc::new(Cell::new(0));
        let hits_ref = Rc::clone(&hits);
        let ok: Callback<u32> = Callback::new(move |n| {
            hits_ref.set(hits_ref.get() + n);
            Ok(())
        });
        let failing: Callback<u32> = Callback::new(|_| Err("boom".into()));

        assert!(ok.call_logged(&2, "test"));
        assert!(!failing.call_logged(&2, "test"));
        assert_eq!(hits.get(), 2);
    }
}
