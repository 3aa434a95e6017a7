//! A shared cell for values observed inside invoked functions.
//!
//! Invocations run inside `App::new`, so tests hand a [`Capture`] clone to the
//! invoked closure and inspect it once composition returns.
//!
//! # Examples
//!
//! ```
//! use fxx_test_helpers::capture::Capture;
//!
//! let seen = Capture::new();
//! let sink = seen.clone();
//! sink.set("hello");
//! assert_eq!(seen.get(), Some("hello"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable handle to one captured value.
#[derive(Debug)]
pub struct Capture<T> {
    slot: Arc<Mutex<Option<T>>>,
}

impl<T> Capture<T> {
    /// Create an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Store `value`, replacing any earlier one.
    pub fn set(&self, value: T) {
        *self.slot.lock() = Some(value);
    }

    /// Remove and return the captured value.
    #[must_use]
    pub fn take(&self) -> Option<T> {
        self.slot.lock().take()
    }

    /// Whether a value has been captured.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.slot.lock().is_some()
    }
}

impl<T: Clone> Capture<T> {
    /// Copy of the captured value.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.slot.lock().clone()
    }
}

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self::new()
    }
}
