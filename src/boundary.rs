//! Panic boundary around drawing and event handling.

use crate::logger;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// A fault caught by [`guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub message: String,
}

impl Fault {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown fault".to_string()
        };
        Self { message }
    }
}

/// Runs `f`, turning a panic into a [`Fault`]. State touched by `f` may be
/// half-updated afterwards; callers discard it.
pub fn guard<T>(f: impl FnOnce() -> T) -> Result<T, Fault> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let fault = Fault::from_payload(payload);
        logger::log(&format!("Fault caught: {}", fault.message));
        fault
    })
}

/// Routes panic reports to the log file. The terminal belongs to the TUI.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        logger::log(&format!("panic: {}", info));
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_passes_values_through() {
        assert_eq!(guard(|| 21 * 2), Ok(42));
    }

    #[test]
    fn test_guard_captures_str_panic() {
        let fault = guard(|| -> u32 { panic!("render exploded") }).unwrap_err();
        assert_eq!(fault.message, "render exploded");
    }

    #[test]
    fn test_guard_captures_formatted_panic() {
        let index = 7;
        let fault = guard(|| -> u32 { panic!("no question at {}", index) }).unwrap_err();
        assert_eq!(fault.message, "no question at 7");
    }

    #[test]
    fn test_guard_allows_mutation() {
        let mut counter = 0;
        guard(|| counter += 1).unwrap();
        assert_eq!(counter, 1);
    }
}
