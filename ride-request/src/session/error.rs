//! Session error types.

use super::trip::SessionState;

/// Errors from trip session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requested transition is not valid from the current state.
    /// The session is left unchanged.
    #[error("cannot {action} while session is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SessionError::InvalidTransition {
            action: "set destination",
            state: SessionState::Empty,
        };
        assert_eq!(err.to_string(), "cannot set destination while session is Empty");
    }
}
