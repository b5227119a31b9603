use thiserror::Error;

/// Runtime errors surfaced to the host. Each variant carries the message
/// text without the kind prefix; [`Display`](std::fmt::Display) adds it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JErrorType {
    #[error("Uncaught syntax error: {0}.")]
    SyntaxError(String),
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    /// A strict-mode function was entered with no receiver and then touched
    /// `this`. Kept apart from [`JErrorType::TypeError`] so callers can tell
    /// a missing receiver from an ordinary bad dereference.
    #[error("Uncaught unbound receiver error: {0}.")]
    UnboundReceiver(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_kind_prefix() {
        let e = JErrorType::ReferenceError("'x' is not defined".to_string());
        assert_eq!(e.to_string(), "Uncaught reference error: 'x' is not defined.");
        let e = JErrorType::UnboundReceiver(
            "cannot read 'this' of an unbound function call".to_string(),
        );
        assert_eq!(
            e.to_string(),
            "Uncaught unbound receiver error: cannot read 'this' of an unbound function call."
        );
    }
}
