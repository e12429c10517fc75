use thiserror::Error;

/// A malformed authoring command. Nothing in the scene is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("{verb} expects {expected} tokens, got {found}")]
    WrongArity {
        verb: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{verb} token {index} ({token:?}) is not a number")]
    InvalidNumber {
        verb: &'static str,
        index: usize,
        token: String,
    },

    #[error("{verb} token {index} ({token:?}) is not an integer flag")]
    InvalidFlag {
        verb: &'static str,
        index: usize,
        token: String,
    },
}

/// A command referenced a name that no registry knows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("no node registered as {0:?}")]
    Node(String),

    #[error("no point registered as {0:?}")]
    Point(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),
}

/// Reports a broken caller contract: fatal in debug builds, logged and
/// skipped in release builds. Callers return right after invoking it.
#[macro_export]
macro_rules! precondition_violation {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            panic!("precondition violated: {}", format!($($arg)*));
        } else {
            log::error!("precondition violated: {}", format!($($arg)*));
        }
    };
}
