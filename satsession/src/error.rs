use thiserror::Error;

/// The caller passed something the operation cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("wrong argument type {found} (expected {expected})")]
    WrongKind {
        found: &'static str,
        expected: &'static str,
    },

    #[error("variable or literal of a different session")]
    ForeignHandle,
}

/// The operation is not allowed in the session's current result state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("not yet solved")]
    NotSolved,

    #[error("unsatisfiable")]
    Unsatisfiable,

    #[error("unsatisfiable under assumptions")]
    UnsatisfiableUnderAssumptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    State(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, Error>;
