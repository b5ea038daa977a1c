use thiserror::Error;

use crate::instr::Label;

/// A body that breaks the stack or branch invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },
    #[error("instruction {at} reached with stack depth {found}, expected {expected}")]
    InconsistentStack { at: usize, expected: usize, found: usize },
    #[error("branch to {label}, which is never marked")]
    UndefinedLabel { label: Label },
    #[error("{label} is marked more than once")]
    DuplicateLabel { label: Label },
    #[error("return at instruction {at} leaves {depth} values on the stack")]
    NonEmptyReturn { at: usize, depth: usize },
    #[error("instruction {at} reads argument {index}, body takes {count}")]
    BadArgument { at: usize, index: u16, count: u16 },
    #[error("instruction {at} uses local {index}, body declares {count}")]
    BadLocal { at: usize, index: u16, count: u16 },
    #[error("control falls off the end of the body")]
    FallsOffEnd,
}

/// Failures while installing or removing a hook. All of them happen at load
/// time.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("patch point not found in {method}: no instruction matching {pattern}")]
    PatchNotFound { method: String, pattern: String },
    #[error("{method} is already hooked")]
    AlreadyHooked { method: String },
    #[error("cursor at {index} in {method} has no instruction to remove")]
    NothingToRemove { method: String, index: usize },
    #[error("patched {method} failed verification: {source}")]
    Invalid {
        method: String,
        #[source]
        source: VerifyError,
    },
}

/// Failures while running a body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },
    #[error("instruction {at} expected {expected}, found {found}")]
    TypeMismatch { at: usize, expected: &'static str, found: &'static str },
    #[error("argument {index} is out of range")]
    NoArgument { index: u16 },
    #[error("local {index} is out of range")]
    NoLocal { index: u16 },
    #[error("{0} cannot be copied onto the stack")]
    NotCopyable(&'static str),
    #[error("branch to unmarked {0}")]
    UndefinedLabel(Label),
    #[error("{name}: {message}")]
    Host { name: String, message: String },
    #[error("gave up after {0} steps")]
    StepLimit(usize),
    #[error("refusing to run an invalid body: {0}")]
    Invalid(#[from] VerifyError),
}

impl ExecError {
    /// Failure reported by a constructor or delegate.
    pub fn host(name: impl Into<String>, message: impl Into<String>) -> Self {
        ExecError::Host { name: name.into(), message: message.into() }
    }
}
