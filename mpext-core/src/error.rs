//! Error types for mpext.
//!
//! This module provides the error hierarchy shared by every crate in the
//! workspace, built with `thiserror`:
//!
//! - [`RegisterError`] - Errors raised while validating a registration
//! - [`HookError`] - Errors raised while invoking an encode/decode hook
//! - [`CodeRangeError`] - An extension code that does not fit a signed byte

use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An extension code outside the signed-byte range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("extension type code {0} is outside -128..=127")]
pub struct CodeRangeError(pub i128);

/// Errors that can occur while registering an extension type.
///
/// Registration validates every argument before it touches either registry,
/// so receiving one of these means the factory was left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The call received the wrong number of arguments.
    #[error("wrong number of arguments ({given} for {expected})")]
    Arity {
        /// Number of arguments received.
        given: usize,
        /// Accepted argument counts, e.g. `"2..3"`.
        expected: &'static str,
    },

    /// The extension code does not fit a signed byte.
    #[error(transparent)]
    Range(#[from] CodeRangeError),

    /// An argument had the wrong shape.
    #[error("expected {expected} but found {found}")]
    TypeMismatch {
        /// What the argument should have been.
        expected: &'static str,
        /// Description of what was passed instead.
        found: String,
    },
}

/// Which side of the codec a hook serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Application value to extension payload.
    Encode,
    /// Extension payload to application value.
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("packer"),
            Direction::Decode => f.write_str("unpacker"),
        }
    }
}

/// Errors that can occur while invoking a hook.
#[derive(Error, Debug)]
pub enum HookError {
    /// A named-method hook did not resolve against its receiver type.
    #[error("no method `{method}` on {owner}")]
    NoMethod {
        /// The method name that was looked up.
        method: String,
        /// Name of the receiver type.
        owner: &'static str,
    },

    /// The direction was never given a hook at registration.
    #[error("no {direction} hook registered for {target}")]
    Unset {
        /// The side that was exercised.
        direction: Direction,
        /// The type or code that was being processed.
        target: String,
    },

    /// A type-erased hook was called with a value of another type.
    #[error("hook expected a value of type {expected}")]
    Downcast {
        /// The type the hook was built for.
        expected: &'static str,
    },

    /// The user-supplied hook itself failed.
    #[error(transparent)]
    Custom(BoxError),
}

impl From<BoxError> for HookError {
    fn from(err: BoxError) -> Self {
        HookError::Custom(err)
    }
}
