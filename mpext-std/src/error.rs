//! Codec errors and the top-level error type.

use mpext_core::{ExtCode, HookError, RegisterError};
use thiserror::Error;

/// Errors raised by [`Packer`](crate::Packer) and [`Unpacker`](crate::Unpacker).
#[derive(Error, Debug)]
pub enum CodecError {
    /// The packer was asked to write a value it has no extension for.
    #[error("no extension registered for type {0}")]
    UnregisteredType(&'static str),

    /// The unpacker read an extension code it has no entry for.
    #[error("unknown extension type code {0}")]
    UnknownExtType(ExtCode),

    /// The buffer ends before the next complete object.
    #[error("insufficient bytes for a complete object")]
    Incomplete,

    /// An encode or decode hook failed.
    #[error("extension hook failed: {0}")]
    Hook(#[from] HookError),

    /// Writing the MessagePack representation failed.
    #[error("failed to write value: {0}")]
    Encode(#[from] rmpv::encode::Error),

    /// The buffer does not hold valid MessagePack.
    #[error("failed to read value: {0}")]
    Decode(#[from] rmpv::decode::Error),
}

/// Top-level error type for all mpext operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Registration was rejected.
    #[error("registration error: {0}")]
    Register(#[from] RegisterError),

    /// A hook failed outside a codec.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// A packer or unpacker failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}
