//! # mpext - MessagePack extension types
//!
//! `mpext` maps application types to MessagePack extension codes. A
//! [`Factory`] holds the registrations; every [`Packer`] and [`Unpacker`] it
//! builds carries its own snapshot of them, so registering more types later
//! never changes a codec already handed out.
//!
//! ## Quick Start
//!
//! ```rust
//! use mpext::{BoxError, ExtType, Factory};
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(i16);
//!
//! impl ExtType for Celsius {
//!     fn to_msgpack_ext(&self) -> Result<Vec<u8>, BoxError> {
//!         Ok(self.0.to_be_bytes().to_vec())
//!     }
//!
//!     fn from_msgpack_ext(data: &[u8]) -> Result<Self, BoxError> {
//!         Ok(Celsius(i16::from_be_bytes(data.try_into()?)))
//!     }
//! }
//!
//! let mut factory = Factory::new();
//! factory.register_ext::<Celsius>(1)?;
//!
//! let mut packer = factory.packer();
//! packer.write(&Celsius(-5))?;
//!
//! let mut unpacker = factory.unpacker();
//! unpacker.feed(packer.as_bytes());
//! let value = unpacker.read()?.downcast::<Celsius>().ok();
//! assert_eq!(value, Some(Celsius(-5)));
//! # Ok::<(), mpext::Error>(())
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): registration and codec events through `tracing`
//! - `macros`: `#[derive(ExtType)]` backed by `rmp-serde`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use mpext_core::{
    // Errors
    BoxError,
    CodeRangeError,
    // Hooks
    DecodeFn,
    DecodeHook,
    // Types
    DescriptorBuilder,
    Direction,
    EncodeFn,
    EncodeHook,
    // Codes
    ExtCode,
    ExtDecoder,
    ExtEncoder,
    ExtObject,
    // Registries
    ExtRegistry,
    ExtType,
    FROM_MSGPACK_EXT,
    Hook,
    HookError,
    HookSource,
    PackerEntry,
    RegisterError,
    RegistryEntry,
    TO_MSGPACK_EXT,
    Traced,
    TypeDescriptor,
    TypeKey,
    TypeKind,
    UnpackerEntry,
};

pub use mpext_std::{
    Arg, CodecError, Error, ExtOptions, Factory, IndexedRegistry, Packer, PackerExtRegistry,
    PackerOptions, Unpacked, Unpacker, UnpackerExtRegistry, UnpackerOptions,
};

pub use mpext_std::rmpv;

/// Standard hook wrappers.
pub mod hooks {
    pub use mpext_std::hooks::{LoggingDecoder, LoggingEncoder};
}

/// Testing utilities.
pub mod testing {
    pub use mpext_std::testing::{CountingDecoder, RecordingEncoder};
}

/// Prelude module - common imports for mpext.
///
/// # Usage
///
/// ```rust
/// use mpext::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, ExtCode, ExtDecoder, ExtEncoder, ExtOptions, ExtType, Factory, Packer,
        TypeDescriptor, Unpacked, Unpacker,
    };
}

#[cfg(feature = "macros")]
pub use mpext_macros::ExtType;

#[doc(hidden)]
#[cfg(feature = "macros")]
pub mod __private {
    pub use rmp_serde;
}
