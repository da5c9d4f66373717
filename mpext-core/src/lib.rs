//! # mpext-core
//!
//! Core types for registering MessagePack extension types.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that describes extension types without pulling in the packer/unpacker
//! implementations from `mpext-std`.
//!
//! # Building Blocks
//!
//! ## Codes ([`ExtCode`])
//!
//! The extension tag occupies a single signed byte on the wire. [`ExtCode`]
//! is that byte, and converting from a wider integer is where range checking
//! happens.
//!
//! ## Types ([`TypeKey`], [`TypeDescriptor`])
//!
//! Registries never key on live type objects. A [`TypeKey`] is an explicit
//! token built from [`std::any::TypeId`], and a [`TypeDescriptor`] carries
//! that token plus a small method table of named encode/decode operations.
//!
//! ## Hooks ([`Hook`], [`HookSource`])
//!
//! Whatever the caller hands in (a method name, a closure, an object
//! implementing [`ExtEncoder`]/[`ExtDecoder`]) is normalized into a
//! [`Hook`], which the packer and unpacker invoke through one contract.
//!
//! ## Registries ([`ExtRegistry`])
//!
//! The trait shared by the encode-side and decode-side registries, plus the
//! entry types they store.
//!
//! # Error Types
//!
//! - [`RegisterError`] - Validation failures during registration
//! - [`HookError`] - Failures while invoking a hook
//! - [`CodeRangeError`] - A code outside `-128..=127`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod code;
mod descriptor;
mod error;
mod ext_type;
mod hook;
mod registry;

// Re-exports
pub use code::ExtCode;
pub use descriptor::{DescriptorBuilder, TypeDescriptor, TypeKey, TypeKind};
pub use error::{BoxError, CodeRangeError, Direction, HookError, RegisterError};
pub use ext_type::{ExtType, FROM_MSGPACK_EXT, TO_MSGPACK_EXT};
pub use hook::{
    DecodeFn, DecodeHook, EncodeFn, EncodeHook, ExtDecoder, ExtEncoder, ExtObject, Hook,
    HookSource,
};
pub use registry::{ExtRegistry, PackerEntry, RegistryEntry, Traced, UnpackerEntry};
