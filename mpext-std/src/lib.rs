//! # mpext-std
//!
//! Standard implementations for MessagePack extension-type registration.
//!
//! This crate provides:
//! - **Registries**: [`PackerExtRegistry`], [`UnpackerExtRegistry`]
//! - **Factory**: [`Factory`], which owns one registry per side and stamps
//!   every packer/unpacker it builds with an independent snapshot
//! - **Codec instances**: [`Packer`], [`Unpacker`]
//! - **Host arguments**: [`Arg`], for callers that pass loosely-typed argument lists
//! - **Standard hooks**: logging wrappers for encoders and decoders
//! - **Testing helpers**: recording/counting hooks

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use mpext_core;
pub use rmpv;

// Modules
pub mod args;
pub mod error;
pub mod factory;
pub mod hooks;
pub mod options;
pub mod packer;
pub mod registry;
pub mod testing;
pub mod unpacker;

pub use args::Arg;
pub use error::{CodecError, Error};
pub use factory::Factory;
pub use options::{ExtOptions, PackerOptions, UnpackerOptions};
pub use packer::Packer;
pub use registry::{IndexedRegistry, PackerExtRegistry, UnpackerExtRegistry};
pub use unpacker::{Unpacked, Unpacker};
