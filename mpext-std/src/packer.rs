//! The packer: application values to MessagePack bytes.

use crate::{error::CodecError, options::PackerOptions, registry::PackerExtRegistry};
use mpext_core::ExtCode;
use rmpv::Value;
use std::{
    any::{Any, type_name},
    mem,
};

/// Writes values into an in-memory MessagePack buffer.
///
/// Values whose exact type is in the packer's registry are written as
/// extension values through their encode hook; plain [`Value`]s are written
/// as-is. A packer owns its registry outright, so a packer obtained from a
/// [`Factory`](crate::Factory) keeps the registrations it was built with.
#[derive(Debug, Default)]
pub struct Packer {
    buffer: Vec<u8>,
    registry: PackerExtRegistry,
}

impl Packer {
    /// A packer with an empty registry.
    pub fn new() -> Self {
        Self::with_options(PackerOptions::default())
    }

    /// A packer with an empty registry, built from `options`.
    pub fn with_options(options: PackerOptions) -> Self {
        Self {
            buffer: Vec::with_capacity(options.initial_capacity()),
            registry: PackerExtRegistry::new(),
        }
    }

    /// The extension registry this packer consults.
    pub fn registry(&self) -> &PackerExtRegistry {
        &self.registry
    }

    /// Install `registry`, returning the one it replaces.
    pub fn replace_registry(&mut self, registry: PackerExtRegistry) -> PackerExtRegistry {
        mem::replace(&mut self.registry, registry)
    }

    /// Write `value`.
    pub fn write<T: Any>(&mut self, value: &T) -> Result<&mut Self, CodecError> {
        self.write_any(value, type_name::<T>())
    }

    /// Write a type-erased value.
    pub fn write_dyn(&mut self, value: &dyn Any) -> Result<&mut Self, CodecError> {
        self.write_any(value, "dyn Any")
    }

    fn write_any(&mut self, value: &dyn Any, name: &'static str) -> Result<&mut Self, CodecError> {
        if let Some(entry) = self.registry.lookup(value) {
            let code = entry.code();
            let payload = entry.encode(value)?;
            #[cfg(feature = "tracing")]
            {
                tracing::trace!(code = %code, ty = name, len = payload.len(), "packing extension value");
            }
            return self.write_ext(code, payload);
        }
        if let Some(value) = value.downcast_ref::<Value>() {
            return self.write_value(value);
        }
        Err(CodecError::UnregisteredType(name))
    }

    /// Write a plain MessagePack value.
    pub fn write_value(&mut self, value: &Value) -> Result<&mut Self, CodecError> {
        rmpv::encode::write_value(&mut self.buffer, value)?;
        Ok(self)
    }

    /// Write an extension value with an explicit code and payload.
    pub fn write_ext(&mut self, code: ExtCode, payload: Vec<u8>) -> Result<&mut Self, CodecError> {
        self.write_value(&Value::Ext(code.get(), payload))
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the bytes written so far, leaving the buffer empty.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        mem::take(&mut self.buffer)
    }

    /// Consume the packer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Discard the bytes written so far.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpext_core::{
        BoxError, ExtRegistry, HookError, HookSource, PackerEntry, TypeDescriptor,
    };

    #[derive(Debug)]
    struct Flag(bool);

    fn registry_with_flag(hook: bool) -> PackerExtRegistry {
        let ty = TypeDescriptor::of::<Flag>();
        let hook = hook.then(|| {
            HookSource::encoder(|f: &Flag| Ok::<_, BoxError>(vec![f.0 as u8])).resolve(&ty)
        });
        let mut registry = PackerExtRegistry::new();
        registry.put(PackerEntry::new(ty, ExtCode::new(7), hook));
        registry
    }

    #[test]
    fn test_registered_type_is_written_as_ext() {
        let mut packer = Packer::new();
        packer.replace_registry(registry_with_flag(true));
        packer.write(&Flag(true)).unwrap();

        // fixext 1, type 7, payload 0x01
        assert_eq!(packer.as_bytes(), &[0xd4, 0x07, 0x01]);
    }

    #[test]
    fn test_plain_values_bypass_registry() {
        let mut packer = Packer::new();
        packer.write(&Value::from(1)).unwrap().write(&Value::Nil).unwrap();
        assert_eq!(packer.take_bytes(), vec![0x01, 0xc0]);
        assert!(packer.is_empty());
    }

    #[test]
    fn test_unregistered_type_fails() {
        let mut packer = Packer::new();
        let err = packer.write(&Flag(false)).unwrap_err();
        assert!(matches!(err, CodecError::UnregisteredType(name) if name.ends_with("Flag")));
        assert!(packer.is_empty());
    }

    #[test]
    fn test_unset_hook_fails_at_write() {
        let mut packer = Packer::new();
        packer.replace_registry(registry_with_flag(false));
        let err = packer.write(&Flag(true)).unwrap_err();
        assert!(matches!(err, CodecError::Hook(HookError::Unset { .. })));
        assert!(packer.is_empty());
    }

    #[test]
    fn test_replace_registry_returns_previous() {
        let mut packer = Packer::new();
        let previous = packer.replace_registry(registry_with_flag(true));
        assert!(previous.is_empty());
        assert_eq!(packer.registry().len(), 1);
    }
}
