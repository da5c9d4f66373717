//! The unpacker: MessagePack bytes to application values.

use crate::{error::CodecError, options::UnpackerOptions, registry::UnpackerExtRegistry};
use mpext_core::{ExtCode, ExtObject, ExtRegistry};
use rmpv::Value;
use std::{any::Any, io, mem};

/// One object read by an [`Unpacker`].
#[derive(Debug)]
pub enum Unpacked {
    /// A plain MessagePack value, or an extension value with no registered hook.
    Value(Value),
    /// An application value produced by a decode hook.
    Ext(ExtObject),
}

impl Unpacked {
    /// The plain value, if this is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Unpacked::Value(value) => Some(value),
            Unpacked::Ext(_) => None,
        }
    }

    /// Convert into the plain value, if this is one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Unpacked::Value(value) => Some(value),
            Unpacked::Ext(_) => None,
        }
    }

    /// True when a decode hook produced this object.
    pub fn is_ext(&self) -> bool {
        matches!(self, Unpacked::Ext(_))
    }

    /// Borrow the decoded application value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Unpacked::Ext(object) => object.downcast_ref::<T>(),
            Unpacked::Value(_) => None,
        }
    }

    /// Take the decoded application value as `T`, or get `self` back.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self {
            Unpacked::Ext(object) => object
                .downcast::<T>()
                .map(|value| *value)
                .map_err(Unpacked::Ext),
            other => Err(other),
        }
    }
}

/// Reads values from a fed MessagePack byte stream.
///
/// Extension values whose code is in the unpacker's registry are passed
/// through their decode hook. The registry is owned by the unpacker, so an
/// unpacker obtained from a [`Factory`](crate::Factory) is unaffected by
/// later registrations on that factory.
#[derive(Debug, Default)]
pub struct Unpacker {
    buffer: Vec<u8>,
    offset: usize,
    registry: UnpackerExtRegistry,
    options: UnpackerOptions,
}

impl Unpacker {
    /// An unpacker with an empty registry.
    pub fn new() -> Self {
        Self::with_options(UnpackerOptions::default())
    }

    /// An unpacker with an empty registry, built from `options`.
    pub fn with_options(options: UnpackerOptions) -> Self {
        Self {
            buffer: Vec::new(),
            offset: 0,
            registry: UnpackerExtRegistry::new(),
            options,
        }
    }

    /// The extension registry this unpacker consults.
    pub fn registry(&self) -> &UnpackerExtRegistry {
        &self.registry
    }

    /// Install `registry`, returning the one it replaces.
    pub fn replace_registry(&mut self, registry: UnpackerExtRegistry) -> UnpackerExtRegistry {
        mem::replace(&mut self.registry, registry)
    }

    /// The options this unpacker was built with.
    pub fn options(&self) -> &UnpackerOptions {
        &self.options
    }

    /// Append bytes to the input buffer.
    pub fn feed(&mut self, data: &[u8]) -> &mut Self {
        if self.offset > 0 {
            self.buffer.drain(..self.offset);
            self.offset = 0;
        }
        self.buffer.extend_from_slice(data);
        self
    }

    /// Bytes fed but not yet consumed.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Drop all buffered input.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.offset = 0;
    }

    /// Read the next object.
    ///
    /// Returns [`CodecError::Incomplete`] without consuming anything when the
    /// buffer does not yet hold a complete object. Malformed input is
    /// reported as [`CodecError::Decode`] and the bytes read up to the fault
    /// are skipped, so the next call resumes after them.
    pub fn read(&mut self) -> Result<Unpacked, CodecError> {
        let mut rest = &self.buffer[self.offset..];
        let available = rest.len();
        if available == 0 {
            return Err(CodecError::Incomplete);
        }

        let decoded = rmpv::decode::read_value(&mut rest);
        let consumed = available - rest.len();
        let value = match decoded {
            Ok(value) => value,
            Err(err) if is_eof(&err) => return Err(CodecError::Incomplete),
            Err(err) => {
                self.offset += consumed.max(1);
                return Err(err.into());
            }
        };
        self.offset += consumed;

        self.resolve(value)
    }

    /// Read every complete object currently buffered.
    pub fn read_all(&mut self) -> Result<Vec<Unpacked>, CodecError> {
        let mut objects = Vec::new();
        loop {
            match self.read() {
                Ok(object) => objects.push(object),
                Err(CodecError::Incomplete) => return Ok(objects),
                Err(err) => return Err(err),
            }
        }
    }

    fn resolve(&self, value: Value) -> Result<Unpacked, CodecError> {
        let (tag, data) = match value {
            Value::Ext(tag, data) => (tag, data),
            other => return Ok(Unpacked::Value(other)),
        };

        let code = ExtCode::new(tag);
        match self.registry.get(&code) {
            Some(entry) => Ok(Unpacked::Ext(entry.decode(&data)?)),
            None if self.options.allows_unknown_ext() => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(code = %code, "returning unregistered extension value raw");
                }
                Ok(Unpacked::Value(Value::Ext(tag, data)))
            }
            None => Err(CodecError::UnknownExtType(code)),
        }
    }
}

fn is_eof(err: &rmpv::decode::Error) -> bool {
    match err {
        rmpv::decode::Error::InvalidMarkerRead(err) | rmpv::decode::Error::InvalidDataRead(err) => {
            err.kind() == io::ErrorKind::UnexpectedEof
        }
        _ => false,
    }
}
