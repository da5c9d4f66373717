//! Registry entries and the registry contract.
//!
//! Each side of the codec keeps its own registry: packers look entries up by
//! the value's type, unpackers by the extension code read off the wire.

use crate::{
    code::ExtCode,
    descriptor::{TypeDescriptor, TypeKey},
    error::{Direction, HookError},
    hook::{DecodeHook, EncodeHook, ExtObject, Hook},
};
use std::{any::Any, hash::Hash};

/// A reference owned by a registry, as reported to [`ExtRegistry::trace`].
#[derive(Debug, Clone, Copy)]
pub enum Traced<'a> {
    /// A registered type.
    Type(&'a TypeDescriptor),
    /// A packer-side hook.
    EncodeHook(&'a EncodeHook),
    /// An unpacker-side hook.
    DecodeHook(&'a DecodeHook),
}

/// An entry that knows its own registry key.
pub trait RegistryEntry: Clone + Send + Sync + 'static {
    /// The key the registry stores this entry under.
    type Key: Eq + Hash + Clone + Send + Sync + 'static;

    /// This entry's key.
    fn key(&self) -> Self::Key;

    /// Report every reference this entry owns.
    fn trace<'a>(&'a self, tracer: &mut dyn FnMut(Traced<'a>));
}

/// The encode-side association of a type with a code and hook.
#[derive(Debug, Clone)]
pub struct PackerEntry {
    associated_type: TypeDescriptor,
    code: ExtCode,
    hook: Option<EncodeHook>,
}

impl PackerEntry {
    /// Create an entry. A `None` hook fails when the type is packed.
    pub fn new(associated_type: TypeDescriptor, code: ExtCode, hook: Option<EncodeHook>) -> Self {
        Self {
            associated_type,
            code,
            hook,
        }
    }

    /// The registered type.
    pub fn associated_type(&self) -> &TypeDescriptor {
        &self.associated_type
    }

    /// The extension code written for this type.
    pub fn code(&self) -> ExtCode {
        self.code
    }

    /// The encode hook, if one was registered.
    pub fn hook(&self) -> Option<&EncodeHook> {
        self.hook.as_ref()
    }

    /// Encode `value` into a payload.
    pub fn encode(&self, value: &dyn Any) -> Result<Vec<u8>, HookError> {
        match &self.hook {
            Some(hook) => hook.encode(value),
            None => Err(HookError::Unset {
                direction: Direction::Encode,
                target: self.associated_type.name().to_string(),
            }),
        }
    }
}

impl RegistryEntry for PackerEntry {
    type Key = TypeKey;

    fn key(&self) -> TypeKey {
        self.associated_type.key()
    }

    fn trace<'a>(&'a self, tracer: &mut dyn FnMut(Traced<'a>)) {
        tracer(Traced::Type(&self.associated_type));
        if let Some(hook) = &self.hook {
            tracer(Traced::EncodeHook(hook));
            if let Hook::NamedMethod { receiver, .. } = hook {
                tracer(Traced::Type(receiver));
            }
        }
    }
}

/// The decode-side association of a code with a hook.
#[derive(Debug, Clone)]
pub struct UnpackerEntry {
    code: ExtCode,
    hook: Option<DecodeHook>,
}

impl UnpackerEntry {
    /// Create an entry. A `None` hook fails when the code is read.
    pub fn new(code: ExtCode, hook: Option<DecodeHook>) -> Self {
        Self { code, hook }
    }

    /// The extension code this entry handles.
    pub fn code(&self) -> ExtCode {
        self.code
    }

    /// The decode hook, if one was registered.
    pub fn hook(&self) -> Option<&DecodeHook> {
        self.hook.as_ref()
    }

    /// Decode a payload tagged with this entry's code.
    pub fn decode(&self, data: &[u8]) -> Result<ExtObject, HookError> {
        match &self.hook {
            Some(hook) => hook.decode(data),
            None => Err(HookError::Unset {
                direction: Direction::Decode,
                target: format!("code {}", self.code),
            }),
        }
    }
}

impl RegistryEntry for UnpackerEntry {
    type Key = ExtCode;

    fn key(&self) -> ExtCode {
        self.code
    }

    fn trace<'a>(&'a self, tracer: &mut dyn FnMut(Traced<'a>)) {
        if let Some(hook) = &self.hook {
            tracer(Traced::DecodeHook(hook));
            if let Hook::NamedMethod { receiver, .. } = hook {
                tracer(Traced::Type(receiver));
            }
        }
    }
}

/// The operations every extension registry supports.
///
/// Registries own their entries outright. [`duplicate`](Self::duplicate)
/// yields storage that shares no mutable state with the source, so a codec
/// built from a snapshot never observes later registrations.
pub trait ExtRegistry: Default + Clone + Send + Sync + 'static {
    /// The entry type stored.
    type Entry: RegistryEntry;

    /// Insert or overwrite the entry for its key, returning the previous one.
    fn put(&mut self, entry: Self::Entry) -> Option<Self::Entry>;

    /// Look an entry up by key.
    fn get(&self, key: &<Self::Entry as RegistryEntry>::Key) -> Option<&Self::Entry>;

    /// An independent copy with value-equal entries.
    fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Release every entry. Calling this on an empty registry is a no-op.
    fn clear(&mut self);

    /// Report every owned reference to `tracer`.
    fn trace<'a>(&'a self, tracer: &mut dyn FnMut(Traced<'a>));

    /// Number of entries.
    fn len(&self) -> usize;

    /// True when no entries are registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
