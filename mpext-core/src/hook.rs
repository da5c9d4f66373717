//! # Hooks
//!
//! A hook is the callable a packer invokes to turn an application value into
//! an extension payload, or an unpacker invokes to turn a payload back into a
//! value.
//!
//! Callers may supply hooks in several forms: the name of an operation the
//! type exposes, a closure, or any object implementing [`ExtEncoder`] /
//! [`ExtDecoder`]. Each form arrives as a [`HookSource`] and is normalized
//! once, at registration, into a [`Hook`]. From then on both codec paths see
//! exactly two shapes:
//!
//! - [`Hook::NamedMethod`] - resolved against the receiver type's method
//!   table each time it is invoked
//! - [`Hook::Callable`] - a type-erased function, invoked directly

use crate::{
    descriptor::{TypeDescriptor, TypeKey},
    error::{BoxError, HookError},
};
use std::{
    any::{Any, type_name},
    borrow::Cow,
    fmt,
    sync::Arc,
};

/// A decoded extension value.
pub type ExtObject = Box<dyn Any + Send>;

/// Type-erased encode contract.
pub type EncodeFn = dyn Fn(&dyn Any) -> Result<Vec<u8>, HookError> + Send + Sync;

/// Type-erased decode contract.
pub type DecodeFn = dyn Fn(&[u8]) -> Result<ExtObject, HookError> + Send + Sync;

/// Anything that can encode a `T` into an extension payload.
///
/// Implemented for closures `Fn(&T) -> Result<Vec<u8>, E>`; implement it
/// directly for stateful encoder objects.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot encode values of type `{T}`",
    label = "missing `ExtEncoder<{T}>` implementation",
    note = "Encoders are closures `Fn(&{T}) -> Result<Vec<u8>, E>` or types implementing `encode`."
)]
pub trait ExtEncoder<T>: Send + Sync + 'static {
    /// Encode `value` into a payload.
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError>;
}

impl<T, F, E> ExtEncoder<T> for F
where
    F: Fn(&T) -> Result<Vec<u8>, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        (self)(value).map_err(Into::into)
    }
}

/// Anything that can rebuild a `T` from an extension payload.
///
/// Implemented for closures `Fn(&[u8]) -> Result<T, E>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot decode values of type `{T}`",
    label = "missing `ExtDecoder<{T}>` implementation",
    note = "Decoders are closures `Fn(&[u8]) -> Result<{T}, E>` or types implementing `decode`."
)]
pub trait ExtDecoder<T>: Send + Sync + 'static {
    /// Decode a payload.
    fn decode(&self, data: &[u8]) -> Result<T, BoxError>;
}

impl<T, F, E> ExtDecoder<T> for F
where
    F: Fn(&[u8]) -> Result<T, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn decode(&self, data: &[u8]) -> Result<T, BoxError> {
        (self)(data).map_err(Into::into)
    }
}

pub(crate) fn erase_encoder<T: Any, E: ExtEncoder<T>>(encoder: E) -> Arc<EncodeFn> {
    Arc::new(move |value: &dyn Any| {
        let value = value.downcast_ref::<T>().ok_or(HookError::Downcast {
            expected: type_name::<T>(),
        })?;
        encoder.encode(value).map_err(HookError::Custom)
    })
}

pub(crate) fn erase_decoder<T: Any + Send, D: ExtDecoder<T>>(decoder: D) -> Arc<DecodeFn> {
    Arc::new(move |data: &[u8]| {
        decoder
            .decode(data)
            .map(|value| Box::new(value) as ExtObject)
            .map_err(HookError::Custom)
    })
}

/// A normalized hook.
pub enum Hook<F: ?Sized> {
    /// An operation looked up by name on `receiver` at call time.
    NamedMethod {
        /// Operation name.
        name: Cow<'static, str>,
        /// The type whose method table is searched.
        receiver: TypeDescriptor,
    },
    /// An already-bound function.
    Callable(Arc<F>),
}

/// Hook used by packers.
pub type EncodeHook = Hook<EncodeFn>;

/// Hook used by unpackers.
pub type DecodeHook = Hook<DecodeFn>;

impl<F: ?Sized> Hook<F> {
    /// The method name, for named-method hooks.
    pub fn method_name(&self) -> Option<&str> {
        match self {
            Hook::NamedMethod { name, .. } => Some(name),
            Hook::Callable(_) => None,
        }
    }

    /// True for already-bound hooks.
    pub fn is_callable(&self) -> bool {
        matches!(self, Hook::Callable(_))
    }
}

impl EncodeHook {
    /// Encode `value` through this hook.
    pub fn encode(&self, value: &dyn Any) -> Result<Vec<u8>, HookError> {
        match self {
            Hook::NamedMethod { name, receiver } => {
                let method = receiver.encoder(name).ok_or_else(|| HookError::NoMethod {
                    method: name.to_string(),
                    owner: receiver.name(),
                })?;
                method(value)
            }
            Hook::Callable(f) => f(value),
        }
    }
}

impl DecodeHook {
    /// Decode `data` through this hook.
    pub fn decode(&self, data: &[u8]) -> Result<ExtObject, HookError> {
        match self {
            Hook::NamedMethod { name, receiver } => {
                let method = receiver.decoder(name).ok_or_else(|| HookError::NoMethod {
                    method: name.to_string(),
                    owner: receiver.name(),
                })?;
                method(data)
            }
            Hook::Callable(f) => f(data),
        }
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        match self {
            Hook::NamedMethod { name, receiver } => Hook::NamedMethod {
                name: name.clone(),
                receiver: receiver.clone(),
            },
            Hook::Callable(f) => Hook::Callable(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::NamedMethod { name, receiver } => f
                .debug_struct("NamedMethod")
                .field("name", name)
                .field("receiver", &receiver.name())
                .finish(),
            Hook::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// A hook as the caller supplied it, before normalization.
pub enum HookSource<F: ?Sized> {
    /// The name of an operation on the registered type.
    Method(Cow<'static, str>),
    /// A type-erased encoder or decoder object.
    Callable {
        /// The type the object was built for.
        target: TypeKey,
        /// The erased function.
        hook: Arc<F>,
    },
}

impl<F: ?Sized> HookSource<F> {
    /// A source naming an operation on the registered type.
    pub fn method(name: impl Into<Cow<'static, str>>) -> Self {
        HookSource::Method(name.into())
    }

    /// The type an encoder or decoder object was built for. Method names
    /// have no fixed target.
    pub fn target(&self) -> Option<TypeKey> {
        match self {
            HookSource::Method(_) => None,
            HookSource::Callable { target, .. } => Some(*target),
        }
    }

    /// Normalize into a [`Hook`] bound to `receiver`.
    pub fn resolve(&self, receiver: &TypeDescriptor) -> Hook<F> {
        match self {
            HookSource::Method(name) => Hook::NamedMethod {
                name: name.clone(),
                receiver: receiver.clone(),
            },
            HookSource::Callable { hook, .. } => Hook::Callable(Arc::clone(hook)),
        }
    }
}

impl HookSource<EncodeFn> {
    /// Wrap an encoder for values of type `T`.
    pub fn encoder<T: Any, E: ExtEncoder<T>>(encoder: E) -> Self {
        HookSource::Callable {
            target: TypeKey::of::<T>(),
            hook: erase_encoder::<T, E>(encoder),
        }
    }
}

impl HookSource<DecodeFn> {
    /// Wrap a decoder producing values of type `T`.
    pub fn decoder<T: Any + Send, D: ExtDecoder<T>>(decoder: D) -> Self {
        HookSource::Callable {
            target: TypeKey::of::<T>(),
            hook: erase_decoder::<T, D>(decoder),
        }
    }
}

impl<F: ?Sized> Clone for HookSource<F> {
    fn clone(&self) -> Self {
        match self {
            HookSource::Method(name) => HookSource::Method(name.clone()),
            HookSource::Callable { target, hook } => HookSource::Callable {
                target: *target,
                hook: Arc::clone(hook),
            },
        }
    }
}

impl<F: ?Sized> fmt::Debug for HookSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookSource::Method(name) => f.debug_tuple("Method").field(name).finish(),
            HookSource::Callable { target, .. } => {
                f.debug_struct("Callable").field("target", target).finish_non_exhaustive()
            }
        }
    }
}
