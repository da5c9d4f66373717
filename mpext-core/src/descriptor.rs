//! Type identity tokens and descriptors.
//!
//! Registries are keyed by [`TypeKey`], a plain token derived from
//! [`TypeId`], rather than by any live type object. A [`TypeDescriptor`]
//! pairs that token with the information registration needs: whether the
//! type can be instantiated, and which named encode/decode operations it
//! exposes for [`Hook::NamedMethod`](crate::Hook::NamedMethod) resolution.

use crate::{
    ext_type::{ExtType, FROM_MSGPACK_EXT, TO_MSGPACK_EXT},
    hook::{DecodeFn, EncodeFn, ExtDecoder, ExtEncoder, erase_decoder, erase_encoder},
};
use indexmap::IndexMap;
use std::{
    any::{Any, TypeId, type_name},
    borrow::{Borrow, Cow},
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::Arc,
};

/// A stable identifier for a Rust type.
///
/// Equality and hashing use only the [`TypeId`]; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name as reported by [`type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Lets registries look entries up straight from `<dyn Any>::type_id()`.
impl Borrow<TypeId> for TypeKey {
    fn borrow(&self) -> &TypeId {
        &self.id
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

/// Whether a described type can have values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A sized type whose values can be packed.
    Concrete,
    /// An interface-only type such as `dyn Trait`; never registrable.
    Abstract,
}

#[derive(Clone)]
struct DescriptorInner {
    key: TypeKey,
    kind: TypeKind,
    encoders: IndexMap<Cow<'static, str>, Arc<EncodeFn>>,
    decoders: IndexMap<Cow<'static, str>, Arc<DecodeFn>>,
}

/// A shareable description of a type that may be registered.
///
/// Cloning is cheap and shares the method table.
///
/// # Example
///
/// ```rust
/// use mpext_core::{TypeDescriptor, TypeKind};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point = TypeDescriptor::builder::<Point>()
///     .encoder("to_bytes", |p: &Point| {
///         Ok::<_, std::io::Error>([p.x.to_be_bytes(), p.y.to_be_bytes()].concat())
///     })
///     .build();
///
/// assert_eq!(point.kind(), TypeKind::Concrete);
/// assert!(point.encoder("to_bytes").is_some());
/// assert!(point.decoder("from_bytes").is_none());
/// ```
#[derive(Clone)]
pub struct TypeDescriptor {
    inner: Arc<DescriptorInner>,
}

impl TypeDescriptor {
    /// Describe a concrete type with an empty method table.
    pub fn of<T: Any>() -> Self {
        Self::builder::<T>().build()
    }

    /// Describe an [`ExtType`], exposing `to_msgpack_ext` and `from_msgpack_ext`.
    pub fn ext<T: ExtType>() -> Self {
        Self::builder::<T>().ext_methods().build()
    }

    /// Describe an interface-only type (e.g. `dyn Trait`).
    ///
    /// Such descriptors exist so embedding hosts can hand them around; every
    /// registration entry point rejects them.
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            inner: Arc::new(DescriptorInner {
                key: TypeKey::of::<T>(),
                kind: TypeKind::Abstract,
                encoders: IndexMap::new(),
                decoders: IndexMap::new(),
            }),
        }
    }

    /// Start describing `T` with named methods.
    pub fn builder<T: Any>() -> DescriptorBuilder<T> {
        DescriptorBuilder {
            inner: DescriptorInner {
                key: TypeKey::of::<T>(),
                kind: TypeKind::Concrete,
                encoders: IndexMap::new(),
                decoders: IndexMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// The identity token of the described type.
    pub fn key(&self) -> TypeKey {
        self.inner.key
    }

    /// The described type's name.
    pub fn name(&self) -> &'static str {
        self.inner.key.name
    }

    /// Concrete or abstract.
    pub fn kind(&self) -> TypeKind {
        self.inner.kind
    }

    /// True for concrete types.
    pub fn is_instantiable(&self) -> bool {
        self.inner.kind == TypeKind::Concrete
    }

    /// Look up a named encode operation.
    pub fn encoder(&self, name: &str) -> Option<&Arc<EncodeFn>> {
        self.inner.encoders.get(name)
    }

    /// Look up a named decode operation.
    pub fn decoder(&self, name: &str) -> Option<&Arc<DecodeFn>> {
        self.inner.decoders.get(name)
    }

    /// Names of every exposed operation, encoders first.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.inner
            .encoders
            .keys()
            .chain(self.inner.decoders.keys())
            .map(|name| name.as_ref())
    }

    /// Number of live handles sharing this descriptor.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.inner.key == other.inner.key
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.inner.key.name)
            .field("kind", &self.inner.kind)
            .field("methods", &self.method_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`TypeDescriptor`] of `T`.
pub struct DescriptorBuilder<T> {
    inner: DescriptorInner,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> DescriptorBuilder<T> {
    /// Expose a named encode operation. A later call with the same name wins.
    pub fn encoder<E: ExtEncoder<T>>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        encoder: E,
    ) -> Self {
        self.inner
            .encoders
            .insert(name.into(), erase_encoder::<T, E>(encoder));
        self
    }

    /// Expose a named decode operation. A later call with the same name wins.
    pub fn decoder<D: ExtDecoder<T>>(mut self, name: impl Into<Cow<'static, str>>, decoder: D) -> Self
    where
        T: Send,
    {
        self.inner
            .decoders
            .insert(name.into(), erase_decoder::<T, D>(decoder));
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            inner: Arc::new(self.inner),
        }
    }
}

impl<T: ExtType> DescriptorBuilder<T> {
    /// Expose the conventional [`ExtType`] operations under their usual names.
    pub fn ext_methods(self) -> Self {
        self.encoder(TO_MSGPACK_EXT, T::to_msgpack_ext)
            .decoder(FROM_MSGPACK_EXT, T::from_msgpack_ext)
    }
}
