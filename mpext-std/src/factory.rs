//! The factory: registration and codec construction.
//!
//! A [`Factory`] owns one encode-side and one decode-side registry.
//! Registering a type validates every argument first and then writes both
//! registries together, so a rejected call leaves the factory untouched.
//! Every [`Packer`] or [`Unpacker`] it builds receives a duplicate of the
//! relevant registry; later registrations never reach codecs already built.
//!
//! # Example
//!
//! ```rust
//! use mpext_std::{ExtOptions, Factory};
//! use mpext_core::TypeDescriptor;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i8,
//!     y: i8,
//! }
//!
//! let mut factory = Factory::new();
//! factory
//!     .register_type_with(
//!         1,
//!         TypeDescriptor::of::<Point>(),
//!         ExtOptions::new()
//!             .packer(|p: &Point| Ok::<_, std::io::Error>(vec![p.x as u8, p.y as u8]))
//!             .unpacker(|data: &[u8]| match data {
//!                 [x, y] => Ok(Point { x: *x as i8, y: *y as i8 }),
//!                 _ => Err("expected two bytes"),
//!             }),
//!     )
//!     .unwrap();
//!
//! let mut packer = factory.packer();
//! packer.write(&Point { x: 3, y: 4 }).unwrap();
//!
//! let mut unpacker = factory.unpacker();
//! unpacker.feed(packer.as_bytes());
//! let point = unpacker.read().unwrap().downcast::<Point>().unwrap();
//! assert_eq!(point, Point { x: 3, y: 4 });
//! ```

use crate::{
    args::Arg,
    options::{ExtOptions, PackerOptions, UnpackerOptions},
    packer::Packer,
    registry::{PackerExtRegistry, UnpackerExtRegistry},
    unpacker::Unpacker,
};
use mpext_core::{
    DecodeFn, EncodeFn, ExtCode, ExtRegistry, ExtType, FROM_MSGPACK_EXT, HookSource, PackerEntry,
    RegisterError, TO_MSGPACK_EXT, TypeDescriptor, TypeKey, UnpackerEntry,
};

/// A fully validated registration, ready to be written.
struct Registration {
    packer: PackerEntry,
    unpacker: UnpackerEntry,
}

impl Registration {
    /// Validate the type and the hooks, then normalize the hooks.
    fn prepare(
        code: ExtCode,
        ty: TypeDescriptor,
        options: Option<&ExtOptions>,
    ) -> Result<Self, RegisterError> {
        if !ty.is_instantiable() {
            return Err(RegisterError::TypeMismatch {
                expected: "concrete type",
                found: format!("abstract type {}", ty.name()),
            });
        }

        let (packer, unpacker): (Option<HookSource<EncodeFn>>, Option<HookSource<DecodeFn>>) =
            match options {
                None => (
                    Some(HookSource::method(TO_MSGPACK_EXT)),
                    Some(HookSource::method(FROM_MSGPACK_EXT)),
                ),
                Some(options) => (
                    options.packer_source().cloned(),
                    options.unpacker_source().cloned(),
                ),
            };

        check_target(packer.as_ref().and_then(HookSource::target), &ty, "packer")?;
        check_target(unpacker.as_ref().and_then(HookSource::target), &ty, "unpacker")?;

        let packer_hook = packer.map(|source| source.resolve(&ty));
        let unpacker_hook = unpacker.map(|source| source.resolve(&ty));

        Ok(Self {
            unpacker: UnpackerEntry::new(code, unpacker_hook),
            packer: PackerEntry::new(ty, code, packer_hook),
        })
    }
}

/// An encoder or decoder object must have been built for the registered type.
fn check_target(
    target: Option<TypeKey>,
    ty: &TypeDescriptor,
    direction: &str,
) -> Result<(), RegisterError> {
    match target {
        Some(target) if target != ty.key() => Err(RegisterError::TypeMismatch {
            expected: "hook for the registered type",
            found: format!("{direction} hook for {}", target.name()),
        }),
        _ => Ok(()),
    }
}

/// Owner of the extension registries; builds pre-configured codecs.
#[derive(Debug, Default)]
pub struct Factory {
    packer_options: PackerOptions,
    unpacker_options: UnpackerOptions,
    packer_registry: PackerExtRegistry,
    unpacker_registry: UnpackerExtRegistry,
}

impl Factory {
    /// An empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a factory from a host argument list. No arguments are accepted.
    pub fn from_args<I>(args: I) -> Result<Self, RegisterError>
    where
        I: IntoIterator<Item = Arg>,
    {
        match args.into_iter().count() {
            0 => Ok(Self::new()),
            given => Err(RegisterError::Arity {
                given,
                expected: "0",
            }),
        }
    }

    /// Register `ty` under `code` using its `to_msgpack_ext` and
    /// `from_msgpack_ext` operations.
    ///
    /// The operations are looked up on `ty` when a packer or unpacker first
    /// needs them, so `ty` should come from [`TypeDescriptor::ext`] or
    /// expose methods with those names.
    pub fn register_type(&mut self, code: i64, ty: TypeDescriptor) -> Result<(), RegisterError> {
        let code = ExtCode::try_from(code)?;
        let registration = Registration::prepare(code, ty, None)?;
        self.commit(registration);
        Ok(())
    }

    /// Register `ty` under `code` with explicit hooks.
    pub fn register_type_with(
        &mut self,
        code: i64,
        ty: TypeDescriptor,
        options: ExtOptions,
    ) -> Result<(), RegisterError> {
        let code = ExtCode::try_from(code)?;
        let registration = Registration::prepare(code, ty, Some(&options))?;
        self.commit(registration);
        Ok(())
    }

    /// Register an [`ExtType`] under `code`.
    pub fn register_ext<T: ExtType>(&mut self, code: i64) -> Result<(), RegisterError> {
        self.register_type(code, TypeDescriptor::ext::<T>())
    }

    /// Register from a host argument list: `(code, type)` or
    /// `(code, type, options)`.
    ///
    /// Checks run in order: argument count, code range, type, options shape.
    pub fn register_type_args<I>(&mut self, args: I) -> Result<(), RegisterError>
    where
        I: IntoIterator<Item = Arg>,
    {
        let args: Vec<Arg> = args.into_iter().collect();
        let given = args.len();
        let mut args = args.into_iter();
        let (Some(code), Some(ty), options, None) =
            (args.next(), args.next(), args.next(), args.next())
        else {
            return Err(RegisterError::Arity {
                given,
                expected: "2..3",
            });
        };

        let code = code.into_code()?;
        let ty = ty.into_type()?;
        let options = options.map(Arg::into_options).transpose()?;

        let registration = Registration::prepare(code, ty, options.as_ref())?;
        self.commit(registration);
        Ok(())
    }

    fn commit(&mut self, registration: Registration) {
        let Registration { packer, unpacker } = registration;
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                code = %packer.code(),
                ty = packer.associated_type().name(),
                packer_hook = packer.hook().is_some(),
                unpacker_hook = unpacker.hook().is_some(),
                "registering extension type"
            );
        }

        let previous = self.packer_registry.put(packer);
        self.unpacker_registry.put(unpacker);

        #[cfg(feature = "tracing")]
        {
            if let Some(previous) = previous {
                tracing::debug!(
                    code = %previous.code(),
                    ty = previous.associated_type().name(),
                    "replaced previous registration"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = previous;
        }
    }

    /// A packer carrying a snapshot of the current encode registry.
    pub fn packer(&self) -> Packer {
        self.packer_with(self.packer_options.clone())
    }

    /// A packer built from `options`, carrying a snapshot of the current
    /// encode registry.
    pub fn packer_with(&self, options: PackerOptions) -> Packer {
        let mut packer = Packer::with_options(options);
        drop(packer.replace_registry(self.packer_registry.duplicate()));
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(entries = self.packer_registry.len(), "built packer");
        }
        packer
    }

    /// An unpacker carrying a snapshot of the current decode registry.
    pub fn unpacker(&self) -> Unpacker {
        self.unpacker_with(self.unpacker_options.clone())
    }

    /// An unpacker built from `options`, carrying a snapshot of the current
    /// decode registry.
    pub fn unpacker_with(&self, options: UnpackerOptions) -> Unpacker {
        let mut unpacker = Unpacker::with_options(options);
        drop(unpacker.replace_registry(self.unpacker_registry.duplicate()));
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(entries = self.unpacker_registry.len(), "built unpacker");
        }
        unpacker
    }

    /// The encode-side registry.
    pub fn packer_registry(&self) -> &PackerExtRegistry {
        &self.packer_registry
    }

    /// The decode-side registry.
    pub fn unpacker_registry(&self) -> &UnpackerExtRegistry {
        &self.unpacker_registry
    }

    /// Options every [`packer`](Self::packer) is built with.
    pub fn packer_options(&self) -> &PackerOptions {
        &self.packer_options
    }

    /// Options every [`unpacker`](Self::unpacker) is built with.
    pub fn unpacker_options(&self) -> &UnpackerOptions {
        &self.unpacker_options
    }
}
