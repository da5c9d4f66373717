//! Option records for registration and codec construction.

use mpext_core::{DecodeFn, EncodeFn, ExtDecoder, ExtEncoder, HookSource, RegisterError};
use rmpv::Value;
use std::{any::Any, borrow::Cow};

/// Per-registration hook options.
///
/// Each direction may be given as an encoder/decoder object (closures
/// included) or as the name of an operation exposed by the registered type's
/// [`TypeDescriptor`](mpext_core::TypeDescriptor). A direction left unset
/// registers no hook; exercising it later fails.
///
/// # Example
///
/// ```rust
/// use mpext_std::ExtOptions;
///
/// struct Version(u8);
///
/// let options = ExtOptions::new()
///     .packer(|v: &Version| Ok::<_, std::io::Error>(vec![v.0]))
///     .unpacker_method("from_bytes");
///
/// assert!(options.packer_source().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExtOptions {
    packer: Option<HookSource<EncodeFn>>,
    unpacker: Option<HookSource<DecodeFn>>,
}

impl ExtOptions {
    /// Options with neither hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode with `encoder`.
    pub fn packer<T: Any, E: ExtEncoder<T>>(mut self, encoder: E) -> Self {
        self.packer = Some(HookSource::encoder::<T, E>(encoder));
        self
    }

    /// Encode with the named operation of the registered type.
    pub fn packer_method(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.packer = Some(HookSource::method(name));
        self
    }

    /// Decode with `decoder`.
    pub fn unpacker<T: Any + Send, D: ExtDecoder<T>>(mut self, decoder: D) -> Self {
        self.unpacker = Some(HookSource::decoder::<T, D>(decoder));
        self
    }

    /// Decode with the named operation of the registered type.
    pub fn unpacker_method(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.unpacker = Some(HookSource::method(name));
        self
    }

    /// The packer hook as supplied.
    pub fn packer_source(&self) -> Option<&HookSource<EncodeFn>> {
        self.packer.as_ref()
    }

    /// The unpacker hook as supplied.
    pub fn unpacker_source(&self) -> Option<&HookSource<DecodeFn>> {
        self.unpacker.as_ref()
    }

    /// Read options from a MessagePack map.
    ///
    /// Only the `packer` and `unpacker` keys are consulted. A string value
    /// names an operation on the registered type, `nil` leaves the direction
    /// unset, and anything else is rejected.
    pub fn from_map(map: &Value) -> Result<Self, RegisterError> {
        let Value::Map(pairs) = map else {
            return Err(RegisterError::TypeMismatch {
                expected: "options map",
                found: crate::args::value_kind(map).to_string(),
            });
        };

        let mut options = Self::new();
        for (key, value) in pairs {
            let key = match key.as_str() {
                Some(key @ ("packer" | "unpacker")) => key,
                _ => continue,
            };
            let name = match value {
                Value::Nil => continue,
                Value::String(name) => match name.as_str() {
                    Some(name) => name.to_owned(),
                    None => {
                        return Err(RegisterError::TypeMismatch {
                            expected: "method name",
                            found: "invalid UTF-8 string".into(),
                        });
                    }
                },
                other => {
                    return Err(RegisterError::TypeMismatch {
                        expected: "method name",
                        found: crate::args::value_kind(other).to_string(),
                    });
                }
            };
            options = if key == "packer" {
                options.packer_method(name)
            } else {
                options.unpacker_method(name)
            };
        }
        Ok(options)
    }
}

/// Construction options for a [`Packer`](crate::Packer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackerOptions {
    initial_capacity: usize,
}

impl PackerOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate the output buffer.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Bytes reserved for the output buffer up front.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
}

/// Construction options for an [`Unpacker`](crate::Unpacker).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnpackerOptions {
    allow_unknown_ext: bool,
}

impl UnpackerOptions {
    /// Default options: unknown extension codes are an error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return unregistered extension values raw instead of failing.
    pub fn with_allow_unknown_ext(mut self, allow: bool) -> Self {
        self.allow_unknown_ext = allow;
        self
    }

    /// Whether unregistered extension values are returned raw.
    pub fn allows_unknown_ext(&self) -> bool {
        self.allow_unknown_ext
    }
}
