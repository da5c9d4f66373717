//! The conventional extension conversion pair.

use crate::error::BoxError;
use std::any::Any;

/// Name of the conventional instance-level encode operation.
pub const TO_MSGPACK_EXT: &str = "to_msgpack_ext";

/// Name of the conventional type-level decode operation.
pub const FROM_MSGPACK_EXT: &str = "from_msgpack_ext";

/// A type that knows how to convert itself to and from an extension payload.
///
/// Registering a type without explicit hooks binds its hooks to these two
/// operations by name. They are looked up in the type's
/// [`TypeDescriptor`](crate::TypeDescriptor) when a packer or unpacker needs
/// them, so describe the type with
/// [`TypeDescriptor::ext`](crate::TypeDescriptor::ext) to make them visible.
///
/// # Example
///
/// ```rust
/// use mpext_core::{BoxError, ExtType};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(i16);
///
/// impl ExtType for Celsius {
///     fn to_msgpack_ext(&self) -> Result<Vec<u8>, BoxError> {
///         Ok(self.0.to_be_bytes().to_vec())
///     }
///
///     fn from_msgpack_ext(data: &[u8]) -> Result<Self, BoxError> {
///         let bytes: [u8; 2] = data.try_into()?;
///         Ok(Celsius(i16::from_be_bytes(bytes)))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an extension type",
    label = "missing `ExtType` implementation",
    note = "Implement `to_msgpack_ext` and `from_msgpack_ext`, or pass explicit hooks in `ExtOptions`."
)]
pub trait ExtType: Any + Send + Sync + Sized {
    /// Encode `self` into an extension payload.
    fn to_msgpack_ext(&self) -> Result<Vec<u8>, BoxError>;

    /// Rebuild a value from an extension payload.
    fn from_msgpack_ext(data: &[u8]) -> Result<Self, BoxError>;
}
