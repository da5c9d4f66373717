//! Procedural macros for mpext.
//!
//! - `#[derive(ExtType)]` - implements `ExtType` through `rmp-serde`

use proc_macro::TokenStream;

mod ext_type;

/// Derive `ExtType` for a serde-serializable type.
///
/// The payload is the type's MessagePack encoding as produced by
/// `rmp_serde::to_vec`. Add `#[ext_type(named)]` to encode struct fields
/// by name instead of by position.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize, ExtType)]
/// #[ext_type(named)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
/// ```
#[proc_macro_derive(ExtType, attributes(ext_type))]
pub fn derive_ext_type(input: TokenStream) -> TokenStream {
    ext_type::derive_ext_type_impl(input)
}
