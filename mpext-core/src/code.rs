//! The extension type code.

use crate::error::CodeRangeError;
use std::fmt;

/// A MessagePack extension type code.
///
/// The wire format stores the tag as one signed byte, so the domain is
/// exactly `-128..=127`. Construct from an [`i8`] infallibly, or from an
/// [`i64`] via [`TryFrom`], which is where range validation happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtCode(i8);

impl ExtCode {
    /// Smallest representable code.
    pub const MIN: ExtCode = ExtCode(i8::MIN);
    /// Largest representable code.
    pub const MAX: ExtCode = ExtCode(i8::MAX);

    /// Create a code from a signed byte.
    pub const fn new(code: i8) -> Self {
        Self(code)
    }

    /// The raw tag byte.
    pub const fn get(self) -> i8 {
        self.0
    }
}

impl From<i8> for ExtCode {
    fn from(code: i8) -> Self {
        Self(code)
    }
}

impl From<ExtCode> for i8 {
    fn from(code: ExtCode) -> Self {
        code.0
    }
}

impl TryFrom<i64> for ExtCode {
    type Error = CodeRangeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::try_from(i128::from(code))
    }
}

// Wide enough for any MessagePack integer, so a rejected code is reported as given.
impl TryFrom<i128> for ExtCode {
    type Error = CodeRangeError;

    fn try_from(code: i128) -> Result<Self, Self::Error> {
        i8::try_from(code).map(Self).map_err(|_| CodeRangeError(code))
    }
}

impl fmt::Display for ExtCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_accepted() {
        assert_eq!(ExtCode::try_from(-128i64).unwrap(), ExtCode::MIN);
        assert_eq!(ExtCode::try_from(127i64).unwrap(), ExtCode::MAX);
        assert_eq!(ExtCode::try_from(0i64).unwrap().get(), 0);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(ExtCode::try_from(128i64), Err(CodeRangeError(128)));
        assert_eq!(ExtCode::try_from(-129i64), Err(CodeRangeError(-129)));
        assert_eq!(
            ExtCode::try_from(i64::MAX),
            Err(CodeRangeError(i128::from(i64::MAX)))
        );
    }

    #[test]
    fn test_wide_codes_keep_their_value() {
        let wide = i128::from(u64::MAX);
        assert_eq!(ExtCode::try_from(wide), Err(CodeRangeError(wide)));
        assert_eq!(ExtCode::try_from(-1i128).unwrap().get(), -1);
    }
}
