//! Loosely-typed arguments for embedding hosts.
//!
//! The typed [`Factory`](crate::Factory) API fixes argument counts and shapes
//! at compile time. Hosts that forward calls from a dynamic environment
//! instead hand over a list of [`Arg`]s, and the factory performs the arity
//! and shape checks itself.

use crate::options::ExtOptions;
use mpext_core::{ExtCode, RegisterError, TypeDescriptor};
use rmpv::Value;

/// One positional argument.
#[derive(Clone, Debug)]
pub enum Arg {
    /// An integer.
    Int(i64),
    /// A type.
    Type(TypeDescriptor),
    /// A hook options record.
    Options(ExtOptions),
    /// Any other plain value.
    Value(Value),
}

impl Arg {
    /// A short description of what this argument is, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Int(_) => "integer",
            Arg::Type(ty) if ty.is_instantiable() => "type",
            Arg::Type(_) => "abstract type",
            Arg::Options(_) => "options",
            Arg::Value(value) => value_kind(value),
        }
    }

    pub(crate) fn into_code(self) -> Result<ExtCode, RegisterError> {
        let code = match self {
            Arg::Int(code) => i128::from(code),
            Arg::Value(Value::Integer(code)) => match (code.as_i64(), code.as_u64()) {
                (Some(code), _) => i128::from(code),
                (None, Some(code)) => i128::from(code),
                (None, None) => {
                    return Err(RegisterError::TypeMismatch {
                        expected: "integer",
                        found: code.to_string(),
                    });
                }
            },
            other => {
                return Err(RegisterError::TypeMismatch {
                    expected: "integer",
                    found: other.kind().to_string(),
                });
            }
        };
        Ok(ExtCode::try_from(code)?)
    }

    pub(crate) fn into_type(self) -> Result<TypeDescriptor, RegisterError> {
        match self {
            Arg::Type(ty) => Ok(ty),
            other => Err(RegisterError::TypeMismatch {
                expected: "type",
                found: other.kind().to_string(),
            }),
        }
    }

    pub(crate) fn into_options(self) -> Result<ExtOptions, RegisterError> {
        match self {
            Arg::Options(options) => Ok(options),
            Arg::Value(value) => ExtOptions::from_map(&value),
            other => Err(RegisterError::TypeMismatch {
                expected: "options map",
                found: other.kind().to_string(),
            }),
        }
    }
}

impl From<i64> for Arg {
    fn from(code: i64) -> Self {
        Arg::Int(code)
    }
}

impl From<TypeDescriptor> for Arg {
    fn from(ty: TypeDescriptor) -> Self {
        Arg::Type(ty)
    }
}

impl From<ExtOptions> for Arg {
    fn from(options: ExtOptions) -> Self {
        Arg::Options(options)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::F32(_) | Value::F64(_) => "float",
        Value::String(_) => "string",
        Value::Binary(_) => "binary",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Ext(..) => "extension value",
    }
}
