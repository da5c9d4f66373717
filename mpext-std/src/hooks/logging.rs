//! Logging wrappers for encoders and decoders.

use mpext_core::{BoxError, ExtDecoder, ExtEncoder};
use std::{borrow::Cow, fmt::Debug};

/// An encoder that logs every value before delegating to `inner`.
///
/// Logging goes through `tracing` when the feature is enabled; otherwise the
/// wrapper is a plain pass-through.
#[derive(Debug, Clone)]
pub struct LoggingEncoder<E> {
    inner: E,
    label: Cow<'static, str>,
}

impl<E> LoggingEncoder<E> {
    /// Wrap `inner`, tagging log lines with `label`.
    pub fn new(label: impl Into<Cow<'static, str>>, inner: E) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    /// The label attached to log lines.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unwrap the inner encoder.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<T, E> ExtEncoder<T> for LoggingEncoder<E>
where
    T: Debug,
    E: ExtEncoder<T>,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        let result = self.inner.encode(value);
        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(payload) => {
                    tracing::info!(label = %self.label, ?value, len = payload.len(), "encoded extension value");
                }
                Err(err) => {
                    tracing::warn!(label = %self.label, ?value, error = %err, "encode hook failed");
                }
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = value;
        }
        result
    }
}

/// A decoder that logs every payload and its outcome.
#[derive(Debug, Clone)]
pub struct LoggingDecoder<D> {
    inner: D,
    label: Cow<'static, str>,
}

impl<D> LoggingDecoder<D> {
    /// Wrap `inner`, tagging log lines with `label`.
    pub fn new(label: impl Into<Cow<'static, str>>, inner: D) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    /// The label attached to log lines.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unwrap the inner decoder.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<T, D> ExtDecoder<T> for LoggingDecoder<D>
where
    T: Debug,
    D: ExtDecoder<T>,
{
    fn decode(&self, data: &[u8]) -> Result<T, BoxError> {
        let result = self.inner.decode(data);
        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(value) => {
                    tracing::info!(label = %self.label, len = data.len(), ?value, "decoded extension value");
                }
                Err(err) => {
                    tracing::warn!(label = %self.label, len = data.len(), error = %err, "decode hook failed");
                }
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = data;
        }
        result
    }
}
