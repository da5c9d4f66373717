//! Testing utilities.
//!
//! Hook wrappers that make it easy to assert how often, and with what, a
//! packer or unpacker invoked a hook.
//!
//! - [`RecordingEncoder`]: records every value it is asked to encode
//! - [`CountingDecoder`]: counts decode invocations

use mpext_core::{BoxError, ExtDecoder, ExtEncoder};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Encoder
// ============================================================================

/// An encoder that records every value it receives, then delegates.
///
/// Clones share the same record, so keep a clone to inspect after handing
/// the encoder to [`ExtOptions::packer`](crate::ExtOptions::packer).
///
/// # Example
///
/// ```rust
/// use mpext_std::{ExtOptions, Factory, testing::RecordingEncoder};
/// use mpext_core::TypeDescriptor;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Id(u8);
///
/// let recorder = RecordingEncoder::new(|id: &Id| Ok::<_, std::io::Error>(vec![id.0]));
/// let mut factory = Factory::new();
/// factory
///     .register_type_with(4, TypeDescriptor::of::<Id>(), ExtOptions::new().packer(recorder.clone()))
///     .unwrap();
///
/// factory.packer().write(&Id(7)).unwrap();
/// assert_eq!(recorder.values(), vec![Id(7)]);
/// ```
pub struct RecordingEncoder<T: Clone, E> {
    values: Arc<Mutex<Vec<T>>>,
    inner: Arc<E>,
}

impl<T: Clone, E> RecordingEncoder<T, E> {
    /// Record values, then encode them with `inner`.
    pub fn new(inner: E) -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
            inner: Arc::new(inner),
        }
    }

    /// Get a clone of the recorded values.
    pub fn values(&self) -> Vec<T> {
        self.values.lock().unwrap().clone()
    }

    /// Get the number of recorded values.
    pub fn count(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    /// Clear all recorded values.
    pub fn clear(&self) {
        self.values.lock().unwrap().clear();
    }
}

impl<T: Clone, E> Clone for RecordingEncoder<T, E> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> ExtEncoder<T> for RecordingEncoder<T, E>
where
    T: Clone + Send + 'static,
    E: ExtEncoder<T>,
{
    fn encode(&self, value: &T) -> Result<Vec<u8>, BoxError> {
        self.values.lock().unwrap().push(value.clone());
        self.inner.encode(value)
    }
}

// ============================================================================
// Counting Decoder
// ============================================================================

/// A decoder that counts invocations, then delegates.
pub struct CountingDecoder<D> {
    count: Arc<AtomicUsize>,
    inner: Arc<D>,
}

impl<D> CountingDecoder<D> {
    /// Count calls, then decode with `inner`.
    pub fn new(inner: D) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            inner: Arc::new(inner),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<D> Clone for CountingDecoder<D> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<T, D> ExtDecoder<T> for CountingDecoder<D>
where
    D: ExtDecoder<T>,
{
    fn decode(&self, data: &[u8]) -> Result<T, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(data)
    }
}
