//! Standard hook wrappers.

pub mod logging;

pub use logging::{LoggingDecoder, LoggingEncoder};
