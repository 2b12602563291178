pub mod container;
pub mod encoder;
pub mod format;
pub mod header;

pub use encoder::{encode, EncodeOptions, EncodingError};
