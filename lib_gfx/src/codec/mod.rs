pub mod planes;
pub mod rgb565;

pub use planes::{separate_planes, PlaneError, Planes};
pub use rgb565::{code_bytes, quantize};
