pub mod codec;
pub mod constants;
pub mod image;
pub mod output;
pub mod source;

use log::*;
use std::io::Write;

pub use crate::codec::rgb565::{code_bytes, quantize};
pub use crate::image::container::{read_container, write_container, write_container_file};
pub use crate::image::format::{EncodedImage, Image};
pub use crate::image::header::{Header, HeaderError};
pub use crate::image::{encode, EncodeOptions, EncodingError};
pub use crate::source::{emit_source, symbol_name, write_source_file, SourceOptions};

/// Installs the process-wide logger on stderr.
///
/// `level` applies to this library and to the converter binary; `RUST_LOG`
/// still overrides it when set.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_gfx"), level)
        .filter(Some("png2gfx"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
