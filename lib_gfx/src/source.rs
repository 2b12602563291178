//! Emits an encoded image as a C source file for static linking into firmware.

use std::fmt::{self, Write as _};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::constants::{
    C_COLOR_FORMAT_NAME, C_DESCRIPTOR_TYPE, C_MAGIC_NAME, DEFAULT_INCLUDE, DEFAULT_INDENT,
    DEFAULT_VALUES_PER_LINE, SYMBOL_PREFIX,
};
use crate::image::format::EncodedImage;
use crate::output::{write_atomic, OutputError};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Values per line must be at least 1")]
    InvalidLineWidth,
    #[error("Cannot derive a symbol name from {0:?}")]
    EmptyName(String),
    #[error("Failed to format source text")]
    Format(#[from] fmt::Error),
    #[error("Failed to write source file")]
    Output(#[from] OutputError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Byte literals per array row. Only affects readability.
    pub values_per_line: usize,
    /// Spaces before each array row and descriptor field.
    pub indent: usize,
    /// Header pulled in by the generated file.
    pub include: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            values_per_line: DEFAULT_VALUES_PER_LINE,
            indent: DEFAULT_INDENT,
            include: DEFAULT_INCLUDE.to_string(),
        }
    }
}

/// Derives a C identifier from a file name.
///
/// The directory and the last extension are dropped, every character outside
/// `[A-Za-z0-9_]` becomes `_`, and a leading digit gets the `img_` prefix:
/// `"3cool-icon.png"` becomes `"img_3cool_icon"`.
pub fn symbol_name(path: &Path) -> Result<String, SourceError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SourceError::EmptyName(path.display().to_string()))?;

    let mut symbol: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if symbol.starts_with(|c: char| c.is_ascii_digit()) {
        symbol.insert_str(0, SYMBOL_PREFIX);
    }

    Ok(symbol)
}

fn format_array(out: &mut String, data: &[u8], indent: usize, per_line: usize) -> fmt::Result {
    for row in data.chunks(per_line) {
        write!(out, "{:indent$}", "", indent = indent)?;
        for (i, byte) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write!(out, "0x{:02x}", byte)?;
        }
        out.push_str(",\n");
    }
    Ok(())
}

/// Renders the payload as a `<symbol>_map` byte array plus a `<symbol>` descriptor.
pub fn emit_source(
    symbol: &str,
    image: &EncodedImage,
    options: &SourceOptions,
) -> Result<String, SourceError> {
    if options.values_per_line == 0 {
        return Err(SourceError::InvalidLineWidth);
    }

    let pad = " ".repeat(options.indent);
    // Six characters per value ("0xNN, ") plus a little slack for the frame
    let mut out = String::with_capacity(image.data_size() * 6 + 512);

    writeln!(out, "#include \"{}\"", options.include)?;
    out.push('\n');

    writeln!(out, "const uint8_t {}_map[] = {{", symbol)?;
    format_array(
        &mut out,
        image.payload(),
        options.indent,
        options.values_per_line,
    )?;
    out.push_str("};\n\n");

    writeln!(out, "const {} {} = {{", C_DESCRIPTOR_TYPE, symbol)?;
    writeln!(out, "{}.header.cf = {},", pad, C_COLOR_FORMAT_NAME)?;
    writeln!(out, "{}.header.magic = {},", pad, C_MAGIC_NAME)?;
    writeln!(out, "{}.header.w = {},", pad, image.width())?;
    writeln!(out, "{}.header.h = {},", pad, image.height())?;
    writeln!(out, "{}.data_size = {},", pad, image.data_size())?;
    writeln!(out, "{}.data = {}_map,", pad, symbol)?;
    out.push_str("};\n");

    debug!(
        "Emitted {} bytes of source for symbol {}",
        out.len(),
        symbol
    );
    Ok(out)
}

/// Writes generated source text to `path`, replacing it only once fully written.
pub fn write_source_file(path: &Path, text: &str) -> Result<(), SourceError> {
    write_atomic(path, |w| w.write_all(text.as_bytes()))?;
    info!("Successfully generated {}", path.display());
    Ok(())
}
