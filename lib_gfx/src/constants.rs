//! Fixed values of the RGB565A8 asset format and its C-side bindings.

/// `C_ARRAY_HEADER_MAGIC` on the embedded side.
pub const C_ARRAY_HEADER_MAGIC: u8 = 0x19;
/// `GFX_COLOR_FORMAT_RGB565A8` on the embedded side.
pub const COLOR_FORMAT_RGB565A8: u8 = 0x0A;

pub const HEADER_SIZE: usize = 12;
/// Two color-plane bytes plus one alpha-plane byte.
pub const BYTES_PER_PIXEL: usize = 3;
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

pub const DEFAULT_VALUES_PER_LINE: usize = 130;
pub const DEFAULT_INDENT: usize = 4;
pub const DEFAULT_INCLUDE: &str = "gfx.h";
pub const SYMBOL_PREFIX: &str = "img_";

pub const C_COLOR_FORMAT_NAME: &str = "GFX_COLOR_FORMAT_RGB565A8";
pub const C_MAGIC_NAME: &str = "C_ARRAY_HEADER_MAGIC";
pub const C_DESCRIPTOR_TYPE: &str = "gfx_image_dsc_t";

pub const FORMAT_NAME: &str = "RGB565A8";
pub const BIN_EXT: &str = "bin";
pub const SOURCE_EXT: &str = "c";
pub const PNG_EXT: &str = "png";
