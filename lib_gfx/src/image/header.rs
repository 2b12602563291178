//! The 12-byte header that prefixes a binary RGB565A8 asset.
//!
//! The header is three little-endian 32-bit words, mirroring the bit-field
//! struct the embedded side reads:
//!
//! | word | bits 0..16 | bits 16..32 |
//! |---|---|---|
//! | 0 | magic (0..8), color format (8..16) | flags |
//! | 1 | width | height |
//! | 2 | stride | reserved |
//!
//! `stride` is always `width * 3`. The payload is plane-separated, not
//! row-interleaved, so the stride only states the per-row byte cost of the
//! image. It must not be used to address rows inside the payload.

use bincode::Options;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BYTES_PER_PIXEL, COLOR_FORMAT_RGB565A8, C_ARRAY_HEADER_MAGIC, HEADER_SIZE, MAX_DIMENSION,
};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("Image dimensions {width}x{height} exceed the 16-bit header limit of {max}")]
    DimensionOverflow { width: u32, height: u32, max: u32 },
    #[error("Header needs 12 bytes, got {0}")]
    Truncated(usize),
    #[error("Invalid magic 0x{0:02x}")]
    InvalidMagic(u8),
    #[error("Unsupported color format 0x{0:02x}")]
    UnsupportedColorFormat(u8),
    #[error("Stride {stride} does not match width {width}")]
    StrideMismatch { width: u16, stride: u16 },
    #[error("Payload is {actual} bytes, header declares {expected}")]
    PayloadLength { expected: usize, actual: usize },
    #[error("Header serialization failed")]
    Serialization(#[from] bincode::Error),
}

/// Header words exactly as they appear on disk.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct RawHeader {
    format: u32,
    size: u32,
    layout: u32,
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u8,
    pub color_format: u8,
    pub flags: u16,
    pub width: u16,
    pub height: u16,
    pub stride: u16,
    pub reserved: u16,
}

impl Header {
    pub const SIZE: usize = HEADER_SIZE;

    /// Builds the header for a `width` x `height` image.
    ///
    /// # Errors
    /// - `HeaderError::ZeroArea` if either dimension is 0
    /// - `HeaderError::DimensionOverflow` if either dimension exceeds 65535
    pub fn new(width: u32, height: u32) -> Result<Self, HeaderError> {
        if width == 0 || height == 0 {
            error!("Rejecting zero-area image {}x{}", width, height);
            return Err(HeaderError::ZeroArea { width, height });
        }

        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                error!(
                    "Image {}x{} does not fit the 16-bit header fields",
                    width, height
                );
                return Err(HeaderError::DimensionOverflow {
                    width,
                    height,
                    max: MAX_DIMENSION,
                });
            }
        };

        // Wraps for widths above 21845, exactly like the 16-bit field on the device.
        let stride = w.wrapping_mul(BYTES_PER_PIXEL as u16);

        Ok(Self {
            magic: C_ARRAY_HEADER_MAGIC,
            color_format: COLOR_FORMAT_RGB565A8,
            flags: 0,
            width: w,
            height: h,
            stride,
            reserved: 0,
        })
    }

    /// Number of payload bytes that must follow this header.
    pub fn payload_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    fn to_raw(self) -> RawHeader {
        RawHeader {
            format: self.magic as u32 | (self.color_format as u32) << 8 | (self.flags as u32) << 16,
            size: self.width as u32 | (self.height as u32) << 16,
            layout: self.stride as u32 | (self.reserved as u32) << 16,
        }
    }

    fn from_raw(raw: RawHeader) -> Self {
        Self {
            magic: (raw.format & 0xFF) as u8,
            color_format: ((raw.format >> 8) & 0xFF) as u8,
            flags: (raw.format >> 16) as u16,
            width: (raw.size & 0xFFFF) as u16,
            height: (raw.size >> 16) as u16,
            stride: (raw.layout & 0xFFFF) as u16,
            reserved: (raw.layout >> 16) as u16,
        }
    }

    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE], HeaderError> {
        let encoded = bincode_options().serialize(&self.to_raw())?;

        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(&encoded);
        Ok(bytes)
    }

    /// Parses and validates the first 12 bytes of `data`. Extra bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() < HEADER_SIZE {
            error!("Header truncated: {} bytes", data.len());
            return Err(HeaderError::Truncated(data.len()));
        }

        let raw: RawHeader = bincode_options().deserialize(&data[..HEADER_SIZE])?;
        let header = Self::from_raw(raw);
        debug!("Header read: {:?}", header);

        if header.magic != C_ARRAY_HEADER_MAGIC {
            return Err(HeaderError::InvalidMagic(header.magic));
        }
        if header.color_format != COLOR_FORMAT_RGB565A8 {
            return Err(HeaderError::UnsupportedColorFormat(header.color_format));
        }
        if header.width == 0 || header.height == 0 {
            return Err(HeaderError::ZeroArea {
                width: header.width as u32,
                height: header.height as u32,
            });
        }
        if header.stride != header.width.wrapping_mul(BYTES_PER_PIXEL as u16) {
            return Err(HeaderError::StrideMismatch {
                width: header.width,
                stride: header.stride,
            });
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_two_by_one() {
        let header = Header::new(2, 1).unwrap();
        assert_eq!(
            header.to_bytes().unwrap(),
            [0x19, 0x0A, 0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00, 0x00]
        );
        assert_eq!(header.payload_len(), 6);
    }

    #[test]
    fn test_header_round_trip_edges() {
        for (w, h) in [(1, 1), (1, 65535), (65535, 1), (320, 240), (21845, 3), (21846, 7)] {
            let header = Header::new(w, h).unwrap();
            let decoded = Header::from_bytes(&header.to_bytes().unwrap()).unwrap();
            assert_eq!(decoded, header);
            assert_eq!(decoded.width as u32, w);
            assert_eq!(decoded.height as u32, h);
        }
    }

    #[test]
    fn test_header_dimension_overflow() {
        assert!(matches!(
            Header::new(65536, 1),
            Err(HeaderError::DimensionOverflow { width: 65536, height: 1, .. })
        ));
        assert!(matches!(
            Header::new(1, 70000),
            Err(HeaderError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn test_header_zero_area() {
        assert!(matches!(Header::new(0, 5), Err(HeaderError::ZeroArea { .. })));
        assert!(matches!(Header::new(5, 0), Err(HeaderError::ZeroArea { .. })));
    }

    #[test]
    fn test_header_truncated() {
        assert!(matches!(
            Header::from_bytes(&[0x19, 0x0A, 0, 0]),
            Err(HeaderError::Truncated(4))
        ));
    }

    #[test]
    fn test_header_bad_magic_and_format() {
        let mut bytes = Header::new(4, 4).unwrap().to_bytes().unwrap();
        bytes[0] = 0x20;
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(HeaderError::InvalidMagic(0x20))
        ));

        let mut bytes = Header::new(4, 4).unwrap().to_bytes().unwrap();
        bytes[1] = 0x05;
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(HeaderError::UnsupportedColorFormat(0x05))
        ));
    }

    #[test]
    fn test_header_stride_mismatch() {
        let mut bytes = Header::new(4, 4).unwrap().to_bytes().unwrap();
        bytes[8] = 8;
        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(HeaderError::StrideMismatch { width: 4, stride: 8 })
        ));
    }
}
