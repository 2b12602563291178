use crate::codec::Planes;

use super::header::{Header, HeaderError};

/// A decoded RGBA image, pixels in row-major order from the top-left corner.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub rgba_data: Vec<u8>,
}

impl Image {
    pub const CHANNELS: usize = 4;

    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba_data,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Header and payload of one converted image, ready for either emitter.
///
/// Only the encoder builds these, so the payload always holds exactly
/// `3 * width * height` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    header: Header,
    payload: Vec<u8>,
}

impl EncodedImage {
    pub(crate) fn new(header: Header, payload: Vec<u8>) -> Self {
        debug_assert_eq!(header.payload_len(), payload.len());
        Self { header, payload }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn width(&self) -> u16 {
        self.header.width
    }

    pub fn height(&self) -> u16 {
        self.header.height
    }

    /// Payload length in bytes, the `data_size` of the source descriptor.
    pub fn data_size(&self) -> usize {
        self.payload.len()
    }

    pub fn planes(&self) -> Planes<'_> {
        Planes::split(&self.payload)
    }

    /// Header followed by payload, the exact contents of a `.bin` asset.
    pub fn to_container_bytes(&self) -> Result<Vec<u8>, HeaderError> {
        let mut bytes = Vec::with_capacity(Header::SIZE + self.payload.len());
        bytes.extend_from_slice(&self.header.to_bytes()?);
        bytes.extend_from_slice(&self.payload);
        Ok(bytes)
    }
}
