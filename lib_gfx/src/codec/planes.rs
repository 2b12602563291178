use thiserror::Error;

use super::rgb565::{code_bytes, quantize};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlaneError {
    #[error("Invalid pixel data length: expected multiple of 4 bytes, got {0}")]
    InvalidPixelDataLength(usize),
}

/// Converts a row-major RGBA pixel buffer into an RGB565A8 payload.
///
/// # Parameters
/// - `pixels`: raw pixel data, 4 bytes (R, G, B, A) per pixel.
/// - `swap`: store each color code low byte first.
///
/// # Returns
/// A buffer of `3 * n` bytes for `n` pixels: every pixel's 2-byte color code
/// in pixel order, followed by every pixel's alpha byte in pixel order.
///
/// # Errors
/// - Returns `PlaneError::InvalidPixelDataLength` if input length is not a multiple of 4
pub fn separate_planes(pixels: &[u8], swap: bool) -> Result<Vec<u8>, PlaneError> {
    if pixels.len() % 4 != 0 {
        return Err(PlaneError::InvalidPixelDataLength(pixels.len()));
    }

    let count = pixels.len() / 4;
    let mut payload = vec![0u8; count * 3];
    let (color, alpha) = payload.split_at_mut(count * 2);

    for ((pixel, code), a) in pixels
        .chunks_exact(4)
        .zip(color.chunks_exact_mut(2))
        .zip(alpha.iter_mut())
    {
        code.copy_from_slice(&code_bytes(quantize(pixel[0], pixel[1], pixel[2]), swap));
        *a = pixel[3];
    }

    Ok(payload)
}

/// Borrowed view over the two planes of a payload.
#[derive(Debug, Clone, Copy)]
pub struct Planes<'a> {
    color: &'a [u8],
    alpha: &'a [u8],
}

impl<'a> Planes<'a> {
    /// Splits `payload` at two thirds. Returns `None` if its length is not a multiple of 3.
    pub fn new(payload: &'a [u8]) -> Option<Self> {
        if payload.len() % 3 != 0 {
            return None;
        }
        Some(Self::split(payload))
    }

    pub(crate) fn split(payload: &'a [u8]) -> Self {
        let (color, alpha) = payload.split_at(payload.len() / 3 * 2);
        Self { color, alpha }
    }

    pub fn color(&self) -> &'a [u8] {
        self.color
    }

    pub fn alpha(&self) -> &'a [u8] {
        self.alpha
    }

    pub fn pixel_count(&self) -> usize {
        self.alpha.len()
    }

    /// Reads the color plane back as 16-bit codes, using the same `swap` it was written with.
    pub fn codes(&self, swap: bool) -> impl Iterator<Item = u16> + 'a {
        self.color.chunks_exact(2).map(move |pair| {
            let bytes = [pair[0], pair[1]];
            if swap {
                u16::from_le_bytes(bytes)
            } else {
                u16::from_be_bytes(bytes)
            }
        })
    }
}
