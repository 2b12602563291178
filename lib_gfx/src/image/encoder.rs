use log::{debug, error, info};
use thiserror::Error;

use super::format::{EncodedImage, Image};
use super::header::{Header, HeaderError};
use crate::codec::{separate_planes, PlaneError};

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Invalid image header")]
    Header(#[from] HeaderError),
    #[error("Failed to separate color and alpha planes")]
    Planes(#[from] PlaneError),
    #[error("Pixel buffer holds {actual} bytes, a {width}x{height} image needs {expected}")]
    PixelBufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Store each RGB565 code low byte first.
    pub swap16: bool,
}

/// Converts an RGBA image into its RGB565A8 header and payload.
///
/// Every check runs before the payload is built, so a rejected image never
/// produces partial output.
pub fn encode(image: &Image, options: &EncodeOptions) -> Result<EncodedImage, EncodingError> {
    info!("Starting encoding");

    // Step 1: Build the header, rejecting empty and oversized images
    let header = Header::new(image.width, image.height)?;
    debug!(
        "Header built: width={} height={} stride={}",
        header.width, header.height, header.stride
    );

    // Step 2: Make sure the pixel buffer matches the dimensions
    let expected = image.pixel_count() * Image::CHANNELS;
    if image.rgba_data.len() != expected {
        error!(
            "Pixel buffer holds {} bytes, expected {}",
            image.rgba_data.len(),
            expected
        );
        return Err(EncodingError::PixelBufferSize {
            width: image.width,
            height: image.height,
            expected,
            actual: image.rgba_data.len(),
        });
    }

    // Step 3: Quantize and split into planes
    let payload = separate_planes(&image.rgba_data, options.swap16)?;
    let pixels = image.pixel_count();
    debug!("Image size: {}x{}", image.width, image.height);
    debug!("Data size: {} bytes", payload.len());
    debug!("RGB565 data: {} bytes", pixels * 2);
    debug!("Alpha data: {} bytes", pixels);
    debug!(
        "Swap16: {}",
        if options.swap16 { "enabled" } else { "disabled" }
    );

    info!("Encoding process completed successfully");
    Ok(EncodedImage::new(header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rejects_zero_area() {
        let image = Image::new(0, 4, Vec::new());
        let result = encode(&image, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodingError::Header(HeaderError::ZeroArea { width: 0, height: 4 }))
        ));
    }

    #[test]
    fn test_encode_rejects_overflow_before_reading_pixels() {
        // Pixel buffer is deliberately empty: the dimension check must fire first
        let image = Image::new(65536, 1, Vec::new());
        let result = encode(&image, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodingError::Header(HeaderError::DimensionOverflow { .. }))
        ));
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let image = Image::new(2, 2, vec![0; 12]);
        let result = encode(&image, &EncodeOptions::default());
        assert!(matches!(
            result,
            Err(EncodingError::PixelBufferSize {
                expected: 16,
                actual: 12,
                ..
            })
        ));
    }

    #[test]
    fn test_encode_single_pixel() {
        let image = Image::new(1, 1, vec![0, 0, 255, 77]);
        let encoded = encode(&image, &EncodeOptions::default()).unwrap();
        assert_eq!(encoded.payload(), &[0x00, 0x1F, 77]);
        assert_eq!(encoded.header().stride, 3);
    }
}
