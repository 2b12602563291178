use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};

use super::format::EncodedImage;
use super::header::{Header, HeaderError};
use crate::output::{write_atomic, OutputError};

/// Writes the header immediately followed by the payload. No padding, no trailer.
pub fn write_container<W: Write + ?Sized>(
    writer: &mut W,
    image: &EncodedImage,
) -> io::Result<()> {
    let header = image
        .header()
        .to_bytes()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    writer.write_all(&header)?;
    writer.write_all(image.payload())?;
    Ok(())
}

/// Writes a `.bin` asset to `path`, replacing it only once the whole asset is on disk.
pub fn write_container_file(path: &Path, image: &EncodedImage) -> Result<(), OutputError> {
    // Fail on the header before a temporary file is even created
    let header = image.header().to_bytes()?;

    write_atomic(path, |w| {
        w.write_all(&header)?;
        w.write_all(image.payload())
    })?;

    info!("Successfully generated {}", path.display());
    debug!("Header size: {} bytes", Header::SIZE);
    debug!("Stride: {} bytes per row", image.header().stride);
    debug!("Data offset: {} bytes", Header::SIZE);
    debug!(
        "Total file size: {} bytes",
        Header::SIZE + image.data_size()
    );
    Ok(())
}

/// Splits a binary asset into its validated header and payload.
pub fn read_container(data: &[u8]) -> Result<(Header, &[u8]), HeaderError> {
    let header = Header::from_bytes(data)?;
    let payload = &data[Header::SIZE..];

    if payload.len() != header.payload_len() {
        return Err(HeaderError::PayloadLength {
            expected: header.payload_len(),
            actual: payload.len(),
        });
    }

    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{encode, EncodeOptions};
    use crate::Image;

    fn sample() -> EncodedImage {
        let image = Image::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 128]);
        encode(&image, &EncodeOptions::default()).unwrap()
    }

    #[test]
    fn test_container_layout() {
        let mut out = Vec::new();
        write_container(&mut out, &sample()).unwrap();

        assert_eq!(
            out,
            vec![
                0x19, 0x0A, 0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00, 0x00, // header
                0xF8, 0x00, 0x07, 0xE0, // color plane
                0xFF, 0x80, // alpha plane
            ]
        );
        assert_eq!(out, sample().to_container_bytes().unwrap());
    }

    #[test]
    fn test_read_container() {
        let bytes = sample().to_container_bytes().unwrap();
        let (header, payload) = read_container(&bytes).unwrap();

        assert_eq!(header.width, 2);
        assert_eq!(header.height, 1);
        assert_eq!(payload, sample().payload());
    }

    #[test]
    fn test_read_container_length_mismatch() {
        let mut bytes = sample().to_container_bytes().unwrap();
        bytes.push(0);
        assert!(matches!(
            read_container(&bytes),
            Err(HeaderError::PayloadLength { expected: 6, actual: 7 })
        ));

        bytes.truncate(15);
        assert!(matches!(
            read_container(&bytes),
            Err(HeaderError::PayloadLength { expected: 6, actual: 3 })
        ));
    }
}
