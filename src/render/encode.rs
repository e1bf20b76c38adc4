//! Image encoding: PNG bytes, data URLs, and file output.

use std::io::Cursor;
use std::path::Path;

use base64ct::{Base64, Encoding};
use image::RgbaImage;

use crate::error::{BlazonError, Result};

/// Encode an image as PNG bytes in memory.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| BlazonError::Encode {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(bytes)
}

/// Encode an image as an embeddable `data:image/png;base64,...` URL.
pub fn to_data_url(img: &RgbaImage) -> Result<String> {
    let bytes = encode_png(img)?;
    Ok(format!("data:image/png;base64,{}", Base64::encode_string(&bytes)))
}

/// Write an image to a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| BlazonError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
