// Image signature sniffing for embedded pictures
//
// Derives the descriptive PICTURE fields from the image bytes themselves,
// following the same rules as the reference FLAC tools.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::io::ByteCursor;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 2] = [0xFF, 0xD8];
const GIF_SIGNATURE: &[u8; 3] = b"GIF";

/// Descriptive fields of an embedded picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PictureMetadata {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub used_colors: u32,
}

/// Detect JPEG, PNG or GIF data and read its dimensions and depth
pub fn sniff_image(data: &[u8]) -> Result<PictureMetadata> {
    let metadata = if data.starts_with(&JPEG_SIGNATURE) {
        sniff_jpeg(data)?
    } else if data.starts_with(&PNG_SIGNATURE) {
        sniff_png(data)?
    } else if data.starts_with(GIF_SIGNATURE) {
        sniff_gif(data)?
    } else {
        return Err(Error::UnrecognizedImageFormat);
    };

    tracing::debug!(
        mime_type = %metadata.mime_type,
        width = metadata.width,
        height = metadata.height,
        color_depth = metadata.color_depth,
        "sniffed picture"
    );
    Ok(metadata)
}

/// Scan two bytes at a time for a baseline, extended or progressive SOF marker
fn sniff_jpeg(data: &[u8]) -> Result<PictureMetadata> {
    let mut offset = JPEG_SIGNATURE.len();
    while offset + 1 < data.len() {
        if data[offset] == 0xFF && matches!(data[offset + 1], 0xC0 | 0xC1 | 0xC2) {
            // Segment length (2), precision (1), height (2), width (2), components (1)
            let mut cursor = ByteCursor::new(&data[offset + 2..]);
            let mut frame = || -> Option<PictureMetadata> {
                cursor.skip(2)?;
                let precision = cursor.read_u8()? as u32;
                let height = cursor.read_be_u16()? as u32;
                let width = cursor.read_be_u16()? as u32;
                let components = cursor.read_u8()? as u32;
                Some(PictureMetadata {
                    mime_type: "image/jpeg".to_string(),
                    width,
                    height,
                    color_depth: precision * components,
                    used_colors: 0,
                })
            };
            return frame().ok_or(Error::UnrecognizedJpeg);
        }
        offset += 2;
    }

    Err(Error::UnrecognizedJpeg)
}

/// Advance `cursor` past chunks until one named `name`; returns its length
fn find_png_chunk(cursor: &mut ByteCursor<'_>, name: &[u8; 4]) -> Option<u32> {
    loop {
        let length = cursor.read_be_u32()?;
        let chunk_name = cursor.read_array::<4>()?;
        if &chunk_name == name {
            return Some(length);
        }
        // Payload plus CRC
        cursor.skip((length as usize).checked_add(4)?)?;
    }
}

fn sniff_png(data: &[u8]) -> Result<PictureMetadata> {
    let mut cursor = ByteCursor::new(&data[PNG_SIGNATURE.len()..]);

    let mut header = || -> Option<(u32, u32, u32, u8)> {
        find_png_chunk(&mut cursor, b"IHDR")?;
        let width = cursor.read_be_u32()?;
        let height = cursor.read_be_u32()?;
        let bit_depth = cursor.read_u8()? as u32;
        let color_type = cursor.read_u8()?;
        // Compression, filter, interlace, then the chunk CRC
        cursor.skip(3 + 4)?;
        Some((width, height, bit_depth, color_type))
    };
    let (width, height, bit_depth, color_type) = header().ok_or(Error::UnrecognizedPng)?;

    let (color_depth, used_colors) = match color_type {
        // Greyscale
        0 => (bit_depth, 0),
        // Truecolor
        2 => (bit_depth * 3, 0),
        // Indexed; palette size comes from PLTE, if any
        3 => {
            let palette = find_png_chunk(&mut cursor, b"PLTE").map_or(0, |length| length / 3);
            (bit_depth * 3, palette)
        }
        // Greyscale with alpha
        4 => (bit_depth * 2, 0),
        // Truecolor with alpha
        6 => (bit_depth * 4, 0),
        other => {
            tracing::warn!(color_type = other, "unknown PNG color type");
            (0, 0)
        }
    };

    Ok(PictureMetadata {
        mime_type: "image/png".to_string(),
        width,
        height,
        color_depth,
        used_colors,
    })
}

fn sniff_gif(data: &[u8]) -> Result<PictureMetadata> {
    // "GIF87a"/"GIF89a", then the logical screen descriptor
    let mut cursor = ByteCursor::new(data);
    let mut screen = || -> Option<(u32, u32, u8)> {
        cursor.skip(6)?;
        let width = cursor.read_le_u16()? as u32;
        let height = cursor.read_le_u16()? as u32;
        let packed = cursor.read_u8()?;
        Some((width, height, packed))
    };
    let (width, height, packed) = screen().ok_or(Error::UnrecognizedGif)?;

    Ok(PictureMetadata {
        mime_type: "image/gif".to_string(),
        width,
        height,
        color_depth: 8 * 3,
        used_colors: 1u32 << ((packed & 0x07) + 1),
    })
}
