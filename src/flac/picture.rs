// FLAC PICTURE block implementation

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::encoding::{decode_utf8, serialize_base64};
use crate::utils::io::{push_be_prefixed, ByteCursor};

/// Picture types, numerically identical to the ID3v2 APIC picture types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PictureType {
    Other,
    /// 32x32 pixels, PNG only
    FileIcon,
    OtherFileIcon,
    FrontCover,
    BackCover,
    LeafletPage,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    VideoScreenCapture,
    BrightColouredFish,
    Illustration,
    BandLogo,
    PublisherLogo,
    /// Any other type byte, kept so it can be written back unchanged
    Unknown(u8),
}

impl PictureType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PictureType::Other,
            1 => PictureType::FileIcon,
            2 => PictureType::OtherFileIcon,
            3 => PictureType::FrontCover,
            4 => PictureType::BackCover,
            5 => PictureType::LeafletPage,
            6 => PictureType::Media,
            7 => PictureType::LeadArtist,
            8 => PictureType::Artist,
            9 => PictureType::Conductor,
            10 => PictureType::Band,
            11 => PictureType::Composer,
            12 => PictureType::Lyricist,
            13 => PictureType::RecordingLocation,
            14 => PictureType::DuringRecording,
            15 => PictureType::DuringPerformance,
            16 => PictureType::VideoScreenCapture,
            17 => PictureType::BrightColouredFish,
            18 => PictureType::Illustration,
            19 => PictureType::BandLogo,
            20 => PictureType::PublisherLogo,
            n => PictureType::Unknown(n),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            PictureType::Other => 0,
            PictureType::FileIcon => 1,
            PictureType::OtherFileIcon => 2,
            PictureType::FrontCover => 3,
            PictureType::BackCover => 4,
            PictureType::LeafletPage => 5,
            PictureType::Media => 6,
            PictureType::LeadArtist => 7,
            PictureType::Artist => 8,
            PictureType::Conductor => 9,
            PictureType::Band => 10,
            PictureType::Composer => 11,
            PictureType::Lyricist => 12,
            PictureType::RecordingLocation => 13,
            PictureType::DuringRecording => 14,
            PictureType::DuringPerformance => 15,
            PictureType::VideoScreenCapture => 16,
            PictureType::BrightColouredFish => 17,
            PictureType::Illustration => 18,
            PictureType::BandLogo => 19,
            PictureType::PublisherLogo => 20,
            PictureType::Unknown(n) => n,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PictureType::Other => "Other",
            PictureType::FileIcon => "File Icon",
            PictureType::OtherFileIcon => "Other File Icon",
            PictureType::FrontCover => "Cover (front)",
            PictureType::BackCover => "Cover (back)",
            PictureType::LeafletPage => "Leaflet page",
            PictureType::Media => "Media",
            PictureType::LeadArtist => "Lead artist",
            PictureType::Artist => "Artist",
            PictureType::Conductor => "Conductor",
            PictureType::Band => "Band",
            PictureType::Composer => "Composer",
            PictureType::Lyricist => "Lyricist",
            PictureType::RecordingLocation => "Recording Location",
            PictureType::DuringRecording => "During recording",
            PictureType::DuringPerformance => "During performance",
            PictureType::VideoScreenCapture => "Video screen capture",
            PictureType::BrightColouredFish => "Bright coloured fish",
            PictureType::Illustration => "Illustration",
            PictureType::BandLogo => "Band logo",
            PictureType::PublisherLogo => "Publisher logo",
            PictureType::Unknown(_) => "Unknown",
        }
    }
}

/// FLAC PICTURE block structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub picture_type: PictureType,
    pub mime_type: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    /// Bits per pixel across all channels
    pub color_depth: u32,
    /// Palette entries, 0 for non-indexed images
    pub used_colors: u32,
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Picture {
    /// Decode a PICTURE body. The image bytes are copied out of `data`.
    pub fn read_from_data(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        // Only the low byte of the 32-bit type carries a value
        let raw_type = cursor.read_be_u32().ok_or(Error::TruncatedPicture)?;
        if raw_type > 0xFF {
            tracing::warn!(raw_type, "picture type has high bits set; keeping the low byte");
        }
        let picture_type = PictureType::from_u8(raw_type as u8);

        let mime_type = cursor.read_be_prefixed().ok_or(Error::TruncatedPicture)?;
        let mime_type = decode_utf8(mime_type, "picture MIME type");

        let description = cursor.read_be_prefixed().ok_or(Error::TruncatedPicture)?;
        let description = decode_utf8(description, "picture description");

        let width = cursor.read_be_u32().ok_or(Error::TruncatedPicture)?;
        let height = cursor.read_be_u32().ok_or(Error::TruncatedPicture)?;
        let color_depth = cursor.read_be_u32().ok_or(Error::TruncatedPicture)?;
        let used_colors = cursor.read_be_u32().ok_or(Error::TruncatedPicture)?;

        let picture_data = cursor.read_be_prefixed().ok_or(Error::TruncatedPicture)?;

        Ok(Picture {
            picture_type,
            mime_type,
            description,
            width,
            height,
            color_depth,
            used_colors,
            data: picture_data.to_vec(),
        })
    }

    /// Encode Picture to a PICTURE body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(32 + self.mime_type.len() + self.description.len() + self.data.len());

        result.extend_from_slice(&(self.picture_type.to_u8() as u32).to_be_bytes());
        push_be_prefixed(&mut result, self.mime_type.as_bytes());
        push_be_prefixed(&mut result, self.description.as_bytes());
        result.extend_from_slice(&self.width.to_be_bytes());
        result.extend_from_slice(&self.height.to_be_bytes());
        result.extend_from_slice(&self.color_depth.to_be_bytes());
        result.extend_from_slice(&self.used_colors.to_be_bytes());
        push_be_prefixed(&mut result, &self.data);

        result
    }

    /// File extension for the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Picture {
        Picture {
            picture_type: PictureType::BackCover,
            mime_type: "image/jpeg".to_string(),
            description: "back cover".to_string(),
            width: 1,
            height: 1,
            color_depth: 24,
            used_colors: 0,
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        }
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_bytes();
        let mut expected = vec![0, 0, 0, 4, 0, 0, 0, 10];
        expected.extend_from_slice(b"image/jpeg");
        expected.extend_from_slice(&[0, 0, 0, 10]);
        expected.extend_from_slice(b"back cover");
        expected.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 24, 0, 0, 0, 0]);
        expected.extend_from_slice(&[0, 0, 0, 4, 0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(bytes, expected);
        assert_eq!(Picture::read_from_data(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_unknown_type_round_trips() {
        let mut picture = sample();
        picture.picture_type = PictureType::Unknown(42);
        let decoded = Picture::read_from_data(&picture.to_bytes()).unwrap();
        assert_eq!(decoded.picture_type, PictureType::Unknown(42));
        assert_eq!(decoded.picture_type.to_u8(), 42);
    }

    #[test]
    fn test_type_codes() {
        for code in 0..=20u8 {
            let picture_type = PictureType::from_u8(code);
            assert!(!matches!(picture_type, PictureType::Unknown(_)));
            assert_eq!(picture_type.to_u8(), code);
        }
        assert_eq!(PictureType::from_u8(3), PictureType::FrontCover);
        assert_eq!(PictureType::from_u8(21), PictureType::Unknown(21));
    }

    #[test]
    fn test_decoded_data_is_owned() {
        let mut bytes = sample().to_bytes();
        let picture = Picture::read_from_data(&bytes).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 0x00;
        assert_eq!(picture.data, vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[test]
    fn test_truncated() {
        let bytes = sample().to_bytes();
        assert_eq!(Picture::read_from_data(&bytes[..3]), Err(Error::TruncatedPicture));
        assert_eq!(Picture::read_from_data(&bytes[..20]), Err(Error::TruncatedPicture));
        assert_eq!(
            Picture::read_from_data(&bytes[..bytes.len() - 1]),
            Err(Error::TruncatedPicture)
        );
    }

    #[test]
    fn test_extension() {
        assert_eq!(sample().extension(), "jpg");
        let mut picture = sample();
        picture.mime_type = "image/png".to_string();
        assert_eq!(picture.extension(), "png");
    }
}
