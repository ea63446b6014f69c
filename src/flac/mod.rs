// FLAC metadata handling module

pub mod block;
pub mod dumper;
pub mod parser;
pub mod picture;
pub mod seek_table;
pub mod stream_info;
pub mod vorbis;

use serde::Serialize;

use crate::utils::encoding::serialize_base64_opt;

pub use block::{audio_offset, Block, BlockHeader, BlockScanner, BlockType};
pub use dumper::{dump, DumpOptions};
pub use parser::parse;
pub use picture::{Picture, PictureType};
pub use seek_table::{SeekPoint, SeekTable};
pub use stream_info::StreamInfo;
pub use vorbis::{Comment, VorbisComment};

/// FLAC file signature
pub const FLAC_SIGNATURE: &[u8; 4] = b"fLaC";

/// Everything in a FLAC metadata region except padding.
///
/// Built by [`parse`], mutated by the caller and written back with [`dump`].
/// Holds no references into the buffer it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub stream_info: StreamInfo,
    #[serde(serialize_with = "serialize_base64_opt")]
    pub application: Option<Vec<u8>>,
    pub seek_table: Option<SeekTable>,
    pub vorbis_comment: Option<VorbisComment>,
    #[serde(serialize_with = "serialize_base64_opt")]
    pub cue_sheet: Option<Vec<u8>>,
    pub pictures: Vec<Picture>,
}

impl Metadata {
    /// Metadata holding only stream parameters
    pub fn new(stream_info: StreamInfo) -> Self {
        Metadata {
            stream_info,
            application: None,
            seek_table: None,
            vorbis_comment: None,
            cue_sheet: None,
            pictures: Vec::new(),
        }
    }
}
