// FLAC metadata region serializer

use crate::error::Result;

use super::block::{audio_offset, write_block, BlockHeader, BlockType};
use super::{Metadata, FLAC_SIGNATURE};

/// Options for [`dump`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Size of a zero-filled PADDING block appended after all other
    /// metadata blocks. 0 writes no padding block.
    pub trailing_padding: u32,
}

impl DumpOptions {
    pub fn with_padding(trailing_padding: u32) -> Self {
        DumpOptions { trailing_padding }
    }
}

/// Re-encode `metadata` in front of the audio frames of `original`.
///
/// Blocks are written in a fixed order: STREAMINFO, APPLICATION, SEEKTABLE,
/// VORBIS_COMMENT, CUESHEET, then every PICTURE, then the optional padding.
/// Padding present in `original` is not carried over. Everything after the
/// last metadata block of `original` is copied unchanged.
pub fn dump(metadata: &Metadata, original: &[u8], options: &DumpOptions) -> Result<Vec<u8>> {
    let audio_start = audio_offset(original)?;
    let audio = &original[audio_start..];

    let mut blocks: Vec<(BlockType, Vec<u8>)> = Vec::with_capacity(6 + metadata.pictures.len());
    blocks.push((BlockType::StreamInfo, metadata.stream_info.to_bytes()?));
    if let Some(application) = &metadata.application {
        blocks.push((BlockType::Application, application.clone()));
    }
    if let Some(seek_table) = &metadata.seek_table {
        blocks.push((BlockType::SeekTable, seek_table.to_bytes()));
    }
    if let Some(vorbis_comment) = &metadata.vorbis_comment {
        blocks.push((BlockType::VorbisComment, vorbis_comment.to_bytes()));
    }
    if let Some(cue_sheet) = &metadata.cue_sheet {
        blocks.push((BlockType::CueSheet, cue_sheet.clone()));
    }
    for picture in &metadata.pictures {
        blocks.push((BlockType::Picture, picture.to_bytes()));
    }
    if options.trailing_padding > 0 {
        blocks.push((BlockType::Padding, vec![0; options.trailing_padding as usize]));
    }

    let metadata_len: usize = blocks.iter().map(|(_, body)| BlockHeader::SIZE + body.len()).sum();
    let mut result = Vec::with_capacity(FLAC_SIGNATURE.len() + metadata_len + audio.len());
    result.extend_from_slice(FLAC_SIGNATURE);

    let last = blocks.len() - 1;
    for (index, (block_type, body)) in blocks.iter().enumerate() {
        write_block(&mut result, *block_type, index == last, body)?;
    }
    result.extend_from_slice(audio);

    tracing::debug!(
        blocks = blocks.len(),
        padding = options.trailing_padding,
        audio_offset = audio_start,
        audio_len = audio.len(),
        output_len = result.len(),
        "serialized FLAC metadata"
    );

    Ok(result)
}
