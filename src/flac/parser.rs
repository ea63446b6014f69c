// FLAC metadata region parser

use crate::error::{Error, Result};

use super::block::{check_signature, BlockScanner, BlockType};
use super::{Metadata, Picture, SeekTable, StreamInfo, VorbisComment, FLAC_SIGNATURE};

/// Keep the first occurrence of a single-instance block
fn set_once<T>(
    slot: &mut Option<T>,
    block_type: BlockType,
    offset: usize,
    decode: impl FnOnce() -> Result<T>,
) -> Result<()> {
    if slot.is_some() {
        tracing::warn!(?block_type, offset, "duplicate metadata block ignored");
        return Ok(());
    }
    *slot = Some(decode()?);
    Ok(())
}

/// Parse the metadata region of a FLAC file.
///
/// Decoding stops at the block flagged as last (or at the end of `bytes`).
/// Padding, reserved and invalid blocks are dropped. Any malformed block
/// fails the whole parse.
pub fn parse(bytes: &[u8]) -> Result<Metadata> {
    check_signature(bytes)?;

    let mut stream_info = None;
    let mut application = None;
    let mut seek_table = None;
    let mut vorbis_comment = None;
    let mut cue_sheet = None;
    let mut pictures = Vec::new();

    for block in BlockScanner::new(bytes, FLAC_SIGNATURE.len()) {
        let block = block?;
        let block_type = block.header.block_type;
        let offset = block.offset;

        match block_type {
            BlockType::StreamInfo => {
                set_once(&mut stream_info, block_type, offset, || {
                    StreamInfo::read_from_data(block.body)
                })?;
            }
            BlockType::Padding => {}
            BlockType::Application => {
                set_once(&mut application, block_type, offset, || Ok(block.body.to_vec()))?;
            }
            BlockType::SeekTable => {
                set_once(&mut seek_table, block_type, offset, || {
                    SeekTable::read_from_data(block.body)
                })?;
            }
            BlockType::VorbisComment => {
                set_once(&mut vorbis_comment, block_type, offset, || {
                    VorbisComment::read_from_data(block.body)
                })?;
            }
            BlockType::CueSheet => {
                set_once(&mut cue_sheet, block_type, offset, || Ok(block.body.to_vec()))?;
            }
            BlockType::Picture => pictures.push(Picture::read_from_data(block.body)?),
            BlockType::Reserved | BlockType::Invalid => {
                tracing::warn!(
                    ?block_type,
                    offset,
                    length = block.body.len(),
                    "skipping unsupported metadata block"
                );
            }
        }
    }

    let stream_info = stream_info.ok_or(Error::MissingStreamInfo)?;

    tracing::debug!(
        sample_rate = stream_info.sample_rate,
        channels = stream_info.channels,
        pictures = pictures.len(),
        has_comments = vorbis_comment.is_some(),
        "parsed FLAC metadata"
    );

    Ok(Metadata {
        stream_info,
        application,
        seek_table,
        vorbis_comment,
        cue_sheet,
        pictures,
    })
}
