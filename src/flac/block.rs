// FLAC metadata block framing

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::io::{be_u24_bytes, read_be_u24};

use super::FLAC_SIGNATURE;

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    /// Types 7 through 126
    Reserved,
    Invalid,
}

impl BlockType {
    pub fn from_byte(byte: u8) -> Self {
        match byte & 0x7F {
            0 => BlockType::StreamInfo,
            1 => BlockType::Padding,
            2 => BlockType::Application,
            3 => BlockType::SeekTable,
            4 => BlockType::VorbisComment,
            5 => BlockType::CueSheet,
            6 => BlockType::Picture,
            127 => BlockType::Invalid,
            _ => BlockType::Reserved,
        }
    }

    /// Type code written into a block header. `Reserved` maps to 7.
    pub fn to_byte(self) -> u8 {
        match self {
            BlockType::StreamInfo => 0,
            BlockType::Padding => 1,
            BlockType::Application => 2,
            BlockType::SeekTable => 3,
            BlockType::VorbisComment => 4,
            BlockType::CueSheet => 5,
            BlockType::Picture => 6,
            BlockType::Reserved => 7,
            BlockType::Invalid => 127,
        }
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub is_last: bool,
    pub block_type: BlockType,
    pub length: u32,
}

impl BlockHeader {
    pub const SIZE: usize = 4;
    pub const LAST_BLOCK_FLAG: u8 = 0x80;
    pub const MAX_LENGTH: usize = 0xFF_FFFF;

    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        BlockHeader {
            is_last: bytes[0] & Self::LAST_BLOCK_FLAG != 0,
            block_type: BlockType::from_byte(bytes[0]),
            length: read_be_u24([bytes[1], bytes[2], bytes[3]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let flag = if self.is_last { Self::LAST_BLOCK_FLAG } else { 0 };
        let [a, b, c] = be_u24_bytes(self.length);
        [flag | self.block_type.to_byte(), a, b, c]
    }
}

/// One framed metadata block, borrowing its body from the scanned buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub header: BlockHeader,
    /// Absolute offset of the first body byte
    pub offset: usize,
    pub body: &'a [u8],
}

/// Walks the metadata region of a FLAC buffer one block at a time.
///
/// Scanning ends after the block flagged as last, or cleanly when the buffer
/// ends exactly on a block boundary. A partial header or a body running past
/// the end of the buffer yields one error and then ends the iteration.
#[derive(Debug, Clone)]
pub struct BlockScanner<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> BlockScanner<'a> {
    /// Start scanning at `start`, normally just past the 4-byte signature
    pub fn new(data: &'a [u8], start: usize) -> Self {
        BlockScanner {
            data,
            pos: start.min(data.len()),
            done: false,
        }
    }

    /// Offset of the next unread byte. Once iteration has finished without
    /// error this is where the audio frames begin.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn fail(&mut self, error: Error) -> Option<Result<Block<'a>>> {
        self.done = true;
        Some(Err(error))
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = Result<Block<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let remaining = &self.data[self.pos..];
        if remaining.is_empty() {
            self.done = true;
            return None;
        }

        let Some(header_bytes) = remaining.get(..BlockHeader::SIZE) else {
            return self.fail(Error::TruncatedHeader { offset: self.pos });
        };
        let mut raw = [0u8; BlockHeader::SIZE];
        raw.copy_from_slice(header_bytes);
        let header = BlockHeader::from_bytes(raw);

        let offset = self.pos + BlockHeader::SIZE;
        let declared = header.length as usize;
        let available = self.data.len() - offset;
        if declared > available {
            return self.fail(Error::TruncatedBody {
                offset,
                declared,
                available,
            });
        }

        let body = &self.data[offset..offset + declared];
        self.pos = offset + declared;
        self.done = header.is_last;

        tracing::trace!(
            offset,
            block_type = ?header.block_type,
            length = declared,
            is_last = header.is_last,
            "scanned metadata block"
        );

        Some(Ok(Block {
            header,
            offset,
            body,
        }))
    }
}

/// Check the 4-byte stream marker
pub fn check_signature(data: &[u8]) -> Result<()> {
    match data.get(..FLAC_SIGNATURE.len()) {
        Some(signature) if signature == FLAC_SIGNATURE => Ok(()),
        _ => Err(Error::InvalidMagic),
    }
}

/// Offset at which the audio frames of `data` begin.
///
/// Only header framing is inspected; block bodies are not decoded.
pub fn audio_offset(data: &[u8]) -> Result<usize> {
    check_signature(data)?;

    let mut scanner = BlockScanner::new(data, FLAC_SIGNATURE.len());
    for block in scanner.by_ref() {
        if let Err(error) = block {
            let offset = match error {
                Error::TruncatedHeader { offset } => offset,
                Error::TruncatedBody { offset, .. } => offset - BlockHeader::SIZE,
                _ => scanner.position(),
            };
            return Err(Error::TruncatedSource { offset });
        }
    }
    Ok(scanner.position())
}

/// Append a framed block (header + body) to `out`
pub fn write_block(
    out: &mut Vec<u8>,
    block_type: BlockType,
    is_last: bool,
    body: &[u8],
) -> Result<()> {
    if body.len() > BlockHeader::MAX_LENGTH {
        return Err(Error::BlockTooLarge {
            block_type,
            length: body.len(),
        });
    }

    let header = BlockHeader {
        is_last,
        block_type,
        length: body.len() as u32,
    };
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(body);
    Ok(())
}
