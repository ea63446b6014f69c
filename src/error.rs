// Error types for FLAC metadata parsing and serialization

use thiserror::Error;

use crate::flac::BlockType;

/// Errors produced while reading or writing a FLAC metadata region
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid FLAC file: missing \"fLaC\" signature")]
    InvalidMagic,

    #[error("Missing STREAMINFO block in FLAC metadata")]
    MissingStreamInfo,

    #[error("Truncated metadata block header at offset {offset}")]
    TruncatedHeader { offset: usize },

    #[error("Metadata block at offset {offset} declares {declared} bytes but only {available} remain")]
    TruncatedBody {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("STREAMINFO block is {length} bytes, expected 34")]
    TruncatedStreamInfo { length: usize },

    #[error("SEEKTABLE block length {length} is not a multiple of 18")]
    TruncatedSeekTable { length: usize },

    #[error("VORBIS_COMMENT block is truncated")]
    TruncatedComment,

    #[error("PICTURE block is truncated")]
    TruncatedPicture,

    #[error("Unrecognized image format")]
    UnrecognizedImageFormat,

    #[error("JPEG image has no start-of-frame marker")]
    UnrecognizedJpeg,

    #[error("PNG image has no readable IHDR chunk")]
    UnrecognizedPng,

    #[error("GIF image is too short to hold a logical screen descriptor")]
    UnrecognizedGif,

    #[error("Source file metadata cannot be re-framed at offset {offset}")]
    TruncatedSource { offset: usize },

    #[error("STREAMINFO field {field} is out of range: {value}")]
    StreamInfoOutOfRange { field: &'static str, value: u64 },

    #[error("STREAMINFO signature must be 32 hex digits, got {0:?}")]
    InvalidSignature(String),

    #[error("{block_type:?} block body of {length} bytes exceeds the 24-bit size field")]
    BlockTooLarge { block_type: BlockType, length: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
