// VORBIS_COMMENT block codec
//
// Unlike every other FLAC block, lengths here are little-endian.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::encoding::decode_utf8;
use crate::utils::io::{push_le_prefixed, ByteCursor};

/// One `field=value` entry. Field case is kept as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub field: String,
    pub value: String,
}

impl Comment {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Comment {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Split a raw entry at the first `=`; an entry without one is all field
    fn from_entry(entry: &[u8]) -> Self {
        match entry.iter().position(|&b| b == b'=') {
            Some(separator) => Comment {
                field: decode_utf8(&entry[..separator], "comment field"),
                value: decode_utf8(&entry[separator + 1..], "comment value"),
            },
            None => Comment {
                field: decode_utf8(entry, "comment field"),
                value: String::new(),
            },
        }
    }
}

/// Vorbis comment structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VorbisComment {
    pub vendor: String,
    pub comments: Vec<Comment>,
}

impl VorbisComment {
    /// Decode a VORBIS_COMMENT body. Duplicate fields are kept in order.
    pub fn read_from_data(data: &[u8]) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let vendor = cursor.read_le_prefixed().ok_or(Error::TruncatedComment)?;
        let vendor = decode_utf8(vendor, "vendor string");

        let comment_count = cursor.read_le_u32().ok_or(Error::TruncatedComment)? as usize;

        // Each entry needs at least its 4-byte length, which bounds the allocation
        let mut comments = Vec::with_capacity(comment_count.min(cursor.remaining() / 4));
        for _ in 0..comment_count {
            let entry = cursor.read_le_prefixed().ok_or(Error::TruncatedComment)?;
            comments.push(Comment::from_entry(entry));
        }

        if cursor.remaining() > 0 {
            tracing::debug!(
                trailing = cursor.remaining(),
                "ignoring bytes after the last vorbis comment"
            );
        }

        Ok(VorbisComment { vendor, comments })
    }

    /// Encode to a VORBIS_COMMENT body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();
        push_le_prefixed(&mut result, self.vendor.as_bytes());
        result.extend_from_slice(&(self.comments.len() as u32).to_le_bytes());
        for comment in &self.comments {
            let entry = format!("{}={}", comment.field, comment.value);
            push_le_prefixed(&mut result, entry.as_bytes());
        }
        result
    }

    /// First value whose field matches case-insensitively
    pub fn get(&self, field: &str) -> Option<&str> {
        self.comments
            .iter()
            .find(|c| c.field.eq_ignore_ascii_case(field))
            .map(|c| c.value.as_str())
    }

    /// Every value whose field matches case-insensitively, in order
    pub fn get_all<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.comments
            .iter()
            .filter(move |c| c.field.eq_ignore_ascii_case(field))
            .map(|c| c.value.as_str())
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.comments.push(Comment::new(field, value));
    }
}
