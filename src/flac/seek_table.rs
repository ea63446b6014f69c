// SEEKTABLE block codec

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::io::ByteCursor;

/// One seek hint: the first sample of a target frame and its byte offset
/// from the first frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeekPoint {
    pub sample_number: u64,
    pub offset: u64,
    pub number_of_samples: u16,
}

impl SeekPoint {
    pub const SIZE: usize = 18;
    pub const PLACEHOLDER: u64 = u64::MAX;

    /// Placeholder points reserve space for later seek points
    pub fn is_placeholder(&self) -> bool {
        self.sample_number == Self::PLACEHOLDER
    }
}

/// Decoded SEEKTABLE block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeekTable {
    pub points: Vec<SeekPoint>,
}

impl SeekTable {
    pub fn read_from_data(data: &[u8]) -> Result<Self> {
        let truncated = || Error::TruncatedSeekTable { length: data.len() };
        if data.len() % SeekPoint::SIZE != 0 {
            return Err(truncated());
        }

        let mut cursor = ByteCursor::new(data);
        let mut points = Vec::with_capacity(data.len() / SeekPoint::SIZE);
        while cursor.remaining() > 0 {
            points.push(SeekPoint {
                sample_number: cursor.read_be_u64().ok_or_else(truncated)?,
                offset: cursor.read_be_u64().ok_or_else(truncated)?,
                number_of_samples: cursor.read_be_u16().ok_or_else(truncated)?,
            });
        }

        Ok(SeekTable { points })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.points.len() * SeekPoint::SIZE);
        for point in &self.points {
            result.extend_from_slice(&point.sample_number.to_be_bytes());
            result.extend_from_slice(&point.offset.to_be_bytes());
            result.extend_from_slice(&point.number_of_samples.to_be_bytes());
        }
        result
    }
}
