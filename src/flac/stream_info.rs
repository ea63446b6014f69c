// STREAMINFO block codec

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::bits::{BitReader, BitWriter};

/// Stream parameters from the mandatory STREAMINFO block.
///
/// Channel count and bit depth are stored on disk as `value - 1`; the fields
/// here hold the real values (1-8 channels, 1-32 bits per sample).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub min_block_size: u16,
    pub max_block_size: u16,
    /// 24-bit
    pub min_frame_size: u32,
    /// 24-bit
    pub max_frame_size: u32,
    /// 20-bit, in Hz
    pub sample_rate: u32,
    pub channels: u8,
    pub bits_per_sample: u8,
    /// 36-bit; 0 means unknown
    pub total_samples: u64,
    /// MD5 of the unencoded audio as 32 lowercase hex digits
    pub signature: String,
}

impl StreamInfo {
    pub const SIZE: usize = 34;
    const SIGNATURE_SIZE: usize = 16;

    /// Decode a STREAMINFO body. Bytes past the first 34 are ignored.
    pub fn read_from_data(data: &[u8]) -> Result<Self> {
        let truncated = || Error::TruncatedStreamInfo { length: data.len() };
        let mut reader = BitReader::new(data.get(..Self::SIZE).ok_or_else(truncated)?);
        let mut bits = |n| reader.read_bits(n).ok_or_else(truncated);

        let min_block_size = bits(16)? as u16;
        let max_block_size = bits(16)? as u16;
        let min_frame_size = bits(24)? as u32;
        let max_frame_size = bits(24)? as u32;
        let sample_rate = bits(20)? as u32;
        let channels = bits(3)? as u8 + 1;
        let bits_per_sample = bits(5)? as u8 + 1;
        let total_samples = bits(36)?;

        let md5 = reader.read_bytes(Self::SIGNATURE_SIZE).ok_or_else(truncated)?;

        Ok(StreamInfo {
            min_block_size,
            max_block_size,
            min_frame_size,
            max_frame_size,
            sample_rate,
            channels,
            bits_per_sample,
            total_samples,
            signature: hex::encode(md5),
        })
    }

    /// Encode to the 34-byte STREAMINFO body
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        check_range("min_frame_size", self.min_frame_size as u64, 0, (1 << 24) - 1)?;
        check_range("max_frame_size", self.max_frame_size as u64, 0, (1 << 24) - 1)?;
        check_range("sample_rate", self.sample_rate as u64, 0, (1 << 20) - 1)?;
        check_range("channels", self.channels as u64, 1, 8)?;
        check_range("bits_per_sample", self.bits_per_sample as u64, 1, 32)?;
        check_range("total_samples", self.total_samples, 0, (1 << 36) - 1)?;

        let md5 = hex::decode(&self.signature)
            .ok()
            .filter(|bytes| bytes.len() == Self::SIGNATURE_SIZE)
            .ok_or_else(|| Error::InvalidSignature(self.signature.clone()))?;

        let mut writer = BitWriter::with_capacity(Self::SIZE);
        writer.write_bits(self.min_block_size as u64, 16);
        writer.write_bits(self.max_block_size as u64, 16);
        writer.write_bits(self.min_frame_size as u64, 24);
        writer.write_bits(self.max_frame_size as u64, 24);
        writer.write_bits(self.sample_rate as u64, 20);
        writer.write_bits(self.channels as u64 - 1, 3);
        writer.write_bits(self.bits_per_sample as u64 - 1, 5);
        writer.write_bits(self.total_samples, 36);
        writer.write_bytes(&md5);

        Ok(writer.into_bytes())
    }

    /// Stream length in seconds, if the sample count is known
    pub fn duration_secs(&self) -> Option<f64> {
        if self.total_samples == 0 || self.sample_rate == 0 {
            return None;
        }
        Some(self.total_samples as f64 / self.sample_rate as f64)
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::StreamInfoOutOfRange { field, value })
    }
}
