// Bounds-checked readers and writers for in-memory metadata blocks

/// Cursor over a byte slice. Every read returns `None` instead of panicking
/// when the slice is exhausted, so codecs can map truncation onto their own
/// error kind.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read `n` bytes, borrowing from the underlying slice
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.read_bytes(N)?.try_into().ok()
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|b| b[0])
    }

    /// Read big-endian 16-bit integer
    pub fn read_be_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read big-endian 32-bit integer
    pub fn read_be_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read big-endian 64-bit integer
    pub fn read_be_u64(&mut self) -> Option<u64> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Read little-endian 16-bit integer
    pub fn read_le_u16(&mut self) -> Option<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read little-endian 32-bit integer
    pub fn read_le_u32(&mut self) -> Option<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a 32-bit length prefix followed by that many bytes
    pub fn read_be_prefixed(&mut self) -> Option<&'a [u8]> {
        let length = self.read_be_u32()? as usize;
        self.read_bytes(length)
    }

    pub fn read_le_prefixed(&mut self) -> Option<&'a [u8]> {
        let length = self.read_le_u32()? as usize;
        self.read_bytes(length)
    }

    pub fn skip(&mut self, n: usize) -> Option<()> {
        self.read_bytes(n).map(|_| ())
    }
}

/// Read a big-endian 24-bit integer from the first three bytes
pub fn read_be_u24(bytes: [u8; 3]) -> u32 {
    ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32)
}

/// Encode the low 24 bits of `value` big-endian
pub fn be_u24_bytes(value: u32) -> [u8; 3] {
    let [_, a, b, c] = value.to_be_bytes();
    [a, b, c]
}

/// Append a 32-bit big-endian length prefix and the bytes themselves
pub fn push_be_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

/// Append a 32-bit little-endian length prefix and the bytes themselves
pub fn push_le_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}
