// Fixed-width bit reader/writer for fields packed across byte boundaries

/// MSB-first bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    /// Current position in bits from the start of the slice
    pub fn position(&self) -> usize {
        self.byte_pos * 8 + self.bit_pos as usize
    }

    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.position())
    }

    fn read_bit(&mut self) -> bool {
        let bit = (self.data[self.byte_pos] >> (7 - self.bit_pos)) & 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.bit_pos = 0;
            self.byte_pos += 1;
        }
        bit != 0
    }

    /// Read `n` bits (at most 64) as an unsigned value.
    ///
    /// Returns `None` without consuming anything if fewer than `n` bits remain.
    pub fn read_bits(&mut self, n: u8) -> Option<u64> {
        if n > 64 || self.remaining_bits() < n as usize {
            return None;
        }

        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | self.read_bit() as u64;
        }
        Some(value)
    }

    /// Read `n` whole bytes; the reader must be byte-aligned.
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.bit_pos != 0 || self.data.len() - self.byte_pos < n {
            return None;
        }
        let bytes = &self.data[self.byte_pos..self.byte_pos + n];
        self.byte_pos += n;
        Some(bytes)
    }
}

/// MSB-first bit writer that grows a byte vector.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_pos: u8,
}

impl BitWriter {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            bit_pos: 0,
        }
    }

    fn write_bit(&mut self, bit: bool) {
        if self.bit_pos == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << (7 - self.bit_pos);
        }
        self.bit_pos = (self.bit_pos + 1) % 8;
    }

    /// Write the low `n` bits of `value`, most significant first.
    ///
    /// Callers range-check `value`; bits above `n` are dropped.
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 64);
        debug_assert!(n == 64 || value >> n == 0, "{value} does not fit in {n} bits");
        for i in (0..n).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Append whole bytes; the writer must be byte-aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        debug_assert!(self.is_byte_aligned(), "write_bytes on unaligned writer");
        self.data.extend_from_slice(bytes);
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_pos == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
