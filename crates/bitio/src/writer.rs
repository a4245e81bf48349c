use std::io;

use bytes::{BufMut, Bytes, BytesMut};

/// A bit-level writer into an owned, growable buffer.
///
/// Bits are emitted MSB-first. When emulation prevention is enabled, a
/// `0x03` escape byte is inserted whenever two `0x00` bytes would otherwise
/// be followed by a byte in `0x00..=0x03`, per ITU-T H.265 - 7.4.2.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: BytesMut,
    cache: u8,
    cache_bits: u8,
    emulation_prevention: bool,
    zero_count: u8,
}

impl BitWriter {
    pub fn new(emulation_prevention: bool) -> Self {
        Self {
            emulation_prevention,
            ..Self::default()
        }
    }

    fn push_byte(&mut self, byte: u8) {
        if self.emulation_prevention && self.zero_count >= 2 && byte <= 0x03 {
            self.buf.put_u8(0x03);
            self.zero_count = 0;
        }
        self.buf.put_u8(byte);
        self.zero_count = if byte == 0x00 { self.zero_count + 1 } else { 0 };
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.cache = (self.cache << 1) | bit as u8;
        self.cache_bits += 1;
        if self.cache_bits == 8 {
            let byte = self.cache;
            self.cache = 0;
            self.cache_bits = 0;
            self.push_byte(byte);
        }
    }

    /// Writes the `n` (`n <= 32`) least significant bits of `value`,
    /// MSB-first. Higher bits of `value` are ignored.
    pub fn write_bits(&mut self, value: u32, n: u32) {
        debug_assert!(n <= 32);
        for i in (0..n).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Writes `n` bits of `value` in two's-complement representation.
    pub fn write_bits_signed(&mut self, value: i32, n: u32) {
        self.write_bits(value as u32, n);
    }

    pub fn write_zero_bits(&mut self, mut n: u32) {
        while n > 0 {
            let take = n.min(32);
            self.write_bits(0, take);
            n -= take;
        }
    }

    /// Writes an ff-coded integer (sequence of `0xFF` bytes terminated by a
    /// byte below `0xFF`).
    pub fn write_ff_coded(&mut self, mut value: u32) {
        while value >= 0xFF {
            self.write_bits(0xFF, 8);
            value -= 0xFF;
        }
        self.write_bits(value, 8);
    }

    pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_bits(byte as u32, 8);
        }
    }

    /// 7.3.2.11: writes `rbsp_stop_one_bit` followed by alignment zeros.
    pub fn write_rbsp_trailing_bits(&mut self) {
        self.write_bit(true);
        while !self.byte_aligned() {
            self.write_bit(false);
        }
    }

    pub fn byte_aligned(&self) -> bool {
        self.cache_bits == 0
    }

    pub fn len_bits(&self) -> usize {
        self.buf.len() * 8 + self.cache_bits as usize
    }

    /// Takes ownership of the written buffer.
    ///
    /// Fails if the writer is not byte-aligned.
    pub fn finish(self) -> io::Result<Bytes> {
        if !self.byte_aligned() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "bitstream is not byte-aligned",
            ));
        }
        Ok(self.buf.freeze())
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;
    use crate::BitReader;

    #[test]
    fn write_bits_msb_first() {
        let mut w = BitWriter::new(false);
        w.write_bit(true);
        w.write_bits(0b0110, 4);
        w.write_bits(0b101, 3);
        assert_eq!(w.finish().unwrap().as_ref(), &[0b1011_0101]);
    }

    #[test]
    fn finish_requires_alignment() {
        let mut w = BitWriter::new(false);
        w.write_bit(true);
        assert!(w.finish().is_err());
    }

    #[test]
    fn emulation_prevention_inserts_escape() {
        let mut w = BitWriter::new(true);
        w.write_raw_bytes(&[0x00, 0x00, 0x01]);
        assert_eq!(w.finish().unwrap().as_ref(), &[0x00, 0x00, 0x03, 0x01]);

        // The escape is only inserted in front of a following byte.
        let mut w = BitWriter::new(true);
        w.write_raw_bytes(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(w.finish().unwrap().as_ref(), &[0x00, 0x00, 0x03, 0x00, 0x00]);

        // 0x04 does not need an escape.
        let mut w = BitWriter::new(true);
        w.write_raw_bytes(&[0x00, 0x00, 0x04]);
        assert_eq!(w.finish().unwrap().as_ref(), &[0x00, 0x00, 0x04]);
    }

    #[test]
    fn round_trip_with_emulation_prevention() {
        let payload = [0x12, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0xFF];
        let mut w = BitWriter::new(true);
        w.write_raw_bytes(&payload);
        let encoded = w.finish().unwrap();

        let mut r = BitReader::new(&encoded, true);
        let mut decoded = vec![0u8; payload.len()];
        r.read_raw_bytes(&mut decoded).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn rbsp_trailing_bits() {
        let mut w = BitWriter::new(false);
        w.write_bits(0b0101, 4);
        w.write_rbsp_trailing_bits();
        assert_eq!(w.finish().unwrap().as_ref(), &[0b0101_1000]);

        // Already aligned: a full stop byte is emitted.
        let mut w = BitWriter::new(false);
        w.write_bits(0xAB, 8);
        w.write_rbsp_trailing_bits();
        assert_eq!(w.finish().unwrap().as_ref(), &[0xAB, 0x80]);
    }

    #[test]
    fn ff_coded() {
        let mut w = BitWriter::new(false);
        w.write_ff_coded(5);
        w.write_ff_coded(255);
        w.write_ff_coded(526);
        let buf = w.finish().unwrap();
        assert_eq!(buf.as_ref(), &[0x05, 0xFF, 0x00, 0xFF, 0xFF, 0x10]);
    }
}
