//! Exponential-Golomb codes (ITU-T H.265 - 9.1) as extension traits over the
//! [`vela_bitio`] reader and writer.
//!
//! `ue(v)` encodes an unsigned value as `leading_zeros(k) 1 suffix(k)` where
//! the decoded value is `2^k - 1 + suffix`. `se(v)` maps signed values onto
//! `ue(v)` with positive values on odd codes.
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(unsafe_code)]

use std::io;

use vela_bitio::{BitReader, BitWriter};

/// Exp-Golomb reads on top of [`BitReader`].
pub trait BitReaderExpGolombExt {
    /// Reads an unsigned `ue(v)` code. Values up to `2^32 - 2` are
    /// representable.
    fn read_exp_golomb(&mut self) -> io::Result<u32>;

    /// Reads a signed `se(v)` code.
    fn read_signed_exp_golomb(&mut self) -> io::Result<i32>;
}

impl BitReaderExpGolombExt for BitReader<'_> {
    fn read_exp_golomb(&mut self) -> io::Result<u32> {
        let mut leading_zeros = 0u32;
        while !self.read_bit()? {
            leading_zeros += 1;
            if leading_zeros > 31 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "exp-golomb code exceeds 32 bits",
                ));
            }
        }

        if leading_zeros == 0 {
            return Ok(0);
        }

        let suffix = self.read_bits(leading_zeros)?;
        Ok((1u32 << leading_zeros) - 1 + suffix)
    }

    fn read_signed_exp_golomb(&mut self) -> io::Result<i32> {
        let code = self.read_exp_golomb()?;
        let magnitude = (code as i64 + 1) / 2;
        if code & 1 != 0 {
            Ok(magnitude as i32)
        } else {
            Ok(-magnitude as i32)
        }
    }
}

/// Exp-Golomb writes on top of [`BitWriter`].
pub trait BitWriterExpGolombExt {
    /// Writes an unsigned `ue(v)` code. `value` must be at most `2^32 - 2`.
    fn write_exp_golomb(&mut self, value: u32) -> io::Result<()>;

    /// Writes a signed `se(v)` code.
    fn write_signed_exp_golomb(&mut self, value: i32) -> io::Result<()>;
}

impl BitWriterExpGolombExt for BitWriter {
    fn write_exp_golomb(&mut self, value: u32) -> io::Result<()> {
        if value == u32::MAX {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "value is not representable as a 32 bit exp-golomb code",
            ));
        }

        let code = value + 1;
        let significant_bits = 32 - code.leading_zeros();
        self.write_zero_bits(significant_bits - 1);
        self.write_bits(code, significant_bits);
        Ok(())
    }

    fn write_signed_exp_golomb(&mut self, value: i32) -> io::Result<()> {
        let code = if value > 0 {
            2 * value as i64 - 1
        } else {
            -2 * value as i64
        };
        if code > (u32::MAX - 1) as i64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "value is not representable as a 32 bit exp-golomb code",
            ));
        }
        self.write_exp_golomb(code as u32)
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    fn encode_ue(value: u32) -> Vec<u8> {
        let mut w = BitWriter::new(false);
        w.write_exp_golomb(value).unwrap();
        w.write_rbsp_trailing_bits();
        w.finish().unwrap().to_vec()
    }

    #[test]
    fn known_ue_codes() {
        // Table 9-1: 0 -> 1, 1 -> 010, 2 -> 011, 3 -> 00100 ...
        assert_eq!(encode_ue(0), [0b1_1000000]);
        assert_eq!(encode_ue(1), [0b010_10000]);
        assert_eq!(encode_ue(2), [0b011_10000]);
        assert_eq!(encode_ue(3), [0b00100_100]);
        assert_eq!(encode_ue(8), [0b0001001_1]);
    }

    #[test]
    fn ue_round_trip() {
        for value in (0..1024).chain([65534, 1 << 20, u32::MAX - 1]) {
            let mut w = BitWriter::new(false);
            w.write_exp_golomb(value).unwrap();
            w.write_rbsp_trailing_bits();
            let buf = w.finish().unwrap();

            let mut r = BitReader::new(&buf, false);
            assert_eq!(r.read_exp_golomb().unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn ue_rejects_unrepresentable() {
        let mut w = BitWriter::new(false);
        assert!(w.write_exp_golomb(u32::MAX).is_err());
    }

    #[test]
    fn se_round_trip() {
        for value in (-512..=512).chain([i32::MAX, i32::MIN + 1]) {
            let mut w = BitWriter::new(false);
            w.write_signed_exp_golomb(value).unwrap();
            w.write_rbsp_trailing_bits();
            let buf = w.finish().unwrap();

            let mut r = BitReader::new(&buf, false);
            assert_eq!(r.read_signed_exp_golomb().unwrap(), value, "value {value}");
        }
    }

    #[test]
    fn se_mapping() {
        // 9.1.1: code 1 -> 1, code 2 -> -1, code 3 -> 2, code 4 -> -2.
        let data = [0b010_011_00];
        let mut r = BitReader::new(&data, false);
        assert_eq!(r.read_signed_exp_golomb().unwrap(), 1);
        assert_eq!(r.read_signed_exp_golomb().unwrap(), -1);
    }

    #[test]
    fn oversized_code_is_rejected() {
        // 33 leading zero bits.
        let data = [0x00, 0x00, 0x00, 0x00, 0x40];
        let mut r = BitReader::new(&data, false);
        assert!(r.read_exp_golomb().is_err());
    }
}
