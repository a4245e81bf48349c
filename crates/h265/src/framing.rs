//! Locating NAL units in an Annex-B byte stream, and in-place conversion
//! between Annex-B framing and `hvcC`-style length-prefixed framing.
//!
//! Only 4-byte start codes (`00 00 00 01`) are supported.

use byteorder::{BigEndian, ByteOrder};
use tracing::warn;

use crate::error::Error;

const START_CODE_LEN: usize = 4;

fn find_start_code(buf: &[u8]) -> Option<usize> {
    buf.windows(START_CODE_LEN)
        .position(|w| w == [0x00, 0x00, 0x00, 0x01])
}

/// Finds the next NAL unit in `buf`.
///
/// Returns `(start, end)` offsets such that `buf[start..end]` is the NAL
/// unit payload: the start code is excluded, emulation-prevention bytes are
/// preserved. `None` when no start code is present.
pub fn find_nalu(buf: &[u8]) -> Option<(usize, usize)> {
    let sc = find_start_code(buf)?;
    let start = sc + START_CODE_LEN;

    let end = match find_start_code(&buf[start..]) {
        Some(next) => start + next,
        None => buf.len(),
    };

    Some((start, end))
}

/// Rewrites an Annex-B byte stream into length-prefixed framing in place,
/// replacing each 4-byte start code with the big-endian 32-bit length of
/// the NAL unit that follows it.
pub fn byte_stream_to_hvcc(data: &mut [u8]) -> Result<(), Error> {
    if data.is_empty() {
        return Err(Error::InvalidArgument("buffer is empty"));
    }

    let Some(first) = find_start_code(data) else {
        warn!("no start code found");
        return Ok(());
    };

    let mut off = first;
    while data.len() - off > START_CODE_LEN {
        let nalu_len = match find_start_code(&data[off + START_CODE_LEN..]) {
            Some(next) => next,
            None => data.len() - off - START_CODE_LEN,
        };
        BigEndian::write_u32(&mut data[off..off + 4], nalu_len as u32);
        off += START_CODE_LEN + nalu_len;
    }

    Ok(())
}

/// Rewrites a length-prefixed buffer back into an Annex-B byte stream in
/// place, replacing each 32-bit length field with `00 00 00 01`.
pub fn hvcc_to_byte_stream(data: &mut [u8]) -> Result<(), Error> {
    if data.is_empty() {
        return Err(Error::InvalidArgument("buffer is empty"));
    }

    let mut off = 0;
    while off < data.len() {
        if data.len() - off < 4 {
            return Err(Error::Protocol("truncated NALU length field".into()));
        }
        let nalu_len = BigEndian::read_u32(&data[off..off + 4]) as usize;
        if nalu_len == 0 {
            return Err(Error::Protocol("invalid NALU size (0)".into()));
        }
        if nalu_len > data.len() - off - 4 {
            return Err(Error::Protocol(format!(
                "NALU size ({nalu_len}) exceeds the buffer"
            )));
        }
        data[off..off + 4].copy_from_slice(&[0x00, 0x00, 0x00, 0x01]);
        off += 4 + nalu_len;
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn find_nalu_basic() {
        let buf = [0x00, 0x00, 0x00, 0x01, 0x40, 0x01, 0xAA];
        assert_eq!(find_nalu(&buf), Some((4, 7)));
    }

    #[test]
    fn find_nalu_two_units() {
        let buf = [
            0x00, 0x00, 0x00, 0x01, 0x40, 0x01, //
            0x00, 0x00, 0x00, 0x01, 0x42, 0x01,
        ];
        let (start, end) = find_nalu(&buf).unwrap();
        assert_eq!((start, end), (4, 6));
        let (start2, end2) = find_nalu(&buf[end..]).unwrap();
        assert_eq!((end + start2, end + end2), (10, 12));
    }

    #[test]
    fn find_nalu_none() {
        assert_eq!(find_nalu(&[0x00, 0x00, 0x01, 0x40]), None);
        assert_eq!(find_nalu(&[]), None);
    }

    #[test]
    fn nalu_payload_ending_in_zero() {
        // The trailing 0x00 belongs to the NAL unit, not the start code.
        let buf = [
            0x00, 0x00, 0x00, 0x01, 0x02, 0x01, 0x00, //
            0x00, 0x00, 0x00, 0x01, 0x46, 0x01,
        ];
        assert_eq!(find_nalu(&buf), Some((4, 7)));
    }

    #[test]
    fn hvcc_round_trip() {
        let original = [
            0x00, 0x00, 0x00, 0x01, 0x40, 0x01, //
            0x00, 0x00, 0x00, 0x01, 0x42, 0x01,
        ];
        let mut data = original;

        byte_stream_to_hvcc(&mut data).unwrap();
        assert_eq!(
            data,
            [0x00, 0x00, 0x00, 0x02, 0x40, 0x01, 0x00, 0x00, 0x00, 0x02, 0x42, 0x01]
        );

        hvcc_to_byte_stream(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn hvcc_rejects_zero_length() {
        let mut data = [0x00, 0x00, 0x00, 0x00, 0x40, 0x01];
        assert!(matches!(
            hvcc_to_byte_stream(&mut data),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn hvcc_rejects_oversized_length() {
        let mut data = [0x00, 0x00, 0x00, 0x09, 0x40, 0x01];
        assert!(matches!(
            hvcc_to_byte_stream(&mut data),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn byte_stream_without_start_code_is_left_alone() {
        let mut data = [0x40, 0x01, 0x02];
        byte_stream_to_hvcc(&mut data).unwrap();
        assert_eq!(data, [0x40, 0x01, 0x02]);
    }
}
