//! Bit-granular reading and writing over byte buffers, as used by the NAL
//! unit payloads of ITU-T H.265 bitstreams.
//!
//! [`BitReader`] walks a borrowed byte slice MSB-first and can transparently
//! remove the `00 00 03` emulation-prevention escape while doing so.
//! [`BitWriter`] owns a growable buffer and performs the symmetric insertion.
//! Both sides understand the RBSP trailing-bits pattern and the ff-coded
//! integers used for SEI payload headers.
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(unsafe_code)]

mod reader;
mod writer;

pub use self::reader::BitReader;
pub use self::writer::BitWriter;
