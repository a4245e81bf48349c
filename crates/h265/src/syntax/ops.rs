use vela_bitio::{BitReader, BitWriter};
use vela_expgolomb::{BitReaderExpGolombExt, BitWriterExpGolombExt};

use super::{OpKind, SyntaxOp};
use crate::error::Error;
use crate::reader::ReaderFlags;

/// The read instantiation: interprets a bitstream and fills record fields.
pub(crate) struct ReadOp<'a, 'b> {
    bs: &'a mut BitReader<'b>,
    flags: ReaderFlags,
}

impl<'a, 'b> ReadOp<'a, 'b> {
    pub(crate) fn new(bs: &'a mut BitReader<'b>, flags: ReaderFlags) -> Self {
        Self { bs, flags }
    }
}

impl SyntaxOp for ReadOp<'_, '_> {
    const KIND: OpKind = OpKind::Read;

    fn bits(&mut self, v: &mut u32, n: u32, _name: &'static str) -> Result<(), Error> {
        *v = self.bs.read_bits(n)?;
        Ok(())
    }

    fn bits_i(&mut self, v: &mut i32, n: u32, _name: &'static str) -> Result<(), Error> {
        *v = self.bs.read_bits_signed(n)?;
        Ok(())
    }

    fn ue(&mut self, v: &mut u32, _name: &'static str) -> Result<(), Error> {
        *v = self.bs.read_exp_golomb()?;
        Ok(())
    }

    fn se(&mut self, v: &mut i32, _name: &'static str) -> Result<(), Error> {
        *v = self.bs.read_signed_exp_golomb()?;
        Ok(())
    }

    fn flag(&mut self, v: &mut bool, _name: &'static str) -> Result<(), Error> {
        *v = self.bs.read_bit()?;
        Ok(())
    }

    fn reserved_zero_bits(&mut self, n: u32) -> Result<(), Error> {
        self.bs.skip_bits(n)?;
        Ok(())
    }

    fn byte_aligned(&self) -> bool {
        self.bs.byte_aligned()
    }

    fn rbsp_trailing(&mut self) -> Result<(), Error> {
        if self.flags.contains(ReaderFlags::LENIENT_RBSP_TRAILING) {
            self.bs.align();
            Ok(())
        } else {
            Ok(self.bs.read_rbsp_trailing_bits()?)
        }
    }

    fn begin_struct(&mut self, _name: &'static str) {}
    fn end_struct(&mut self, _name: &'static str) {}
    fn begin_array(&mut self, _name: &'static str) {}
    fn end_array(&mut self, _name: &'static str) {}
    fn begin_array_item(&mut self) {}
    fn end_array_item(&mut self) {}
}

/// The write instantiation: emits record fields into a bitstream.
pub(crate) struct WriteOp<'a> {
    bs: &'a mut BitWriter,
}

impl<'a> WriteOp<'a> {
    pub(crate) fn new(bs: &'a mut BitWriter) -> Self {
        Self { bs }
    }
}

impl SyntaxOp for WriteOp<'_> {
    const KIND: OpKind = OpKind::Write;

    fn bits(&mut self, v: &mut u32, n: u32, _name: &'static str) -> Result<(), Error> {
        self.bs.write_bits(*v, n);
        Ok(())
    }

    fn bits_i(&mut self, v: &mut i32, n: u32, _name: &'static str) -> Result<(), Error> {
        self.bs.write_bits_signed(*v, n);
        Ok(())
    }

    fn ue(&mut self, v: &mut u32, _name: &'static str) -> Result<(), Error> {
        self.bs.write_exp_golomb(*v)?;
        Ok(())
    }

    fn se(&mut self, v: &mut i32, _name: &'static str) -> Result<(), Error> {
        self.bs.write_signed_exp_golomb(*v)?;
        Ok(())
    }

    fn flag(&mut self, v: &mut bool, _name: &'static str) -> Result<(), Error> {
        self.bs.write_bit(*v);
        Ok(())
    }

    fn reserved_zero_bits(&mut self, n: u32) -> Result<(), Error> {
        self.bs.write_zero_bits(n);
        Ok(())
    }

    fn byte_aligned(&self) -> bool {
        self.bs.byte_aligned()
    }

    fn rbsp_trailing(&mut self) -> Result<(), Error> {
        self.bs.write_rbsp_trailing_bits();
        Ok(())
    }

    fn begin_struct(&mut self, _name: &'static str) {}
    fn end_struct(&mut self, _name: &'static str) {}
    fn begin_array(&mut self, _name: &'static str) {}
    fn end_array(&mut self, _name: &'static str) {}
    fn begin_array_item(&mut self) {}
    fn end_array_item(&mut self) {}
}
