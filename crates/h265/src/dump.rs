//! The dump sink: a tree-structured document builder driven by the syntax
//! engine's dump instantiation, rendered as JSON.

use serde_json::{Map, Value};

use crate::ctx::Ctx;
use crate::enums::NaluType;
use crate::error::Error;
use crate::syntax::{self, OpKind, SyntaxOp};

const MAX_STACK_SIZE: usize = 16;

/// Reduces a syntax-engine field expression to its JSON key: the substring
/// after the last `.` or `>`, with leading spaces skipped and anything from
/// the last `[` on removed.
fn extract_key(field: &str) -> &str {
    let start = field.rfind('.').map(|i| i + 1).unwrap_or(0);
    let field = &field[start..];

    let start = field.rfind('>').map(|i| i + 1).unwrap_or(0);
    let field = field[start..].trim_start_matches(' ');

    let end = field.rfind('[').unwrap_or(field.len());
    field[..end].trim_end_matches(' ')
}

/// Builds a JSON document describing the NAL unit currently held by a
/// [`Ctx`], by running the syntax engine without consuming any bits.
pub struct Dump {
    stack: Vec<Value>,
}

impl Default for Dump {
    fn default() -> Self {
        Self::new()
    }
}

impl Dump {
    pub fn new() -> Self {
        Self {
            stack: vec![Value::Object(Map::new())],
        }
    }

    /// Discards the current document and starts a fresh one.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.stack.push(Value::Object(Map::new()));
    }

    /// The document built by the last [`Dump::dump_nalu`] call.
    pub fn json(&self) -> &Value {
        &self.stack[0]
    }

    pub fn to_json_string(&self) -> String {
        self.stack[0].to_string()
    }

    /// Describes the NAL unit selected by the context's NAL header, using
    /// the context's active records.
    pub fn dump_nalu(&mut self, ctx: &Ctx) -> Result<(), Error> {
        self.clear();
        dump_nalu(&mut DumpOp { dump: self }, ctx)
    }

    fn push(&mut self, value: Value) {
        assert!(self.stack.len() < MAX_STACK_SIZE, "dump stack overflow");
        self.stack.push(value);
    }

    fn pop(&mut self) -> Value {
        debug_assert!(self.stack.len() > 1);
        self.stack.pop().unwrap_or(Value::Null)
    }

    fn begin_struct(&mut self) {
        self.push(Value::Object(Map::new()));
    }

    fn end_struct(&mut self, name: &str) {
        let value = self.pop();
        if let Some(Value::Object(parent)) = self.stack.last_mut() {
            parent.insert(extract_key(name).to_owned(), value);
        }
    }

    fn begin_array(&mut self) {
        self.push(Value::Array(Vec::new()));
    }

    fn end_array(&mut self, name: &str) {
        let value = self.pop();
        match self.stack.last_mut() {
            Some(Value::Object(parent)) => {
                parent.insert(extract_key(name).to_owned(), value);
            }
            Some(Value::Array(parent)) => parent.push(value),
            _ => {}
        }
    }

    fn begin_array_item(&mut self) {
        self.push(Value::Object(Map::new()));
    }

    fn end_array_item(&mut self) {
        let value = self.pop();
        if let Some(Value::Array(parent)) = self.stack.last_mut() {
            parent.push(value);
        }
    }

    fn field(&mut self, name: &str, value: i64) {
        match self.stack.last_mut() {
            Some(Value::Array(parent)) => parent.push(Value::from(value)),
            Some(Value::Object(parent)) => {
                parent.insert(extract_key(name).to_owned(), Value::from(value));
            }
            _ => {}
        }
    }
}

/// The dump instantiation of the syntax engine: consumes no bits, emits
/// every field and structural event into the sink.
struct DumpOp<'a> {
    dump: &'a mut Dump,
}

impl SyntaxOp for DumpOp<'_> {
    const KIND: OpKind = OpKind::Dump;

    fn bits(&mut self, v: &mut u32, _n: u32, name: &'static str) -> Result<(), Error> {
        self.dump.field(name, *v as i64);
        Ok(())
    }

    fn bits_i(&mut self, v: &mut i32, _n: u32, name: &'static str) -> Result<(), Error> {
        self.dump.field(name, *v as i64);
        Ok(())
    }

    fn ue(&mut self, v: &mut u32, name: &'static str) -> Result<(), Error> {
        self.dump.field(name, *v as i64);
        Ok(())
    }

    fn se(&mut self, v: &mut i32, name: &'static str) -> Result<(), Error> {
        self.dump.field(name, *v as i64);
        Ok(())
    }

    fn flag(&mut self, v: &mut bool, name: &'static str) -> Result<(), Error> {
        self.dump.field(name, *v as i64);
        Ok(())
    }

    fn reserved_zero_bits(&mut self, _n: u32) -> Result<(), Error> {
        Ok(())
    }

    fn byte_aligned(&self) -> bool {
        true
    }

    fn rbsp_trailing(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn begin_struct(&mut self, _name: &'static str) {
        self.dump.begin_struct();
    }

    fn end_struct(&mut self, name: &'static str) {
        self.dump.end_struct(name);
    }

    fn begin_array(&mut self, _name: &'static str) {
        self.dump.begin_array();
    }

    fn end_array(&mut self, name: &'static str) {
        self.dump.end_array(name);
    }

    fn begin_array_item(&mut self) {
        self.dump.begin_array_item();
    }

    fn end_array_item(&mut self) {
        self.dump.end_array_item();
    }
}

fn dump_nalu(ops: &mut DumpOp<'_>, ctx: &Ctx) -> Result<(), Error> {
    let mut header = ctx.nalu_header().clone();

    ops.begin_struct("nalu_header");
    syntax::nalu_header(ops, &mut header)?;
    ops.end_struct("nalu_header");

    let ty = header.nal_unit_type;
    if ty == NaluType::VpsNut {
        let mut vps = ctx
            .vps()
            .ok_or(Error::InvalidArgument("no active VPS to dump"))?
            .clone();
        ops.begin_struct("vps");
        syntax::vps(ops, &mut vps)?;
        ops.end_struct("vps");
    } else if ty == NaluType::SpsNut {
        let mut sps = ctx
            .sps()
            .ok_or(Error::InvalidArgument("no active SPS to dump"))?
            .clone();
        ops.begin_struct("sps");
        syntax::sps(ops, &mut sps)?;
        ops.end_struct("sps");
    } else if ty == NaluType::PpsNut {
        let mut pps = ctx
            .pps()
            .ok_or(Error::InvalidArgument("no active PPS to dump"))?
            .clone();
        ops.begin_struct("pps");
        syntax::pps(ops, &mut pps)?;
        ops.end_struct("pps");
    } else if ty == NaluType::AudNut {
        let mut aud = ctx.aud().clone();
        ops.begin_struct("aud");
        syntax::aud(ops, &mut aud)?;
        ops.end_struct("aud");
    } else if ty == NaluType::PrefixSeiNut {
        ops.begin_array("sei");
        for sei in ctx.seis() {
            ops.begin_array_item();

            let mut payload_type = u32::from(sei.payload_type());
            ops.bits(&mut payload_type, 0, "payload_type")?;
            let mut payload_size = sei.raw.len() as u32;
            ops.bits(&mut payload_size, 0, "payload_size")?;

            let mut sei = sei.clone();
            syntax::one_sei(ops, &mut sei)?;

            ops.end_array_item();
        }
        ops.end_array("sei");
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::extract_key;

    #[test]
    fn key_extraction() {
        assert_eq!(extract_key("pic_type"), "pic_type");
        assert_eq!(extract_key("aud.pic_type"), "pic_type");
        assert_eq!(extract_key("sps.vui.sar_width"), "sar_width");
        assert_eq!(extract_key("pps.column_width_minus1[i]"), "column_width_minus1");
        assert_eq!(
            extract_key("sei.clock_ts[i].full_timestamp_flag"),
            "full_timestamp_flag"
        );
        assert_eq!(extract_key("vps->hrd"), "hrd");
        // Only the last subscript is dropped, as in multi-dimensional
        // initializer tables.
        assert_eq!(
            extract_key("ext.pps_palette_predictor_initializer[comp][i]"),
            "pps_palette_predictor_initializer[comp]"
        );
    }
}
