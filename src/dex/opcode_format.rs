use std::fmt;
use bitflags::bitflags;
use log::trace;
use nom::number::complete::{le_i16, le_i32, le_i64, le_i8, le_u16, le_u32, le_u8};
use nom::sequence::tuple;
use nom::IResult;
use serde::{Deserialize, Serialize};
use crate::dex::error::{DecodeError, ErrorKind};
use crate::dex::opcodes::CONST_WIDE_HIGH16;
use crate::dex::operands::Operand;
use crate::dex::pool::ConstantPool;

/// Represents the constant pool table an opcode's index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    None,
    String,
    Type,
    Field,
    Method,
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReferenceType::None => "none",
            ReferenceType::String => "string",
            ReferenceType::Type => "type",
            ReferenceType::Field => "field",
            ReferenceType::Method => "method",
        };
        write!(f, "{}", s)
    }
}

// Defines various flags that can be associated with an opcode.
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpcodeFlags: u32 {
        const CAN_THROW = 0x1;
        const CAN_CONTINUE = 0x4;
        const SETS_RESULT = 0x8;
        const SETS_REGISTER = 0x10;
        const SETS_WIDE_REGISTER = 0x20;
    }
}

/// Represents an opcode with its associated properties.
#[derive(Debug, PartialEq, Eq)]
pub struct Opcode {
    pub value: u8,
    pub name: &'static str,
    pub format: Format,
    pub reference_type: ReferenceType,
    pub flags: OpcodeFlags,
}

impl Opcode {
    pub(crate) fn new(
        value: u8,
        name: &'static str,
        format: Format,
        reference_type: ReferenceType,
        flags: OpcodeFlags,
    ) -> Self {
        Opcode { value, name, format, reference_type, flags }
    }

    /// Determines if the opcode can throw an exception.
    pub fn can_throw(&self) -> bool {
        self.flags.contains(OpcodeFlags::CAN_THROW)
    }

    /// Determines if execution can continue to the next instruction.
    pub fn can_continue(&self) -> bool {
        self.flags.contains(OpcodeFlags::CAN_CONTINUE)
    }

    /// Determines if the opcode sets the "hidden" result register.
    pub fn sets_result(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_RESULT)
    }

    /// Determines if the opcode sets the value of its first register.
    pub fn sets_register(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_REGISTER)
    }

    /// Determines if the opcode sets the value of its first register to a wide type.
    pub fn sets_wide_register(&self) -> bool {
        self.flags.contains(OpcodeFlags::SETS_WIDE_REGISTER)
    }

    /// True for the reserved opcode values that carry no instruction.
    pub fn is_unused(&self) -> bool {
        self.name == "unused"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Format10t,
    Format10x,
    Format11n,
    Format11x,
    Format12x,
    Format20t,
    Format21c,
    Format21h,
    Format21s,
    Format21t,
    Format22b,
    Format22c,
    Format22s,
    Format22t,
    Format22x,
    Format23x,
    Format30t,
    Format31c,
    Format31i,
    Format31t,
    Format32x,
    Format35c,
    Format3rc,
    Format51l,
}

impl Format {
    pub const ALL: [Format; 24] = [
        Format::Format10t, Format::Format10x, Format::Format11n, Format::Format11x,
        Format::Format12x, Format::Format20t, Format::Format21c, Format::Format21h,
        Format::Format21s, Format::Format21t, Format::Format22b, Format::Format22c,
        Format::Format22s, Format::Format22t, Format::Format22x, Format::Format23x,
        Format::Format30t, Format::Format31c, Format::Format31i, Format::Format31t,
        Format::Format32x, Format::Format35c, Format::Format3rc, Format::Format51l,
    ];

    /// Returns the length of the format in 16-bit code units.
    pub const fn code_units(&self) -> usize {
        match self {
            Format::Format10t
            | Format::Format10x
            | Format::Format11n
            | Format::Format11x
            | Format::Format12x => 1,

            Format::Format20t
            | Format::Format21c
            | Format::Format21h
            | Format::Format21s
            | Format::Format21t
            | Format::Format22b
            | Format::Format22c
            | Format::Format22s
            | Format::Format22t
            | Format::Format22x
            | Format::Format23x => 2,

            Format::Format30t
            | Format::Format31c
            | Format::Format31i
            | Format::Format31t
            | Format::Format32x
            | Format::Format35c
            | Format::Format3rc => 3,

            Format::Format51l => 5,
        }
    }

    /// Returns the size of the format in bytes.
    pub const fn size(&self) -> usize {
        self.code_units() * 2
    }

    /// The format identifier as written in the Dalvik documentation, e.g. `35c`.
    pub const fn tag(&self) -> &'static str {
        match self {
            Format::Format10t => "10t",
            Format::Format10x => "10x",
            Format::Format11n => "11n",
            Format::Format11x => "11x",
            Format::Format12x => "12x",
            Format::Format20t => "20t",
            Format::Format21c => "21c",
            Format::Format21h => "21h",
            Format::Format21s => "21s",
            Format::Format21t => "21t",
            Format::Format22b => "22b",
            Format::Format22c => "22c",
            Format::Format22s => "22s",
            Format::Format22t => "22t",
            Format::Format22x => "22x",
            Format::Format23x => "23x",
            Format::Format30t => "30t",
            Format::Format31c => "31c",
            Format::Format31i => "31i",
            Format::Format31t => "31t",
            Format::Format32x => "32x",
            Format::Format35c => "35c",
            Format::Format3rc => "3rc",
            Format::Format51l => "51l",
        }
    }

    /// Whether operands of this format include a branch or payload address.
    pub const fn is_branch(&self) -> bool {
        matches!(
            self,
            Format::Format10t
                | Format::Format20t
                | Format::Format21t
                | Format::Format22t
                | Format::Format30t
                | Format::Format31t
        )
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// Field helpers; every format starts with the opcode byte
fn op_aa(input: &[u8]) -> IResult<&[u8], u8> {
    let (input, _op) = le_u8(input)?;
    le_u8(input)
}

#[inline] fn lo4(b: u8) -> u8 { b & 0x0f }
#[inline] fn hi4(b: u8) -> u8 { b >> 4 }
#[inline] fn s4(x: u8) -> i8 { ((x as i8) << 4) >> 4 }

#[inline]
fn reg<T: Into<u16>>(r: T) -> Operand {
    Operand::Register(r.into())
}

#[inline]
fn branch(base: u32, off: i64) -> Operand {
    Operand::Target(base as i64 + off)
}

fn resolve<P: ConstantPool + ?Sized>(
    pool: &P,
    kind: ReferenceType,
    index: u32,
) -> Result<Operand, DecodeError> {
    let name = match kind {
        ReferenceType::String => pool.string(index),
        ReferenceType::Type => pool.type_name(index),
        ReferenceType::Field => pool.field(index),
        ReferenceType::Method => pool.method(index),
        ReferenceType::None => fail!(UnreachableOpcode, "No reference table for index {}", index),
    };
    match name {
        Some(name) => Ok(Operand::Reference { kind, index, name: name.into_owned() }),
        None => Err(err!(UnresolvedPoolIndex, "{} index {} out of range", kind, index)),
    }
}

/// Decodes the operands of one instruction.
///
/// `unit` must hold at least the instruction's `format.size()` bytes, starting
/// at the opcode byte. Branch targets are rendered relative to `base`.
pub fn decode_operands<P: ConstantPool + ?Sized>(
    op: &Opcode,
    unit: &[u8],
    base: u32,
    pool: &P,
) -> Result<Vec<Operand>, DecodeError> {
    trace!("decoding {} ({}) from {:02x?}", op.name, op.format, &unit[..unit.len().min(op.format.size())]);
    let operands = match op.format {
        // Size in code units = 1
        Format::Format10x => vec![],
        Format::Format10t => {
            // AA | op  (AA = signed 8-bit displacement)
            let (_, aa) = op_aa(unit)?;
            vec![branch(base, aa as i8 as i64)]
        }
        Format::Format11n => {
            // B|A | op  (A = register, B = signed 4-bit literal)
            let (_, ba) = op_aa(unit)?;
            vec![reg(lo4(ba)), Operand::Literal(s4(hi4(ba)) as i64)]
        }
        Format::Format11x => {
            let (_, aa) = op_aa(unit)?;
            vec![reg(aa)]
        }
        Format::Format12x => {
            // B|A | op  (A = dest, B = source)
            let (_, ba) = op_aa(unit)?;
            vec![reg(lo4(ba)), reg(hi4(ba))]
        }
        // Size = 2
        Format::Format20t => {
            let (_, (_, off)) = tuple((op_aa, le_i16))(unit)?;
            vec![branch(base, off as i64)]
        }
        Format::Format21c => {
            // AA | op, BBBB  (index into the opcode's reference table)
            let (_, (aa, idx)) = tuple((op_aa, le_u16))(unit)?;
            vec![reg(aa), resolve(pool, op.reference_type, idx as u32)?]
        }
        Format::Format21h => {
            // AA | op, BBBB  (high 16 bits of a 32- or 64-bit constant)
            let (_, (aa, bits)) = tuple((op_aa, le_u16))(unit)?;
            vec![reg(aa), Operand::HighLiteral { bits, wide: op.value == CONST_WIDE_HIGH16 }]
        }
        Format::Format21s => {
            let (_, (aa, lit)) = tuple((op_aa, le_i16))(unit)?;
            vec![reg(aa), Operand::Literal(lit as i64)]
        }
        Format::Format21t => {
            let (_, (aa, off)) = tuple((op_aa, le_i16))(unit)?;
            vec![reg(aa), branch(base, off as i64)]
        }
        Format::Format22b => {
            // AA | op, CC|BB  (dest = vAA, src = vBB, literal = CC signed)
            let (_, (aa, bb, cc)) = tuple((op_aa, le_u8, le_i8))(unit)?;
            vec![reg(aa), reg(bb), Operand::Literal(cc as i64)]
        }
        Format::Format22c => {
            // B|A | op, CCCC
            let (_, (ba, idx)) = tuple((op_aa, le_u16))(unit)?;
            vec![reg(lo4(ba)), reg(hi4(ba)), resolve(pool, op.reference_type, idx as u32)?]
        }
        Format::Format22s => {
            let (_, (ba, lit)) = tuple((op_aa, le_i16))(unit)?;
            vec![reg(lo4(ba)), reg(hi4(ba)), Operand::Literal(lit as i64)]
        }
        Format::Format22t => {
            let (_, (ba, off)) = tuple((op_aa, le_i16))(unit)?;
            vec![reg(lo4(ba)), reg(hi4(ba)), branch(base, off as i64)]
        }
        Format::Format22x => {
            // AA | op, BBBB  (vAA, vBBBB)
            let (_, (aa, bbbb)) = tuple((op_aa, le_u16))(unit)?;
            vec![reg(aa), reg(bbbb)]
        }
        Format::Format23x => {
            // AA | op, CC|BB
            let (_, (aa, bb, cc)) = tuple((op_aa, le_u8, le_u8))(unit)?;
            vec![reg(aa), reg(bb), reg(cc)]
        }
        // Size = 3
        Format::Format30t => {
            let (_, (_, off)) = tuple((op_aa, le_i32))(unit)?;
            vec![Operand::Offset32(base as i64 + off as i64)]
        }
        Format::Format31c => {
            let (_, (aa, idx)) = tuple((op_aa, le_u32))(unit)?;
            vec![reg(aa), resolve(pool, op.reference_type, idx)?]
        }
        Format::Format31i => {
            let (_, (aa, lit)) = tuple((op_aa, le_i32))(unit)?;
            vec![reg(aa), Operand::Literal(lit as i64)]
        }
        Format::Format31t => {
            let (_, (aa, off)) = tuple((op_aa, le_i32))(unit)?;
            vec![reg(aa), branch(base, off as i64)]
        }
        Format::Format32x => {
            // ØØ | op, AAAA, BBBB
            let (_, (_, aaaa, bbbb)) = tuple((op_aa, le_u16, le_u16))(unit)?;
            vec![reg(aaaa), reg(bbbb)]
        }
        Format::Format35c => {
            // A|G | op, BBBB, F|E|D|C  (A = arg count, C..G = regs)
            let (_, (_, ag, idx, dc, fe)) = tuple((le_u8, le_u8, le_u16, le_u8, le_u8))(unit)?;
            let count = hi4(ag) as usize;
            if count > 5 {
                fail!(MalformedInstruction, "{} argument count {} exceeds 5", op.name, count);
            }
            let regs = [lo4(dc), hi4(dc), lo4(fe), hi4(fe), lo4(ag)];
            let mut operands: Vec<Operand> = regs.into_iter().take(count).map(reg).collect();
            operands.push(resolve(pool, op.reference_type, idx as u32)?);
            operands
        }
        Format::Format3rc => vec![],
        Format::Format51l => {
            let (_, (aa, lit)) = tuple((op_aa, le_i64))(unit)?;
            vec![reg(aa), Operand::Literal(lit)]
        }
    };
    Ok(operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::opcodes::lookup;
    use crate::dex::pool::PlaceholderPool;

    fn ops(bytes: &[u8], base: u32) -> Vec<String> {
        let op = lookup(bytes[0]);
        decode_operands(op, bytes, base, &PlaceholderPool)
            .unwrap()
            .iter()
            .map(|o| o.to_string())
            .collect()
    }

    #[test]
    fn sizes_are_fixed_per_format() {
        for f in Format::ALL {
            assert!(matches!(f.code_units(), 1 | 2 | 3 | 5), "{}", f);
            assert_eq!(f.size(), f.code_units() * 2);
        }
        assert_eq!(Format::Format35c.code_units(), 3);
        assert_eq!(Format::Format51l.size(), 10);
    }

    #[test]
    fn tags_are_distinct() {
        let mut tags: Vec<&str> = Format::ALL.iter().map(|f| f.tag()).collect();
        tags.sort();
        tags.dedup();
        assert_eq!(tags.len(), 24);
    }

    #[test]
    fn nibble_formats() {
        // const/4 v1, #2
        assert_eq!(ops(&[0x12, 0x21], 0), vec!["v1", "2"]);
        // const/4 v0, #-1
        assert_eq!(ops(&[0x12, 0xf0], 0), vec!["v0", "-1"]);
        // move v3, v4
        assert_eq!(ops(&[0x01, 0x43], 0), vec!["v3", "v4"]);
        // return v7
        assert_eq!(ops(&[0x0f, 0x07], 0), vec!["v7"]);
    }

    #[test]
    fn branch_formats_use_base() {
        // goto -2 from base 0x10
        assert_eq!(ops(&[0x28, 0xfe], 0x10), vec!["000e"]);
        // goto/16 +0x100
        assert_eq!(ops(&[0x29, 0x00, 0x00, 0x01], 0x20), vec!["0120"]);
        // if-eqz v2, -4
        assert_eq!(ops(&[0x38, 0x02, 0xfc, 0xff], 0x10), vec!["v2", "000c"]);
        // if-ne v1, v2, +3
        assert_eq!(ops(&[0x33, 0x21, 0x03, 0x00], 0), vec!["v1", "v2", "0003"]);
        // goto/32 +0x10 and -0x10
        assert_eq!(ops(&[0x2a, 0x00, 0x10, 0x00, 0x00, 0x00], 0), vec!["+10"]);
        assert_eq!(ops(&[0x2a, 0x00, 0xf0, 0xff, 0xff, 0xff], 0), vec!["-10"]);
        // packed-switch v0, +8
        assert_eq!(ops(&[0x2b, 0x00, 0x08, 0x00, 0x00, 0x00], 0x100), vec!["v0", "0108"]);
    }

    #[test]
    fn high16_formats() {
        assert_eq!(ops(&[0x15, 0x00, 0x05, 0x00], 0), vec!["v0", "@50000"]);
        assert_eq!(ops(&[0x19, 0x00, 0x05, 0x00], 0), vec!["v0", "@5000000000000"]);
        // register byte equal to the wide opcode value must not switch the form
        assert_eq!(ops(&[0x15, 0x19, 0x05, 0x00], 0), vec!["v25", "@50000"]);
    }

    #[test]
    fn literal_formats() {
        // const/16 v1, #-2
        assert_eq!(ops(&[0x13, 0x01, 0xfe, 0xff], 0), vec!["v1", "-2"]);
        // const v2, #0x12345678
        assert_eq!(ops(&[0x14, 0x02, 0x78, 0x56, 0x34, 0x12], 0), vec!["v2", "305419896"]);
        // add-int/lit8 v0, v1, #-1
        assert_eq!(ops(&[0xd8, 0x00, 0x01, 0xff], 0), vec!["v0", "v1", "-1"]);
        // add-int/lit16 v0, v1, #300
        assert_eq!(ops(&[0xd0, 0x10, 0x2c, 0x01], 0), vec!["v0", "v1", "300"]);
        // const-wide v4, #-1
        assert_eq!(
            ops(&[0x18, 0x04, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], 0),
            vec!["v4", "-1"]
        );
    }

    #[test]
    fn wide_register_formats() {
        // move/from16 v1, v300
        assert_eq!(ops(&[0x02, 0x01, 0x2c, 0x01], 0), vec!["v1", "v300"]);
        // move/16 v256, v1000
        assert_eq!(ops(&[0x03, 0x00, 0x00, 0x01, 0xe8, 0x03], 0), vec!["v256", "v1000"]);
        // add-int v0, v1, v2
        assert_eq!(ops(&[0x90, 0x00, 0x01, 0x02], 0), vec!["v0", "v1", "v2"]);
    }

    #[test]
    fn reference_formats_pick_table_by_opcode() {
        assert_eq!(ops(&[0x1a, 0x00, 0x03, 0x00], 0), vec!["v0", "string@3"]);
        assert_eq!(ops(&[0x1c, 0x01, 0x04, 0x00], 0), vec!["v1", "type@4"]);
        assert_eq!(ops(&[0x22, 0x01, 0x04, 0x00], 0), vec!["v1", "type@4"]);
        assert_eq!(ops(&[0x60, 0x01, 0x09, 0x00], 0), vec!["v1", "field@9"]);
        assert_eq!(ops(&[0x20, 0x10, 0x02, 0x00], 0), vec!["v0", "v1", "type@2"]);
        assert_eq!(ops(&[0x52, 0x10, 0x02, 0x00], 0), vec!["v0", "v1", "field@2"]);
        assert_eq!(ops(&[0x1b, 0x03, 0x00, 0x00, 0x01, 0x00], 0), vec!["v3", "string@65536"]);
    }

    #[test]
    fn invoke_register_order() {
        // invoke-virtual {v1, v2, v3, v4, v5}, method@7  (A=5, G=5, C=1, D=2, E=3, F=4)
        assert_eq!(
            ops(&[0x6e, 0x55, 0x07, 0x00, 0x21, 0x43], 0),
            vec!["v1", "v2", "v3", "v4", "v5", "method@7"]
        );
        // invoke-static {v2}, method@1
        assert_eq!(ops(&[0x71, 0x10, 0x01, 0x00, 0x02, 0x00], 0), vec!["v2", "method@1"]);
        // invoke-static {}, method@1
        assert_eq!(ops(&[0x71, 0x00, 0x01, 0x00, 0x00, 0x00], 0), vec!["method@1"]);
        // filled-new-array {v0, v1}, type@2
        assert_eq!(ops(&[0x24, 0x20, 0x02, 0x00, 0x10, 0x00], 0), vec!["v0", "v1", "type@2"]);
    }

    #[test]
    fn invoke_rejects_argument_count_above_five() {
        let op = lookup(0x6e);
        let e = decode_operands(op, &[0x6e, 0x60, 0x00, 0x00, 0x00, 0x00], 0, &PlaceholderPool).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MalformedInstruction);
    }

    #[test]
    fn range_invoke_is_opaque() {
        assert!(ops(&[0x74, 0x03, 0x01, 0x00, 0x04, 0x00], 0).is_empty());
    }

    #[test]
    fn short_slice_is_truncation() {
        let op = lookup(0x18);
        let e = decode_operands(op, &[0x18, 0x00, 0x01, 0x02], 0, &PlaceholderPool).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::TruncatedBuffer);
    }
}
