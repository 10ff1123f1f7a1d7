//! Structured operand values produced by the format decoders.
//!
//! Each operand keeps the decoded number it came from so callers can inspect
//! registers, literals and targets directly; `Display` gives the text form used
//! by listings.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::dex::opcode_format::ReferenceType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand
{
    /// Register number, `vN`.
    Register(u16),
    /// Signed literal, decimal.
    Literal(i64),
    /// The 16 high bits of a 32-bit (`wide == false`) or 64-bit constant.
    HighLiteral { bits: u16, wide: bool },
    /// Branch or payload address, base plus displacement.
    Target(i64),
    /// Address reached through a 32-bit `goto/32` displacement.
    Offset32(i64),
    /// Resolved constant pool entry.
    Reference { kind: ReferenceType, index: u32, name: String },
}

impl Operand
{
    pub fn register(&self) -> Option<u16>
    {
        match self
        {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    /// Numeric value for literal operands, with high-16 forms shifted into place.
    pub fn literal_value(&self) -> Option<i64>
    {
        match self
        {
            Operand::Literal(v) => Some(*v),
            Operand::HighLiteral { bits, wide: false } => Some(((*bits as u32) << 16) as i32 as i64),
            Operand::HighLiteral { bits, wide: true } => Some(((*bits as u64) << 48) as i64),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<i64>
    {
        match self
        {
            Operand::Target(t) | Operand::Offset32(t) => Some(*t),
            _ => None,
        }
    }

    pub fn reference_name(&self) -> Option<&str>
    {
        match self
        {
            Operand::Reference { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Text form of the operand. Registers are named through `name_register`
    /// so listings can substitute parameter names.
    pub fn render_with(&self, name_register: &dyn Fn(u16) -> String) -> String
    {
        match self
        {
            Operand::Register(r) => name_register(*r),
            other => other.to_string(),
        }
    }
}

fn fmt_address(f: &mut fmt::Formatter<'_>, addr: i64) -> fmt::Result
{
    if addr < 0 {
        write!(f, "-{:04x}", addr.unsigned_abs())
    } else {
        write!(f, "{:04x}", addr)
    }
}

impl fmt::Display for Operand
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Operand::Register(r) => write!(f, "v{}", r),
            Operand::Literal(v) => write!(f, "{}", v),
            Operand::HighLiteral { bits, wide } => {
                let zeros = if *wide { "000000000000" } else { "0000" };
                write!(f, "@{:x}{}", bits, zeros)
            }
            Operand::Target(t) => fmt_address(f, *t),
            Operand::Offset32(t) => {
                if *t < 0 { write!(f, "-{:x}", t.unsigned_abs()) } else { write!(f, "+{:x}", t) }
            }
            Operand::Reference { name, .. } => write!(f, "{}", name),
        }
    }
}
