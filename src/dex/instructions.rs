//! Decoding of a method's bytecode into instructions.

use std::fmt;
use std::ops::Range;
use log::{debug, warn};
use rangemap::RangeMap;
use serde::{Deserialize, Serialize};
use crate::dex::error::{DecodeError, ErrorKind};
use crate::dex::opcode_format::{decode_operands, Format, Opcode, ReferenceType};
use crate::dex::opcodes::{lookup, CONST_STRING, CONST_STRING_JUMBO};
use crate::dex::operands::Operand;
use crate::dex::payload::{payload_at, PayloadKind};
use crate::dex::pool::{ConstantPool, PlaceholderPool};

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Byte offset of the opcode from the start of the method's bytecode.
    pub offset: usize,
    pub opcode: &'static Opcode,
    pub operands: Vec<Operand>,
}

impl DecodedInstruction {
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.name
    }

    pub fn format(&self) -> Format {
        self.opcode.format
    }

    /// Number of bytes the instruction occupies.
    pub fn size(&self) -> usize {
        self.opcode.format.size()
    }

    /// Offset in 16-bit code units.
    pub fn code_unit_offset(&self) -> usize {
        self.offset / 2
    }

    pub fn operand_text(&self) -> Vec<String> {
        self.operands.iter().map(|o| o.to_string()).collect()
    }

    pub fn to_record(&self) -> InstructionRecord {
        InstructionRecord {
            mnemonic: self.opcode.name.to_string(),
            format: self.opcode.format,
            operands: self.operand_text(),
        }
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode.name)?;
        let mut sep = " ";
        for o in &self.operands {
            write!(f, "{}{}", sep, o)?;
            sep = ", ";
        }
        Ok(())
    }
}

/// Text-only view of an instruction handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub mnemonic: String,
    pub format: Format,
    pub operands: Vec<String>,
}

/// The instructions of one method in program order, plus the byte ranges of
/// the inline payloads that were skipped between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disassembly {
    instructions: Vec<DecodedInstruction>,
    // keyed by start offset too, so adjacent payloads of one kind stay apart
    payloads: RangeMap<usize, (usize, PayloadKind)>,
}

impl Disassembly {
    pub fn instructions(&self) -> &[DecodedInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<DecodedInstruction> {
        self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedInstruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Kind of payload covering the given byte offset, if any.
    pub fn payload_at(&self, offset: usize) -> Option<PayloadKind> {
        self.payloads.get(&offset).map(|(_, kind)| *kind)
    }

    pub fn payloads(&self) -> impl Iterator<Item = (Range<usize>, PayloadKind)> + '_ {
        self.payloads.iter().map(|(r, (_, kind))| (r.clone(), *kind))
    }

    /// Resolved names of every pool reference of the given kind, in program order.
    pub fn references(&self, kind: ReferenceType) -> impl Iterator<Item = &str> + '_ {
        self.instructions
            .iter()
            .flat_map(|i| i.operands.iter())
            .filter_map(move |o| match o {
                Operand::Reference { kind: k, name, .. } if *k == kind => Some(name.as_str()),
                _ => None,
            })
    }

    /// The literal loaded by each `const-string` and `const-string/jumbo`.
    pub fn string_constants(&self) -> Vec<&str> {
        self.instructions
            .iter()
            .filter(|i| i.opcode.value == CONST_STRING || i.opcode.value == CONST_STRING_JUMBO)
            .filter_map(|i| i.operands.last().and_then(|o| o.reference_name()))
            .collect()
    }

    pub fn records(&self) -> Vec<InstructionRecord> {
        self.instructions.iter().map(|i| i.to_record()).collect()
    }
}

impl<'a> IntoIterator for &'a Disassembly {
    type Item = &'a DecodedInstruction;
    type IntoIter = std::slice::Iter<'a, DecodedInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// The bytecode of one method as handed over by the DEX container.
#[derive(Debug, Clone, Copy)]
pub struct MethodCode<'a> {
    pub bytecode: &'a [u8],
    /// Base added to every branch displacement, usually the code item offset.
    pub code_offset: u32,
}

impl<'a> MethodCode<'a> {
    pub fn new(bytecode: &'a [u8], code_offset: u32) -> Self {
        MethodCode { bytecode, code_offset }
    }

    pub fn decode<P: ConstantPool + ?Sized>(&self, pool: &P) -> Result<Disassembly, DecodeError> {
        decode_method(self.bytecode, self.code_offset, pool)
    }
}

/// Decodes the single instruction starting at `offset`.
///
/// Payload blocks are not recognised here; a payload start decodes as `nop`.
pub fn decode_instruction<P: ConstantPool + ?Sized>(
    code: &[u8],
    offset: usize,
    base: u32,
    pool: &P,
) -> Result<DecodedInstruction, DecodeError> {
    let Some(&byte) = code.get(offset) else {
        fail!(TruncatedBuffer, "No instruction at 0x{:x}, code is {} bytes", offset, code.len());
    };
    let op = lookup(byte);
    let need = op.format.size();
    let have = code.len() - offset;
    if have < need {
        fail!(TruncatedBuffer, "Truncated {} at 0x{:x}: need {} bytes, have {}", op.name, offset, need, have);
    }
    let operands = decode_operands(op, &code[offset..offset + need], base, pool)
        .map_err(|e| DecodeError::with_context(e, format!("{} at 0x{:x}", op.name, offset)))?;
    Ok(DecodedInstruction { offset, opcode: op, operands })
}

fn decode_all<P: ConstantPool + ?Sized>(
    code: &[u8],
    base: u32,
    pool: &P,
) -> Result<Disassembly, DecodeError> {
    if (code.len() & 1) != 0 {
        fail!(TruncatedBuffer, "Odd-length method bytecode ({} bytes)", code.len());
    }

    let mut out = Disassembly::default();
    let mut pc: usize = 0;
    while pc < code.len() {
        let payload = payload_at(code, pc)
            .map_err(|e| DecodeError::with_context(e, format!("payload at 0x{:x}", pc)))?;
        if let Some((kind, len)) = payload {
            debug!("[decode] skipping {} of {} bytes at 0x{:x}", kind, len, pc);
            out.payloads.insert(pc..pc + len, (pc, kind));
            pc += len;
            continue;
        }

        let insn = decode_instruction(code, pc, base, pool)?;
        pc += insn.size();
        out.instructions.push(insn);
    }
    Ok(out)
}

/// Decodes a whole method body.
///
/// `base` is added to every relative displacement when rendering targets.
/// Decoding is all or nothing: any truncated instruction, truncated payload
/// or unresolved pool index fails the whole method.
pub fn decode_method<P: ConstantPool + ?Sized>(
    code: &[u8],
    base: u32,
    pool: &P,
) -> Result<Disassembly, DecodeError> {
    let result = decode_all(code, base, pool);
    if let Err(e) = &result {
        warn!("[decode] aborting method decode at base 0x{:x}: {}", base, e);
    }
    result
}

/// Decodes with [`PlaceholderPool`], so references print as `kind@index`.
pub fn decode_with_placeholders(code: &[u8], base: u32) -> Result<Disassembly, DecodeError> {
    decode_method(code, base, &PlaceholderPool)
}
