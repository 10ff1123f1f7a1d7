//! Text listings of decoded methods.
//!
//! A listing line looks like
//!
//! ```text
//! 00001234: 1a00 0100                           |0002: const-string v0, hello
//! ```
//!
//! i.e. the absolute address, the raw code units, the code unit offset within
//! the method and the instruction text.

use crate::dex::instructions::{DecodedInstruction, Disassembly};
use crate::dex::payload::PayloadKind;

const MAX_HEX_UNITS: usize = 7;

/// Maps raw Dalvik register numbers to `vN` / `pN` names based on a method's
/// total register count and input (parameter) size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegMapper {
    pub registers_size: u16,
    pub ins_size: u16,
}

impl RegMapper {
    pub fn new(registers_size: u16, ins_size: u16) -> Self {
        RegMapper { registers_size, ins_size }
    }

    #[inline]
    pub fn map_name(&self, raw: u16) -> String {
        let params_base = self.registers_size.saturating_sub(self.ins_size);
        if raw >= params_base { format!("p{}", raw - params_base) } else { format!("v{}", raw) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingOptions {
    /// Name parameter registers `pN` instead of `vN`.
    pub registers: Option<RegMapper>,
    /// Emit an empty line after instructions that never fall through.
    pub separate_blocks: bool,
    /// Emit a line for every skipped payload.
    pub show_payloads: bool,
}

#[inline]
fn fmt_reg(mapper: Option<&RegMapper>, raw: u16) -> String {
    if let Some(m) = mapper { m.map_name(raw) } else { format!("v{}", raw) }
}

/// Mnemonic followed by the comma separated operands.
pub fn instruction_text(insn: &DecodedInstruction, regs: Option<&RegMapper>) -> String {
    let namer = |r: u16| fmt_reg(regs, r);
    let operands: Vec<String> = insn.operands.iter().map(|o| o.render_with(&namer)).collect();
    if operands.is_empty() {
        insn.mnemonic().to_string()
    } else {
        format!("{} {}", insn.mnemonic(), operands.join(", "))
    }
}

fn hex_units(code: &[u8], start: usize, len: usize) -> String {
    let end = (start + len).min(code.len());
    let bytes = code.get(start..end).unwrap_or(&[]);
    let mut out: Vec<String> = bytes
        .chunks(2)
        .take(MAX_HEX_UNITS)
        .map(|c| c.iter().map(|b| format!("{:02x}", b)).collect::<String>())
        .collect();
    if bytes.len() > MAX_HEX_UNITS * 2 {
        out.push("...".to_string());
    }
    out.join(" ")
}

fn line(base: u32, offset: usize, hex: &str, text: &str) -> String {
    format!("{:08x}: {:<36}|{:04x}: {}", base as usize + offset, hex, offset / 2, text)
}

/// One listing line for a decoded instruction. `code` is the method bytecode
/// the instruction was decoded from.
pub fn instruction_line(code: &[u8], base: u32, insn: &DecodedInstruction, regs: Option<&RegMapper>) -> String {
    line(base, insn.offset, &hex_units(code, insn.offset, insn.size()), &instruction_text(insn, regs))
}

fn payload_line(code: &[u8], base: u32, offset: usize, len: usize, kind: PayloadKind) -> String {
    let text = format!("{} ({} units)", kind, len / 2);
    line(base, offset, &hex_units(code, offset, len), &text)
}

/// Renders a whole method, instructions and payloads in address order.
pub fn listing(code: &[u8], base: u32, disassembly: &Disassembly, opts: &ListingOptions) -> Vec<String> {
    let regs = opts.registers.as_ref();
    let mut payloads = disassembly.payloads().peekable();
    let mut out = Vec::with_capacity(disassembly.len());

    for insn in disassembly {
        while let Some((range, kind)) = payloads.next_if(|(r, _)| r.start < insn.offset) {
            if opts.show_payloads {
                out.push(payload_line(code, base, range.start, range.len(), kind));
            }
        }
        out.push(instruction_line(code, base, insn, regs));
        if opts.separate_blocks && !insn.opcode.can_continue() {
            out.push(String::new());
        }
    }
    if opts.show_payloads {
        for (range, kind) in payloads {
            out.push(payload_line(code, base, range.start, range.len(), kind));
        }
    }
    out
}
