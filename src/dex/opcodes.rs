//! The Dalvik opcode table.
//!
//! Every byte value has an entry. Values with no instruction map to `unused`
//! with format 10x so a lookup can never fail.

use once_cell::sync::Lazy;
use crate::dex::opcode_format::{Format, Opcode, OpcodeFlags, ReferenceType};

pub const NOP: u8 = 0x00;
pub const CONST_WIDE_HIGH16: u8 = 0x19;
pub const CONST_STRING: u8 = 0x1a;
pub const CONST_STRING_JUMBO: u8 = 0x1b;

const NO_FLAGS: OpcodeFlags = OpcodeFlags::empty();
const CT: OpcodeFlags = OpcodeFlags::CAN_THROW;
const CC: OpcodeFlags = OpcodeFlags::CAN_CONTINUE;
const SRES: OpcodeFlags = OpcodeFlags::SETS_RESULT;
const SR: OpcodeFlags = OpcodeFlags::SETS_REGISTER;
const SW: OpcodeFlags = OpcodeFlags::SETS_WIDE_REGISTER;

fn unused(value: u8) -> Opcode {
    Opcode::new(value, "unused", Format::Format10x, ReferenceType::None, NO_FLAGS)
}

static OPCODES: Lazy<Vec<Opcode>> = Lazy::new(|| {
    let defined = vec![
        // Moves and returns
        Opcode::new(0x00, "nop", Format::Format10x, ReferenceType::None, CC),
        Opcode::new(0x01, "move", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x02, "move/from16", Format::Format22x, ReferenceType::None, CC | SR),
        Opcode::new(0x03, "move/16", Format::Format32x, ReferenceType::None, CC | SR),
        Opcode::new(0x04, "move-wide", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x05, "move-wide/from16", Format::Format22x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x06, "move-wide/16", Format::Format32x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x07, "move-object", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x08, "move-object/from16", Format::Format22x, ReferenceType::None, CC | SR),
        Opcode::new(0x09, "move-object/16", Format::Format32x, ReferenceType::None, CC | SR),
        Opcode::new(0x0a, "move-result", Format::Format11x, ReferenceType::None, CC | SR),
        Opcode::new(0x0b, "move-result-wide", Format::Format11x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x0c, "move-result-object", Format::Format11x, ReferenceType::None, CC | SR),
        Opcode::new(0x0d, "move-exception", Format::Format11x, ReferenceType::None, CC | SR),
        Opcode::new(0x0e, "return-void", Format::Format10x, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x0f, "return", Format::Format11x, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x10, "return-wide", Format::Format11x, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x11, "return-object", Format::Format11x, ReferenceType::None, NO_FLAGS),

        // Constants
        Opcode::new(0x12, "const/4", Format::Format11n, ReferenceType::None, CC | SR),
        Opcode::new(0x13, "const/16", Format::Format21s, ReferenceType::None, CC | SR),
        Opcode::new(0x14, "const", Format::Format31i, ReferenceType::None, CC | SR),
        Opcode::new(0x15, "const/high16", Format::Format21h, ReferenceType::None, CC | SR),
        Opcode::new(0x16, "const-wide/16", Format::Format21s, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x17, "const-wide/32", Format::Format31i, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x18, "const-wide", Format::Format51l, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x19, "const-wide/high16", Format::Format21h, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x1a, "const-string", Format::Format21c, ReferenceType::String, CT | CC | SR),
        Opcode::new(0x1b, "const-string/jumbo", Format::Format31c, ReferenceType::String, CT | CC | SR),
        Opcode::new(0x1c, "const-class", Format::Format21c, ReferenceType::Type, CT | CC | SR),

        // Monitors, casts and allocation
        Opcode::new(0x1d, "monitor-enter", Format::Format11x, ReferenceType::None, CT | CC),
        Opcode::new(0x1e, "monitor-exit", Format::Format11x, ReferenceType::None, CT | CC),
        Opcode::new(0x1f, "check-cast", Format::Format21c, ReferenceType::Type, CT | CC | SR),
        Opcode::new(0x20, "instance-of", Format::Format22c, ReferenceType::Type, CT | CC | SR),
        Opcode::new(0x21, "array-length", Format::Format12x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x22, "new-instance", Format::Format21c, ReferenceType::Type, CT | CC | SR),
        Opcode::new(0x23, "new-array", Format::Format22c, ReferenceType::Type, CT | CC | SR),
        Opcode::new(0x24, "filled-new-array", Format::Format35c, ReferenceType::Type, CT | CC | SRES),
        Opcode::new(0x25, "filled-new-array/range", Format::Format3rc, ReferenceType::Type, CT | CC | SRES),
        Opcode::new(0x26, "fill-array-data", Format::Format31t, ReferenceType::None, CC),

        // Control flow
        Opcode::new(0x27, "throw", Format::Format11x, ReferenceType::None, CT),
        Opcode::new(0x28, "goto", Format::Format10t, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x29, "goto/16", Format::Format20t, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x2a, "goto/32", Format::Format30t, ReferenceType::None, NO_FLAGS),
        Opcode::new(0x2b, "packed-switch", Format::Format31t, ReferenceType::None, CC),
        Opcode::new(0x2c, "sparse-switch", Format::Format31t, ReferenceType::None, CC),

        // Comparisons and branches
        Opcode::new(0x2d, "cmpl-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x2e, "cmpg-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x2f, "cmpl-double", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x30, "cmpg-double", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x31, "cmp-long", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x32, "if-eq", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x33, "if-ne", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x34, "if-lt", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x35, "if-ge", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x36, "if-gt", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x37, "if-le", Format::Format22t, ReferenceType::None, CC),
        Opcode::new(0x38, "if-eqz", Format::Format21t, ReferenceType::None, CC),
        Opcode::new(0x39, "if-nez", Format::Format21t, ReferenceType::None, CC),
        Opcode::new(0x3a, "if-ltz", Format::Format21t, ReferenceType::None, CC),
        Opcode::new(0x3b, "if-gez", Format::Format21t, ReferenceType::None, CC),
        Opcode::new(0x3c, "if-gtz", Format::Format21t, ReferenceType::None, CC),
        Opcode::new(0x3d, "if-lez", Format::Format21t, ReferenceType::None, CC),

        // Array access
        Opcode::new(0x44, "aget", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x45, "aget-wide", Format::Format23x, ReferenceType::None, CT | CC | SR | SW),
        Opcode::new(0x46, "aget-object", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x47, "aget-boolean", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x48, "aget-byte", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x49, "aget-char", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x4a, "aget-short", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x4b, "aput", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x4c, "aput-wide", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x4d, "aput-object", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x4e, "aput-boolean", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x4f, "aput-byte", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x50, "aput-char", Format::Format23x, ReferenceType::None, CT | CC),
        Opcode::new(0x51, "aput-short", Format::Format23x, ReferenceType::None, CT | CC),

        // Instance fields
        Opcode::new(0x52, "iget", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x53, "iget-wide", Format::Format22c, ReferenceType::Field, CT | CC | SR | SW),
        Opcode::new(0x54, "iget-object", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x55, "iget-boolean", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x56, "iget-byte", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x57, "iget-char", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x58, "iget-short", Format::Format22c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x59, "iput", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5a, "iput-wide", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5b, "iput-object", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5c, "iput-boolean", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5d, "iput-byte", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5e, "iput-char", Format::Format22c, ReferenceType::Field, CT | CC),
        Opcode::new(0x5f, "iput-short", Format::Format22c, ReferenceType::Field, CT | CC),

        // Static fields
        Opcode::new(0x60, "sget", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x61, "sget-wide", Format::Format21c, ReferenceType::Field, CT | CC | SR | SW),
        Opcode::new(0x62, "sget-object", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x63, "sget-boolean", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x64, "sget-byte", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x65, "sget-char", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x66, "sget-short", Format::Format21c, ReferenceType::Field, CT | CC | SR),
        Opcode::new(0x67, "sput", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x68, "sput-wide", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x69, "sput-object", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x6a, "sput-boolean", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x6b, "sput-byte", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x6c, "sput-char", Format::Format21c, ReferenceType::Field, CT | CC),
        Opcode::new(0x6d, "sput-short", Format::Format21c, ReferenceType::Field, CT | CC),

        // Invokes
        Opcode::new(0x6e, "invoke-virtual", Format::Format35c, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x6f, "invoke-super", Format::Format35c, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x70, "invoke-direct", Format::Format35c, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x71, "invoke-static", Format::Format35c, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x72, "invoke-interface", Format::Format35c, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x74, "invoke-virtual/range", Format::Format3rc, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x75, "invoke-super/range", Format::Format3rc, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x76, "invoke-direct/range", Format::Format3rc, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x77, "invoke-static/range", Format::Format3rc, ReferenceType::Method, CT | CC | SRES),
        Opcode::new(0x78, "invoke-interface/range", Format::Format3rc, ReferenceType::Method, CT | CC | SRES),

        // Unary operations and conversions
        Opcode::new(0x7b, "neg-int", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x7c, "not-int", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x7d, "neg-long", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x7e, "not-long", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x7f, "neg-float", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x80, "neg-double", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x81, "int-to-long", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x82, "int-to-float", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x83, "int-to-double", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x84, "long-to-int", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x85, "long-to-float", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x86, "long-to-double", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x87, "float-to-int", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x88, "float-to-long", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x89, "float-to-double", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x8a, "double-to-int", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x8b, "double-to-long", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x8c, "double-to-float", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x8d, "int-to-byte", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x8e, "int-to-char", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0x8f, "int-to-short", Format::Format12x, ReferenceType::None, CC | SR),

        // Binary operations
        Opcode::new(0x90, "add-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x91, "sub-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x92, "mul-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x93, "div-int", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x94, "rem-int", Format::Format23x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0x95, "and-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x96, "or-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x97, "xor-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x98, "shl-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x99, "shr-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x9a, "ushr-int", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0x9b, "add-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x9c, "sub-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x9d, "mul-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0x9e, "div-long", Format::Format23x, ReferenceType::None, CT | CC | SR | SW),
        Opcode::new(0x9f, "rem-long", Format::Format23x, ReferenceType::None, CT | CC | SR | SW),
        Opcode::new(0xa0, "and-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa1, "or-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa2, "xor-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa3, "shl-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa4, "shr-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa5, "ushr-long", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xa6, "add-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0xa7, "sub-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0xa8, "mul-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0xa9, "div-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0xaa, "rem-float", Format::Format23x, ReferenceType::None, CC | SR),
        Opcode::new(0xab, "add-double", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xac, "sub-double", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xad, "mul-double", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xae, "div-double", Format::Format23x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xaf, "rem-double", Format::Format23x, ReferenceType::None, CC | SR | SW),

        // Binary operations, two-address
        Opcode::new(0xb0, "add-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb1, "sub-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb2, "mul-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb3, "div-int/2addr", Format::Format12x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xb4, "rem-int/2addr", Format::Format12x, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xb5, "and-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb6, "or-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb7, "xor-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb8, "shl-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xb9, "shr-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xba, "ushr-int/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xbb, "add-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xbc, "sub-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xbd, "mul-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xbe, "div-long/2addr", Format::Format12x, ReferenceType::None, CT | CC | SR | SW),
        Opcode::new(0xbf, "rem-long/2addr", Format::Format12x, ReferenceType::None, CT | CC | SR | SW),
        Opcode::new(0xc0, "and-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc1, "or-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc2, "xor-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc3, "shl-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc4, "shr-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc5, "ushr-long/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xc6, "add-float/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xc7, "sub-float/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xc8, "mul-float/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xc9, "div-float/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xca, "rem-float/2addr", Format::Format12x, ReferenceType::None, CC | SR),
        Opcode::new(0xcb, "add-double/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xcc, "sub-double/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xcd, "mul-double/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xce, "div-double/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),
        Opcode::new(0xcf, "rem-double/2addr", Format::Format12x, ReferenceType::None, CC | SR | SW),

        // Binary operations with literals
        Opcode::new(0xd0, "add-int/lit16", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd1, "rsub-int", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd2, "mul-int/lit16", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd3, "div-int/lit16", Format::Format22s, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xd4, "rem-int/lit16", Format::Format22s, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xd5, "and-int/lit16", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd6, "or-int/lit16", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd7, "xor-int/lit16", Format::Format22s, ReferenceType::None, CC | SR),
        Opcode::new(0xd8, "add-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xd9, "rsub-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xda, "mul-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xdb, "div-int/lit8", Format::Format22b, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xdc, "rem-int/lit8", Format::Format22b, ReferenceType::None, CT | CC | SR),
        Opcode::new(0xdd, "and-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xde, "or-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xdf, "xor-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xe0, "shl-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xe1, "shr-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
        Opcode::new(0xe2, "ushr-int/lit8", Format::Format22b, ReferenceType::None, CC | SR),
    ];

    let mut table: Vec<Opcode> = (0..=u8::MAX).map(unused).collect();
    for op in defined {
        let ix = op.value as usize;
        table[ix] = op;
    }
    table
});

/// Looks up the opcode for the first byte of an instruction.
pub fn lookup(op: u8) -> &'static Opcode {
    &OPCODES[op as usize]
}

/// All 256 opcode entries in value order.
pub fn opcodes() -> impl Iterator<Item = &'static Opcode> {
    OPCODES.iter()
}

/// Finds an opcode by mnemonic.
pub fn by_name(name: &str) -> Option<&'static Opcode> {
    OPCODES.iter().find(|o| !o.is_unused() && o.name == name)
}
