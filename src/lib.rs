//! # dextree
//!
//! A library for decoding the bytecode of Android Dalvik methods into
//! structured instructions.
//!
//! ```
//!  use dextree::{decode_method, PoolTables};
//!
//!  let mut pool = PoolTables::new();
//!  pool.push_string("hello");
//!  // const-string v0, "hello"; return-void
//!  let code = [0x1a, 0x00, 0x00, 0x00, 0x0e, 0x00];
//!  let method = decode_method(&code, 0, &pool).unwrap();
//!  assert_eq!(method.len(), 2);
//!  assert_eq!(method.string_constants(), vec!["hello"]);
//! ```
//!
pub mod dex;
pub mod listing;
mod tests;

pub use dex::{
    decode_instruction, decode_method, decode_with_placeholders, ConstantPool, DecodeError, DecodedInstruction,
    Disassembly, ErrorKind, Format, InstructionRecord, MethodCode, Operand, PayloadKind, PlaceholderPool,
    PoolTables, ReferenceType,
};
pub use listing::{listing, ListingOptions, RegMapper};
