#[macro_use]
pub mod error;

pub mod opcode_format;
pub mod opcodes;
pub mod operands;
pub mod pool;
pub mod payload;
pub mod instructions;

pub use error::{DecodeError, ErrorKind};
pub use instructions::{
    decode_instruction, decode_method, decode_with_placeholders, DecodedInstruction, Disassembly,
    InstructionRecord, MethodCode,
};
pub use opcode_format::{Format, Opcode, OpcodeFlags, ReferenceType};
pub use operands::Operand;
pub use payload::PayloadKind;
pub use pool::{ConstantPool, PlaceholderPool, PoolTables};
