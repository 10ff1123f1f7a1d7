use std::fmt;

macro_rules! err {
    ($kind:ident, $msg:literal) => {
        DecodeError::new(ErrorKind::$kind, $msg)
    };
    ($kind:ident, $fmtstr:literal, $($args:tt)*) => {
        DecodeError::new(ErrorKind::$kind, &format!($fmtstr, $($args)*))
    };
}

#[macro_export]
macro_rules! fail {
    ($kind:ident, $msg:literal) => {
        return Err(DecodeError::new(ErrorKind::$kind, $msg))
    };
    ($kind:ident, $fmtstr:literal, $($args:tt)*) => {
        return Err(DecodeError::new(ErrorKind::$kind, &format!($fmtstr, $($args)*)))
    };
}

/// Broad category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{
    /// The opcode table produced an entry the decoder cannot act on.
    UnreachableOpcode,
    /// Fewer bytes remain than an instruction, payload header or payload body needs.
    TruncatedBuffer,
    /// The constant pool has no entry for a referenced index.
    UnresolvedPoolIndex,
    /// A field holds a value the encoding does not allow.
    MalformedInstruction,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DecodeError
{
    kind: ErrorKind,
    msg: String,
    contexts: Vec<String>,
}

impl DecodeError
{
    pub(crate) fn new(kind: ErrorKind, msg: &str) -> Self
    {
        DecodeError {
            kind,
            msg: msg.to_string(),
            contexts: Vec::new(),
        }
    }

    pub(crate) fn with_context(base: DecodeError, context: String) -> Self
    {
        let mut contexts = base.contexts;
        contexts.push(context);
        DecodeError { kind: base.kind, msg: base.msg, contexts }
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    pub fn message(&self) -> &str
    {
        &self.msg
    }
}

// nom only fails on our inputs when a field runs off the end of the slice
impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for DecodeError
{
    fn from(e: nom::Err<nom::error::Error<&'a [u8]>>) -> Self
    {
        match e
        {
            nom::Err::Incomplete(needed) => {
                DecodeError::new(ErrorKind::TruncatedBuffer, &format!("Unexpected end of code ({:?})", needed))
            }
            nom::Err::Error(inner) | nom::Err::Failure(inner) => DecodeError::new(
                ErrorKind::TruncatedBuffer,
                &format!("Unexpected end of code with {} bytes left", inner.input.len()),
            ),
        }
    }
}

impl fmt::Display for DecodeError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.msg)?;
        let mut connector = " for ";
        for context in &self.contexts
        {
            write!(f, "{}{}", connector, context)?;
            connector = " of ";
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}
