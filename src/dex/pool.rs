//! Constant pool lookups used while decoding.
//!
//! The decoder never owns the DEX tables. It asks a [`ConstantPool`] for the
//! display name behind an index and fails the method when there is none.

use std::borrow::Cow;
use log::warn;

/// Resolves DEX pool indices into printable names.
pub trait ConstantPool {
    fn string(&self, idx: u32) -> Option<Cow<'_, str>>;
    fn type_name(&self, idx: u32) -> Option<Cow<'_, str>>;
    fn field(&self, idx: u32) -> Option<Cow<'_, str>>;
    fn method(&self, idx: u32) -> Option<Cow<'_, str>>;
}

impl<T: ConstantPool + ?Sized> ConstantPool for &T {
    fn string(&self, idx: u32) -> Option<Cow<'_, str>> { (**self).string(idx) }
    fn type_name(&self, idx: u32) -> Option<Cow<'_, str>> { (**self).type_name(idx) }
    fn field(&self, idx: u32) -> Option<Cow<'_, str>> { (**self).field(idx) }
    fn method(&self, idx: u32) -> Option<Cow<'_, str>> { (**self).method(idx) }
}

/// Placeholder pool that prints stable names like `string@42`.
/// This keeps the decoder usable without a DEX container.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderPool;

impl ConstantPool for PlaceholderPool {
    fn string(&self, idx: u32) -> Option<Cow<'_, str>> { Some(Cow::Owned(format!("string@{}", idx))) }
    fn type_name(&self, idx: u32) -> Option<Cow<'_, str>> { Some(Cow::Owned(format!("type@{}", idx))) }
    fn field(&self, idx: u32) -> Option<Cow<'_, str>> { Some(Cow::Owned(format!("field@{}", idx))) }
    fn method(&self, idx: u32) -> Option<Cow<'_, str>> { Some(Cow::Owned(format!("method@{}", idx))) }
}

/// In-memory tables filled by whatever parsed the DEX container.
#[derive(Debug, Default, Clone)]
pub struct PoolTables {
    pub strings: Vec<String>,
    pub types: Vec<String>,
    pub fields: Vec<String>,
    pub methods: Vec<String>,
}

impl PoolTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a string decoded from DEX `string_data_item` bytes (MUTF-8,
    /// without the length prefix or trailing NUL). Returns its index.
    pub fn push_string_data(&mut self, data: &[u8]) -> u32 {
        let s = match cesu8::from_java_cesu8(data) {
            Ok(s) => s.into_owned(),
            Err(_) => {
                warn!("[pool] string #{} is not valid MUTF-8, decoding lossily", self.strings.len());
                String::from_utf8_lossy(data).into_owned()
            }
        };
        self.push_string(s)
    }

    pub fn push_string(&mut self, s: impl Into<String>) -> u32 {
        self.strings.push(s.into());
        (self.strings.len() - 1) as u32
    }

    pub fn push_type(&mut self, s: impl Into<String>) -> u32 {
        self.types.push(s.into());
        (self.types.len() - 1) as u32
    }

    pub fn push_field(&mut self, s: impl Into<String>) -> u32 {
        self.fields.push(s.into());
        (self.fields.len() - 1) as u32
    }

    pub fn push_method(&mut self, s: impl Into<String>) -> u32 {
        self.methods.push(s.into());
        (self.methods.len() - 1) as u32
    }
}

fn entry(table: &[String], idx: u32) -> Option<Cow<'_, str>> {
    table.get(idx as usize).map(|s| Cow::Borrowed(s.as_str()))
}

impl ConstantPool for PoolTables {
    fn string(&self, idx: u32) -> Option<Cow<'_, str>> { entry(&self.strings, idx) }
    fn type_name(&self, idx: u32) -> Option<Cow<'_, str>> { entry(&self.types, idx) }
    fn field(&self, idx: u32) -> Option<Cow<'_, str>> { entry(&self.fields, idx) }
    fn method(&self, idx: u32) -> Option<Cow<'_, str>> { entry(&self.methods, idx) }
}
