//! Descriptor model consumed by the compiler.
//!
//! Descriptors are read-only schema metadata: the compiler resolves field
//! names against them and never mutates them, so a pool can be shared
//! across concurrent compiles. Enum- and message-typed fields reference
//! their target descriptor by index into the owning [`DescriptorPool`].

use std::collections::HashMap;

use crate::wire;

/// The wire kind of a message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Uint32,
    Uint64,
    Int32,
    Int64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Double,
    Float,
    Bool,
    String,
    Bytes,
    /// Enum-typed field. The value indexes into `DescriptorPool::enums`.
    Enum(usize),
    /// Message-typed field. The value indexes into `DescriptorPool::messages`.
    Message(usize),
}

impl FieldKind {
    /// Lowercase kind name, as spelled in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Uint32 => "uint32",
            FieldKind::Uint64 => "uint64",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Sint32 => "sint32",
            FieldKind::Sint64 => "sint64",
            FieldKind::Fixed32 => "fixed32",
            FieldKind::Fixed64 => "fixed64",
            FieldKind::Sfixed32 => "sfixed32",
            FieldKind::Sfixed64 => "sfixed64",
            FieldKind::Double => "double",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Enum(_) => "enum",
            FieldKind::Message(_) => "message",
        }
    }

    /// The protobuf wire type this kind encodes with.
    pub fn wire_type(&self) -> u32 {
        match self {
            FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Sint32
            | FieldKind::Sint64
            | FieldKind::Bool
            | FieldKind::Enum(_) => wire::WIRE_VARINT,
            FieldKind::Fixed64 | FieldKind::Sfixed64 | FieldKind::Double => wire::WIRE_FIXED64,
            FieldKind::Fixed32 | FieldKind::Sfixed32 | FieldKind::Float => wire::WIRE_FIXED32,
            FieldKind::String | FieldKind::Bytes | FieldKind::Message(_) => {
                wire::WIRE_LEN_DELIMITED
            }
        }
    }
}

/// A field definition within a message type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name, matched exactly and case-sensitively.
    pub name: String,
    /// Field number used to form the wire tag.
    pub number: u32,
    pub kind: FieldKind,
    /// Repeated fields may appear any number of times in the input text.
    pub repeated: bool,
}

impl FieldDescriptor {
    pub fn new(name: &str, number: u32, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            number,
            kind,
            repeated: false,
        }
    }

    pub fn repeated(name: &str, number: u32, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            number,
            kind,
            repeated: true,
        }
    }
}

/// A message type: the display name used in diagnostics plus its fields.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(name: &str, fields: Vec<FieldDescriptor>) -> Self {
        MessageDescriptor {
            name: name.to_string(),
            fields,
        }
    }

    /// Find a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An enum type: symbolic value names and their numeric values.
#[derive(Debug, Clone)]
pub struct EnumDescriptor {
    pub name: String,
    pub values: Vec<(String, i32)>,
}

impl EnumDescriptor {
    pub fn new<'a, I>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        EnumDescriptor {
            name: name.to_string(),
            values: values
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }

    /// Resolve a symbolic value name to its numeric value. Exact match only.
    pub fn value_by_name(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }
}

/// The descriptor container: all message and enum types of one schema.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
    messages: Vec<MessageDescriptor>,
    messages_by_name: HashMap<String, usize>,
    enums: Vec<EnumDescriptor>,
}

impl DescriptorPool {
    pub fn new() -> Self {
        DescriptorPool::default()
    }

    /// Register a message type and return its index for use in
    /// `FieldKind::Message` references.
    pub fn add_message(&mut self, message: MessageDescriptor) -> usize {
        let index = self.messages.len();
        self.messages_by_name.insert(message.name.clone(), index);
        self.messages.push(message);
        index
    }

    /// Register an enum type and return its index for use in
    /// `FieldKind::Enum` references.
    pub fn add_enum(&mut self, descriptor: EnumDescriptor) -> usize {
        let index = self.enums.len();
        self.enums.push(descriptor);
        index
    }

    /// Look up a message type index by name.
    pub fn message_by_name(&self, name: &str) -> Option<usize> {
        self.messages_by_name.get(name).copied()
    }

    pub fn message(&self, index: usize) -> &MessageDescriptor {
        &self.messages[index]
    }

    pub fn enum_type(&self, index: usize) -> &EnumDescriptor {
        &self.enums[index]
    }

    /// Resolve a field name within a message type.
    pub fn resolve_field(&self, message: usize, name: &str) -> Option<&FieldDescriptor> {
        self.messages[message].field_by_name(name)
    }

    /// Resolve a symbolic enum value within an enum type.
    pub fn resolve_enum_value(&self, enum_index: usize, name: &str) -> Option<i32> {
        self.enums[enum_index].value_by_name(name)
    }
}
