//! Decoded archive tree.

use derive_more::derive::{Deref, Display};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Type tag written in front of every value in the block stream
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeTag {
    /// Length prefixed text in the content codepage
    String = 0x01,
    /// Signed 32 bit integer
    Int = 0x02,
    /// IEEE-754 single precision float
    Float = 0x03,
    /// Single byte
    Byte = 0x04,
    /// Enumerated constant, same layout as [`TypeTag::Int`]
    Enum = 0x11,
    /// Named field entry of a block
    Field = 0x12,
}

impl TryFrom<u8> for TypeTag {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(TypeTag::String),
            0x02 => Ok(TypeTag::Int),
            0x03 => Ok(TypeTag::Float),
            0x04 => Ok(TypeTag::Byte),
            0x11 => Ok(TypeTag::Enum),
            0x12 => Ok(TypeTag::Field),
            other => Err(other),
        }
    }
}

/// A primitive value decoded from the block stream
#[derive(Debug, Clone, PartialEq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum Value {
    /// Text decoded with the content codepage
    #[display("{_0}")]
    String(String),
    /// Signed integer
    #[display("{_0}")]
    Int(i32),
    /// Float, reinterpreted from its bits
    #[display("{_0}")]
    Float(f32),
    /// A byte slot. The stored byte is skipped and always reads as zero.
    #[display("{_0}")]
    Byte(u8),
    /// Enumerated constant
    #[display("{_0}")]
    Enum(i32),
}

impl Value {
    /// The tag this value is stored with
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::String(_) => TypeTag::String,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Byte(_) => TypeTag::Byte,
            Value::Enum(_) => TypeTag::Enum,
        }
    }

    /// Name of the value kind as used by text archives
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Byte(_) => "byte",
            Value::Enum(_) => "enum",
        }
    }

    /// Borrow the text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A named value inside a block
#[derive(Debug, Clone, PartialEq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[display("{name}={value}")]
pub struct FieldEntry {
    /// Name resolved from the field dictionary
    pub name: String,
    /// Decoded value
    pub value: Value,
}

/// Class and object numbers taken from a `[% Class version index]` marker
#[derive(Debug, Clone, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[display("[% {class} {version} {object_index}]")]
pub struct BlockId {
    /// Class name, e.g. `zCCSBlock`
    pub class: String,
    /// Class version
    pub version: i32,
    /// Object index inside the archive
    pub object_index: i32,
}

/// A node of the decoded tree
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Block {
    /// Parsed opening marker
    pub id: BlockId,
    /// Fields in the order they were stored
    pub fields: Vec<FieldEntry>,
    /// Value of the `blockName` field
    pub block_name: String,
    /// Value of the `text` field
    pub text: String,
    /// Value of the `name` field
    pub name: String,
    /// Nested blocks in the order they were stored
    pub children: Vec<Block>,
}

impl Block {
    /// Create an empty block for the given marker
    pub fn new(id: BlockId) -> Self {
        Block {
            id,
            ..Default::default()
        }
    }

    /// First field with the given name
    pub fn get(&self, field: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.name == field)
    }

    /// Number of blocks below this one, at any depth
    pub fn total_count(&self) -> usize {
        count_blocks(&self.children)
    }
}

/// The decoded contents of an OU archive
#[derive(Debug, Clone, PartialEq, Default, Deref)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Library {
    /// Archive version from the header
    pub version: u32,
    /// Object count declared in the header
    pub declared_count: u32,
    /// Blocks directly below the library container
    #[deref]
    pub roots: Vec<Block>,
}

impl Library {
    /// Number of blocks in the whole tree, top level blocks included
    pub fn total_count(&self) -> usize {
        count_blocks(&self.roots)
    }
}

fn count_blocks(blocks: &[Block]) -> usize {
    let mut counter = 0;
    let mut stack: Vec<&Block> = blocks.iter().collect();
    while let Some(block) = stack.pop() {
        counter += 1;
        stack.extend(block.children.iter());
    }
    counter
}
