//! Types for reading OU archives
//!

use std::io::{Read, Seek};

use tracing::{debug, instrument, trace};

use crate::{
    codepage::Codepage,
    dictionary::FieldDictionary,
    error::{FormatError, Result},
    header::{skip_preamble, OuHeader},
    stream::{at_offset, ArchiveRead},
    types::{Block, BlockId, FieldEntry, Library, TypeTag, Value},
    value::read_string,
};

/// Literal string that closes the current block
pub const CLOSE_MARKER: &str = "[]";

/// Prefix of every string that opens a nested block
pub const OPEN_PREFIX: &str = "[% ";

/// Decode a complete OU archive.
///
/// Strings are decoded with `codepage`, field names always with
/// [`crate::codepage::FIELD_NAMES`].
///
/// ```no_run
/// fn list_names(file: std::fs::File) -> zen_ou::error::Result<()> {
///     let cp = zen_ou::codepage::windows(1252).unwrap();
///     let library = zen_ou::decode(std::io::BufReader::new(file), &cp)?;
///
///     for block in library.iter() {
///         println!("{}: {} messages", block.block_name, block.total_count());
///     }
///
///     Ok(())
/// }
/// ```
pub fn decode<R, C>(reader: R, codepage: &C) -> Result<Library>
where
    R: Read + Seek,
    C: Codepage + ?Sized,
{
    OuReader::new(reader, codepage).read_library()
}

/// OU archive reader
pub struct OuReader<'c, R, C: ?Sized> {
    reader: R,
    codepage: &'c C,
}

impl<'c, R, C> OuReader<'c, R, C>
where
    R: Read + Seek,
    C: Codepage + ?Sized,
{
    /// Wrap `reader`, decoding archive strings with `codepage`
    pub fn new(reader: R, codepage: &'c C) -> Self {
        OuReader { reader, codepage }
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the header, the field names and the whole block tree.
    #[instrument(skip_all, err)]
    pub fn read_library(&mut self) -> Result<Library> {
        skip_preamble(&mut self.reader)?;
        let header = OuHeader::read_checked(&mut self.reader)?;
        debug!(?header, "read header");

        let fields = at_offset(
            &mut self.reader,
            header.dictionary_offset as u64,
            FieldDictionary::read,
        )?;

        let offset = self.reader.offset()?;
        let tag = self.reader.tag()?;
        if tag != TypeTag::String as u8 {
            return Err(FormatError::UnexpectedTag { tag, offset }.into());
        }
        let marker = read_string(&mut self.reader, self.codepage)?;
        let container = self.read_tree(&marker, offset, &fields)?;
        debug!(class = %container.id.class, blocks = container.total_count(), "read library");

        Ok(Library {
            version: header.version,
            declared_count: header.object_count,
            roots: container.children,
        })
    }

    /// Decode the block opened by `marker` together with everything nested inside it.
    ///
    /// Open blocks are kept on an explicit stack so deep nesting does not grow the call stack.
    fn read_tree(&mut self, marker: &str, offset: u64, fields: &FieldDictionary) -> Result<Block> {
        let mut open = vec![Block::new(BlockId::parse(marker, offset)?)];

        loop {
            let offset = self.reader.offset()?;
            let tag = self.reader.tag()?;

            let closed = match TypeTag::try_from(tag) {
                Err(0) => true,
                Ok(TypeTag::String) => {
                    let text = read_string(&mut self.reader, self.codepage)?;
                    if text == CLOSE_MARKER {
                        true
                    } else {
                        if text.starts_with(OPEN_PREFIX) {
                            trace!(marker = %text, depth = open.len(), "open block");
                            open.push(Block::new(BlockId::parse(&text, offset)?));
                        } else {
                            debug!(%text, offset, "skipping loose string in block body");
                        }
                        false
                    }
                }
                Ok(TypeTag::Field) => {
                    let entry = self.read_field(fields, offset)?;
                    if let Some(block) = open.last_mut() {
                        promote(block, &entry, offset)?;
                        block.fields.push(entry);
                    }
                    false
                }
                _ => return Err(FormatError::UnexpectedTag { tag, offset }.into()),
            };

            if !closed {
                continue;
            }

            // the outermost block returns, so the stack is never empty here
            if let Some(block) = open.pop() {
                match open.last_mut() {
                    Some(parent) => parent.children.push(block),
                    None => return Ok(block),
                }
            }
        }
    }

    fn read_field(&mut self, fields: &FieldDictionary, offset: u64) -> Result<FieldEntry> {
        let index = self.reader.le_u32()?;
        let name = fields.resolve(index, offset)?.to_owned();

        let tag = self.reader.tag()?;
        let value = Value::read(tag, &mut self.reader, self.codepage)?;

        Ok(FieldEntry { name, value })
    }
}

/// Copy `blockName`, `text` and `name` into the block's own attributes
fn promote(block: &mut Block, entry: &FieldEntry, offset: u64) -> Result<()> {
    let target = match entry.name.as_str() {
        "blockName" => &mut block.block_name,
        "text" => &mut block.text,
        "name" => &mut block.name,
        _ => return Ok(()),
    };

    match &entry.value {
        Value::String(s) => {
            target.clone_from(s);
            Ok(())
        }
        other => Err(FormatError::PromotedFieldType {
            field: entry.name.clone(),
            kind: other.kind(),
            offset,
        }
        .into()),
    }
}
