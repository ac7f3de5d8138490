//! Field name dictionary stored at the end of OU archives.

use binrw::{binrw, BinRead};
use derive_more::derive::Deref;
use std::io::{Read, Seek};
use tracing::{debug, instrument};

use crate::{
    codepage::{Codepage, FIELD_NAMES},
    error::{FormatError, Result},
    stream::{binrw_eof, ArchiveRead},
};

/// A single dictionary entry as stored in the archive
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNameRecord {
    #[br(temp)]
    #[bw(try_calc = u16::try_from(name.len()))]
    len: u16,

    /// Slot this name belongs to
    pub index: u16,

    /// Hash of the name, not used for lookups
    pub hash: u32,

    /// Raw name bytes in [`FIELD_NAMES`] encoding
    #[br(count = len)]
    pub name: Vec<u8>,
}

impl FieldNameRecord {
    /// Create a record for `name` at `index`
    pub fn new(index: u16, name: impl Into<Vec<u8>>) -> Self {
        FieldNameRecord {
            index,
            hash: 0,
            name: name.into(),
        }
    }
}

/// Index to name table used to resolve field entries
///
/// The table has exactly as many slots as the archive declares. Entries are stored in the slot
/// they name, so the order they appear in the archive does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deref)]
pub struct FieldDictionary(Vec<Option<String>>);

impl FieldDictionary {
    /// Largest number of slots a 16 bit index can address
    pub const MAX_SLOTS: u32 = u16::MAX as u32 + 1;

    /// Read the dictionary at the current position of `reader`
    #[instrument(skip_all, err)]
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<FieldDictionary> {
        let count = reader.le_u32()?;
        if count > Self::MAX_SLOTS {
            return Err(FormatError::DictionaryTooLarge { count }.into());
        }

        let mut slots = vec![None; count as usize];
        for _ in 0..count {
            let offset = reader.offset()?;
            let record = FieldNameRecord::read(reader).map_err(|err| binrw_eof(reader, err))?;

            let slot = slots
                .get_mut(record.index as usize)
                .ok_or(FormatError::DictionaryIndexOutOfRange {
                    index: record.index,
                    size: count as usize,
                    offset,
                })?;
            *slot = Some(Codepage::decode(&FIELD_NAMES, &record.name)?);
        }

        debug!(count, "read field names");
        Ok(FieldDictionary(slots))
    }

    /// Build a dictionary from names in slot order
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        FieldDictionary(names.into_iter().map(|n| Some(n.into())).collect())
    }

    /// Name stored in `index`, if that slot exists and was filled
    pub fn get(&self, index: u32) -> Option<&str> {
        self.0.get(index as usize).and_then(|n| n.as_deref())
    }

    /// Name stored in `index`, or a format error pointing at `offset`
    pub fn resolve(&self, index: u32, offset: u64) -> Result<&str> {
        self.get(index).ok_or_else(|| {
            FormatError::FieldIndexOutOfRange {
                index,
                size: self.0.len(),
                offset,
            }
            .into()
        })
    }
}
