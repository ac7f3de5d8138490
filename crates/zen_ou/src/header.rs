//! Archive header and block marker layouts.

use binrw::{BinRead, BinWrite};
use std::io::{Read, Seek};
use winnow::ascii::dec_int;
use winnow::combinator::seq;
use winnow::prelude::*;
use winnow::token::take_till;
use winnow::PResult;

use crate::{
    error::{Error, FormatError, Result},
    stream::{binrw_eof, ArchiveRead},
    types::BlockId,
};

/// Bytes that terminate the free text header in front of the binary data
pub const START_MARKER: &[u8; 4] = b"\nEND";

/// Binary header that follows the text preamble
///
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[brw(little)]
pub struct OuHeader {
    /// Archive version, `1` or `2`
    pub version: u32,

    /// The number of objects stored in the archive
    pub object_count: u32,

    /// The offset from the beginning of the file where the field name dictionary starts
    pub dictionary_offset: u32,
}

impl OuHeader {
    /// Read and validate the header at the current position of `reader`
    pub fn read_checked<R: Read + Seek>(reader: &mut R) -> Result<OuHeader> {
        let header = OuHeader::read(reader).map_err(|err| binrw_eof(reader, err))?;
        if !matches!(header.version, 1 | 2) {
            return Err(Error::UnsupportedVersion(header.version));
        }
        Ok(header)
    }
}

/// Consume the text preamble up to and including the `\nEND\n` line.
pub fn skip_preamble<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<()> {
    let mut matched = 0;
    while matched < START_MARKER.len() {
        let byte = match reader.tag() {
            Ok(byte) => byte,
            Err(Error::Format(FormatError::UnexpectedEof { .. })) => {
                return Err(FormatError::MissingStartMarker.into())
            }
            Err(err) => return Err(err),
        };

        matched = if byte == START_MARKER[matched] {
            matched + 1
        } else if byte == START_MARKER[0] {
            1
        } else {
            0
        };
    }

    let offset = reader.offset()?;
    let found = reader.tag()?;
    if found != b'\n' {
        return Err(FormatError::UnterminatedStartMarker { found, offset }.into());
    }
    Ok(())
}

fn parse_marker(input: &mut &str) -> PResult<BlockId> {
    seq!(BlockId {
        _: "[% ",
        class: take_till(1.., ' ').map(str::to_owned),
        _: ' ',
        version: dec_int,
        _: ' ',
        object_index: dec_int,
        _: ']',
    })
    .parse_next(input)
}

impl BlockId {
    /// Parse an opening marker such as `[% zCCSBlock 0 1]`
    pub fn parse(marker: &str, offset: u64) -> Result<BlockId> {
        parse_marker.parse(marker).map_err(|_| {
            FormatError::MalformedMarker {
                marker: marker.to_owned(),
                offset,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Seek};

    use pretty_assertions::assert_eq;

    use crate::error::{Error, FormatError, Result};
    use crate::header::{skip_preamble, OuHeader};
    use crate::types::BlockId;

    #[test]
    fn skip_text_preamble() -> Result<()> {
        let mut input = Cursor::new(b"ZenGin Archive\nver 1\nEND\n\x02".to_vec());
        skip_preamble(&mut input)?;
        assert_eq!(input.stream_position()?, 25);

        Ok(())
    }

    #[test]
    fn skip_preamble_after_partial_match() -> Result<()> {
        let mut input = Cursor::new(b"x\nEN\n\nEND\n".to_vec());
        skip_preamble(&mut input)?;
        assert_eq!(input.stream_position()?, 10);

        Ok(())
    }

    #[test]
    fn missing_preamble_end() {
        let mut input = Cursor::new(b"ZenGin Archive\nver 1\nEN".to_vec());
        let err = skip_preamble(&mut input).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::MissingStartMarker)
        ));
    }

    #[test]
    fn preamble_end_needs_newline() {
        let mut input = Cursor::new(b"a\nENDING\n".to_vec());
        let err = skip_preamble(&mut input).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::UnterminatedStartMarker {
                found: b'I',
                offset: 5
            })
        ));
    }

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x02, 0x00, 0x00, 0x00, // Version
            0x03, 0x00, 0x00, 0x00, // Objects
            0x40, 0x01, 0x00, 0x00, // Dictionary offset
        ]);

        let expected = OuHeader {
            version: 2,
            object_count: 3,
            dictionary_offset: 0x140,
        };
        assert_eq!(OuHeader::read_checked(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_version_one_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00, // Version
            0x00, 0x00, 0x00, 0x00, // Objects
            0x0C, 0x00, 0x00, 0x00, // Dictionary offset
        ]);

        let header = OuHeader::read_checked(&mut input)?;
        assert_eq!(header.version, 1);
        assert_eq!(header.dictionary_offset, 0x0C);

        Ok(())
    }

    #[test]
    fn reject_unknown_version() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x03, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let err = OuHeader::read_checked(&mut input).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(3)));
    }

    #[test]
    fn parse_marker() -> Result<()> {
        let id = BlockId::parse("[% oCMsgConversation:oCNpcMessage:zCEventMessage 0 3]", 0)?;
        assert_eq!(id.class, "oCMsgConversation:oCNpcMessage:zCEventMessage");
        assert_eq!(id.version, 0);
        assert_eq!(id.object_index, 3);

        let id = BlockId::parse("[% zCCSBlock -1 12]", 0)?;
        assert_eq!(id.version, -1);
        assert_eq!(id.object_index, 12);

        Ok(())
    }

    #[test]
    fn reject_malformed_markers() {
        for marker in ["[% zCCSBlock]", "[% zCCSBlock 0]", "[%  0 0]", "[% a b c]", "[]"] {
            let err = BlockId::parse(marker, 9).unwrap_err();
            match err {
                Error::Format(FormatError::MalformedMarker { marker: m, offset }) => {
                    assert_eq!(m, marker);
                    assert_eq!(offset, 9);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }
}
