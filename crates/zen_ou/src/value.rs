//! Tagged value codec.

use std::io::{Read, Seek};

use tracing::trace;

use crate::{
    codepage::Codepage,
    error::{Error, FormatError, Result},
    stream::ArchiveRead,
    types::{TypeTag, Value},
};

impl Value {
    /// Decode a value stored with `tag`, the tag byte itself having already been consumed.
    ///
    /// [`TypeTag::Field`] is not a value and is rejected like any unknown tag.
    pub fn read<R, C>(tag: u8, reader: &mut R, codepage: &C) -> Result<Value>
    where
        R: Read + Seek + ?Sized,
        C: Codepage + ?Sized,
    {
        let value = match TypeTag::try_from(tag) {
            Ok(TypeTag::String) => Value::String(read_string(reader, codepage)?),
            Ok(TypeTag::Int) => Value::Int(reader.le_i32()?),
            Ok(TypeTag::Float) => Value::Float(reader.le_f32()?),
            Ok(TypeTag::Byte) => {
                reader.tag()?;
                Value::Byte(0)
            }
            Ok(TypeTag::Enum) => Value::Enum(reader.le_i32()?),
            Ok(TypeTag::Field) | Err(_) => {
                let offset = reader.offset()?.saturating_sub(1);
                return Err(FormatError::UnknownTag { tag, offset }.into());
            }
        };
        trace!(tag, %value, "value");
        Ok(value)
    }
}

/// Read a `u16` length prefixed string and decode it with `codepage`
pub(crate) fn read_string<R, C>(reader: &mut R, codepage: &C) -> Result<String>
where
    R: Read + Seek + ?Sized,
    C: Codepage + ?Sized,
{
    let len = reader.le_u16()? as usize;
    let offset = reader.offset()?;
    let raw = reader.chunk(len)?;

    codepage.decode(&raw).map_err(|err| match err {
        Error::Decode { codepage, len, .. } => Error::Decode {
            codepage,
            len,
            offset,
        },
        other => other,
    })
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Seek};

    use pretty_assertions::assert_eq;

    use crate::codepage::windows;
    use crate::error::{Error, FormatError, Result};
    use crate::types::Value;

    #[test]
    fn read_string_value() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x05, 0x00,                    // Length
            b'H', b'e', b'l', b'l', b'o',  // Text
        ]);

        let value = Value::read(0x01, &mut input, &windows(1252).unwrap())?;
        assert_eq!(value, Value::String("Hello".into()));
        assert_eq!(input.stream_position()?, 7);

        Ok(())
    }

    #[test]
    fn read_string_with_content_codepage() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x03, 0x00,
            0xC4, 0xE0, 0x21,
        ]);

        let value = Value::read(0x01, &mut input, &windows(1251).unwrap())?;
        assert_eq!(value, Value::String("Да!".into()));

        Ok(())
    }

    #[test]
    fn read_numbers() -> Result<()> {
        let cp = windows(1252).unwrap();

        let mut input = Cursor::new((-2i32).to_le_bytes().to_vec());
        assert_eq!(Value::read(0x02, &mut input, &cp)?, Value::Int(-2));

        let mut input = Cursor::new(7i32.to_le_bytes().to_vec());
        assert_eq!(Value::read(0x11, &mut input, &cp)?, Value::Enum(7));

        Ok(())
    }

    #[test]
    fn read_float_reinterprets_bits() -> Result<()> {
        let mut input = Cursor::new(1.5f32.to_bits().to_le_bytes().to_vec());
        let value = Value::read(0x03, &mut input, &windows(1252).unwrap())?;
        assert_eq!(value, Value::Float(1.5));

        Ok(())
    }

    #[test]
    fn read_byte_reports_zero() -> Result<()> {
        let mut input = Cursor::new(vec![0x7F, 0xAA]);
        let value = Value::read(0x04, &mut input, &windows(1252).unwrap())?;
        assert_eq!(value, Value::Byte(0));
        assert_eq!(input.stream_position()?, 1);

        Ok(())
    }

    #[test]
    fn reject_unknown_tag() {
        let mut input = Cursor::new(vec![0x09, 0x00, 0x00, 0x00, 0x00]);
        input.set_position(1);

        let err = Value::read(0x09, &mut input, &windows(1252).unwrap()).unwrap_err();
        match err {
            Error::Format(FormatError::UnknownTag { tag, offset }) => {
                assert_eq!(tag, 0x09);
                assert_eq!(offset, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reject_field_tag_as_value() {
        let mut input = Cursor::new(vec![0x00, 0x00, 0x00, 0x00]);
        let err = Value::read(0x12, &mut input, &windows(1252).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::UnknownTag { tag: 0x12, .. })
        ));
    }

    #[test]
    fn truncated_string_is_a_format_error() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x0A, 0x00,
            b's', b'h', b'o', b'r', b't',
        ]);
        let err = Value::read(0x01, &mut input, &windows(1252).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::UnexpectedEof { .. })
        ));
    }
}
