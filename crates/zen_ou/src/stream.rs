//! Little-endian primitives shared by the value codec, the dictionary and the block reader.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, FormatError, Result};

/// Reads that turn a short stream into [`FormatError::UnexpectedEof`] carrying the offset.
pub(crate) trait ArchiveRead: Read + Seek {
    /// Current absolute offset in the archive
    fn offset(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    fn tag(&mut self) -> Result<u8> {
        let value = self.read_u8();
        value.or_else(|err| Err(eof(self, err)))
    }

    fn le_u16(&mut self) -> Result<u16> {
        let value = self.read_u16::<LittleEndian>();
        value.or_else(|err| Err(eof(self, err)))
    }

    fn le_u32(&mut self) -> Result<u32> {
        let value = self.read_u32::<LittleEndian>();
        value.or_else(|err| Err(eof(self, err)))
    }

    fn le_i32(&mut self) -> Result<i32> {
        let value = self.read_i32::<LittleEndian>();
        value.or_else(|err| Err(eof(self, err)))
    }

    fn le_f32(&mut self) -> Result<f32> {
        let value = self.read_f32::<LittleEndian>();
        value.or_else(|err| Err(eof(self, err)))
    }

    fn chunk(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        match self.read_exact(&mut buffer) {
            Ok(()) => Ok(buffer),
            Err(err) => Err(eof(self, err)),
        }
    }
}

impl<R: Read + Seek + ?Sized> ArchiveRead for R {}

fn eof<R: Seek + ?Sized>(reader: &mut R, err: io::Error) -> Error {
    if err.kind() != io::ErrorKind::UnexpectedEof {
        return err.into();
    }
    match reader.stream_position() {
        Ok(offset) => FormatError::UnexpectedEof { offset }.into(),
        Err(err) => err.into(),
    }
}

/// Maps a [`binrw::Error`] raised by a short stream onto [`FormatError::UnexpectedEof`].
pub(crate) fn binrw_eof<R: Seek + ?Sized>(reader: &mut R, err: binrw::Error) -> Error {
    if !err.is_eof() {
        return err.into();
    }
    match reader.stream_position() {
        Ok(offset) => FormatError::UnexpectedEof { offset }.into(),
        Err(err) => err.into(),
    }
}

/// Runs `f` with the reader moved to `offset` and always returns to the current position.
///
/// A failure to return is reported as [`Error::RestorePosition`] even when `f` failed,
/// since the stream is unusable afterwards.
pub(crate) fn at_offset<R, T>(
    reader: &mut R,
    offset: u64,
    f: impl FnOnce(&mut R) -> Result<T>,
) -> Result<T>
where
    R: Read + Seek + ?Sized,
{
    let position = reader.stream_position()?;
    reader.seek(SeekFrom::Start(offset))?;

    let result = f(reader);

    reader
        .seek(SeekFrom::Start(position))
        .map_err(|source| Error::RestorePosition { position, source })?;

    result
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Seek};

    use crate::error::{Error, FormatError};
    use crate::stream::{at_offset, ArchiveRead};

    #[test]
    fn short_read_reports_offset() {
        let mut input = Cursor::new(vec![0x01, 0x02, 0x03]);

        let err = input.le_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::Format(FormatError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn restores_position_after_failure() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00,
        ]);
        input.set_position(2);

        let result = at_offset(&mut input, 4, |r| r.le_u32());
        assert!(result.is_err());
        assert_eq!(input.stream_position().unwrap(), 2);
    }

    #[test]
    fn restores_position_after_success() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00,
        ]);
        input.set_position(4);

        let value = at_offset(&mut input, 0, |r| r.le_u32()).unwrap();
        assert_eq!(value, 1);
        assert_eq!(input.stream_position().unwrap(), 4);
    }
}
