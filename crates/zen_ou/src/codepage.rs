//! Single-byte text encodings used for archive strings.
//!
//! OU archives store text in whatever Windows codepage the game was localized with, so the
//! caller picks one and hands it to the reader and writer through [`Codepage`]. Field names
//! are the exception and are always read as [`FIELD_NAMES`].

pub use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// Codepage of the field name dictionary, independent of the content codepage.
pub static FIELD_NAMES: &Encoding = encoding_rs::WINDOWS_1252;

/// Windows codepages accepted by [`windows`].
pub const SUPPORTED_CODEPAGES: [u16; 9] = [1250, 1251, 1252, 1253, 1254, 1255, 1256, 1257, 1258];

/// Text decoding and encoding capability for archive strings
pub trait Codepage {
    /// Human readable name of the codepage
    fn name(&self) -> &'static str;

    /// Decode raw archive bytes. Bytes without a mapping are an error.
    fn decode(&self, bytes: &[u8]) -> Result<String>;

    /// Encode text for a text archive. Characters without a mapping are an error.
    fn encode(&self, text: &str) -> Result<Vec<u8>>;
}

impl Codepage for &'static Encoding {
    fn name(&self) -> &'static str {
        Encoding::name(*self)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String> {
        (*self).decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or(Error::Decode {
                codepage: Encoding::name(*self),
                len: bytes.len(),
                offset: 0,
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let (bytes, _, unmappable) = Encoding::encode(*self, text);
        if unmappable {
            return Err(Error::Unmappable {
                codepage: Encoding::name(*self),
                text: text.to_owned(),
            });
        }
        Ok(bytes.into_owned())
    }
}

/// Look up one of the [`SUPPORTED_CODEPAGES`] by number.
pub fn windows(codepage: u16) -> Option<&'static Encoding> {
    if !SUPPORTED_CODEPAGES.contains(&codepage) {
        return None;
    }
    Encoding::for_label(format!("windows-{codepage}").as_bytes())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::codepage::{windows, Codepage, SUPPORTED_CODEPAGES};
    use crate::error::{Error, Result};

    #[test]
    fn resolves_all_supported_codepages() {
        for cp in SUPPORTED_CODEPAGES {
            let encoding = windows(cp).expect("supported codepage");
            assert_eq!(encoding.name(), format!("windows-{cp}"));
        }
        assert!(windows(437).is_none());
        assert!(windows(65001).is_none());
    }

    #[test]
    fn cyrillic_round_trip() -> Result<()> {
        let cp = windows(1251).unwrap();

        #[rustfmt::skip]
        let raw = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let text = Codepage::decode(&cp, &raw)?;
        assert_eq!(text, "Привет");
        assert_eq!(Codepage::encode(&cp, &text)?, raw.to_vec());

        Ok(())
    }

    #[test]
    fn rejects_unmappable_text() {
        let cp = windows(1252).unwrap();
        let err = Codepage::encode(&cp, "Привет").unwrap_err();
        assert!(matches!(err, Error::Unmappable { .. }));
    }

    #[test]
    fn rejects_undefined_bytes() {
        // 0xAA has no mapping in windows-1253
        let cp = windows(1253).unwrap();
        let err = Codepage::decode(&cp, &[0x41, 0xAA]).unwrap_err();
        assert!(matches!(err, Error::Decode { len: 2, .. }));
    }
}
