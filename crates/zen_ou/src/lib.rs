//! This library handles reading **OU** conversation archives used by *ZenGin* games.
//!
//! # OU Archive Format Documentation
//!
//! The OU archive (usually `OU.BIN`) stores the output units of a game: every line of dialogue
//! together with the name of the sound file that voices it. The archive is a binary
//! serialization of a small object tree produced by the engine's binary archiver.
//!
//! ## File Structure
//!
//! An OU file consists of a text preamble, a binary header, a stream of tagged values
//! describing the object tree, and a field name dictionary.
//!
//! ### Preamble
//!
//! Newline separated text lines (`ZenGin Archive`, `ver 1`, ...) terminated by a line containing
//! only `END`. The reader skips everything up to and including `\nEND\n`.
//!
//! ### Header
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Version                | 4 bytes: `1` or `2`                                        |
//! | 0x0004         | Object Count           | 4 bytes: Number of objects in the archive                  |
//! | 0x0008         | Dictionary Offset      | 4 bytes: Absolute offset of the field name dictionary      |
//!
//! ### Value Stream
//!
//! Every value is preceded by a one byte type tag:
//!
//! | Tag    | Kind    | Payload                                                  |
//! |--------|---------|----------------------------------------------------------|
//! | `0x01` | string  | 2 bytes length, then the text in the content codepage    |
//! | `0x02` | int     | 4 bytes signed integer                                   |
//! | `0x03` | float   | 4 bytes IEEE-754 float                                   |
//! | `0x04` | byte    | 1 byte                                                   |
//! | `0x11` | enum    | 4 bytes signed integer                                   |
//! | `0x12` | field   | 4 bytes dictionary index, then one tagged value          |
//!
//! Objects are opened with a string of the form `[% Class version index]` and closed with the
//! string `[]` or a zero tag. Between those, fields and nested objects appear in any order.
//! The first object is the library container whose children are the conversation blocks.
//!
//! ### Field Name Dictionary
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Count                  | 4 bytes: Number of dictionary slots                        |
//!
//! followed by `Count` entries:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Length                 | 2 bytes: Length of the name                             |
//! | 0x0002         | Index                  | 2 bytes: Slot the name belongs to                       |
//! | 0x0004         | Hash                   | 4 bytes: Hash of the name, unused                       |
//! | 0x0008         | Name                   | (Length) bytes: Windows-1252 text                       |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bin`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod codepage;
pub mod dictionary;
pub mod error;
pub mod header;
pub mod read;
pub(crate) mod stream;
pub mod types;
pub mod value;

pub use codepage::Codepage;
pub use read::{decode, OuReader};
pub use types::{Block, BlockId, FieldEntry, Library, Value};
