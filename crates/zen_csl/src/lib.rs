//! This library writes **CSL** text archives (`OU.CSL`) from decoded *ZenGin* OU libraries.
//!
//! # CSL Archive Format Documentation
//!
//! A CSL file is the text twin of `OU.BIN`: the same object tree written by the engine's generic
//! ASCII archiver. Every line ends with `\n` and is indented with one tab per nesting level.
//!
//! ## File Structure
//!
//! ### Preamble
//!
//! ```text
//! ZenGin Archive
//! ver 1
//! zCArchiverGeneric
//! ASCII
//! saveGame 0
//! date 12.3.2002 2:5:9
//! user bin2csl
//! END
//! objects 4
//! END
//!
//! ```
//!
//! The object count is the number of blocks in the tree plus the library container, left
//! aligned in a nine character column.
//!
//! ### Objects
//!
//! Objects open with `[% Class version index]` and close with `[]`. Fields are written as
//! `name=kind:value`. The library container is `zCCSLib` with index `0`, every other object is
//! numbered in pre-order starting at `1`.
//!
//! | Level | Class                                           | Fields                                                 |
//! |-------|-------------------------------------------------|--------------------------------------------------------|
//! | 0     | `zCCSLib`                                       | `NumOfItems=int`                                       |
//! | 1     | `zCCSBlock`                                     | `blockName=string`, `numOfBlocks=int`, `subBlock0=float` |
//! | 2     | `zCCSAtomicBlock`                               |                                                        |
//! | 3     | `oCMsgConversation:oCNpcMessage:zCEventMessage` | `subType=enum`, `text=string`, `name=string`           |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.csl`
//! - **Encoding**: The content codepage used when decoding the binary archive
//!

pub mod error;
pub mod write;

pub use write::{encode, CslWriter, CslWriterOptions};
