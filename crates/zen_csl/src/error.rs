//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`zen_ou::error::Error`], raised by the codepage
    #[error(transparent)]
    #[diagnostic(transparent)]
    Codepage(#[from] zen_ou::error::Error),

    /// the tree does not have the block / atomic block / message layout
    #[error("block {path} has {children} nested blocks, but messages can not contain blocks")]
    #[diagnostic(
        code(zen_csl::shape),
        help("only libraries with block, atomic block and message levels can be written")
    )]
    UnexpectedShape {
        /// Position of the offending block, e.g. `0/1/2`
        path: String,
        /// Number of children found below the message level
        children: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
