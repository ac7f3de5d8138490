//! Types for writing CSL text archives
//!

use bon::Builder;
use chrono::{Local, NaiveDateTime};
use std::io::Write;
use tracing::{debug, instrument};
use zen_ou::{Block, Codepage, Library};

use crate::error::{Error, Result};

/// Tool name written to the `user` line unless overridden
pub const DEFAULT_USER: &str = "bin2csl";

/// Layout of the `date` line: no zero padding, 12 hour clock without AM/PM
pub const DATE_FORMAT: &str = "%-d.%-m.%Y %-I:%-M:%-S";

/// Class of the library container, always written with id 0
pub const LIBRARY_CLASS: &str = "zCCSLib";
/// Class of first level blocks
pub const BLOCK_CLASS: &str = "zCCSBlock";
/// Class of second level blocks
pub const ATOMIC_BLOCK_CLASS: &str = "zCCSAtomicBlock";
/// Class of third level blocks
pub const MESSAGE_CLASS: &str = "oCMsgConversation:oCNpcMessage:zCEventMessage";

/// Options for how the CSL file should be written
#[derive(Debug, Clone, Builder)]
pub struct CslWriterOptions {
    /// Value of the `user` line
    #[builder(into, default = DEFAULT_USER.to_owned())]
    pub user: String,

    /// Value of the `date` line, the current local time when unset
    pub date: Option<NaiveDateTime>,
}

impl Default for CslWriterOptions {
    fn default() -> Self {
        CslWriterOptions::builder().build()
    }
}

/// Block numbers handed out in pre-order while one archive is written
#[derive(Debug, Default)]
struct BlockCounter(u32);

impl BlockCounter {
    fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }
}

/// Encode `library` as a CSL text archive with default options.
pub fn encode<C: Codepage + ?Sized>(library: &Library, codepage: &C) -> Result<Vec<u8>> {
    CslWriter::new(Vec::new(), codepage, CslWriterOptions::default()).write_library(library)
}

/// CSL archive generator
///
/// Libraries are written with a fixed three level layout: blocks holding atomic blocks holding
/// messages. Only `blockName`, `text` and `name` are carried over from the decoded tree.
///
/// ```
/// # fn doit() -> zen_csl::error::Result<()>
/// # {
/// use zen_csl::write::{CslWriter, CslWriterOptions};
///
/// let cp = zen_ou::codepage::windows(1252).unwrap();
/// let library = zen_ou::Library::default();
///
/// let writer = CslWriter::new(Vec::new(), &cp, CslWriterOptions::builder().user("me").build());
/// let text = writer.write_library(&library)?;
///
/// assert!(text.starts_with(b"ZenGin Archive\n"));
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct CslWriter<'c, W: Write, C: ?Sized> {
    inner: W,
    codepage: &'c C,
    options: CslWriterOptions,
}

impl<'c, W: Write, C: Codepage + ?Sized> CslWriter<'c, W, C> {
    /// Initializes the writer.
    pub fn new(inner: W, codepage: &'c C, options: CslWriterOptions) -> Self {
        CslWriter {
            inner,
            codepage,
            options,
        }
    }

    /// Write the whole archive and return the inner writer.
    ///
    /// The archive is rendered in memory first, so nothing reaches the inner writer when the
    /// library has an unexpected layout or contains text the codepage can not represent.
    #[instrument(skip_all, err, fields(blocks = library.len()))]
    pub fn write_library(mut self, library: &Library) -> Result<W> {
        check_shape(library)?;

        let mut out = Lines {
            buffer: Vec::new(),
            codepage: self.codepage,
        };
        let date = self
            .options
            .date
            .unwrap_or_else(|| Local::now().naive_local());

        out.line(0, "ZenGin Archive")?;
        out.line(0, "ver 1")?;
        out.line(0, "zCArchiverGeneric")?;
        out.line(0, "ASCII")?;
        out.line(0, "saveGame 0")?;
        out.line(0, &format!("date {}", date.format(DATE_FORMAT)))?;
        out.line(0, &format!("user {}", self.options.user))?;
        out.line(0, "END")?;
        out.line(0, &format!("objects {:<9}", library.total_count() + 1))?;
        out.line(0, "END")?;
        out.line(0, "")?;

        out.line(0, &format!("[% {LIBRARY_CLASS} 0 0]"))?;
        out.line(1, &format!("NumOfItems=int:{}", library.len()))?;

        let mut counter = BlockCounter::default();
        for block in library.iter() {
            write_block(&mut out, &mut counter, block, 1)?;
        }
        out.line(0, "[]")?;

        debug!(blocks = counter.0, bytes = out.buffer.len(), "rendered csl");

        self.inner.write_all(&out.buffer)?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Rendered archive text
struct Lines<'c, C: ?Sized> {
    buffer: Vec<u8>,
    codepage: &'c C,
}

impl<C: Codepage + ?Sized> Lines<'_, C> {
    fn line(&mut self, depth: usize, text: &str) -> Result<()> {
        self.buffer.extend(std::iter::repeat(b'\t').take(depth));
        self.buffer.extend(self.codepage.encode(text)?);
        self.buffer.push(b'\n');
        Ok(())
    }

    fn open(&mut self, counter: &mut BlockCounter, depth: usize, class: &str) -> Result<()> {
        let id = counter.next();
        self.line(depth, &format!("[% {class} 0 {id}]"))
    }

    fn close(&mut self, depth: usize) -> Result<()> {
        self.line(depth, "[]")
    }
}

fn write_block<C: Codepage + ?Sized>(
    out: &mut Lines<'_, C>,
    counter: &mut BlockCounter,
    block: &Block,
    depth: usize,
) -> Result<()> {
    out.open(counter, depth, BLOCK_CLASS)?;
    out.line(depth + 1, &format!("blockName=string:{}", block.block_name))?;
    out.line(depth + 1, &format!("numOfBlocks=int:{}", block.children.len()))?;
    out.line(depth + 1, "subBlock0=float:0")?;

    for atomic in &block.children {
        write_atomic_block(out, counter, atomic, depth + 1)?;
    }

    out.close(depth)
}

fn write_atomic_block<C: Codepage + ?Sized>(
    out: &mut Lines<'_, C>,
    counter: &mut BlockCounter,
    block: &Block,
    depth: usize,
) -> Result<()> {
    out.open(counter, depth, ATOMIC_BLOCK_CLASS)?;

    for message in &block.children {
        write_message(out, counter, message, depth + 1)?;
    }

    out.close(depth)
}

fn write_message<C: Codepage + ?Sized>(
    out: &mut Lines<'_, C>,
    counter: &mut BlockCounter,
    block: &Block,
    depth: usize,
) -> Result<()> {
    out.open(counter, depth, MESSAGE_CLASS)?;
    out.line(depth + 1, "subType=enum:0")?;
    out.line(depth + 1, &format!("text=string:{}", block.text))?;
    out.line(depth + 1, &format!("name=string:{}", block.name))?;
    out.close(depth)
}

/// Messages are the deepest level that is written, anything below them would be lost.
fn check_shape(library: &Library) -> Result<()> {
    for (b, block) in library.iter().enumerate() {
        for (a, atomic) in block.children.iter().enumerate() {
            for (m, message) in atomic.children.iter().enumerate() {
                if !message.children.is_empty() {
                    return Err(Error::UnexpectedShape {
                        path: format!("{b}/{a}/{m}"),
                        children: message.children.len(),
                    });
                }
            }
        }
    }
    Ok(())
}
