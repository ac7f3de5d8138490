use miette::{miette, Context, IntoDiagnostic, Result};
use std::{fs::File, io::BufReader, path::Path};
use zen_ou::{
    codepage::{windows, Encoding},
    Library,
};

pub mod codepages;
pub mod convert;
pub mod dump;

#[derive(clap::Subcommand)]
pub enum OuCommands {
    /// Convert an OU.BIN file into an OU.CSL text archive
    Convert(convert::ConvertArgs),
    /// Print the decoded tree of an OU.BIN file as JSON
    Dump(dump::DumpArgs),
    /// List the accepted code pages
    Codepages(codepages::CodepagesArgs),
}

impl OuCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            OuCommands::Convert(convert) => convert.handle(),
            OuCommands::Dump(dump) => dump.handle(),
            OuCommands::Codepages(codepages) => codepages.handle(),
        }
    }
}

fn codepage(number: u16) -> Result<&'static Encoding> {
    windows(number).ok_or_else(|| miette!("code page {number} is not supported"))
}

fn read_library(path: &Path, codepage: &'static Encoding) -> Result<Library> {
    let f = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    Ok(zen_ou::decode(BufReader::new(f), &codepage)
        .context(format!("decoding {}", path.display()))?)
}
