use clap::Args;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Args)]
pub struct DumpArgs {
    /// Windows code page of the archive text
    #[arg(value_parser = clap::value_parser!(u16).range(1250..=1258))]
    codepage: u16,

    /// An input OU.BIN file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,
}

impl DumpArgs {
    pub fn handle(&self) -> Result<()> {
        let cp = super::codepage(self.codepage)?;
        let library = super::read_library(&self.source, cp)?;

        println!("{}", serde_json::to_string_pretty(&library).into_diagnostic()?);
        Ok(())
    }
}
