use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::Write, path::PathBuf};
use tracing::info;
use zen_csl::{CslWriter, CslWriterOptions};

#[derive(Args)]
pub struct ConvertArgs {
    /// Windows code page of the archive text
    #[arg(value_parser = clap::value_parser!(u16).range(1250..=1258))]
    codepage: u16,

    /// An input OU.BIN file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// The OU.CSL file to write
    #[arg(value_name = "DESTINATION")]
    destination: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Name written to the user line of the archive
    #[arg(long, value_name = "NAME")]
    user: Option<String>,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        let cp = super::codepage(self.codepage)?;
        let library = super::read_library(&self.source, cp)?;

        info!(
            blocks = library.len(),
            objects = library.total_count(),
            "decoded {}",
            self.source.display()
        );

        let options = CslWriterOptions::builder()
            .maybe_user(self.user.clone())
            .build();
        let text = CslWriter::new(Vec::new(), &cp, options).write_library(&library)?;

        info!("writing {}", self.destination.display());
        let mut out = if !self.overwrite {
            File::create_new(&self.destination)
                .into_diagnostic()
                .context(format!("creating {}", &self.destination.display()))?
        } else {
            File::create(&self.destination)
                .into_diagnostic()
                .context(format!("creating {}", &self.destination.display()))?
        };

        out.write_all(&text).into_diagnostic()?;
        Ok(())
    }
}
