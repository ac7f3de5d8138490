pub mod ou;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle OU archives
    Ou {
        #[command(subcommand)]
        command: ou::OuCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Ou { command } => command.handle(),
        }
    }
}
