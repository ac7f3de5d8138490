use clap::Args;
use miette::Result;
use zen_ou::codepage::{windows, SUPPORTED_CODEPAGES};

#[derive(Args)]
pub struct CodepagesArgs {}

impl CodepagesArgs {
    pub fn handle(&self) -> Result<()> {
        for number in SUPPORTED_CODEPAGES {
            if let Some(cp) = windows(number) {
                println!("{number}\t{}", cp.name());
            }
        }
        Ok(())
    }
}
