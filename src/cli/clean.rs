use clap::Args;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::core::lyrics::extract;
use crate::error::Result;

#[derive(Args)]
pub struct CleanArgs {
    /// File with raw scraped lyrics text (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

pub async fn execute(args: CleanArgs) -> Result<()> {
    let raw = match args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    println!("{}", extract(&raw));
    Ok(())
}
