//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use showcase::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Print the showcase OpenAPI document")]
struct Args {
    /// Write the document to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise the OpenAPI document")?;
    match args.output {
        Some(path) => std::fs::write(&path, format!("{json}\n"))
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}
