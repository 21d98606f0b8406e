//! Print the OpenAPI document as JSON, or write it to `--output`.

use std::path::PathBuf;

use campus_backend::ApiDoc;
use clap::Parser;
use color_eyre::eyre::WrapErr;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Dump the campus backend OpenAPI document")]
struct Cli {
    /// Destination file; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise the OpenAPI document")?;
    match cli.output {
        Some(path) => std::fs::write(&path, json + "\n")
            .wrap_err_with(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
