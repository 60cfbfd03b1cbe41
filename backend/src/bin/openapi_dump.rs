//! Print the OpenAPI document as JSON or YAML.

use std::io::Write;
use std::path::PathBuf;

use adventure_map::doc::ApiDoc;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// Export the REST API description for external tooling.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version, about)]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = match cli.format {
        Format::Json => doc.to_pretty_json().wrap_err("serialise OpenAPI as JSON")?,
        Format::Yaml => doc.to_yaml().wrap_err("serialise OpenAPI as YAML")?,
    };

    match cli.output {
        Some(path) => std::fs::write(&path, rendered)
            .wrap_err_with(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").wrap_err("write to stdout")?;
        }
    }
    Ok(())
}
