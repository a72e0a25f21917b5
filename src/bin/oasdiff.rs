use anyhow::Context;
use clap::{Parser, ValueEnum};
use oasdiff::diff::{compare_documents, DiffResult};
use oasdiff::spec::load_document;
use std::process::ExitCode;
use tracing::debug;

/// Compare two OpenAPI documents and report structural differences.
#[derive(Parser, Debug)]
#[command(name = "oasdiff", version, about)]
struct Cli {
    /// The baseline document (YAML or JSON)
    previous: String,
    /// The document to compare against the baseline
    actual: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

fn run(cli: &Cli) -> anyhow::Result<Vec<DiffResult>> {
    let previous = load_document(&cli.previous)
        .with_context(|| format!("failed to load {}", cli.previous))?;
    let actual = load_document(&cli.actual)
        .with_context(|| format!("failed to load {}", cli.actual))?;
    debug!(
        previous = %cli.previous,
        actual = %cli.actual,
        "comparing documents"
    );
    let diffs = compare_documents(&previous, &actual)?;
    Ok(diffs)
}

fn render(diffs: &[DiffResult], format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => {
            for diff in diffs {
                match &diff.message {
                    Some(message) => println!("{} [{}] {}", diff.kind, diff.context, message),
                    None => println!("{} [{}]", diff.kind, diff.context),
                }
            }
        }
        Format::Json => {
            let rendered =
                serde_json::to_string_pretty(diffs).context("failed to serialize diff results")?;
            println!("{rendered}");
        }
    }
    Ok(())
}

// Exit code 0 means the documents are structurally identical, 1 means
// differences were found, 2 means the comparison itself failed.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli).and_then(|diffs| render(&diffs, cli.format).map(|()| diffs)) {
        Ok(diffs) if diffs.is_empty() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
