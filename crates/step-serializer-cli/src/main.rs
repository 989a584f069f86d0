//! step-serialize - write STEP files from JSON documents
//!
//! Reads a document in the JSON interchange form of `StepDocument` and
//! writes it as an ISO 10303-21 file.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use step_serializer::{
    write_step_with, RecordingSink, SerializeOptions, StepDocument, StepSerializer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "step-serialize")]
#[command(about = "Write a STEP physical file from a JSON document", long_about = None)]
struct Cli {
    /// Input document (.json)
    input: PathBuf,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Reject documents nesting arrays or inline entities deeper than this
    #[arg(long)]
    max_depth: Option<usize>,
    /// Print the sink call sequence as JSON instead of STEP text
    #[arg(long)]
    record: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let doc = StepDocument::from_json(&json)
        .with_context(|| format!("{} is not a valid document", cli.input.display()))?;

    let bytes = render(&cli, &doc)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                entities = doc.data.len(),
                output = %path.display(),
                "wrote STEP file"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Serialize the document into the requested output form.
fn render(cli: &Cli, doc: &StepDocument) -> Result<Vec<u8>> {
    let serializer = StepSerializer::with_options(SerializeOptions {
        max_depth: cli.max_depth,
    });

    if cli.record {
        let mut sink = RecordingSink::new();
        serializer
            .serialize(&mut sink, doc)
            .context("serialization failed")?;
        let mut bytes = serde_json::to_vec_pretty(&sink.events)?;
        bytes.push(b'\n');
        return Ok(bytes);
    }

    write_step_with(&serializer, doc).context("serialization failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use step_serializer::{StepObject, StepValue};

    fn doc() -> StepDocument {
        let mut doc = StepDocument::new();
        doc.insert_entity(
            1,
            StepObject::new(
                "PLANE",
                vec![
                    StepValue::string(""),
                    StepValue::Array(vec![StepValue::Array(vec![StepValue::LineReference(2)])]),
                ],
            ),
        );
        doc
    }

    #[test]
    fn test_render_step_text() {
        let cli = Cli::try_parse_from(["step-serialize", "in.json"]).unwrap();
        let text = String::from_utf8(render(&cli, &doc()).unwrap()).unwrap();
        assert!(text.contains("#1=PLANE('',((#2)));\n"));
    }

    #[test]
    fn test_render_record() {
        let cli = Cli::try_parse_from(["step-serialize", "in.json", "--record"]).unwrap();
        let json = String::from_utf8(render(&cli, &doc()).unwrap()).unwrap();
        let events: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(events[0], "StartStep");
        assert_eq!(events[4]["LineIdentifier"], 1);
    }

    #[test]
    fn test_max_depth_flag() {
        let cli =
            Cli::try_parse_from(["step-serialize", "in.json", "--max-depth", "1"]).unwrap();
        let err = render(&cli, &doc()).unwrap_err();
        assert!(format!("{err:#}").contains("configured limit of 1"));
    }
}
