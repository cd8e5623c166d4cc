use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::metadata::MetadataSource;
use crate::output::format_transcript;
use crate::transcript::{CaptionSource, TranscriptFetcher};
use crate::{ExtractError, TranscriptDocument, VideoReference};

/// Separator between per-video blocks in combined output (two blank lines)
pub const BLOCK_SEPARATOR: &str = "\n\n\n";

/// Where the combined text goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    SingleFile(PathBuf),
    CombinedFile(PathBuf),
}

impl OutputTarget {
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::SingleFile(p) | OutputTarget::CombinedFile(p) => Some(p),
        }
    }
}

/// Inputs and destination derived from the positional arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub inputs: Vec<String>,
    pub target: OutputTarget,
}

impl BatchPlan {
    /// Decide the routing from argument shape alone:
    /// `<input>`, `<input> <output>`, or `<output.txt> <input> <input>...`
    pub fn from_args(args: &[String]) -> Result<Self, ExtractError> {
        match args {
            [] => Err(ExtractError::Usage("no URL or video ID provided".to_string())),
            [input] => Ok(Self {
                inputs: vec![input.clone()],
                target: OutputTarget::Stdout,
            }),
            [input, output] => Ok(Self {
                inputs: vec![input.clone()],
                target: OutputTarget::SingleFile(PathBuf::from(output)),
            }),
            [output, inputs @ ..] if output.ends_with(".txt") => Ok(Self {
                inputs: inputs.to_vec(),
                target: OutputTarget::CombinedFile(PathBuf::from(output)),
            }),
            [first, ..] => Err(ExtractError::Usage(format!(
                "multiple videos need an output file ending in .txt first, got \"{first}\""
            ))),
        }
    }
}

/// Per-run extraction options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub languages: Vec<String>,
    pub include_timestamps: bool,
}

/// Successful blocks and failed inputs, both in input order
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub formatted_blocks: Vec<String>,
    pub failed_inputs: Vec<(String, String)>,
}

impl BatchOutcome {
    fn record(mut self, raw_input: &str, result: Result<String, ExtractError>) -> Self {
        match result {
            Ok(block) => self.formatted_blocks.push(block),
            Err(e) => {
                match &e {
                    ExtractError::IdentifierNotFound(_) => eprintln!("Error: {e}"),
                    _ => eprintln!("  -> Error: {e}"),
                }
                warn!("Skipping {raw_input}: {e}");
                self.failed_inputs.push((raw_input.to_string(), e.to_string()));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.formatted_blocks.is_empty()
    }

    pub fn combined(&self) -> String {
        self.formatted_blocks.join(BLOCK_SEPARATOR)
    }
}

/// Drives resolution, fetching and formatting over a batch of inputs
pub struct Orchestrator<C, M> {
    transcripts: TranscriptFetcher<C>,
    metadata: M,
}

impl<C: CaptionSource, M: MetadataSource> Orchestrator<C, M> {
    pub fn new(captions: C, metadata: M) -> Self {
        Self {
            transcripts: TranscriptFetcher::new(captions),
            metadata,
        }
    }

    pub fn captions(&self) -> &C {
        self.transcripts.source()
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// Resolve, fetch and format a single input
    pub async fn process_one(&self, raw_input: &str, options: &BatchOptions) -> Result<String, ExtractError> {
        let reference = VideoReference::new(raw_input);
        let id = reference.id()?;

        eprintln!("Fetching transcript for {id}...");
        let fetched = self.transcripts.fetch_transcript(id, &options.languages).await?;

        if !options.languages.contains(&fetched.track.language_code) {
            eprintln!(
                "  -> '{}' unavailable, using {} ({})",
                options.languages.join(","),
                fetched.track.language,
                fetched.track.language_code,
            );
        }

        let metadata = self.metadata.fetch_metadata(id).await;
        let doc = TranscriptDocument::new(id, metadata, fetched);
        eprintln!("  -> {} ({} segments)", doc.title, doc.segments.len());

        Ok(format_transcript(&doc, options.include_timestamps))
    }

    /// Process every input in order; one input's failure never stops the rest
    pub async fn process(&self, inputs: &[String], options: &BatchOptions) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for raw_input in inputs {
            let result = self.process_one(raw_input, options).await;
            outcome = outcome.record(raw_input, result);
        }
        info!(
            "Batch finished: {} succeeded, {} failed",
            outcome.formatted_blocks.len(),
            outcome.failed_inputs.len()
        );
        outcome
    }

    /// Process the plan and route the combined text.
    ///
    /// Nothing is written when every input failed.
    pub async fn run(
        &self,
        plan: &BatchPlan,
        options: &BatchOptions,
        stdout: &mut impl Write,
    ) -> Result<BatchOutcome, ExtractError> {
        let outcome = self.process(&plan.inputs, options).await;

        if outcome.is_empty() {
            eprintln!("No transcripts extracted.");
            return Err(ExtractError::EmptyBatchResult {
                failures: outcome.failed_inputs.len(),
            });
        }

        write_output(&plan.target, &outcome.combined(), stdout)?;
        Ok(outcome)
    }
}

/// Write the combined text to its destination in one shot
pub fn write_output(target: &OutputTarget, combined: &str, stdout: &mut impl Write) -> Result<(), ExtractError> {
    match target.path() {
        None => writeln!(stdout, "{combined}").map_err(|source| ExtractError::Output {
            path: PathBuf::from("<stdout>"),
            source,
        }),
        Some(path) => {
            std::fs::write(path, combined).map_err(|source| ExtractError::Output {
                path: path.to_path_buf(),
                source,
            })?;
            let size_kb = combined.len() as f64 / 1024.0;
            eprintln!("\nSaved to: {} ({size_kb:.1} KB)", path.display());
            info!("Wrote {} bytes to {}", combined.len(), path.display());
            Ok(())
        }
    }
}
