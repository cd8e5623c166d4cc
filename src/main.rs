use std::process::ExitCode;

use eyre::Result;
use log::debug;

mod cli;

use cli::Cli;
use ytextract::ExtractError;
use ytextract::batch::{BatchOptions, BatchOutcome, BatchPlan, Orchestrator};
use ytextract::config::{Config, config_path};
use ytextract::logging;
use ytextract::metadata::OEmbedClient;
use ytextract::output::render_language_list;
use ytextract::transcript::CaptionSource;
use ytextract::youtube::YouTubeCaptions;

fn build_after_help() -> String {
    let config = config_path();
    let config_line = if config.exists() {
        format!("  \x1b[32m✅\x1b[0m {}", config.display())
    } else {
        format!("  \x1b[33m–\x1b[0m {} (not found, using defaults)", config.display())
    };

    let log_path = logging::log_file("ytextract");

    format!(
        "\nCONFIG:\n{config_line}\n\nEXAMPLES:\n  ytextract https://youtu.be/dQw4w9WgXcQ\n  \
         ytextract --lang=de dQw4w9WgXcQ talk.txt\n  \
         ytextract all.txt URL1 URL2 URL3\n\nLogs are written to: {}",
        log_path.display()
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("ytextract");

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = match cmd.try_get_matches_from(cli::normalize_args(std::env::args_os())) {
        Ok(m) => m,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            e.print()?;
            return Ok(code);
        }
    };
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        debug!("Ignoring invalid config: {e}");
        Config::default()
    });

    let lang = config.lang(cli.lang.as_deref());
    let include_timestamps = config.include_timestamps(cli.no_timestamps);

    if cli.verbose {
        let path = config_path();
        if path.exists() {
            eprintln!("Config: {}", path.display());
        }
        eprintln!("Language: {lang}\nTimestamps: {include_timestamps}");
    }

    let client = reqwest::Client::new();
    let captions = YouTubeCaptions::new(client.clone(), config.transcript_timeout());

    if cli.list_langs {
        return list_languages(&captions, &cli.args[0]).await;
    }

    let plan = match BatchPlan::from_args(&cli.args) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {e}\n\n{}", <Cli as clap::CommandFactory>::command().render_usage());
            return Ok(ExitCode::from(exit_status(&Err(e))));
        }
    };
    debug!("Plan: {} input(s) -> {:?}", plan.inputs.len(), plan.target);

    let metadata = OEmbedClient::new(client, config.metadata_timeout());
    let orchestrator = Orchestrator::new(captions, metadata);
    let options = BatchOptions {
        languages: vec![lang],
        include_timestamps,
    };

    let mut stdout = std::io::stdout().lock();
    let result = orchestrator.run(&plan, &options, &mut stdout).await;
    match &result {
        Ok(outcome) if cli.verbose && !outcome.failed_inputs.is_empty() => {
            eprintln!("{} input(s) failed:", outcome.failed_inputs.len());
            for (input, reason) in &outcome.failed_inputs {
                eprintln!("  {input}: {reason}");
            }
        }
        Ok(_) => {}
        Err(ExtractError::EmptyBatchResult { failures }) => debug!("All {failures} input(s) failed"),
        Err(e) => eprintln!("Error: {e}"),
    }
    Ok(ExitCode::from(exit_status(&result)))
}

/// Process exit status for a finished run: 0 only when some transcript was produced
fn exit_status(result: &std::result::Result<BatchOutcome, ExtractError>) -> u8 {
    match result {
        Ok(outcome) if !outcome.is_empty() => 0,
        _ => 1,
    }
}

async fn list_languages(captions: &YouTubeCaptions, input: &str) -> Result<ExitCode> {
    let Some(video_id) = ytextract::resolve(input) else {
        eprintln!("Error: {}", ExtractError::IdentifierNotFound(input.to_string()));
        return Ok(ExitCode::SUCCESS);
    };

    let tracks = captions.list_tracks(&video_id).await?;
    println!("{}", render_language_list(video_id.as_str(), &tracks));
    Ok(ExitCode::SUCCESS)
}
