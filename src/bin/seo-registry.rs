use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use eyre::Result;
use log::{error, info};

use ytextract::logging;
use ytextract::registry::{self, NewPage, Registry};

#[derive(Parser)]
#[command(name = "seo-registry", about = "Create, read and update SEO page registry entries", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty registry
    Init {
        registry: PathBuf,
        domain: String,
        /// Default site language
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// Add a draft page
    Add {
        registry: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        slug: String,
        #[arg(long = "type", default_value = "blog")]
        page_type: String,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, default_value = "")]
        primary_keyword: String,
        /// Repeatable
        #[arg(long = "secondary")]
        secondary_keywords: Vec<String>,
        /// Repeatable
        #[arg(long = "longtail")]
        longtail_keywords: Vec<String>,
        #[arg(long, default_value = "")]
        meta_title: String,
        #[arg(long, default_value = "")]
        meta_description: String,
        #[arg(long, default_value = "Article")]
        schema_type: String,
        #[arg(long, default_value = "informational")]
        content_type: String,
        #[arg(long)]
        hub: Option<String>,
    },
    /// Record audit results for a page
    Audit {
        registry: PathBuf,
        id: String,
        score: u32,
        issues: Vec<String>,
    },
    /// Print a table of pages
    List { registry: PathBuf },
    /// Print sitemap entries for published pages as JSON
    Sitemap { registry: PathBuf },
}

fn main() -> ExitCode {
    logging::init("seo-registry");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            if let Err(io_err) = e.print() {
                error!("Failed to print usage: {io_err}");
            }
            return code;
        }
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Init {
            registry,
            domain,
            language,
        } => {
            Registry::create(&domain, &language).save(&registry)?;
            println!("Created registry at {}", registry.display());
        }
        Command::Add {
            registry,
            id,
            title,
            slug,
            page_type,
            priority,
            primary_keyword,
            secondary_keywords,
            longtail_keywords,
            meta_title,
            meta_description,
            schema_type,
            content_type,
            hub,
        } => {
            let page = registry::Page::new(NewPage {
                page_type,
                priority,
                primary_keyword,
                secondary_keywords,
                longtail_keywords,
                meta_title,
                meta_description,
                schema_type,
                content_type,
                hub,
                ..NewPage::new(&id, &title, &slug)
            });
            let updated = registry::add_page(&registry, page)?;
            info!("Added page {id} ({} total)", updated.pages.len());
            println!("Added page '{id}' to {}", registry.display());
        }
        Command::Audit {
            registry,
            id,
            score,
            issues,
        } => {
            registry::update_audit(&registry, &id, score, issues)?;
            println!("Updated audit for '{id}' (score {score})");
        }
        Command::List { registry } => registry::list_pages(&registry)?,
        Command::Sitemap { registry } => {
            let entries = registry::sitemap_entries(&registry)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
