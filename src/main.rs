//! # News Picker
//!
//! A terminal front end for a news service: pick a topic and a source, send
//! the selection to the service's `/fetch-news` endpoint, and read the
//! returned article summaries.
//!
//! ## Features
//!
//! - One-shot searches with text, Markdown, or JSON output
//! - An interactive session that stays responsive while searches are in flight
//! - Source enumeration and suggested topics from a built-in or YAML catalog
//! - Fallback text for missing article fields and tolerant date formatting
//! - Lead images assigned only once their article scrolls into view
//!
//! ## Usage
//!
//! ```sh
//! news_picker --topic elections --source the-hindu
//! news_picker --list-sources
//! news_picker            # interactive
//! ```
//!
//! ## Architecture
//!
//! 1. **Selection**: topic and source are validated against the catalog and mapped to a [`Query`]
//! 2. **Submission**: the query is tagged with a generation and posted to the service
//! 3. **Rendering**: the latest issued query's articles become display blocks
//! 4. **Display**: the owned results view prints the blocks in the viewport

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod catalog;
mod cli;
mod error;
mod lazy;
mod models;
mod outputs;
mod render;
mod session;
mod submit;
mod utils;
mod view;

use api::HttpNewsService;
use catalog::Catalog;
use cli::Cli;
use models::Query;
use session::Session;
use submit::{Outcome, QuerySubmitter};
use view::{ResultsView, Viewport};

#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    // --- Tracing init (stderr; stdout carries the results) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "news_picker failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path).await?,
        None => Catalog::builtin(),
    };

    if args.list_sources || args.list_topics {
        let mut stdout = std::io::stdout().lock();
        if args.list_sources {
            writeln!(stdout, "{}", catalog.listing())?;
        }
        if args.list_topics {
            writeln!(stdout, "{}", catalog.topic_listing())?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let service = Arc::new(HttpNewsService::new(&args.endpoint)?);
    info!(endpoint = %service.endpoint(), "Using news service");
    let mut submitter = QuerySubmitter::new(service);

    let Some(topic) = &args.topic else {
        let view = ResultsView::new(Viewport::new(usize::from(args.page_size)));
        let session = Session::new(submitter, &catalog, view, std::io::stdout(), std::io::stderr());
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session.run(stdin).await?;
        return Ok(ExitCode::SUCCESS);
    };

    catalog.validate_selection(&args.source)?;
    let mut view = ResultsView::new(Viewport::unbounded());
    match submitter.submit(Query::new(topic, &args.source), &mut view).await {
        Outcome::Rendered { count } => {
            debug!(count, "One-shot search rendered");
            if let Some(page) = view.page() {
                println!("{}", args.format.page(page)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Alert(message) => {
            eprintln!("ALERT: {message}");
            Ok(ExitCode::FAILURE)
        }
        Outcome::Stale => Ok(ExitCode::SUCCESS),
    }
}
