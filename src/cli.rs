//! Command-line interface definitions for News Picker.
//!
//! All options can be provided via command-line flags, and the service URL
//! and catalog path also via environment variables.

use crate::catalog::ALL_SOURCES;
use crate::outputs::OutputFormat;
use clap::Parser;

/// Command-line arguments for the News Picker application.
///
/// With `--topic`, a single query is sent and the results are printed.
/// Without it, an interactive session starts on stdin.
///
/// # Examples
///
/// ```sh
/// # One-shot search against a local service
/// news_picker --topic elections --source the-hindu
///
/// # Markdown output from all sources
/// news_picker --topic "climate policy" --format markdown
///
/// # Interactive session against a remote service
/// NEWS_SERVICE_URL=https://news.example.org news_picker
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the News Service (requests go to `<url>/fetch-news`)
    #[arg(short, long, env = "NEWS_SERVICE_URL", default_value = "http://127.0.0.1:5000")]
    pub endpoint: String,

    /// Topic to search once, then exit
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Source id to search, or `all` for every source
    #[arg(short, long, default_value = ALL_SOURCES)]
    pub source: String,

    /// Optional path to a YAML catalog replacing the built-in sources and topics
    #[arg(short, long, env = "NEWS_CATALOG")]
    pub catalog: Option<String>,

    /// Output format for one-shot searches
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Articles shown per page in the interactive session
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: u16,

    /// Print the available source ids and exit
    #[arg(long)]
    pub list_sources: bool,

    /// Print the suggested topics and exit
    #[arg(long)]
    pub list_topics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_picker"]);
        assert_eq!(cli.source, "all");
        assert_eq!(cli.topic, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.page_size, 5);
        assert!(!cli.list_sources);
    }

    #[test]
    fn test_cli_one_shot_flags() {
        let cli = Cli::parse_from([
            "news_picker",
            "--endpoint",
            "http://news.local:8080",
            "--topic",
            "elections",
            "--source",
            "the-hindu",
            "--format",
            "markdown",
        ]);

        assert_eq!(cli.endpoint, "http://news.local:8080");
        assert_eq!(cli.topic.as_deref(), Some("elections"));
        assert_eq!(cli.source, "the-hindu");
        assert_eq!(cli.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["news_picker", "-t", "health", "-s", "bbc-news", "-p", "3"]);

        assert_eq!(cli.topic.as_deref(), Some("health"));
        assert_eq!(cli.source, "bbc-news");
        assert_eq!(cli.page_size, 3);
    }

    #[test]
    fn test_cli_rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["news_picker", "--page-size", "0"]).is_err());
    }
}
