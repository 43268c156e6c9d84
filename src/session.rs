//! Interactive terminal session.
//!
//! Reads one command per line and keeps accepting input while searches are
//! in flight. User input and query completions are multiplexed with
//! `tokio::select!`; completions go through the submitter, so only the most
//! recently issued search ever reaches the screen.
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `search <source> <topic...>` / `s` | Issue a search (`source` may be `all`) |
//! | `more` / `next` | Scroll down one page |
//! | `back` / `prev` | Scroll up one page |
//! | `top` | Scroll to the first article |
//! | `sources` | List source ids |
//! | `topics` | List suggested topics |
//! | `help` | Show this table |
//! | `quit` / `exit` | Leave immediately |
//!
//! At end of input the session waits for searches still in flight, then exits.

use crate::api::NewsService;
use crate::catalog::Catalog;
use crate::models::Query;
use crate::submit::{Completion, Outcome, QuerySubmitter};
use crate::view::ResultsView;
use std::io::{self, Write};
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

pub const HELP: &str = "\
Commands:
  search <source> <topic...>   search a topic (source id or `all`); alias `s`
  more | next                  scroll down
  back | prev                  scroll up
  top                          scroll to the first article
  sources                      list source ids
  topics                       list suggested topics
  help                         show this help
  quit | exit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { source: String, topic: String },
    More,
    Back,
    Top,
    Sources,
    Topics,
    Help,
    Quit,
    Blank,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        match name.to_lowercase().as_str() {
            "" => Ok(Command::Blank),
            "search" | "s" => {
                if rest.is_empty() {
                    return Err("usage: search <source> <topic...>".to_string());
                }
                let (source, topic) = rest
                    .split_once(char::is_whitespace)
                    .map(|(source, topic)| (source, topic.trim()))
                    .unwrap_or((rest, ""));
                Ok(Command::Search {
                    source: source.to_string(),
                    topic: topic.to_string(),
                })
            }
            "more" | "next" => Ok(Command::More),
            "back" | "prev" => Ok(Command::Back),
            "top" => Ok(Command::Top),
            "sources" => Ok(Command::Sources),
            "topics" => Ok(Command::Topics),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

pub struct Session<'a, S, W, E> {
    submitter: QuerySubmitter<S>,
    catalog: &'a Catalog,
    view: ResultsView,
    out: W,
    alerts: E,
}

impl<'a, S, W, E> Session<'a, S, W, E>
where
    S: NewsService + Send + Sync + 'static,
    W: Write,
    E: Write,
{
    pub fn new(
        submitter: QuerySubmitter<S>,
        catalog: &'a Catalog,
        view: ResultsView,
        out: W,
        alerts: E,
    ) -> Self {
        Self {
            submitter,
            catalog,
            view,
            out,
            alerts,
        }
    }

    /// Drive the session until `quit` or end of input.
    ///
    /// Input is read as raw lines; bytes that are not valid UTF-8 are replaced
    /// rather than ending the session.
    #[instrument(level = "info", skip_all)]
    pub async fn run<R>(mut self, mut input: R) -> io::Result<ResultsView>
    where
        R: AsyncBufRead + Unpin,
    {
        let (tx, mut rx) = mpsc::channel::<Completion>(16);
        let mut buf = Vec::new();
        let mut input_open = true;
        let mut in_flight = 0usize;

        writeln!(self.out, "Type `help` for commands.")?;

        loop {
            tokio::select! {
                read = input.read_until(b'\n', &mut buf), if input_open => {
                    if read? == 0 {
                        debug!(in_flight, "End of input");
                        input_open = false;
                    } else {
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        if std::str::from_utf8(&buf).is_err() {
                            warn!(line = %line.trim_end(), "Input line is not valid UTF-8");
                        }
                        buf.clear();
                        match line.parse::<Command>() {
                            Ok(Command::Quit) => break,
                            Ok(command) => {
                                if self.handle(command, &tx)? {
                                    in_flight += 1;
                                }
                            }
                            Err(message) => {
                                writeln!(self.out, "{message}\n{HELP}")?;
                            }
                        }
                    }
                }
                Some(completion) = rx.recv(), if in_flight > 0 => {
                    in_flight -= 1;
                    self.complete(completion)?;
                }
                else => break,
            }

            if !input_open && in_flight == 0 {
                break;
            }
        }

        self.out.flush()?;
        Ok(self.view)
    }

    /// Returns true when a search was spawned.
    fn handle(&mut self, command: Command, tx: &mpsc::Sender<Completion>) -> io::Result<bool> {
        match command {
            Command::Search { source, topic } => {
                if let Err(e) = self.catalog.validate_selection(&source) {
                    writeln!(self.out, "{e}")?;
                    return Ok(false);
                }
                let query = Query::new(&topic, &source);
                let label = if query.is_all_sources() {
                    "all sources"
                } else {
                    self.catalog.display_name(&source).unwrap_or(&source)
                };
                writeln!(self.out, "Searching \"{topic}\" in {label}...")?;
                self.submitter.spawn(query, tx.clone());
                return Ok(true);
            }
            Command::More => {
                if self.view.scroll_down() {
                    writeln!(self.out, "{}", self.view.display())?;
                } else {
                    writeln!(self.out, "(end of results)")?;
                }
            }
            Command::Back => {
                if self.view.scroll_up() {
                    writeln!(self.out, "{}", self.view.display())?;
                } else {
                    writeln!(self.out, "(already at the top)")?;
                }
            }
            Command::Top => {
                self.view.scroll_to_top();
                writeln!(self.out, "{}", self.view.display())?;
            }
            Command::Sources => writeln!(self.out, "{}", self.catalog.listing())?,
            Command::Topics => writeln!(self.out, "{}", self.catalog.topic_listing())?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit | Command::Blank => {}
        }
        Ok(false)
    }

    fn complete(&mut self, completion: Completion) -> io::Result<()> {
        match self.submitter.apply(completion, &mut self.view) {
            Outcome::Rendered { .. } => writeln!(self.out, "{}", self.view.display())?,
            Outcome::Alert(message) => {
                writeln!(self.alerts, "ALERT: {message}")?;
                self.alerts.flush()?;
            }
            Outcome::Stale => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NewsError, NewsResult};
    use crate::models::Article;
    use crate::view::Viewport;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_parse_search() {
        assert_eq!(
            "search the-hindu  space race ".parse::<Command>(),
            Ok(Command::Search {
                source: "the-hindu".to_string(),
                topic: "space race".to_string()
            })
        );
        assert_eq!(
            "s all".parse::<Command>(),
            Ok(Command::Search {
                source: "all".to_string(),
                topic: String::new()
            })
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("MORE".parse::<Command>(), Ok(Command::More));
        assert_eq!("prev".parse::<Command>(), Ok(Command::Back));
        assert_eq!("  ".parse::<Command>(), Ok(Command::Blank));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!("search".parse::<Command>().is_err());
        assert_eq!(
            "frobnicate now".parse::<Command>(),
            Err("unknown command: frobnicate".to_string())
        );
    }

    /// Returns one article titled after the topic, or fails for topic "boom".
    #[derive(Default)]
    struct EchoService {
        seen: Mutex<Vec<Query>>,
    }

    impl NewsService for EchoService {
        async fn fetch_news(&self, query: &Query) -> NewsResult<Vec<Article>> {
            self.seen.lock().unwrap().push(query.clone());
            if query.topic == "boom" {
                return Err(NewsError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
            }
            Ok(vec![Article {
                title: Some(format!("about {}", query.topic)),
                link: Some("https://x/1".to_string()),
                ..Article::default()
            }])
        }
    }

    async fn run_session(
        script: &[u8],
        service: Arc<EchoService>,
    ) -> (String, String, ResultsView) {
        let catalog = Catalog::builtin();
        let mut out = Vec::new();
        let mut alerts = Vec::new();
        let view = {
            let session = Session::new(
                QuerySubmitter::new(service),
                &catalog,
                ResultsView::new(Viewport::new(5)),
                &mut out,
                &mut alerts,
            );
            session.run(script).await.unwrap()
        };
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(alerts).unwrap(),
            view,
        )
    }

    #[tokio::test]
    async fn test_search_renders_and_waits_at_end_of_input() {
        let service = Arc::new(EchoService::default());
        let (out, alerts, view) =
            run_session(b"search the-hindu elections\n", Arc::clone(&service)).await;

        assert!(out.contains("Searching \"elections\" in The Hindu..."));
        assert!(out.contains("about elections"));
        assert!(alerts.is_empty());
        assert_eq!(view.page().unwrap().len(), 1);
        assert_eq!(
            service.seen.lock().unwrap()[0],
            Query::new("elections", "the-hindu")
        );
    }

    #[tokio::test]
    async fn test_unknown_source_is_rejected_without_request() {
        let service = Arc::new(EchoService::default());
        let (out, _, view) = run_session(b"search the-onion cats\n", Arc::clone(&service)).await;

        assert!(out.contains("unknown source: the-onion"));
        assert!(service.seen.lock().unwrap().is_empty());
        assert!(view.page().is_none());
    }

    #[tokio::test]
    async fn test_failure_alerts_on_stderr_only() {
        let (out, alerts, view) =
            run_session(b"search all boom\n", Arc::new(EchoService::default())).await;
        assert_eq!(alerts, "ALERT: Failed to fetch news. Please try again.\n");
        assert!(!out.contains("No articles found."));
        assert!(view.page().is_none());
    }

    #[tokio::test]
    async fn test_scrolling_commands_before_any_search() {
        let (out, _, _) = run_session(b"more\nback\n", Arc::new(EchoService::default())).await;
        assert!(out.contains("(end of results)"));
        assert!(out.contains("(already at the top)"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let service = Arc::new(EchoService::default());
        let (out, _, _) = run_session(b"quit\nsearch all never\n", Arc::clone(&service)).await;
        assert!(!out.contains("Searching"));
        assert!(service.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_commands() {
        let (out, _, _) =
            run_session(b"sources\ntopics\nbogus\n", Arc::new(EchoService::default())).await;
        assert!(out.contains("International Sources:"));
        assert!(out.contains("  Technology"));
        assert!(out.contains("unknown command: bogus"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_session() {
        let service = Arc::new(EchoService::default());
        let (out, _, view) =
            run_session(b"search all caf\xe9\nsearch all later\n", Arc::clone(&service)).await;

        assert!(out.contains("Searching \"later\" in all sources..."));
        assert_eq!(view.page().unwrap().blocks()[0].title, "about later");
        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].topic, "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn test_final_line_without_newline_is_read() {
        let (out, _, view) =
            run_session(b"search all tail", Arc::new(EchoService::default())).await;
        assert!(out.contains("about tail"));
        assert_eq!(view.page().unwrap().len(), 1);
    }
}
