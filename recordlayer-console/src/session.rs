//! Request/response handling for the interactive console.
//!
//! Each input line is parsed into a [`Request`], handled against the store by a
//! [`Session`], and answered with a [`Response`]. The session ends on `quit` or when the
//! input runs out.

use eyre::{Context, Result};
use std::{
    collections::BTreeMap,
    fmt::Write as _,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use recordlayer::prelude::*;

use crate::{cli::OutputFormat, user::User};

/// Query used when a request names none.
pub const DEFAULT_QUERY: &str = "email";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Run the named bound query with a raw value
    Find { query: String, raw: String },
    /// Report the row count
    Count,
    /// End the session
    Quit,
}

impl Request {
    /// Parses `<query>,<value>`, a bare `<value>` (runs [`DEFAULT_QUERY`]), `count` or `quit`.
    ///
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        match line {
            "" => None,
            "quit" | "exit" => Some(Request::Quit),
            "count" => Some(Request::Count),
            _ => Some(match line.split_once(',') {
                Some((query, raw)) => Request::Find {
                    query: query.trim().to_string(),
                    raw: raw.trim().to_string(),
                },
                None => Request::Find {
                    query: DEFAULT_QUERY.to_string(),
                    raw: line.to_string(),
                },
            }),
        }
    }
}

/// The answer to a [`Request`]
#[derive(Debug)]
pub enum Response {
    Found {
        elapsed: Duration,
        rows: Vec<Arc<User>>,
    },
    Count(usize),
    Invalid(String),
    Shutdown,
}

impl Response {
    /// Renders the response for the console.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let mut out = String::new();

        match self {
            Response::Found { elapsed, rows } => {
                write!(out, "Search took: {}ms found {} ", elapsed.as_millis(), rows.len())?;
                match format {
                    OutputFormat::Debug => write!(out, "{rows:?}")?,
                    OutputFormat::Json => {
                        let rows = rows.iter().map(|row| &**row).collect::<Vec<&User>>();
                        out.push_str(&serde_json::to_string(&rows)?);
                    }
                }
            }
            Response::Count(count) => write!(out, "{count}")?,
            Response::Invalid(reason) => write!(out, "Invalid query: {reason}")?,
            Response::Shutdown => out.push_str("Bye"),
        }

        Ok(out)
    }
}

/// How a query's raw input is turned into an [`IndexValue`]
#[derive(Debug, Clone, Copy)]
enum ValueKind {
    Text,
    Int,
}

/// Bound queries over a user store
pub struct Session {
    store: RecordStore<User>,
    queries: BTreeMap<&'static str, (BoundQuery<User>, ValueKind)>,
}

impl Session {
    /// Builds the console's queries against `store`:
    ///
    /// - `email`: users whose email contains the value,
    /// - `num`: users whose number differs from the value.
    ///
    /// Either query returns the single indexed user when the value is an indexed key.
    pub fn new(store: RecordStore<User>) -> Self {
        let email = store.build_query(|user: &User| {
            matcher(move |value| user.email().contains(&value.to_string()))
        });
        let num = store.build_query(|user: &User| {
            matcher(move |value| value.as_int() != Some(i64::from(user.num())))
        });

        let mut queries = BTreeMap::new();
        queries.insert("email", (email, ValueKind::Text));
        queries.insert("num", (num, ValueKind::Int));

        Self { store, queries }
    }

    /// Names of the available queries.
    pub fn query_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.queries.keys().copied()
    }

    pub async fn handle(&self, request: Request) -> Response {
        debug!(?request, "handling request");

        match request {
            Request::Quit => Response::Shutdown,
            Request::Count => Response::Count(self.store.row_count().await),
            Request::Find { query, raw } => {
                let Some((bound, kind)) = self.queries.get(query.as_str()) else {
                    return Response::Invalid(format!("unknown query `{query}`"));
                };

                let value = match kind {
                    ValueKind::Text => IndexValue::Text(raw),
                    ValueKind::Int => match raw.parse::<i64>() {
                        Ok(num) => IndexValue::Int(num),
                        Err(_) => return Response::Invalid(format!("`{raw}` is not a number")),
                    },
                };

                let start = Instant::now();
                let rows = bound.find(value).await;

                Response::Found {
                    elapsed: start.elapsed(),
                    rows,
                }
            }
        }
    }

    /// Prompts on `out` and answers lines read from `input` until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, out: &mut W, format: OutputFormat) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: io::Write,
    {
        let mut lines = input.lines();

        loop {
            write!(out, "Enter query: ").context("Failed to write prompt")?;
            out.flush().context("Failed to flush output")?;

            let Some(line) = lines.next_line().await.context("Failed to read query")? else {
                break;
            };

            let Some(request) = Request::parse(&line) else {
                continue;
            };

            let response = self.handle(request).await;
            writeln!(out, "{}", response.render(format)?).context("Failed to write response")?;

            if matches!(response, Response::Shutdown) {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::user_store;

    async fn session() -> Session {
        let store = user_store(0);
        store.add_row(User::new("chris1", "Chris", "Chase", 1, "chris@example.au")).await;
        store.add_row(User::new("plee", "Pat", "Lee", 2, "pat@example.com")).await;
        store.add_row(User::new("jdoe", "Jo", "Doe", 3, "jo@example.com")).await;
        Session::new(store)
    }

    fn usernames(response: &Response) -> Vec<String> {
        match response {
            Response::Found { rows, .. } => {
                rows.iter().map(|row| row.username().to_string()).collect()
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_requests() {
        assert_eq!(Request::parse("   "), None);
        assert_eq!(Request::parse("quit"), Some(Request::Quit));
        assert_eq!(Request::parse(" count "), Some(Request::Count));
        assert_eq!(
            Request::parse("num, 35"),
            Some(Request::Find {
                query: "num".to_string(),
                raw: "35".to_string(),
            })
        );
        assert_eq!(
            Request::parse("example.com"),
            Some(Request::Find {
                query: DEFAULT_QUERY.to_string(),
                raw: "example.com".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_email_query_scans_and_hits_index() {
        let session = session().await;

        let response = session.handle(Request::parse("example.com").unwrap()).await;
        assert_eq!(usernames(&response), vec!["plee", "jdoe"]);

        let response = session.handle(Request::parse("email,chris@example.au").unwrap()).await;
        assert_eq!(usernames(&response), vec!["chris1"]);
    }

    #[tokio::test]
    async fn test_num_query_parses_integers() {
        let session = session().await;

        let response = session.handle(Request::parse("num,2").unwrap()).await;
        assert_eq!(usernames(&response), vec!["plee"]);

        let response = session.handle(Request::parse("num,35").unwrap()).await;
        assert_eq!(usernames(&response), vec!["chris1", "plee", "jdoe"]);

        let response = session.handle(Request::parse("num,two").unwrap()).await;
        assert!(matches!(response, Response::Invalid(_)));
    }

    #[tokio::test]
    async fn test_count_unknown_and_quit() {
        let session = session().await;

        assert!(matches!(session.handle(Request::Count).await, Response::Count(3)));
        assert!(matches!(
            session.handle(Request::parse("phone,555").unwrap()).await,
            Response::Invalid(_)
        ));
        assert!(matches!(session.handle(Request::Quit).await, Response::Shutdown));
        assert_eq!(session.query_names().collect::<Vec<_>>(), vec!["email", "num"]);
    }

    #[tokio::test]
    async fn test_render_formats() {
        let session = session().await;
        let response = session.handle(Request::parse("email,pat@example.com").unwrap()).await;

        let json = response.render(OutputFormat::Json).unwrap();
        assert!(json.starts_with("Search took: "));
        assert!(json.contains("found 1 "));
        assert!(json.contains("\"username\":\"plee\""));

        let debug = response.render(OutputFormat::Debug).unwrap();
        assert!(debug.contains("username: \"plee\""));

        assert_eq!(Response::Count(7).render(OutputFormat::Debug).unwrap(), "7");
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let session = session().await;
        let mut out = Vec::new();

        session
            .run(&b"count\n\nnum,2\nquit\ncount\n"[..], &mut out, OutputFormat::Debug)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Enter query: 3\n"));
        assert!(out.contains("found 1 "));
        assert!(out.ends_with("Enter query: Bye\n"));
        assert_eq!(out.matches("Enter query: ").count(), 4);
    }

    #[tokio::test]
    async fn test_run_stops_at_end_of_input() {
        let session = session().await;
        let mut out = Vec::new();

        session
            .run(&b"count\n"[..], &mut out, OutputFormat::Debug)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Enter query: 3\nEnter query: ");
    }
}
