//! Blocking client for the Lichess games export endpoint.
//!
//! One attempt per request; a non-200 answer is returned as an error.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, info};

use super::error::ApiError;
use super::params::ExportParams;
use crate::chess::{RawGameHeader, read_headers};

pub const DEFAULT_BASE_URL: &str = "https://lichess.org";

const PGN_MEDIA_TYPE: &str = "application/x-chess-pgn";

pub struct LichessClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl LichessClient {
    /// `timeout` bounds the whole request including the body download;
    /// `None` disables it.
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL, token, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn games_url(&self, username: &str) -> String {
        format!("{}/api/games/user/{}", self.base_url, username)
    }

    /// Downloads the header block of every matching game, newest first as
    /// Lichess sends them.
    pub fn fetch_game_headers(
        &self,
        username: &str,
        params: &ExportParams,
    ) -> Result<Vec<RawGameHeader>, ApiError> {
        let url = self.games_url(username);
        debug!(%url, query = ?params.query(), "requesting games export");

        let mut request = self
            .client
            .get(&url)
            .query(&params.query())
            .header(ACCEPT, PGN_MEDIA_TYPE)
            .header(
                USER_AGENT,
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            );
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send()?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let headers = read_headers(response, &url)?;
        info!(username, games = headers.len(), "downloaded game headers");
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    const TWO_GAMES: &str = "[Site \"https://lichess.org/g1\"]\n[White \"alice\"]\n\n*\n\n\
                             [Site \"https://lichess.org/g2\"]\n[Black \"alice\"]\n\n*\n";

    /// Answers a single HTTP request with `response` and returns the base URL.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
        });

        base_url
    }

    fn test_client(base_url: &str) -> LichessClient {
        LichessClient::with_base_url(base_url, None, Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_non_ok_status_is_error() {
        let base_url = serve_once(
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        );

        let err = test_client(&base_url)
            .fetch_game_headers("alice", &ExportParams::default())
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 429, .. }));
        assert!(err.to_string().contains("429/Too Many Requests"));
    }

    #[test]
    fn test_ok_body_is_read_in_order() {
        let base_url = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/x-chess-pgn\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            TWO_GAMES.len(),
            TWO_GAMES
        ));

        let headers = test_client(&base_url)
            .fetch_game_headers("alice", &ExportParams::default())
            .unwrap();

        let sites: Vec<_> = headers.iter().map(|h| h.site.as_deref()).collect();
        assert_eq!(
            sites,
            vec![Some("https://lichess.org/g1"), Some("https://lichess.org/g2")]
        );
        assert_eq!(headers[1].black.as_deref(), Some("alice"));
    }

    #[test]
    fn test_games_url() {
        let client =
            LichessClient::with_base_url("https://lichess.test/", None, None)
                .unwrap();
        assert_eq!(
            client.games_url("alice"),
            "https://lichess.test/api/games/user/alice"
        );
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let client =
            LichessClient::new(Some("  ".to_string()), None).unwrap();
        assert!(client.token.is_none());

        let client =
            LichessClient::new(Some("lip_abc".to_string()), None).unwrap();
        assert_eq!(client.token.as_deref(), Some("lip_abc"));
    }
}
