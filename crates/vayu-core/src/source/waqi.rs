use crate::config::SourceConfig;
use crate::error::VayuError;
use crate::source::{FeedSource, StationQuery};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Feed backend for the World Air Quality Index API.
///
/// Requests `GET {base_url}/feed/{query}/?token={token}`.
pub struct WaqiClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl WaqiClient {
    pub fn new(config: &SourceConfig) -> Result<Self, VayuError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| VayuError::Config(format!("invalid base URL '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(VayuError::Config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VayuError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Full request URL for a query, including the token.
    pub fn feed_url(&self, query: &StationQuery) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("feed")
                .push(&query.path_segment())
                .push("");
        }
        url.query_pairs_mut().append_pair("token", &self.token);
        url
    }

    /// URL safe to show in logs and errors.
    ///
    /// The token is replaced as a query pair, so its form encoding does not
    /// matter.
    fn redacted(&self, url: &Url) -> String {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "token" { "****".into() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        let mut shown = url.clone();
        shown.query_pairs_mut().clear().extend_pairs(pairs);
        shown.to_string()
    }
}

impl FeedSource for WaqiClient {
    fn fetch_feed(&self, query: &StationQuery) -> Result<String, VayuError> {
        let url = self.feed_url(query);
        tracing::debug!(url = %self.redacted(&url), "requesting feed");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| VayuError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VayuError::Http {
                status: status.as_u16(),
                url: self.redacted(&url),
            });
        }

        response
            .text()
            .map_err(|e| VayuError::Request(e.without_url().to_string()))
    }

    fn backend_name(&self) -> &str {
        "waqi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one connection with a fixed status line and empty body.
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response =
                format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).unwrap();
        });
        (base_url, handle)
    }

    fn client(base_url: &str) -> WaqiClient {
        let config = SourceConfig {
            base_url: base_url.into(),
            token: "secret123".into(),
            ..SourceConfig::default()
        };
        WaqiClient::new(&config).unwrap()
    }

    #[test]
    fn test_feed_url_for_city() {
        let c = client("https://api.waqi.info");
        let url = c.feed_url(&StationQuery::City("New Delhi".into()));
        assert_eq!(
            url.as_str(),
            "https://api.waqi.info/feed/New%20Delhi/?token=secret123"
        );
    }

    #[test]
    fn test_feed_url_for_station_and_geo() {
        let c = client("https://api.waqi.info/");
        assert_eq!(
            c.feed_url(&StationQuery::Station("1437".into())).path(),
            "/feed/@1437/"
        );
        assert_eq!(
            c.feed_url(&StationQuery::Geo { lat: 28.5, lon: 77.25 }).path(),
            "/feed/geo:28.5;77.25/"
        );
    }

    #[test]
    fn test_redacted_hides_token() {
        let c = client("https://api.waqi.info");
        let url = c.feed_url(&StationQuery::Here);
        let shown = c.redacted(&url);
        assert!(!shown.contains("secret123"));
        assert!(shown.ends_with("token=****"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = SourceConfig {
            base_url: "not a url".into(),
            token: "t".into(),
            ..SourceConfig::default()
        };
        assert!(matches!(WaqiClient::new(&config), Err(VayuError::Config(_))));
    }

    #[test]
    fn test_redacted_hides_token_needing_encoding() {
        let config = SourceConfig {
            token: "ab cd+ef/gh".into(),
            ..SourceConfig::default()
        };
        let c = WaqiClient::new(&config).unwrap();
        let url = c.feed_url(&StationQuery::Here);
        assert!(url.as_str().ends_with("token=ab+cd%2Bef%2Fgh"));

        let shown = c.redacted(&url);
        assert_eq!(shown, "https://api.waqi.info/feed/here/?token=****");
    }

    #[test]
    fn test_empty_token_rejected() {
        let config = SourceConfig {
            token: String::new(),
            ..SourceConfig::default()
        };
        assert!(matches!(WaqiClient::new(&config), Err(VayuError::Config(_))));
    }

    #[test]
    fn test_http_error_status_masks_token() {
        let (base_url, server) = serve_once("HTTP/1.1 404 Not Found");
        let c = client(&base_url);

        let err = c.fetch_feed(&StationQuery::City("Delhi".into())).unwrap_err();
        server.join().unwrap();

        match err {
            VayuError::Http { status, url } => {
                assert_eq!(status, 404);
                assert!(url.contains("/feed/Delhi/"));
                assert!(!url.contains("secret123"), "token leaked: {url}");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_closed_port_is_request_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let c = client(&format!("http://127.0.0.1:{port}"));

        let err = c.fetch_feed(&StationQuery::Here).unwrap_err();
        assert!(matches!(err, VayuError::Request(_)), "got {err:?}");
        assert!(!err.to_string().contains("secret123"));
    }
}
