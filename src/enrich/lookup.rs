//! ASN name lookups against the HackerTarget-style text API

use crate::domain::{Asn, Resolution};
use crate::error::LookupError;
use std::time::Duration;

pub const DEFAULT_LOOKUP_URL: &str = "https://api.hackertarget.com/aslookup/?q=AS{asn}";

/// Resolves an ASN to a display name. Implementations never fail outright;
/// problems are reported through [`Resolution::Failed`].
pub trait AsnResolver {
    fn resolve(&self, asn: Asn) -> Resolution;
}

/// Blocking HTTP resolver. `url_template` must contain an `{asn}` placeholder.
pub struct HttpResolver {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl HttpResolver {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self { client, url_template: url_template.into() })
    }

    pub fn url_for(&self, asn: Asn) -> String {
        self.url_template.replace("{asn}", &asn.to_string())
    }

    fn fetch(&self, asn: Asn) -> Result<String, LookupError> {
        let url = self.url_for(asn);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| LookupError::Transport { asn, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status { asn, status: status.as_u16() });
        }
        let body = response.bytes().map_err(|source| LookupError::Transport { asn, source })?;
        String::from_utf8(body.to_vec()).map_err(|source| LookupError::Decode { asn, source })
    }
}

impl AsnResolver for HttpResolver {
    fn resolve(&self, asn: Asn) -> Resolution {
        match self.fetch(asn) {
            Ok(body) => match parse_entity(&body) {
                Some(name) => Resolution::Named(name),
                None => Resolution::Unnamed,
            },
            Err(err) => {
                tracing::warn!("{err}");
                Resolution::Failed(err)
            }
        }
    }
}

/// Extract the entity name from a lookup response body.
///
/// Only the first line is considered, split on commas: with four or more
/// fields the name is field 3, with two or three it is everything after
/// field 0 rejoined. Bodies that are empty or start with `error` yield `None`.
pub fn parse_entity(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() || body.starts_with("error") {
        return None;
    }

    let first_line = body.split('\n').next().unwrap_or("");
    let parts: Vec<&str> = first_line.split(',').collect();
    let raw = if parts.len() >= 4 {
        parts[3].to_string()
    } else if parts.len() >= 2 {
        parts[1..].join(",")
    } else {
        return None;
    };

    Some(raw.trim().trim_matches('"').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `body` and return the URL template.
    fn serve_once(body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        });
        format!("http://{addr}/aslookup/?q=AS{{asn}}")
    }

    #[test]
    fn two_field_response_keeps_commas_in_name() {
        assert_eq!(
            parse_entity("\"13335\",\"CLOUDFLARENET, US\"\n").as_deref(),
            Some("CLOUDFLARENET, US")
        );
    }

    #[test]
    fn four_field_response_uses_fourth_field() {
        let body = "\"1.1.1.1\",\"13335\",\"1.1.1.0/24\",\"CLOUDFLARENET\"";
        assert_eq!(parse_entity(body).as_deref(), Some("CLOUDFLARENET"));
    }

    #[test]
    fn only_first_line_is_used() {
        let body = "\"64512\",\"Example Org\"\n\"64513\",\"Other Org\"";
        assert_eq!(parse_entity(body).as_deref(), Some("Example Org"));
    }

    #[test]
    fn single_field_has_no_name() {
        assert_eq!(parse_entity("\"64512\""), None);
    }

    #[test]
    fn empty_and_error_bodies_have_no_name() {
        assert_eq!(parse_entity(""), None);
        assert_eq!(parse_entity("   \n"), None);
        assert_eq!(parse_entity("error invalid input"), None);
    }

    #[test]
    fn quotes_are_trimmed_after_whitespace() {
        assert_eq!(parse_entity("1, \"Spaced Org\" ").as_deref(), Some("Spaced Org"));
    }

    #[test]
    fn url_template_substitutes_asn() {
        let resolver =
            HttpResolver::new("http://127.0.0.1:9/q=AS{asn}", Duration::from_secs(1)).unwrap();
        assert_eq!(resolver.url_for(Asn(64512)), "http://127.0.0.1:9/q=AS64512");
    }

    #[test]
    fn unreachable_service_resolves_to_failure() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let resolver = HttpResolver::new(
            format!("http://127.0.0.1:{port}/aslookup/?q=AS{{asn}}"),
            Duration::from_secs(2),
        )
        .unwrap();

        let resolution = resolver.resolve(Asn(64512));
        assert!(resolution.is_failed());
        assert_eq!(resolution.entity(Asn(64512)), "ASN 64512 - Lookup Failed");
    }

    #[test]
    fn successful_response_is_named() {
        let resolver =
            HttpResolver::new(serve_once(b"\"64512\",\"Example Org\""), Duration::from_secs(5))
                .unwrap();
        match resolver.resolve(Asn(64512)) {
            Resolution::Named(name) => assert_eq!(name, "Example Org"),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_body_is_a_failed_lookup() {
        let resolver =
            HttpResolver::new(serve_once(b"\"1\",\"Bad \xff\xfe\""), Duration::from_secs(5))
                .unwrap();

        let resolution = resolver.resolve(Asn(1));
        assert!(matches!(resolution, Resolution::Failed(LookupError::Decode { .. })));
        assert_eq!(resolution.entity(Asn(1)), "ASN 1 - Lookup Failed");
    }
}
