//! Native HTTP client for the patient records feed.
//!
//! One authenticated GET per load: the call either returns the full record
//! list or fails the load. No retry, no partial results, no timeout; an
//! unresponsive feed stalls the load.

use base64::{engine::general_purpose::STANDARD, Engine};
use careboard_core::{Credentials, DashboardError, PatientRecord};
use careboard_records::parse_patients;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

/// Feed client holding a precomputed basic-auth header.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    url: String,
    auth_header: String,
}

impl ApiClient {
    /// Build a client for `url` with the supplied credential.
    pub fn new(url: &str, credentials: &Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
            auth_header: basic_auth_header(credentials),
        }
    }

    /// Fetch the full patient list.
    pub async fn fetch_patients(&self) -> Result<Vec<PatientRecord>, DashboardError> {
        debug!(url = %self.url, "fetching patient records");

        let response = self
            .http
            .get(&self.url)
            .header(AUTHORIZATION, self.auth_header.as_str())
            .send()
            .await
            .map_err(|err| DashboardError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Transport(format!(
                "API request failed: {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| DashboardError::Transport(err.to_string()))?;

        let records = parse_patients(&body)?;
        debug!(count = records.len(), "patient records received");
        Ok(records)
    }
}

fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_matches_rfc_example() {
        let credentials = Credentials {
            username: "Aladdin".to_string(),
            password: "open sesame".to_string(),
        };

        assert_eq!(
            basic_auth_header(&credentials),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn auth_header_is_fixed_per_client() {
        let credentials = Credentials {
            username: "user".to_string(),
            password: "pass".to_string(),
        };

        let client = ApiClient::new("https://feed.example/", &credentials);
        assert_eq!(client.auth_header, basic_auth_header(&credentials));
        assert_eq!(client.url, "https://feed.example/");
    }
}
