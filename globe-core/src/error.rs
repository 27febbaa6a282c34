use reqwest::StatusCode;

/// Failure of a single upstream call or of a whole fallback chain.
///
/// Every variant is caught at the component boundary that produced it;
/// none of them is meant to reach the user as a crash.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport failure or a non-2xx status.
    #[error("{what} request failed{}: {message}", status_suffix(.status))]
    Network {
        what: String,
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Failed to parse {what} response: {message}")]
    Decode { what: String, message: String },

    /// Well-formed response that lacks the field we need.
    #[error("{0} response contained no usable data")]
    EmptyResult(String),

    #[error("All {attempts} sources failed; last error: {last}")]
    ResolutionExhausted { attempts: usize, last: String },

    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(String),
}

impl ProviderError {
    pub fn network(what: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            what: what.into(),
            status: source.status(),
            message: source.to_string(),
        }
    }

    pub fn status(what: impl Into<String>, status: StatusCode, body: &str) -> Self {
        Self::Network {
            what: what.into(),
            status: Some(status),
            message: truncate_body(body),
        }
    }

    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyResult(what.into())
    }
}

fn status_suffix(status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => format!(" with status {status}"),
        None => String::new(),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

/// Forward search failures.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("No results found for '{0}'")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let err = ProviderError::status("onecall-3.0", StatusCode::UNAUTHORIZED, "bad key");
        let msg = err.to_string();
        assert!(msg.contains("401"), "{msg}");
        assert!(msg.contains("onecall-3.0"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "ก".repeat(100);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }
}
