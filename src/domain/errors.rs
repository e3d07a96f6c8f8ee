use reqwest::StatusCode;
use std::fmt;

// Carrying reqwest errors in the domain is a dependency leak, but it keeps
// transport failures intact for callers.
#[derive(Debug)]
pub enum AirtableError {
    InvalidBaseUrl(String),
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        // Airtable error type, e.g. `INVALID_PERMISSIONS_OR_MODEL_NOT_FOUND`.
        kind: Option<String>,
        message: Option<String>,
    },
    Decode(reqwest::Error),
}

impl AirtableError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AirtableError::Upstream { status, .. } => Some(*status),
            AirtableError::Transport(err) | AirtableError::Decode(err) => err.status(),
            AirtableError::InvalidBaseUrl(_) => None,
        }
    }
}

impl fmt::Display for AirtableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirtableError::InvalidBaseUrl(url) => write!(f, "invalid airtable base url: {url}"),
            AirtableError::Transport(err) => write!(f, "airtable transport error: {err}"),
            AirtableError::Upstream {
                status,
                kind,
                message,
            } => {
                write!(f, "airtable upstream error {status}")?;
                if let Some(kind) = kind {
                    write!(f, " {kind}")?;
                }
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            AirtableError::Decode(err) => write!(f, "airtable response decode error: {err}"),
        }
    }
}

impl std::error::Error for AirtableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AirtableError::Transport(err) | AirtableError::Decode(err) => Some(err),
            _ => None,
        }
    }
}
