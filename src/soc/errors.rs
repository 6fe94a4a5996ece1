//! Error types for the Schedule of Classes client.

use std::fmt;

/// Which remote endpoint a request was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    MenuPage,
    Departments,
    Subjects,
    Results,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MenuPage => "menu page",
            Self::Departments => "departments",
            Self::Subjects => "subjects",
            Self::Results => "schedule results",
        })
    }
}

/// How a caller should react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote end misbehaved; trying again later may work.
    Retryable,
    /// The caller asked for something the site doesn't offer.
    Reconfigure,
    /// The site changed shape, or local state is unusable.
    Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum SocApiError {
    #[error("failed to fetch {endpoint}: HTTP {status}")]
    Transport { endpoint: Endpoint, status: u16 },
    #[error("request to {endpoint} failed")]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("could not find {0} in HTML")]
    StructuralParse(&'static str),
    #[error("{}", invalid_term_message(.term, .known.as_deref()))]
    InvalidTerm {
        term: String,
        known: Option<Vec<String>>,
    },
    #[error("initialization failed to load terms")]
    Initialization,
    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: Endpoint, message: String },
    #[error("failed to write schedule results")]
    Sink(#[source] std::io::Error),
}

impl SocApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Request { .. } => ErrorKind::Retryable,
            Self::InvalidTerm { .. } => ErrorKind::Reconfigure,
            Self::StructuralParse(_)
            | Self::Initialization
            | Self::Client(_)
            | Self::Decode { .. }
            | Self::Sink(_) => ErrorKind::Fatal,
        }
    }

    /// HTTP status carried by a transport failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn invalid_term_message(term: &str, known: Option<&[String]>) -> String {
    match known {
        Some(known) if !known.is_empty() => {
            format!("term '{term}' not found, available terms: {}", known.join(", "))
        }
        _ => format!("term '{term}' not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_term_message_lists_known_terms() {
        let err = SocApiError::InvalidTerm {
            term: "XX99".to_owned(),
            known: Some(vec!["FA25".to_owned(), "WI25".to_owned()]),
        };
        assert_eq!(
            err.to_string(),
            "term 'XX99' not found, available terms: FA25, WI25"
        );
    }

    #[test]
    fn test_invalid_term_message_without_known_terms() {
        let err = SocApiError::InvalidTerm {
            term: "XX99".to_owned(),
            known: None,
        };
        assert_eq!(err.to_string(), "term 'XX99' not found");
    }

    #[test]
    fn test_error_kinds() {
        let transport = SocApiError::Transport {
            endpoint: Endpoint::Subjects,
            status: 503,
        };
        assert_eq!(transport.kind(), ErrorKind::Retryable);
        assert_eq!(transport.status(), Some(503));
        assert_eq!(transport.to_string(), "failed to fetch subjects: HTTP 503");

        let structural = SocApiError::StructuralParse("term selector");
        assert_eq!(structural.kind(), ErrorKind::Fatal);
        assert_eq!(structural.status(), None);

        let term = SocApiError::InvalidTerm {
            term: "XX99".to_owned(),
            known: None,
        };
        assert_eq!(term.kind(), ErrorKind::Reconfigure);
        assert_eq!(SocApiError::Initialization.kind(), ErrorKind::Fatal);
    }
}
