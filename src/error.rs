use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontdeskError {
    /// The server could not be reached at all (connectivity, DNS, TLS).
    #[error("network error: unable to connect to server ({0})")]
    Network(String),

    /// The server was reached and answered with a non-success status.
    /// The message is the server's `error` field when it sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A success response whose body was not the JSON we were promised.
    #[error("decode error: {0}")]
    Decode(String),

    /// A client-side precondition failed before any request was made.
    #[error("{0}")]
    Authorization(String),

    #[error("ticket #{0} not found")]
    TicketNotFound(i64),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FrontdeskError {
    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FrontdeskError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}

impl From<url::ParseError> for FrontdeskError {
    fn from(err: url::ParseError) -> Self {
        FrontdeskError::Config(format!("invalid URL: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, FrontdeskError>;
