use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    LoginError(String),
    ApiError(http::StatusCode, String),
    RequestError(String),
    InvalidResponse(String, String),
    UnexpectedApiResponse,
    InternalError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LoginError(body) => write!(f, "login rejected: {}", body),
            Error::ApiError(status, body) => write!(f, "server responded {}: {}", status, body),
            Error::RequestError(e) => write!(f, "request failed: {}", e),
            Error::InvalidResponse(body, e) => write!(f, "invalid response ({}): {}", e, body),
            Error::UnexpectedApiResponse => write!(f, "unexpected API response"),
            Error::InternalError => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for Error {}
