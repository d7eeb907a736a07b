use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::{net::AddrParseError, num::ParseIntError};

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("{} is a required field", field))]
    MissingRequiredField { field: &'static str },
    #[snafu(display("Invalid email address format"))]
    InvalidEmail { source: email_address::Error },
    #[snafu(display(
        "Grade must be between {} and {}, got {}",
        crate::data::student::MIN_GRADE,
        crate::data::student::MAX_GRADE,
        grade
    ))]
    InvalidGrade { grade: i32 },
    #[snafu(display("Student number {:?} already exists", student_number))]
    DuplicateStudentNumber { student_number: String },
    #[snafu(display("Unable to find student with number {:?}", student_number))]
    StudentNotFound { student_number: String },
    #[snafu(display("Call was cancelled"))]
    Cancelled,
    #[snafu(display("Call deadline exceeded"))]
    DeadlineExceeded,
    //only raised by substituted persistent backends
    #[allow(dead_code)]
    #[snafu(display("Storage backend failure: {}", message))]
    Backend { message: String },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse server address {:?}", original))]
    ParseServerAddress {
        source: AddrParseError,
        original: String,
    },
    #[snafu(display("Unable to parse `{}` as an integer", name))]
    ParseEnvInteger {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: std::net::SocketAddr,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
}

/// Flat tag for [`RosterError`], carried on the wire as `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidEmail,
    InvalidGrade,
    DuplicateKey,
    NotFound,
    Cancelled,
    DeadlineExceeded,
    Internal,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidGrade => "INVALID_GRADE",
            Self::DuplicateKey => "STUDENT_NUMBER_ALREADY_EXISTS",
            Self::NotFound => "STUDENT_NOT_FOUND",
            Self::Cancelled => "CANCELLED",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingRequiredField | Self::InvalidEmail | Self::InvalidGrade => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateKey => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Cancelled | Self::DeadlineExceeded => StatusCode::REQUEST_TIMEOUT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl RosterError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::InvalidEmail { .. } => ErrorKind::InvalidEmail,
            Self::InvalidGrade { .. } => ErrorKind::InvalidGrade,
            Self::DuplicateStudentNumber { .. } => ErrorKind::DuplicateKey,
            Self::StudentNotFound { .. } => ErrorKind::NotFound,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            Self::Backend { .. }
            | Self::BadEnvVar { .. }
            | Self::ParseServerAddress { .. }
            | Self::ParseEnvInteger { .. }
            | Self::BindListener { .. }
            | Self::Serve { .. } => ErrorKind::Internal,
        }
    }

    /// The request field the error is about, if any.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredField { field } => Some(*field),
            Self::InvalidEmail { .. } => Some("email"),
            Self::InvalidGrade { .. } => Some("grade"),
            Self::DuplicateStudentNumber { .. } => Some("student_number"),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ErrorBody {
    pub fn invalid_request() -> Self {
        Self {
            error: "invalid request format".to_string(),
            code: "INVALID_REQUEST",
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        let error = if kind == ErrorKind::Internal {
            error!(?self, "Error!");
            //don't leak backend details to callers
            "internal server error".to_string()
        } else {
            debug!(code = kind.as_str(), field = ?self.field(), "Rejected call: {self}");
            self.to_string()
        };

        (
            kind.status(),
            Json(ErrorBody {
                error,
                code: kind.as_str(),
            }),
        )
            .into_response()
    }
}
