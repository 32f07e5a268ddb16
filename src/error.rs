//! Error classification shared by application services.
//!
//! Services return rich error enums; HTTP glue only needs to know which
//! class of failure occurred to choose a response status. Every service
//! error exposes a `class()` accessor returning one of these variants.

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A referenced task, user, or client does not exist.
    NotFound,
    /// The caller's role or ownership does not satisfy the policy.
    Forbidden,
    /// A required field is missing or a value is malformed.
    InvalidInput,
    /// The supplied deadline is before today.
    InvalidDeadline,
    /// The assignee does not reference an employee.
    InvalidAssignee,
    /// A lifecycle precondition on the task status is not met.
    InvalidTransition,
    /// Any other failure; details stay server-side.
    Unexpected,
}

impl ErrorClass {
    /// Returns the HTTP status code conventionally mapped to this class.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::InvalidInput
            | Self::InvalidDeadline
            | Self::InvalidAssignee
            | Self::InvalidTransition => 400,
            Self::Unexpected => 500,
        }
    }

    /// Returns a stable machine-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidInput => "invalid_input",
            Self::InvalidDeadline => "invalid_deadline",
            Self::InvalidAssignee => "invalid_assignee",
            Self::InvalidTransition => "invalid_transition",
            Self::Unexpected => "unexpected",
        }
    }
}
