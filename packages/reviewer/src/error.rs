use pr_reviewer_models::ErrorCode;
use pr_reviewer_store::RepositoryError;

/// Broad classes of [`ServiceError`], independent of the wire code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    /// The pull request is in a terminal state.
    InvalidState,
    PreconditionFailed,
    NoCandidate,
    /// Team and user records disagree.
    Integrity,
    Cancelled,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("team_name already exists: {0}")]
    TeamExists(String),

    #[error("PR id already exists: {0}")]
    PrExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("cannot reassign on merged PR {0}")]
    PrMerged(String),

    #[error("reviewer {reviewer_id} is not assigned to PR {pr_id}")]
    NotAssigned { pr_id: String, reviewer_id: String },

    #[error("no active replacement candidate in team {0}")]
    NoCandidate(String),

    #[error("failed to update team member {user_id}: {source}")]
    Desync {
        user_id: String,
        #[source]
        source: RepositoryError,
    },

    #[error("{0}")]
    Cancelled(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TeamExists(_) | Self::PrExists(_) => ErrorKind::AlreadyExists,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PrMerged(_) => ErrorKind::InvalidState,
            Self::NotAssigned { .. } => ErrorKind::PreconditionFailed,
            Self::NoCandidate(_) => ErrorKind::NoCandidate,
            Self::Desync { .. } => ErrorKind::Integrity,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::Repository(_) => ErrorKind::Internal,
        }
    }

    /// Code reported to API consumers.
    ///
    /// The code set is closed, so errors without a code of their own report
    /// `NOT_FOUND`.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::TeamExists(_) => ErrorCode::TeamExists,
            Self::PrExists(_) => ErrorCode::PrExists,
            Self::PrMerged(_) => ErrorCode::PrMerged,
            Self::NotAssigned { .. } => ErrorCode::NotAssigned,
            Self::NoCandidate(_) => ErrorCode::NoCandidate,
            Self::NotFound(_) | Self::Desync { .. } | Self::Cancelled(_) | Self::Repository(_) => {
                ErrorCode::NotFound
            }
        }
    }
}
