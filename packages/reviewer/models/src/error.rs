use serde::{Deserialize, Serialize};

/// Stable error codes reported to API consumers.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TeamExists,
    PrExists,
    NotFound,
    PrMerged,
    NotAssigned,
    NoCandidate,
}

impl ErrorCode {
    /// HTTP status code an error with this code is reported with.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::TeamExists | Self::PrExists => 400,
            Self::NotFound => 404,
            Self::PrMerged | Self::NotAssigned | Self::NoCandidate => 409,
        }
    }
}
