use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use pr_reviewer::{ErrorKind, ServiceError};
use pr_reviewer_models::{ErrorCode, api::ErrorResponse};

/// Error returned by every handler, rendered as `{"error": {"code", "message"}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request body or query string could not be understood.
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Service(e) => e.code(),
            Self::InvalidRequest(_) => ErrorCode::NotFound,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if let Self::Service(e) = self
            && matches!(e.kind(), ErrorKind::Cancelled | ErrorKind::Internal)
        {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }

        StatusCode::from_u16(self.code().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {self}");
        } else {
            log::debug!("Request rejected with {status}: {self}");
        }

        HttpResponse::build(status).json(ErrorResponse::new(self.code(), self.to_string()))
    }
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Invalid request body: {err}");
        ApiError::InvalidRequest("invalid request body".to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Invalid query string: {err}");
        ApiError::InvalidRequest("invalid query string".to_string()).into()
    })
}

/// Returns the value of a required query parameter.
///
/// # Errors
///
/// * If the parameter is missing or blank
pub fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidRequest(format!("{name} is required")))
}

#[cfg(test)]
mod tests {
    use pr_reviewer_store::RepositoryError;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::TeamExists("t".to_string()), 400),
            (ServiceError::PrExists("p".to_string()), 400),
            (ServiceError::NotFound("PR not found".to_string()), 404),
            (ServiceError::PrMerged("p".to_string()), 409),
            (
                ServiceError::NotAssigned {
                    pr_id: "p".to_string(),
                    reviewer_id: "u".to_string(),
                },
                409,
            ),
            (ServiceError::NoCandidate("t".to_string()), 409),
            (ServiceError::Cancelled("request deadline exceeded"), 500),
            (
                ServiceError::Repository(RepositoryError::AlreadyExists {
                    entity: "user",
                    key: "u1".to_string(),
                }),
                500,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code().as_u16(), status);
        }
    }

    #[test]
    fn test_invalid_request_reports_not_found() {
        let error = ApiError::InvalidRequest("team_name is required".to_string());

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_required_param() {
        assert_eq!(
            required_param(Some("backend".to_string()), "team_name").unwrap(),
            "backend"
        );
        assert!(required_param(None, "team_name").is_err());
        assert!(required_param(Some("  ".to_string()), "team_name").is_err());
    }
}
