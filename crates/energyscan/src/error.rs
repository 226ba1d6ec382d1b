use crate::assessments::{AnalysisError, QuestionnaireError, ResponseError, UnknownDomain};
use crate::config::ConfigError;
use crate::history::StoreError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Catalog(QuestionnaireError),
    Domain(UnknownDomain),
    Responses(ResponseError),
    Store(StoreError),
    Analysis(AnalysisError),
    Export(csv::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Catalog(err) => write!(f, "invalid questionnaire catalog: {}", err),
            AppError::Domain(err) => write!(f, "{}", err),
            AppError::Responses(err) => write!(f, "invalid responses: {}", err),
            AppError::Store(err) => write!(f, "history store error: {}", err),
            AppError::Analysis(err) => write!(f, "analysis error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Domain(err) => Some(err),
            AppError::Responses(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Analysis(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Domain(_) => StatusCode::NOT_FOUND,
            AppError::Responses(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(StoreError::MissingCredential) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::VersionConflict { .. }) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::Analysis(AnalysisError::IndexOutOfRange { .. }) => StatusCode::NOT_FOUND,
            AppError::Analysis(AnalysisError::InvalidRecord { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Analysis(AnalysisError::Store { .. }) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Catalog(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<QuestionnaireError> for AppError {
    fn from(value: QuestionnaireError) -> Self {
        Self::Catalog(value)
    }
}

impl From<UnknownDomain> for AppError {
    fn from(value: UnknownDomain) -> Self {
        Self::Domain(value)
    }
}

impl From<ResponseError> for AppError {
    fn from(value: ResponseError) -> Self {
        Self::Responses(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        Self::Analysis(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_gateway_statuses() {
        let cases = [
            (StoreError::MissingCredential, StatusCode::SERVICE_UNAVAILABLE),
            (
                StoreError::VersionConflict {
                    message: "stale".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                StoreError::Transport("reset".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn unknown_domain_is_not_found() {
        let error: AppError = "sleep".parse::<crate::assessments::Domain>().unwrap_err().into();
        assert_eq!(error.to_string(), "unknown assessment domain 'sleep'");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
