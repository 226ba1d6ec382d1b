use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{Domain, ResponseSet};
use super::export::write_history_csv;
use super::service::{AnalysisError, AssessmentService};
use crate::history::{AppendOutcome, StoreError};

/// Router exposing questionnaires, scoring, submissions and history for every domain.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/assessments", get(list_handler))
        .route("/api/v1/assessments/:domain", get(questionnaire_handler))
        .route("/api/v1/assessments/:domain/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/assessments/:domain/submissions",
            post(submit_handler),
        )
        .route("/api/v1/assessments/:domain/history", get(history_handler))
        .route(
            "/api/v1/assessments/:domain/history/export",
            get(export_handler),
        )
        .route(
            "/api/v1/assessments/:domain/history/:index/analysis",
            get(analysis_handler),
        )
        .route("/api/v1/assessments/:domain/summary", get(summary_handler))
        .with_state(service)
}

fn unknown_domain(slug: &str) -> Response {
    let payload = json!({
        "error": format!("unknown assessment domain '{slug}'"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        StoreError::VersionConflict { .. } => StatusCode::CONFLICT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) async fn list_handler(State(service): State<Arc<AssessmentService>>) -> Response {
    let domains: Vec<_> = Domain::ordered()
        .into_iter()
        .map(|domain| {
            let questionnaire = service.questionnaire(domain);
            json!({
                "domain": domain,
                "label": domain.label(),
                "title": questionnaire.title(),
                "questions": questionnaire.questions().len(),
                "max_score": questionnaire.max_score(),
            })
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "assessments": domains }))).into_response()
}

pub(crate) async fn questionnaire_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    let questionnaire = service.questionnaire(domain);
    let payload = json!({
        "questionnaire": questionnaire,
        "max_score": questionnaire.max_score(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
    axum::Json(responses): axum::Json<ResponseSet>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    match service.evaluate(domain, &responses) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
    axum::Json(responses): axum::Json<ResponseSet>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    let receipt = match service.submit(domain, responses).await {
        Ok(receipt) => receipt,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    let status = match &receipt.persistence {
        AppendOutcome::Applied { .. } => StatusCode::CREATED,
        AppendOutcome::VersionConflict { .. } => StatusCode::CONFLICT,
        AppendOutcome::Failed(error) => store_status(error),
    };
    let version = match &receipt.persistence {
        AppendOutcome::Applied { version, .. } => Some(version.clone()),
        _ => None,
    };

    let payload = json!({
        "domain": domain,
        "score": receipt.outcome.total_score,
        "max_score": receipt.outcome.max_score,
        "classification": receipt.outcome.classification,
        "components": receipt.outcome.components,
        "persisted": receipt.persistence.is_applied(),
        "version": version,
        "status": receipt.persistence.status_message(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn history_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    let load = service.history(domain).await;
    let payload = json!({
        "domain": domain,
        "records": load.records,
        "issue": load.issue.map(|issue| issue.to_string()),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn export_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    let snapshot = match service.store().fetch(domain).await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (store_status(&error), axum::Json(payload)).into_response();
        }
    };

    let mut buffer = Vec::new();
    let questionnaire = service.questionnaire(domain);
    if let Err(error) = write_history_csv(&mut buffer, questionnaire, &snapshot.records) {
        let payload = json!({ "error": error.to_string() });
        return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string())],
        buffer,
    )
        .into_response()
}

pub(crate) async fn analysis_handler(
    State(service): State<Arc<AssessmentService>>,
    Path((slug, index)): Path<(String, usize)>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    match service.analyze(domain, index).await {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => {
            let status = match &error {
                AnalysisError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
                AnalysisError::Store { source, .. } => store_status(source),
                AnalysisError::InvalidRecord { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(slug): Path<String>,
) -> Response {
    let Ok(domain) = slug.parse::<Domain>() else {
        return unknown_domain(&slug);
    };

    let (summary, issue) = service.summary(domain).await;
    let payload = json!({
        "summary": summary,
        "issue": issue.map(|issue| issue.to_string()),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
