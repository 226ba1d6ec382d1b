use energyscan::assessments::{AssessmentService, Domain};
use energyscan::config::{StoreBackend, StoreConfig};
use energyscan::error::AppError;
use energyscan::history::{GitHubContentsBackend, HistoryStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the configured history store. A missing access token is reported here, once;
/// each remote operation then fails with a credential error.
pub(crate) fn build_history_store(config: &StoreConfig) -> Result<HistoryStore, AppError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory history store; submissions are not persisted");
            Ok(HistoryStore::in_memory())
        }
        StoreBackend::GitHub => {
            let backend = GitHubContentsBackend::from_config(config)?;
            if !backend.has_token() {
                tracing::warn!(
                    "GITHUB_PAT is not set; loading and saving history will fail until it is"
                );
            }
            tracing::info!(
                location = %backend.describe_root(),
                "using github history store"
            );
            Ok(HistoryStore::new(Arc::new(backend)))
        }
    }
}

pub(crate) fn build_service(config: &StoreConfig) -> Result<AssessmentService, AppError> {
    let store = build_history_store(config)?;
    Ok(AssessmentService::standard(store)?)
}

pub(crate) fn parse_domain(raw: &str) -> Result<Domain, String> {
    raw.parse::<Domain>().map_err(|err| {
        let known: Vec<&str> = Domain::ordered().iter().map(|domain| domain.slug()).collect();
        format!("{err} (expected one of: {})", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use energyscan::config::RepositorySlug;

    fn store_config(backend: StoreBackend, repository: Option<RepositorySlug>) -> StoreConfig {
        StoreConfig {
            backend,
            api_url: "https://api.github.com".to_string(),
            repository,
            data_dir: "data".to_string(),
            branch: None,
            token: None,
        }
    }

    #[test]
    fn github_store_requires_a_repository() {
        let result = build_history_store(&store_config(StoreBackend::GitHub, None));
        assert!(matches!(result, Err(AppError::Config(_))));

        let repository = RepositorySlug {
            owner: "energy-lab".to_string(),
            name: "energyscan".to_string(),
        };
        let result = build_history_store(&store_config(StoreBackend::GitHub, Some(repository)));
        assert!(result.is_ok());
    }

    #[test]
    fn memory_store_needs_no_remote_settings() {
        assert!(build_service(&store_config(StoreBackend::Memory, None)).is_ok());
    }

    #[test]
    fn domain_arguments_accept_slugs_and_list_choices_on_error() {
        assert_eq!(parse_domain("well-being"), Ok(Domain::Wellbeing));
        let error = parse_domain("sleep").expect_err("unknown domain");
        assert!(error.contains("awareness, routine, wellbeing, activities"));
    }
}
