use crate::cli::ServeArgs;
use crate::infra::{
    load_profiles, AppState, CatalogScholarshipRepository, InMemoryMatchScoreStore,
    InMemoryProfileRepository,
};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholarsync::catalog::ScholarshipCatalog;
use scholarsync::config::AppConfig;
use scholarsync::error::AppError;
use scholarsync::matching::MatchEngine;
use scholarsync::recommendations::MatchService;
use scholarsync::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = match args.catalog.take() {
        Some(path) => ScholarshipCatalog::from_path(path)?,
        None => {
            warn!("no scholarship catalog supplied; serving an empty catalog");
            ScholarshipCatalog::default()
        }
    };
    let catalog = Arc::new(catalog);

    let profiles = match args.profiles.take() {
        Some(path) => InMemoryProfileRepository::from_profiles(load_profiles(&path)?),
        None => InMemoryProfileRepository::default(),
    };
    info!(profiles = profiles.len(), "profile store ready");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let match_service = Arc::new(MatchService::new(
        Arc::new(profiles),
        Arc::new(CatalogScholarshipRepository::new(catalog)),
        Arc::new(InMemoryMatchScoreStore::default()),
        MatchEngine::system(),
        config.matching,
    ));

    let app = with_match_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
