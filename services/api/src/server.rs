use crate::cli::ServeArgs;
use crate::infra::{
    AppState, EnvLicenseValidator, InMemoryApplicationRepository, InMemoryDecisionNotifier,
};
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cardflow::config::AppConfig;
use cardflow::error::AppError;
use cardflow::telemetry;
use cardflow::workflows::screening::CardApplicationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        screening: config.screening.clone(),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let notifier = Arc::new(InMemoryDecisionNotifier::default());
    let validator = Arc::new(EnvLicenseValidator::from_env());
    let service = Arc::new(CardApplicationService::new(
        repository,
        notifier,
        validator,
        config.screening.clone(),
    ));

    let app = with_screening_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "card screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
