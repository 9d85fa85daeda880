use std::sync::Arc;

use auth::Authenticator;
use fitness_service::config::Config;
use fitness_service::domain::profile::service::ProfileService;
use fitness_service::domain::user::service::AccountService;
use fitness_service::inbound::http::router::create_router;
use fitness_service::outbound::repositories::PostgresProfileRepository;
use fitness_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitness_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "fitness-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let profile_repository = Arc::new(PostgresProfileRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let profile_service = Arc::new(ProfileService::new(profile_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, profile_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
