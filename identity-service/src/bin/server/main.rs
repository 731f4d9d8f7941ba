use std::sync::Arc;

use auth::Authenticator;
use identity_service::config::Config;
use identity_service::domain::identity::resolver::IdentityResolver;
use identity_service::domain::user::service::CredentialService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresUserRepository;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_ttl_minutes = config.jwt.expiration_minutes,
        leeway_seconds = config.jwt.leeway_seconds,
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

    let token_ttl = config.jwt.token_ttl()?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.expose_secret().as_bytes(), token_ttl)?
            .with_leeway(config.jwt.leeway_seconds),
    );
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let credential_service = Arc::new(CredentialService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let identity_resolver = Arc::new(IdentityResolver::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service, identity_resolver, token_ttl);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
