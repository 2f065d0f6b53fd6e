use std::net::TcpListener;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use score_challenge_backend::run;
use score_challenge_backend::config::settings::{get_config, AdminAccount};
use score_challenge_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = get_config()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let subscriber = get_subscriber(
        "score-challenge-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!(
        "Listening on {} (scoring {}/{}/{})",
        address,
        config.scoring.exact_score,
        config.scoring.correct_result,
        config.scoring.goal_scorer
    );

    run(
        listener,
        connection_pool,
        config.jwt,
        config.scoring,
        AdminAccount(config.application.admin_username),
    )?.await
}
