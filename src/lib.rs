use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod scoring;
pub mod services;
pub mod telemetry;

use crate::config::settings::{AdminAccount, JwtSettings};
use crate::routes::init_routes;
use crate::scoring::ScoringRule;
use crate::services::{PredictionService, RankingService, ResultService, TournamentService};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    scoring_rule: ScoringRule,
    admin_account: AdminAccount,
) -> Result<Server, std::io::Error> {
    let rankings = RankingService::new(db_pool.clone(), scoring_rule);
    let results = ResultService::new(db_pool.clone(), rankings.clone());
    let predictions = PredictionService::new(db_pool.clone());
    let tournament = TournamentService::new(db_pool.clone(), scoring_rule);

    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let scoring_rule = web::Data::new(scoring_rule);
    let admin_account = web::Data::new(admin_account);
    let rankings = web::Data::new(rankings);
    let results = web::Data::new(results);
    let predictions = web::Data::new(predictions);
    let tournament = web::Data::new(tournament);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(scoring_rule.clone())
            .app_data(admin_account.clone())
            .app_data(rankings.clone())
            .app_data(results.clone())
            .app_data(predictions.clone())
            .app_data(tournament.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
