use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod game;
pub mod registration;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // Game routes (require authentication)
    cfg.service(
        web::scope("/game")
            .wrap(AuthMiddleware)
            .service(game::get_rules)
            // before /matches/{match_id}
            .service(game::get_today_matches)
            .service(game::get_match)
            .service(game::submit_prediction)
            .service(game::get_group_stage)
            .service(game::get_group)
            .service(game::get_playoff_stage)
            .service(game::get_ranking)
            .service(game::get_my_ranking)
    );

    admin::init_admin_routes(cfg);
}
