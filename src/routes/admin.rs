use actix_web::web;

use crate::handlers::admin::{playoff_handler, result_handler};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Results
            .service(
                web::resource("/matches")
                    .route(web::get().to(result_handler::get_matches))
            )
            .service(
                web::resource("/matches/{match_id}/result")
                    .route(web::put().to(result_handler::submit_result))
            )
            .service(
                web::resource("/rankings/recalculate")
                    .route(web::post().to(result_handler::recalculate_rankings))
            )
            // Playoff bracket
            .service(
                web::resource("/playoff-pairs")
                    .route(web::get().to(playoff_handler::get_playoff_pairs))
                    .route(web::put().to(playoff_handler::assign_playoff_pairs))
            )
    );
}
