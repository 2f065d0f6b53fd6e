use actix_web::{post, web, HttpResponse};
use sqlx::PgPool;

use crate::config::settings::AdminAccount;
use crate::handlers::registration_handler::register_user;
use crate::models::user::RegistrationRequest;
use crate::services::RankingService;

#[post("/register_user")]
async fn register(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
    admin_account: web::Data<AdminAccount>,
    rankings: web::Data<RankingService>,
) -> HttpResponse {
    register_user(user_form, pool, admin_account, rankings).await
}
