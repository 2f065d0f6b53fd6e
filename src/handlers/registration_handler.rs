use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::config::settings::AdminAccount;
use crate::db::helpers::ensure_not_exists;
use crate::models::common::ApiResponse;
use crate::models::user::{validate_password, validate_username, RegistrationRequest, UserRole, UserStatus};
use crate::services::RankingService;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool, admin_account, rankings),
    fields(
        username = %user_form.username,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
    admin_account: web::Data<AdminAccount>,
    rankings: web::Data<RankingService>,
) -> HttpResponse {
    let validation = validate_username(&user_form.username)
        .and_then(|_| validate_password(user_form.password.expose_secret()));
    if let Err(message) = validation {
        tracing::info!("Rejected registration: {}", message);
        return HttpResponse::BadRequest().json(ApiResponse::<()>::error(message));
    }

    let existing: Result<Option<Uuid>, sqlx::Error> = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(&user_form.username)
        .fetch_optional(pool.get_ref())
        .await;
    if let Err(response) = ensure_not_exists(existing, "Username is already taken") {
        return response;
    }

    let role = if admin_account.is_admin_username(&user_form.username) {
        UserRole::Admin
    } else {
        UserRole::User
    };

    match insert_user(&user_form, role, &pool, &rankings).await {
        Ok(user_id) => {
            tracing::info!("Registered user {} with role {}", user_id, role);
            HttpResponse::Ok().json(ApiResponse::<()>::success_message("User registered"))
        }
        Err(RegistrationError::UsernameTaken) => {
            HttpResponse::Conflict().json(ApiResponse::<()>::error("Username is already taken"))
        }
        Err(e) => {
            tracing::error!("Failed to register user: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Failed to register user"))
        }
    }
}

/// Insert the user and re-rank the leaderboard so the newcomer starts with a position.
pub async fn insert_user(
    user_form: &RegistrationRequest,
    role: UserRole,
    pool: &PgPool,
    rankings: &RankingService,
) -> Result<Uuid, RegistrationError> {
    let user_id = Uuid::new_v4();
    let password_hash = hash_password(user_form.password.expose_secret())?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, email, role, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(user_id)
    .bind(&user_form.username)
    .bind(&password_hash)
    .bind(&user_form.email)
    .bind(role.to_string())
    .bind(UserStatus::Active.to_string())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match e {
        // Lost a race against a concurrent registration of the same name
        sqlx::Error::Database(ref db) if db.is_unique_violation() => RegistrationError::UsernameTaken,
        other => RegistrationError::Database(other),
    })?;

    rankings.recalculate_in_tx(&mut tx).await?;

    tx.commit().await?;
    Ok(user_id)
}
