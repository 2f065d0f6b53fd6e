use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;

use crate::config::settings::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::user::User;

/// Sign a token for `user`, valid for the configured number of hours.
pub fn generate_token(
    user: &User,
    jwt_settings: &JwtSettings,
    issued_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role.clone().into(),
        status: user.status.clone().into(),
        exp: jwt_settings.expires_at(issued_at).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}
