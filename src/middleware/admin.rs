use std::future::{ready, Ready};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use crate::middleware::auth::{validate_jwt_from_request, Claims};
use crate::models::user::UserStatus;

/// Decide whether decoded claims may reach an admin route.
/// Inactive accounts are unauthenticated (401), active non-admins forbidden (403).
pub fn check_admin_access(claims: &Claims) -> Result<(), Error> {
    if claims.status != UserStatus::Active {
        tracing::warn!(username = %claims.username, "Inactive account rejected by admin guard");
        return Err(ErrorUnauthorized("Account is not active"));
    }

    if !claims.is_active_admin() {
        tracing::warn!(username = %claims.username, role = %claims.role, "Admin route refused");
        return Err(ErrorForbidden("Insufficient privileges"));
    }

    Ok(())
}

/// Guard for result entry, ranking recalculation and playoff pairing.
pub struct AdminMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AdminGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGuardService { service }))
    }
}

pub struct AdminGuardService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let checked = validate_jwt_from_request(&req)
            .and_then(|claims| check_admin_access(&claims).map(|()| claims));

        match checked {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.service.call(req))
            }
            Err(e) => Box::pin(async move { Err(e) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    fn claims(role: UserRole, status: UserStatus) -> Claims {
        Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            username: "referee".to_string(),
            role,
            status,
            exp: 0,
        }
    }

    fn status_of(result: Result<(), Error>) -> Option<StatusCode> {
        result.err().map(|e| e.as_response_error().status_code())
    }

    #[test]
    fn test_active_admin_passes() {
        assert!(check_admin_access(&claims(UserRole::Admin, UserStatus::Active)).is_ok());
    }

    #[test]
    fn test_regular_user_is_forbidden() {
        let result = check_admin_access(&claims(UserRole::User, UserStatus::Active));
        assert_eq!(status_of(result), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_inactive_admin_is_unauthorized() {
        let result = check_admin_access(&claims(UserRole::Admin, UserStatus::Inactive));
        assert_eq!(status_of(result), Some(StatusCode::UNAUTHORIZED));
    }
}
