use crate::error::AppError;
use actix_web::http::Method;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use subtle::ConstantTimeEq;

/// Everything under this prefix needs the admin bearer secret
const ADMIN_PREFIX: &str = "/api/admin";

/// 관리자 API 보호: `Authorization: Bearer <ADMIN_SECRET_KEY>`
///
/// An empty configured secret rejects every admin request.
pub struct AdminAuthMiddleware {
    secret: Rc<str>,
}

impl AdminAuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Rc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AdminAuthMiddlewareService<S> {
    service: S,
    secret: Rc<str>,
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/api/admin/")
}

/// Token comparison runs in constant time for equal-length inputs
fn bearer_matches(header: Option<&str>, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token.as_bytes().ct_eq(secret.as_bytes()).into())
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
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
        // CORS preflight carries no credentials
        if req.method() == Method::OPTIONS || !is_admin_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if bearer_matches(header, &self.secret) {
            let fut = self.service.call(req);
            Box::pin(fut)
        } else {
            let reason = if header.is_some() {
                "Invalid admin credential"
            } else {
                "Missing admin credential"
            };
            let error = AppError::AuthError(format!("{reason} for {}", req.path()));
            Box::pin(async move { Err(error.into()) })
        }
    }
}
