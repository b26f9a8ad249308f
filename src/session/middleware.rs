use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::debug;

use crate::error::AppError;
use crate::session::Session;

/// Rejects requests while no one is signed in and hands the current [`User`] to
/// handlers through request extensions.
///
/// The guard only reads the session. Requests do not count as activity; the front end
/// reports activity explicitly.
///
/// The `User` is a snapshot taken when the request enters. An inactivity timeout firing
/// while the handler runs does not revoke it, so writes that are signed by the user
/// (chat messages) read the live session again in [`Workspace`].
///
/// [`Workspace`]: crate::workspace::Workspace
///
/// [`User`]: crate::models::User
pub struct SessionGuard {
    session: Session,
}

impl SessionGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service,
            session: self.session.clone(),
        }))
    }
}

pub struct SessionGuardService<S> {
    service: S,
    session: Session,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
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
        // sign-in and sign-up are reachable while signed out
        if req.path() == "/health" || req.path().starts_with("/api/auth/") {
            return Box::pin(self.service.call(req));
        }

        match self.session.current_user() {
            Some(user) => {
                req.extensions_mut().insert(user);
                Box::pin(self.service.call(req))
            }
            None => {
                debug!("Rejected {} {}: signed out", req.method(), req.path());
                let app_err = AppError::Unauthorized("No active session".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
