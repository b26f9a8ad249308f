use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::User;

/// The signed-in user, as placed in request extensions by [`SessionGuard`].
///
/// Handlers behind the guard take this instead of reading the session themselves.
/// Outside the guard it fails with `AppError::Unauthorized`.
///
/// [`SessionGuard`]: crate::session::SessionGuard
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(CurrentUser(user))),
            None => {
                let err = AppError::Unauthorized("No active session".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
