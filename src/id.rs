use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::error::AppError;

/// Length of a freshly generated entity id.
pub const ID_LEN: usize = 9;

lazy_static! {
    /// Accepted shape of an id arriving from the view layer. Ids end up inside storage
    /// keys (`tasks-<id>`), so anything beyond lowercase alphanumerics is refused.
    pub static ref ID_REGEX: Regex = Regex::new(r"^[0-9a-z]{1,64}$").unwrap();
}

/// Generates a random entity id.
///
/// The first nine hex digits of a v4 UUID are all random bits. Uniqueness is only
/// probabilistic; there is a single writer, so nothing enforces it further.
pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

pub fn is_valid_id(id: &str) -> bool {
    ID_REGEX.is_match(id)
}

/// Checks an id taken from a request path.
pub fn parse_id(id: &str) -> Result<&str, AppError> {
    if is_valid_id(id) {
        Ok(id)
    } else {
        Err(AppError::BadRequest(format!("Invalid id: {}", id)))
    }
}
