mod error;
mod htpasswd;

pub use error::{UserError, UserResult};
pub use htpasswd::{hash_sha, validate_password, validate_username, HtpasswdStore, User};
