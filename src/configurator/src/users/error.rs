use std::io;
use thiserror::Error;

pub type UserResult<T> = Result<T, UserError>;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Usernames are limited to 255 bytes and may not include the colon symbol")]
    InvalidUsername,

    #[error("Passwords are limited to 255 bytes")]
    InvalidPassword,

    #[error("User {username} is not found")]
    NotFound { username: String },

    #[error("{context}: {}", .source.kind())]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl UserError {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { context, source }
    }
}
