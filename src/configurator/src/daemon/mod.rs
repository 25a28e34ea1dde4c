mod error;
mod handlers;
mod routes;
mod server;
mod state;
pub mod structs;

pub use error::ApiError;
pub use server::{get_router, DaemonServer};
pub use state::DaemonState;
