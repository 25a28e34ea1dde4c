use crate::daemon::handlers::create_user::create_user;
use crate::daemon::handlers::delete_update::delete_update;
use crate::daemon::handlers::delete_user::delete_user;
use crate::daemon::handlers::get_update::{get_update, UPDATE_ENDPOINT};
use crate::daemon::handlers::get_user::{get_user, USER_ENDPOINT};
use crate::daemon::handlers::list_updates::{list_updates, UPDATES_ENDPOINT};
use crate::daemon::handlers::list_users::{list_users, USERS_ENDPOINT};
use crate::daemon::handlers::run_update::run_update;
use crate::daemon::state::DaemonState;
use axum::routing::{get, MethodRouter};
use std::sync::LazyLock;

pub(super) static ROUTES: LazyLock<Vec<(&'static str, MethodRouter<DaemonState>)>> =
    LazyLock::new(|| {
        vec![
            (UPDATES_ENDPOINT, get(list_updates).post(run_update)),
            (UPDATE_ENDPOINT, get(get_update).delete(delete_update)),
            (USERS_ENDPOINT, get(list_users).post(create_user)),
            (USER_ENDPOINT, get(get_user).delete(delete_user)),
        ]
    });
