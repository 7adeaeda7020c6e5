//! This library contains definitions for the HTTP layer.

use app::store::Store;
use rocket::{Build, Rocket};
use state::RocketState;

mod access;
mod error;
mod routes;
mod state;

pub fn register(rocket: Rocket<Build>, store: Store) -> Rocket<Build> {
    routes::register(rocket, RocketState { store })
}
