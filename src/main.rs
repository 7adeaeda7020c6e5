use app::store::Store;
use rocket::{launch, Build, Rocket};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default = "default_users_file")]
    users_file: PathBuf,
    #[serde(default = "default_donations_file")]
    donations_file: PathBuf,
}

fn default_users_file() -> PathBuf {
    PathBuf::from("data/users.json")
}

fn default_donations_file() -> PathBuf {
    PathBuf::from("data/donations.json")
}

#[launch]
async fn rocket() -> _ {
    start_server().await
}

async fn start_server() -> Rocket<Build> {
    env_logger::init();

    let rocket = Rocket::build();
    let config: Config = rocket.figment().extract().unwrap();

    let store = Store::new(config.users_file, config.donations_file);
    api::register(rocket, store)
}
