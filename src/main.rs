use std::process;

use news_api::{db, logging};

#[rocket::main]
async fn main() {
    logging::init();

    let pool = match db::DbConfig::from_env().and_then(|config| db::init_pool(&config)) {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "failed to create database pool");
            process::exit(1);
        }
    };

    if let Err(err) = news_api::rocket(pool).launch().await {
        tracing::error!(error = %err, "server stopped");
        process::exit(1);
    }
}
