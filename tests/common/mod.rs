#![allow(dead_code)]

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::Connection;
use lazy_static::lazy_static;
use rocket::local::blocking::Client;
use std::env;
use std::sync::{Mutex, MutexGuard};

use news_api::db;

const SEED: &str = include_str!("../fixtures/seed.sql");

lazy_static! {
    static ref DB_LOCK: Mutex<()> = Mutex::new(());
}

/// A client whose pool never gets a reachable database. Only paths that are
/// rejected before storage can be exercised through it.
pub fn offline_client() -> Client {
    let pool = db::lazy_pool("postgres://offline@127.0.0.1:1/unused");
    Client::tracked(news_api::rocket(pool)).expect("valid rocket instance")
}

pub struct Seeded {
    pub client: Client,
    _guard: MutexGuard<'static, ()>,
}

/// Re-seeds the database named by `TEST_DATABASE_URL` and hands out a client
/// bound to it. Returns `None` when the variable is unset.
pub fn seeded_client() -> Option<Seeded> {
    let url = match env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        }
    };
    let guard = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut connection = PgConnection::establish(&url).expect("connect to TEST_DATABASE_URL");
    connection.batch_execute(SEED).expect("seed test database");

    let client = Client::tracked(news_api::rocket(db::lazy_pool(&url))).expect("valid rocket instance");
    Some(Seeded {
        client,
        _guard: guard,
    })
}
