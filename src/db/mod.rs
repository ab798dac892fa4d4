use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel::result::Error as DieselError;
use dotenv::dotenv;
use rocket::http::Status;
use rocket::request::{self, FromRequest};
use rocket::tokio::task;
use rocket::{Request, State};
use std::env;

use crate::types::ApiError;

pub mod schema;

const DEFAULT_POOL_SIZE: u32 = 10;

// An alias to the type for a pool of Diesel Postgres connections.
pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

error_chain! {
    foreign_links {
        Var(::std::env::VarError);
        PoolSize(::std::num::ParseIntError);
        R2D2(r2d2::PoolError);
        Diesel(DieselError);
    }

    errors {
        Task(reason: String) {
            description("blocking storage task failed")
            display("blocking storage task failed: {}", reason)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub database_url: String,
    pub pool_size: u32,
}

impl DbConfig {
    /// Reads `DATABASE_URL` and `DATABASE_POOL_SIZE`, loading `.env` first.
    pub fn from_env() -> Result<DbConfig> {
        dotenv().ok();
        let database_url = env::var("DATABASE_URL")?;
        let pool_size = match env::var("DATABASE_POOL_SIZE") {
            Ok(size) => size.parse::<u32>()?,
            Err(_) => DEFAULT_POOL_SIZE,
        };
        Ok(DbConfig {
            database_url,
            pool_size,
        })
    }
}

pub fn init_pool(config: &DbConfig) -> Result<Pool> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)?;
    Ok(pool)
}

/// Builds a pool without opening any connection up front. Connections are
/// established on first checkout.
pub fn lazy_pool(database_url: &str) -> Pool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().build_unchecked(manager)
}

/// Handle on the managed pool. Holding one does not check out a connection;
/// that happens inside `run`.
pub struct DbConnection(Pool);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for DbConnection {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<DbConnection, ()> {
        match request.guard::<&State<Pool>>().await {
            request::Outcome::Success(pool) => {
                request::Outcome::Success(DbConnection(pool.inner().clone()))
            }
            _ => request::Outcome::Error((Status::InternalServerError, ())),
        }
    }
}

impl DbConnection {
    /// Runs `f` with a pooled connection on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> ::std::result::Result<T, ApiError>
    where
        F: FnOnce(&mut PgConnection) -> ::std::result::Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.0.clone();
        let outcome = task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(Error::from)?;
            f(&mut *connection)
        })
        .await;

        match outcome {
            Ok(result) => result,
            Err(join) => Err(Error::from(ErrorKind::Task(join.to_string())).into()),
        }
    }
}
