use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::db::DbConnection;
use crate::types::ApiResult;

pub mod models;

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersContainer<T> {
    pub users: T,
}

#[get("/users")]
pub async fn list(connection: DbConnection) -> ApiResult<UsersContainer<Vec<models::User>>> {
    let users = connection
        .run(|conn| Ok(models::User::load_all(conn)?))
        .await?;
    Ok(Json(UsersContainer { users }))
}
