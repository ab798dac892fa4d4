use diesel::prelude::*;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::db::schema::topics;
use crate::db::DbConnection;
use crate::types::ApiResult;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Deserialize, Serialize)]
#[diesel(table_name = topics)]
pub struct Topic {
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicsContainer<T> {
    pub topics: T,
}

#[get("/topics")]
pub async fn list(connection: DbConnection) -> ApiResult<TopicsContainer<Vec<Topic>>> {
    let topics = connection
        .run(|conn| {
            let rows = topics::table
                .select(Topic::as_select())
                .order(topics::slug.asc())
                .load::<Topic>(conn)?;
            Ok(rows)
        })
        .await?;
    Ok(Json(TopicsContainer { topics }))
}
