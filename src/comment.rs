use diesel::prelude::*;
use rocket::http::Status;
use rocket::serde::json::{Json, Value};

use crate::article::article_exists;
use crate::db::DbConnection;
use crate::params::{NewComment, ResourceId};
use crate::projection::{CommentContainer, CommentListing, CommentRecord, CreatedComment};
use crate::query;
use crate::resolver;
use crate::types::{ApiError, ApiResult};

#[get("/articles/<article_id>/comments")]
pub async fn list(connection: DbConnection, article_id: &str) -> ApiResult<CommentListing> {
    let article_id = ResourceId::parse(article_id)?;

    let listing = connection
        .run(move |conn| {
            // Existence check and fetch read the same snapshot.
            conn.build_transaction()
                .read_only()
                .repeatable_read()
                .run(|conn| {
                    resolver::comment_listing(
                        conn,
                        |conn| article_exists(conn, article_id.get()),
                        |conn| {
                            let rows = query::article_comments(article_id)
                                .into_query()
                                .load::<CommentRecord>(conn)?;
                            Ok(rows)
                        },
                    )
                })
        })
        .await?;

    Ok(Json(listing))
}

/// Referential failures (unknown user or article) come back from the insert
/// itself and are sorted out by the classifier.
#[post("/articles/<article_id>/comments", data = "<payload>")]
pub async fn add(
    connection: DbConnection,
    article_id: &str,
    payload: Option<Json<Value>>,
) -> Result<(Status, Json<CommentContainer<CreatedComment>>), ApiError> {
    let article_id = ResourceId::parse(article_id)?;
    let payload = payload.map(Json::into_inner).unwrap_or(Value::Null);
    let comment = NewComment::from_payload(&payload)?;

    let created = connection
        .run(move |conn| {
            let row = query::insert_comment(article_id, &comment)
                .into_query()
                .get_result::<CommentRecord>(conn)?;
            Ok(row)
        })
        .await?;

    tracing::info!(
        comment_id = created.comment_id,
        article_id = created.article_id,
        author = %created.author,
        "comment created"
    );
    Ok((
        Status::Created,
        Json(CommentContainer {
            comment: created.into(),
        }),
    ))
}

#[delete("/comments/<comment_id>")]
pub async fn remove(connection: DbConnection, comment_id: &str) -> Result<Status, ApiError> {
    let comment_id = ResourceId::parse(comment_id)?;

    connection
        .run(move |conn| {
            let affected = query::delete_comment(comment_id)
                .into_query()
                .execute(conn)?;
            resolver::deleted(affected)
        })
        .await?;

    tracing::info!(comment_id = comment_id.get(), "comment deleted");
    Ok(Status::NoContent)
}
