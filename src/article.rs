use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use rocket::serde::json::{Json, Value};

use crate::db::schema::topics;
use crate::db::DbConnection;
use crate::params::{ArticleQuery, ResourceId, VoteChange};
use crate::projection::{
    Article, ArticleContainer, ArticleDetail, ArticleRecord, ArticleSummary, ArticlesContainer,
};
use crate::query;
use crate::resolver;
use crate::types::{ApiError, ApiResult, Missing};

pub(crate) fn topic_exists(connection: &mut PgConnection, slug: &str) -> Result<bool, ApiError> {
    let found = select(exists(topics::table.filter(topics::slug.eq(slug))))
        .get_result::<bool>(connection)?;
    Ok(found)
}

pub(crate) fn article_exists(connection: &mut PgConnection, id: i32) -> Result<bool, ApiError> {
    use crate::db::schema::articles;
    let found = select(exists(articles::table.find(id))).get_result::<bool>(connection)?;
    Ok(found)
}

#[get("/articles?<topic>&<sort_by>&<order>")]
pub async fn list(
    connection: DbConnection,
    topic: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
) -> ApiResult<ArticlesContainer<Vec<ArticleSummary>>> {
    let params = ArticleQuery::parse(topic, sort_by.as_deref(), order.as_deref())?;

    let records = connection
        .run(move |conn| {
            let rows = query::list_articles(&params)
                .into_query()
                .load::<ArticleRecord>(conn)?;
            resolver::article_listing(rows, params.topic.as_deref(), |slug| {
                topic_exists(conn, slug)
            })
        })
        .await?;

    Ok(Json(ArticlesContainer {
        articles: records.into_iter().map(ArticleSummary::from).collect(),
    }))
}

#[get("/articles/<id>")]
pub async fn get(connection: DbConnection, id: &str) -> ApiResult<ArticleContainer<ArticleDetail>> {
    let id = ResourceId::parse(id)?;

    let record = connection
        .run(move |conn| {
            let row = query::article_detail(id)
                .into_query()
                .get_result::<ArticleRecord>(conn)
                .optional()?;
            resolver::single(row, Missing::Id)
        })
        .await?;

    Ok(Json(ArticleContainer {
        article: record.into(),
    }))
}

#[patch("/articles/<id>", data = "<payload>")]
pub async fn update_votes(
    connection: DbConnection,
    id: &str,
    payload: Option<Json<Value>>,
) -> ApiResult<ArticleContainer<Article>> {
    let id = ResourceId::parse(id)?;
    let payload = payload.map(Json::into_inner).unwrap_or(Value::Null);
    let change = VoteChange::from_payload(&payload)?;

    let article = connection
        .run(move |conn| {
            let row = query::increment_votes(id, change)
                .into_query()
                .get_result::<Article>(conn)
                .optional()?;
            resolver::single(row, Missing::Article)
        })
        .await?;

    tracing::info!(
        article_id = article.article_id,
        inc_votes = change.inc_votes,
        votes = article.votes,
        "article votes updated"
    );
    Ok(Json(ArticleContainer { article }))
}
