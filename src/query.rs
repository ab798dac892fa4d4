//! Parameterised statements for the article and comment paths.
//!
//! User input only ever reaches the database as a bound parameter. The one
//! exception is the `ORDER BY` clause, which is assembled from the closed
//! `SortBy` and `Order` enums.

use diesel::pg::Pg;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};

use crate::params::{ArticleQuery, NewComment, ResourceId, VoteChange};

static SELECT_ARTICLE_WITH_COUNT: &str = "SELECT articles.article_id,
       articles.title,
       articles.topic,
       articles.author,
       articles.body,
       articles.created_at,
       articles.votes,
       articles.article_img_url,
       COUNT(comments.comment_id) AS comment_count
  FROM articles
  LEFT JOIN comments ON comments.article_id = articles.article_id";

static ARTICLE_COLUMNS: &str =
    "article_id, title, topic, author, body, created_at, votes, article_img_url";

static COMMENT_COLUMNS: &str = "comment_id, votes, created_at, author, body, article_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bind {
    Int(i32),
    Text(String),
}

/// Query text plus the values for its `$n` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<Bind>,
}

impl Statement {
    pub fn into_query(self) -> BoxedSqlQuery<'static, Pg, SqlQuery> {
        let Statement { sql, binds } = self;
        tracing::trace!(sql = %sql, binds = binds.len(), "prepared statement");
        binds
            .into_iter()
            .fold(sql_query(sql).into_boxed::<Pg>(), |query, bind| match bind {
                Bind::Int(value) => query.bind::<Integer, _>(value),
                Bind::Text(value) => query.bind::<Text, _>(value),
            })
    }
}

pub fn list_articles(query: &ArticleQuery) -> Statement {
    let mut sql = String::from(SELECT_ARTICLE_WITH_COUNT);
    let mut binds = Vec::new();
    if let Some(topic) = &query.topic {
        sql.push_str("\n WHERE articles.topic = $1");
        binds.push(Bind::Text(topic.clone()));
    }
    sql.push_str("\n GROUP BY articles.article_id");
    sql.push_str(&format!(
        "\n ORDER BY {} {}, articles.article_id ASC",
        query.sort_by.column(),
        query.order.keyword()
    ));
    Statement { sql, binds }
}

pub fn article_detail(id: ResourceId) -> Statement {
    Statement {
        sql: format!(
            "{}\n WHERE articles.article_id = $1\n GROUP BY articles.article_id",
            SELECT_ARTICLE_WITH_COUNT
        ),
        binds: vec![Bind::Int(id.get())],
    }
}

/// Newest first, always.
pub fn article_comments(article_id: ResourceId) -> Statement {
    Statement {
        sql: format!(
            "SELECT {} FROM comments WHERE article_id = $1 ORDER BY created_at DESC, comment_id DESC",
            COMMENT_COLUMNS
        ),
        binds: vec![Bind::Int(article_id.get())],
    }
}

/// A single `UPDATE ... RETURNING`, so concurrent increments never lose
/// each other.
pub fn increment_votes(id: ResourceId, change: VoteChange) -> Statement {
    Statement {
        sql: format!(
            "UPDATE articles SET votes = votes + $1 WHERE article_id = $2 RETURNING {}",
            ARTICLE_COLUMNS
        ),
        binds: vec![Bind::Int(change.inc_votes), Bind::Int(id.get())],
    }
}

pub fn insert_comment(article_id: ResourceId, comment: &NewComment) -> Statement {
    Statement {
        sql: format!(
            "INSERT INTO comments (body, author, article_id) VALUES ($1, $2, $3) RETURNING {}",
            COMMENT_COLUMNS
        ),
        binds: vec![
            Bind::Text(comment.body.clone()),
            Bind::Text(comment.username.clone()),
            Bind::Int(article_id.get()),
        ],
    }
}

/// Executed for its affected-row count.
pub fn delete_comment(comment_id: ResourceId) -> Statement {
    Statement {
        sql: String::from("DELETE FROM comments WHERE comment_id = $1"),
        binds: vec![Bind::Int(comment_id.get())],
    }
}
