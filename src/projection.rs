//! Rows as they come back from the article and comment statements, and the
//! shapes they are sent out as.

use chrono::NaiveDateTime;
use diesel::sql_types::{BigInt, Integer, Text, Timestamp};
use diesel::QueryableByName;
use serde::{Deserialize, Serialize};

use crate::utils::serialize_date;

/// One article joined with its comment count.
#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct ArticleRecord {
    #[diesel(sql_type = Integer)]
    pub article_id: i32,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub topic: String,
    #[diesel(sql_type = Text)]
    pub author: String,
    #[diesel(sql_type = Text)]
    pub body: String,
    #[diesel(sql_type = Timestamp)]
    pub created_at: NaiveDateTime,
    #[diesel(sql_type = Integer)]
    pub votes: i32,
    #[diesel(sql_type = Text)]
    pub article_img_url: String,
    #[diesel(sql_type = BigInt)]
    pub comment_count: i64,
}

/// An article row without aggregation, as returned by the vote update.
#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct Article {
    #[diesel(sql_type = Integer)]
    pub article_id: i32,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub topic: String,
    #[diesel(sql_type = Text)]
    pub author: String,
    #[diesel(sql_type = Text)]
    pub body: String,
    #[diesel(sql_type = Timestamp)]
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    #[diesel(sql_type = Integer)]
    pub votes: i32,
    #[diesel(sql_type = Text)]
    pub article_img_url: String,
}

#[derive(Debug, Clone, PartialEq, QueryableByName)]
pub struct CommentRecord {
    #[diesel(sql_type = Integer)]
    pub comment_id: i32,
    #[diesel(sql_type = Integer)]
    pub votes: i32,
    #[diesel(sql_type = Timestamp)]
    pub created_at: NaiveDateTime,
    #[diesel(sql_type = Text)]
    pub author: String,
    #[diesel(sql_type = Text)]
    pub body: String,
    #[diesel(sql_type = Integer)]
    pub article_id: i32,
}

/// List view: never carries `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

impl From<ArticleRecord> for ArticleSummary {
    fn from(record: ArticleRecord) -> Self {
        ArticleSummary {
            article_id: record.article_id,
            title: record.title,
            topic: record.topic,
            author: record.author,
            created_at: record.created_at,
            votes: record.votes,
            article_img_url: record.article_img_url,
            comment_count: record.comment_count,
        }
    }
}

/// Detail view: always carries `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleDetail {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    pub votes: i32,
    pub article_img_url: String,
    pub comment_count: i64,
}

impl From<ArticleRecord> for ArticleDetail {
    fn from(record: ArticleRecord) -> Self {
        ArticleDetail {
            article_id: record.article_id,
            title: record.title,
            topic: record.topic,
            author: record.author,
            body: record.body,
            created_at: record.created_at,
            votes: record.votes,
            article_img_url: record.article_img_url,
            comment_count: record.comment_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub comment_id: i32,
    pub votes: i32,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    pub author: String,
    pub body: String,
    pub article_id: i32,
}

impl From<CommentRecord> for CommentView {
    fn from(record: CommentRecord) -> Self {
        CommentView {
            comment_id: record.comment_id,
            votes: record.votes,
            created_at: record.created_at,
            author: record.author,
            body: record.body,
            article_id: record.article_id,
        }
    }
}

/// A freshly inserted comment, fields in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedComment {
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub comment_id: i32,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: NaiveDateTime,
    pub votes: i32,
}

impl From<CommentRecord> for CreatedComment {
    fn from(record: CommentRecord) -> Self {
        CreatedComment {
            article_id: record.article_id,
            author: record.author,
            body: record.body,
            comment_id: record.comment_id,
            created_at: record.created_at,
            votes: record.votes,
        }
    }
}

pub const NO_COMMENTS_YET: &str = "this article has no comments yet";

/// Either the comments of an article or, when it has none, a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommentListing {
    Comments { comments: Vec<CommentView> },
    NoneYet { msg: &'static str },
}

impl CommentListing {
    pub fn from_records(records: Vec<CommentRecord>) -> Self {
        if records.is_empty() {
            CommentListing::NoneYet {
                msg: NO_COMMENTS_YET,
            }
        } else {
            CommentListing::Comments {
                comments: records.into_iter().map(CommentView::from).collect(),
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleContainer<T> {
    pub article: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticlesContainer<T> {
    pub articles: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentContainer<T> {
    pub comment: T,
}
