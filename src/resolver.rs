//! Decides what an empty result means.
//!
//! The same "no rows" can be a valid empty list, a missing topic, a topic
//! without articles or a missing article. Follow-up lookups are passed in as
//! closures so that they only run when the answer depends on them, and in
//! the order the answer needs them.

use crate::projection::{CommentListing, CommentRecord};
use crate::types::{ApiError, Missing};

/// Rows of the article listing, checked against the topic filter.
///
/// `topic_exists` runs only when a topic was given and nothing matched.
pub fn article_listing<T, F>(
    rows: Vec<T>,
    topic: Option<&str>,
    topic_exists: F,
) -> Result<Vec<T>, ApiError>
where
    F: FnOnce(&str) -> Result<bool, ApiError>,
{
    match topic {
        Some(topic) if rows.is_empty() => {
            if topic_exists(topic)? {
                Err(ApiError::NotFound(Missing::TopicArticles))
            } else {
                Err(ApiError::NotFound(Missing::Topic))
            }
        }
        _ => Ok(rows),
    }
}

/// A lookup by id that matched nothing is a 404 about `missing`.
pub fn single<T>(row: Option<T>, missing: Missing) -> Result<T, ApiError> {
    row.ok_or(ApiError::NotFound(missing))
}

/// Comments of one article. The article is confirmed first; comments are
/// only fetched for an article that exists. Both lookups share `conn`.
pub fn comment_listing<C, E, F>(
    conn: &mut C,
    article_exists: E,
    fetch: F,
) -> Result<CommentListing, ApiError>
where
    C: ?Sized,
    E: FnOnce(&mut C) -> Result<bool, ApiError>,
    F: FnOnce(&mut C) -> Result<Vec<CommentRecord>, ApiError>,
{
    if !article_exists(conn)? {
        return Err(ApiError::NotFound(Missing::Id));
    }
    Ok(CommentListing::from_records(fetch(conn)?))
}

/// A delete that touched no rows means the comment was not there.
pub fn deleted(affected: usize) -> Result<(), ApiError> {
    match affected {
        0 => Err(ApiError::NotFound(Missing::Comment)),
        _ => Ok(()),
    }
}
