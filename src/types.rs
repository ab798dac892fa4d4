use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use regex::Regex;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde_json::json;

use crate::db;
use crate::params::ParamError;
use crate::utils::json_response;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Which entity a 404 is about. Each carries its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Id,
    Article,
    Topic,
    TopicArticles,
    User,
    Comment,
}

impl Missing {
    pub fn message(self) -> &'static str {
        match self {
            Missing::Id => "id not found",
            Missing::Article => "article does not exist",
            Missing::Topic => "Topic does not exist",
            Missing::TopicArticles => "No articles exist for this topic",
            Missing::User => "user does not exist",
            Missing::Comment => "comment does not exist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    InvalidSortQuery,
    InvalidOrderQuery,
    MissingIncVotes,
    CommentMissingProperties,
    NotFound(Missing),
    PathNotFound,
    Internal,
}

impl ApiError {
    pub fn status(self) -> Status {
        match self {
            ApiError::BadRequest
            | ApiError::InvalidSortQuery
            | ApiError::InvalidOrderQuery
            | ApiError::MissingIncVotes
            | ApiError::CommentMissingProperties => Status::BadRequest,
            ApiError::NotFound(_) | ApiError::PathNotFound => Status::NotFound,
            ApiError::Internal => Status::InternalServerError,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::InvalidSortQuery => "Invalid sort query",
            ApiError::InvalidOrderQuery => "Invalid order query",
            ApiError::MissingIncVotes => "missing inc_vote property",
            ApiError::CommentMissingProperties => "comment missing required properties",
            ApiError::NotFound(missing) => missing.message(),
            ApiError::PathNotFound => "path not found",
            ApiError::Internal => "internal server error!",
        }
    }
}

lazy_static! {
    static ref REFERENCED_TABLE_RE: Regex =
        Regex::new(r#"is not present in table "([^"]+)""#).unwrap();
}

/// Resolves a foreign-key violation to the entity whose row was missing.
fn referenced_entity(info: &dyn DatabaseErrorInformation) -> Option<Missing> {
    let table = info
        .details()
        .and_then(|details| REFERENCED_TABLE_RE.captures(details))
        .and_then(|captures| captures.get(1))
        .map(|table| table.as_str());

    match table {
        Some("users") => Some(Missing::User),
        Some("articles") => Some(Missing::Article),
        Some(_) => None,
        None => match info.constraint_name() {
            Some("comments_author_fkey") => Some(Missing::User),
            Some("comments_article_id_fkey") => Some(Missing::Article),
            _ => None,
        },
    }
}

fn classify_diesel(error: &DieselError) -> ApiError {
    match error {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation => referenced_entity(&**info)
                .map(ApiError::NotFound)
                .unwrap_or(ApiError::Internal),
            DatabaseErrorKind::Unknown if info.message().starts_with("invalid input syntax") => {
                ApiError::BadRequest
            }
            _ => ApiError::Internal,
        },
        _ => ApiError::Internal,
    }
}

/// Maps a storage failure onto the API taxonomy. Anything not recognised
/// is `Internal`; the raw error only goes to the log.
pub fn classify(error: &db::Error) -> ApiError {
    let classified = match error.kind() {
        db::ErrorKind::Diesel(diesel) => classify_diesel(diesel),
        _ => ApiError::Internal,
    };
    if classified == ApiError::Internal {
        tracing::error!(error = %error, "unclassified storage failure");
    } else {
        tracing::debug!(error = %error, kind = ?classified, "classified storage failure");
    }
    classified
}

impl From<db::Error> for ApiError {
    fn from(err: db::Error) -> ApiError {
        classify(&err)
    }
}

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> ApiError {
        classify(&db::Error::from(err))
    }
}

impl From<ParamError> for ApiError {
    fn from(err: ParamError) -> ApiError {
        tracing::debug!(cause = ?err, "rejected request parameters");
        match err {
            ParamError::MalformedId => ApiError::BadRequest,
            ParamError::InvalidSortKey => ApiError::InvalidSortQuery,
            ParamError::InvalidOrder => ApiError::InvalidOrderQuery,
            ParamError::IncVotesMissing => ApiError::MissingIncVotes,
            ParamError::IncVotesNotInteger => ApiError::BadRequest,
            ParamError::CommentFieldsMissing => ApiError::CommentMissingProperties,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = json!({ "msg": self.message() });
        json_response(req, &body, self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PgInfo {
        message: &'static str,
        details: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for PgInfo {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            self.details
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("comments")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, info: PgInfo) -> db::Error {
        DieselError::DatabaseError(kind, Box::new(info)).into()
    }

    #[test]
    fn foreign_key_on_users_is_user_not_found() {
        let err = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            PgInfo {
                message: "insert or update on table \"comments\" violates foreign key constraint",
                details: Some("Key (author)=(nobody) is not present in table \"users\"."),
                constraint: Some("comments_author_fkey"),
            },
        );
        assert_eq!(classify(&err), ApiError::NotFound(Missing::User));
    }

    #[test]
    fn foreign_key_on_articles_is_article_not_found() {
        let err = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            PgInfo {
                message: "insert or update on table \"comments\" violates foreign key constraint",
                details: Some("Key (article_id)=(9999) is not present in table \"articles\"."),
                constraint: Some("comments_article_id_fkey"),
            },
        );
        assert_eq!(classify(&err), ApiError::NotFound(Missing::Article));
    }

    #[test]
    fn foreign_key_without_detail_falls_back_to_constraint() {
        let err = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            PgInfo {
                message: "violates foreign key constraint",
                details: None,
                constraint: Some("comments_author_fkey"),
            },
        );
        assert_eq!(classify(&err), ApiError::NotFound(Missing::User));
    }

    #[test]
    fn unknown_foreign_key_is_internal() {
        let err = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            PgInfo {
                message: "violates foreign key constraint",
                details: Some("Key (topic)=(x) is not present in table \"topics\"."),
                constraint: Some("articles_topic_fkey"),
            },
        );
        assert_eq!(classify(&err), ApiError::Internal);
    }

    #[test]
    fn invalid_input_syntax_is_bad_request() {
        let err = database_error(
            DatabaseErrorKind::Unknown,
            PgInfo {
                message: "invalid input syntax for type integer: \"banana\"",
                details: None,
                constraint: None,
            },
        );
        assert_eq!(classify(&err), ApiError::BadRequest);
    }

    #[test]
    fn other_failures_are_internal() {
        let unique = database_error(
            DatabaseErrorKind::UniqueViolation,
            PgInfo {
                message: "duplicate key value violates unique constraint",
                details: None,
                constraint: None,
            },
        );
        assert_eq!(classify(&unique), ApiError::Internal);
        assert_eq!(classify(&db::Error::from(DieselError::NotFound)), ApiError::Internal);
        let task = db::Error::from(db::ErrorKind::Task("panicked".into()));
        assert_eq!(classify(&task), ApiError::Internal);
    }

    #[test]
    fn messages_never_carry_storage_text() {
        let err = database_error(
            DatabaseErrorKind::Unknown,
            PgInfo {
                message: "relation \"articles\" does not exist",
                details: None,
                constraint: None,
            },
        );
        let api = classify(&err);
        assert_eq!(api.message(), "internal server error!");
        assert_eq!(api.status(), Status::InternalServerError);
    }

    #[test]
    fn param_errors_keep_documented_messages() {
        assert_eq!(
            ApiError::from(ParamError::IncVotesMissing).message(),
            "missing inc_vote property"
        );
        assert_eq!(ApiError::from(ParamError::IncVotesNotInteger).message(), "bad request");
        assert_eq!(ApiError::from(ParamError::MalformedId).status(), Status::BadRequest);
        assert_eq!(
            ApiError::from(ParamError::InvalidSortKey).message(),
            "Invalid sort query"
        );
        assert_eq!(
            ApiError::from(ParamError::InvalidOrder).message(),
            "Invalid order query"
        );
    }

    #[test]
    fn topic_misses_are_distinct() {
        let absent = ApiError::NotFound(Missing::Topic);
        let empty = ApiError::NotFound(Missing::TopicArticles);
        assert_eq!(absent.status(), empty.status());
        assert_ne!(absent.message(), empty.message());
    }
}
