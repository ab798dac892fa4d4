use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref ID_RE: Regex = Regex::new(r"\A[0-9]+\z").unwrap();
}

/// Why a request was rejected before any query was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    MalformedId,
    InvalidSortKey,
    InvalidOrder,
    IncVotesMissing,
    IncVotesNotInteger,
    CommentFieldsMissing,
}

/// A syntactically valid, positive resource id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(i32);

impl ResourceId {
    pub fn parse(raw: &str) -> Result<ResourceId, ParamError> {
        if !ID_RE.is_match(raw) {
            return Err(ParamError::MalformedId);
        }
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(ResourceId(id)),
            _ => Err(ParamError::MalformedId),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Topic,
    CommentCount,
    Author,
    Title,
    ArticleId,
    Votes,
}

impl SortBy {
    pub const ALL: [SortBy; 7] = [
        SortBy::CreatedAt,
        SortBy::Topic,
        SortBy::CommentCount,
        SortBy::Author,
        SortBy::Title,
        SortBy::ArticleId,
        SortBy::Votes,
    ];

    pub fn parse(raw: Option<&str>) -> Result<SortBy, ParamError> {
        match raw {
            None => Ok(SortBy::default()),
            Some(key) => SortBy::ALL
                .iter()
                .copied()
                .find(|sort| sort.key() == key)
                .ok_or(ParamError::InvalidSortKey),
        }
    }

    /// The name accepted in the `sort_by` query parameter.
    pub fn key(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "created_at",
            SortBy::Topic => "topic",
            SortBy::CommentCount => "comment_count",
            SortBy::Author => "author",
            SortBy::Title => "title",
            SortBy::ArticleId => "article_id",
            SortBy::Votes => "votes",
        }
    }

    /// The expression placed in `ORDER BY`. Only ever one of these literals.
    pub fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "articles.created_at",
            SortBy::Topic => "articles.topic",
            SortBy::CommentCount => "comment_count",
            SortBy::Author => "articles.author",
            SortBy::Title => "articles.title",
            SortBy::ArticleId => "articles.article_id",
            SortBy::Votes => "articles.votes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    /// Case-sensitive: only `ASC` and `DESC` are accepted.
    pub fn parse(raw: Option<&str>) -> Result<Order, ParamError> {
        match raw {
            None => Ok(Order::default()),
            Some("ASC") => Ok(Order::Asc),
            Some("DESC") => Ok(Order::Desc),
            Some(_) => Err(ParamError::InvalidOrder),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort_by: SortBy,
    pub order: Order,
}

impl ArticleQuery {
    /// The topic is only checked for presence here; whether it names a real
    /// topic is decided after the listing query has run.
    pub fn parse(
        topic: Option<String>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<ArticleQuery, ParamError> {
        Ok(ArticleQuery {
            topic,
            sort_by: SortBy::parse(sort_by)?,
            order: Order::parse(order)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

fn non_empty_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}

impl NewComment {
    /// Needs non-empty `username` and `body` strings. Other fields are ignored.
    pub fn from_payload(payload: &Value) -> Result<NewComment, ParamError> {
        match (
            non_empty_str(payload, "username"),
            non_empty_str(payload, "body"),
        ) {
            (Some(username), Some(body)) => Ok(NewComment {
                username: username.to_owned(),
                body: body.to_owned(),
            }),
            _ => Err(ParamError::CommentFieldsMissing),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteChange {
    pub inc_votes: i32,
}

impl VoteChange {
    pub fn from_payload(payload: &Value) -> Result<VoteChange, ParamError> {
        let inc_votes = payload
            .get("inc_votes")
            .ok_or(ParamError::IncVotesMissing)?;
        inc_votes
            .as_i64()
            .and_then(|delta| i32::try_from(delta).ok())
            .map(|inc_votes| VoteChange { inc_votes })
            .ok_or(ParamError::IncVotesNotInteger)
    }
}
