use rocket::serde::json::{Json, Value};
use serde_json::json;

/// Describes every route the API serves.
pub fn describe() -> Value {
    json!({
        "GET /api": {
            "description": "serves up a json representation of all the available endpoints of the api"
        },
        "GET /api/healthcheck": {
            "description": "reports that the server is up",
            "exampleResponse": { "message": "healthy" }
        },
        "GET /api/topics": {
            "description": "serves an array of all topics",
            "queries": [],
            "exampleResponse": {
                "topics": [{ "slug": "football", "description": "Footie!" }]
            }
        },
        "GET /api/articles": {
            "description": "serves an array of all articles, without their body",
            "queries": ["topic", "sort_by", "order"],
            "exampleResponse": {
                "articles": [{
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                    "comment_count": 6
                }]
            }
        },
        "GET /api/articles/:article_id": {
            "description": "serves a single article including its body and comment count",
            "queries": [],
            "exampleResponse": {
                "article": {
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 0,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700",
                    "comment_count": 6
                }
            }
        },
        "PATCH /api/articles/:article_id": {
            "description": "adds inc_votes to the article's votes and serves the updated article",
            "exampleRequest": { "inc_votes": 1 },
            "exampleResponse": {
                "article": {
                    "article_id": 1,
                    "title": "Seafood substitutions are increasing",
                    "topic": "cooking",
                    "author": "weegembump",
                    "body": "Text from the article..",
                    "created_at": "2018-05-30T15:59:13.341Z",
                    "votes": 1,
                    "article_img_url": "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700"
                }
            }
        },
        "GET /api/articles/:article_id/comments": {
            "description": "serves the comments of an article, newest first",
            "queries": [],
            "exampleResponse": {
                "comments": [{
                    "comment_id": 5,
                    "votes": 0,
                    "created_at": "2020-11-03T21:00:00.000Z",
                    "author": "icellusedkars",
                    "body": "I hate streaming noses",
                    "article_id": 1
                }]
            }
        },
        "POST /api/articles/:article_id/comments": {
            "description": "adds a comment to an article and serves it back",
            "exampleRequest": { "username": "icellusedkars", "body": "I hate streaming noses" },
            "exampleResponse": {
                "comment": {
                    "article_id": 1,
                    "author": "icellusedkars",
                    "body": "I hate streaming noses",
                    "comment_id": 19,
                    "created_at": "2020-11-03T21:00:00.000Z",
                    "votes": 0
                }
            }
        },
        "DELETE /api/comments/:comment_id": {
            "description": "deletes a comment, responding 204 with no body"
        },
        "GET /api/users": {
            "description": "serves an array of all users",
            "queries": [],
            "exampleResponse": {
                "users": [{
                    "username": "butter_bridge",
                    "name": "jonny",
                    "avatar_url": "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg"
                }]
            }
        }
    })
}

#[get("/")]
pub fn index() -> Json<Value> {
    Json(json!({ "endpoints": describe() }))
}

#[get("/healthcheck")]
pub fn healthcheck() -> Json<Value> {
    Json(json!({ "message": "healthy" }))
}
