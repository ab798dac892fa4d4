use chrono::{NaiveDateTime, SecondsFormat};
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::content::RawJson;
use rocket::response::{self, status, Responder};
use serde::Serializer;
use serde_json::{self, Value};

/// Responds with `body` as JSON under `code`.
pub fn json_response<'r>(req: &'r Request<'_>, body: &Value, code: Status) -> response::Result<'static> {
    let body = serde_json::to_string(body).map_err(|_| Status::InternalServerError)?;
    status::Custom(code, RawJson(body)).respond_to(req)
}

/// Timestamps are stored without a zone and always mean UTC.
pub fn serialize_date<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = date.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true);
    serializer.serialize_str(&s)
}
