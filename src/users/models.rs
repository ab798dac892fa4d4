use diesel::prelude::*;
use diesel::pg::PgConnection;
use serde::{Deserialize, Serialize};

use crate::db::schema::users;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Deserialize, Serialize)]
#[diesel(table_name = users, primary_key(username))]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

impl User {
    pub fn load_all(connection: &mut PgConnection) -> QueryResult<Vec<User>> {
        users::table
            .select(User::as_select())
            .order(users::username.asc())
            .load(connection)
    }
}
