use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record.
///
/// The id is assigned by whoever builds the value (the API layer for new
/// users) and is never changed afterwards. The same struct is read from and
/// inserted into the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
}

impl User {
    pub fn new(id: Uuid, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}
