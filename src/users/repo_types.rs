use sqlx::FromRow;

/// User record as read back from a store. The password never leaves the
/// store layer, so it is not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}
