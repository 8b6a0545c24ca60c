use serde::{Deserialize, Serialize};

/// JWT payload binding a caller to a user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: i64,          // user ID
    pub username: String, // username at issuance
    pub exp: usize,       // expires at (unix timestamp)
}
