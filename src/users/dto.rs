use serde::{Deserialize, Serialize};

/// POST /api/users body. Fields are optional at the wire level so the
/// validator can report every missing field instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// GET /api/users body: the authenticated identity's profile.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub name: String,
    pub email: String,
}
