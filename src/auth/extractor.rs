use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::{self, User};

/// Resolves the Basic-Auth credentials on the request to a stored user.
/// Handlers that take this extractor are authenticated; the wrapped `User`
/// is the request identity.
pub struct AuthUser(pub User);

/// Splits a `Basic <base64(name:pass)>` header into its credential pair.
pub(crate) fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header
        .strip_prefix("Basic ")
        .or_else(|| header.strip_prefix("basic "))?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, pass) = decoded.split_once(':')?;
    Some((name.to_string(), pass.to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let Some((username, password)) = header.and_then(parse_basic) else {
            warn!("missing or malformed basic credentials");
            return Err(ApiError::Unauthorized(
                "Please enter your username and password".into(),
            ));
        };

        // The response stays generic past this point; only the server log says
        // whether the username or the password was wrong. The password itself
        // is never logged.
        let user = match repo::find_by_email(&state.db, &username).await? {
            Some(u) => u,
            None => {
                warn!(username = %username, "authentication failure: user not found");
                return Err(ApiError::Unauthorized("Invalid credentials".into()));
            }
        };

        if !verify_password(&password, &user.password_hash)? {
            warn!(username = %username, "authentication failure: bad credentials");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }

        debug!(user_id = user.id, username = %username, "authentication successful");
        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    fn basic(name: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{name}:{pass}")))
    }

    #[test]
    fn parses_well_formed_header() {
        let header = basic("joe@x.com", "longenough1");
        let (name, pass) = parse_basic(&header).unwrap();
        assert_eq!(name, "joe@x.com");
        assert_eq!(pass, "longenough1");
    }

    #[test]
    fn password_may_contain_colons() {
        let header = basic("joe@x.com", "pa:ss:word");
        let (_, pass) = parse_basic(&header).unwrap();
        assert_eq!(pass, "pa:ss:word");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(parse_basic("Bearer abc.def.ghi").is_none());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(parse_basic("Basic !!!not-base64!!!").is_none());
    }

    #[test]
    fn rejects_payload_without_colon() {
        let header = format!("Basic {}", STANDARD.encode("no-separator"));
        assert!(parse_basic(&header).is_none());
    }
}
