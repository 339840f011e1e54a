use serde::Deserialize;
use web_sys::window;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Signed-in user as stored by the login page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Get the signed-in user from localStorage
pub fn get_current_user() -> Option<StoredUser> {
    let raw = get_local_storage()?.get_item(USER_KEY).ok()??;
    parse_user(&raw)
}

/// Company the reports are scoped to
pub fn current_company_id() -> Option<i64> {
    get_current_user()?.company_id
}

fn parse_user(raw: &str) -> Option<StoredUser> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("ignoring malformed stored user: {}", e);
            None
        }
    }
}

/// Forget the session (token and user)
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user() {
        let user = parse_user(r#"{"id": 3, "username": "ops", "company_id": 1, "role": "admin"}"#).unwrap();
        assert_eq!(user.company_id, Some(1));
        assert_eq!(user.username.as_deref(), Some("ops"));

        assert_eq!(parse_user("{}").unwrap().company_id, None);
        assert!(parse_user("not json").is_none());
    }
}
