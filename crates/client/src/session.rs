//! The signed-in user.

use serde::{Deserialize, Serialize};

use lunnar_core::UserId;

/// Prefix of tokens minted by the client for offline logins.
pub const LOCAL_TOKEN_PREFIX: &str = "lt_";

/// Current session, persisted in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    /// Server bearer token, or a local `lt_` token after an offline login.
    pub token: String,
}

impl Session {
    /// Whether this session came from an offline login.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.token.starts_with(LOCAL_TOKEN_PREFIX)
    }

    /// The bearer token for server calls, if the server issued one.
    #[must_use]
    pub fn server_token(&self) -> Option<&str> {
        (!self.is_local()).then_some(self.token.as_str())
    }
}

/// Local token of the form `lt_<userId>_<base36 millis>`.
#[must_use]
pub fn local_token(user_id: &UserId, millis: i64) -> String {
    format!("{LOCAL_TOKEN_PREFIX}{user_id}_{}", to_base36(millis.unsigned_abs()))
}

fn to_base36(mut n: u64) -> String {
    let mut digits = Vec::new();
    loop {
        let digit = u32::try_from(n % 36).unwrap_or_default();
        digits.extend(char::from_digit(digit, 36));
        n /= 36;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: &str) -> Session {
        Session {
            user_id: UserId::new("user_1"),
            username: "anna".to_string(),
            email: "anna@lunnar.hu".to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_714_557_600_000), "lvnnbr40");
    }

    #[test]
    fn test_local_token_shape() {
        let token = local_token(&UserId::new("user_1"), 36);
        assert_eq!(token, "lt_user_1_10");
    }

    #[test]
    fn test_server_token_only_for_remote_sessions() {
        assert_eq!(session("eyJhbGciOi").server_token(), Some("eyJhbGciOi"));
        assert!(session("lt_user_1_10").is_local());
        assert_eq!(session("lt_user_1_10").server_token(), None);
    }
}
