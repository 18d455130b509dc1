use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "key", alias = "access")]
    pub token: String,
}

/// The signed-in user as persisted in browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_common_token_keys() {
        for body in [r#"{"token":"t1"}"#, r#"{"key":"t1"}"#, r#"{"access":"t1","refresh":"r"}"#] {
            let parsed: LoginResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed.token, "t1");
        }
    }
}
