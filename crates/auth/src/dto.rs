use super::*;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub user_type: Class,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub token: String,
}

/// `userId` and `userType` are empty whenever `isValid` is false.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
    pub user_id: String,
    pub user_type: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.principal().id().to_string(),
            user_type: session.principal().class(),
            token: session.token().to_string(),
        }
    }
}

impl From<Option<Claims>> for ValidateResponse {
    fn from(claims: Option<Claims>) -> Self {
        claims
            .map(|claims| Self {
                is_valid: true,
                user_id: claims.subject().to_string(),
                user_type: claims.class().to_string(),
            })
            .unwrap_or_default()
    }
}
