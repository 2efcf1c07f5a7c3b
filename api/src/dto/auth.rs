use rentals_core::domain::entities::{NewAccount, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
}

impl From<SignupRequest> for NewAccount {
    fn from(request: SignupRequest) -> Self {
        NewAccount {
            email: request.email,
            name: Some(request.name),
            password: request.password,
            role: request.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
