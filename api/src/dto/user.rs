use rentals_core::domain::entities::{NewAccount, Role, UserChanges, UserFilter};
use rentals_shared::Pagination;
use serde::Deserialize;
use validator::Validate;

/// Account creation by an administrator; any role is accepted
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
}

impl From<CreateUserRequest> for NewAccount {
    fn from(request: CreateUserRequest) -> Self {
        NewAccount {
            email: request.email,
            name: Some(request.name),
            password: request.password,
            role: request.role,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(url)]
    pub photo: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        UserChanges {
            email: request.email,
            name: request.name,
            photo: request.photo,
        }
    }
}

/// Query string of `GET /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl UserQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            name: self.name.clone().filter(|n| !n.is_empty()),
        }
    }

    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.per_page),
        )
    }
}
