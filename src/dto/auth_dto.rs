use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::role::Role;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(range(min = 1, max = 2))]
    pub role: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpPayload {
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthUserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
}

impl From<&User> for AuthUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            // role ids outside the seeded set cannot be persisted
            role: Role::from_id(user.role_id).unwrap_or(Role::JobSeeker),
            is_verified: user.is_verified,
        }
    }
}
