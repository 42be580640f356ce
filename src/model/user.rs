use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
}

/// Minimal user information attached to bookings
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSummaryDto {
    pub id: i32,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}
