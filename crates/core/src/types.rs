//! Wire types for the auth endpoints

use crate::session::UserProfile;
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const GOOGLE_AUTH_PATH: &str = "/auth/google";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const VERIFY_EMAIL_PATH: &str = "/auth/verify-email";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `/auth/google` and `/auth/verify-email`
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

/// Response of every endpoint that starts a session
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: UserProfile,
}
