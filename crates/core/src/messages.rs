//! User-facing notification texts

/// Success text and fallback failure text for one account action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionMessages {
    pub success: &'static str,
    pub failure: &'static str,
}

pub const LOGIN: ActionMessages = ActionMessages {
    success: "Login successful!",
    failure: "Login failed",
};

pub const REGISTER: ActionMessages = ActionMessages {
    success: "Registration successful! Please check your email for verification.",
    failure: "Registration failed",
};

pub const GOOGLE_AUTH: ActionMessages = ActionMessages {
    success: "Google authentication successful!",
    failure: "Google authentication failed",
};

pub const FORGOT_PASSWORD: ActionMessages = ActionMessages {
    success: "Password reset link sent to your email!",
    failure: "Failed to send reset email",
};

pub const RESET_PASSWORD: ActionMessages = ActionMessages {
    success: "Password reset successful!",
    failure: "Failed to reset password",
};

pub const VERIFY_EMAIL: ActionMessages = ActionMessages {
    success: "Email verified successfully!",
    failure: "Email verification failed",
};

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";
