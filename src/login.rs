//! Login stub.
//!
//! There is no validation here: whatever the [`AuthProvider`] returns is
//! trusted, and the bundled provider accepts everything.

use crate::backend::{AuthProvider, Credentials, UserProfile};
use crate::error::Result;

/// Which variant of the form is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMode {
    #[default]
    SignIn,
    SignUp,
}

impl LoginMode {
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "Let's Get you Logged in",
            Self::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Login",
            Self::SignUp => "Sign Up",
        }
    }

    #[must_use]
    pub fn google_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In with Google",
            Self::SignUp => "Sign Up with Google",
        }
    }

    /// Prompt and link text of the mode switch.
    #[must_use]
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::SignIn => ("Don’t have an account?", "Sign Up"),
            Self::SignUp => ("Already have an account?", "Login"),
        }
    }
}

/// Login form state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: LoginMode,
}

impl LoginForm {
    pub fn toggle_mode(&mut self) -> LoginMode {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
        self.mode
    }

    /// Whether the full-name field is shown.
    #[must_use]
    pub fn shows_name_field(&self) -> bool {
        self.mode == LoginMode::SignUp
    }
}

/// Where a successful sign-in lands.
pub const AUTHENTICATED_PATH: &str = "/dashboard";

/// Hand the credentials to `auth` and return the profile and landing path.
pub async fn submit(
    auth: &dyn AuthProvider,
    credentials: &Credentials,
) -> Result<(UserProfile, &'static str)> {
    let profile = auth.authenticate(credentials).await?;
    tracing::info!(
        name: "auth.signed_in",
        user = %profile.name,
        landing = AUTHENTICATED_PATH,
        "Visitor signed in"
    );
    Ok((profile, AUTHENTICATED_PATH))
}
