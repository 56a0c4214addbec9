//! Pluggable login backends.
//!
//! Backends form a chain. Each one sees the user produced so far and either
//! passes a (possibly different) user on or cancels the login. Session and
//! cookie handling live outside this crate.

use crate::config::{AuthMethodConfig, Config, GivenAuthConfig};
use crate::models::{User, UserDirectory};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Could not create user {0}")]
    CreateFailed(String),
}

/// Form input of one login attempt
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginAttempt<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    /// Only the backend with this name handles the attempt
    pub stage: Option<&'a str>,
}

/// What a backend decided
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Continue {
        user: Option<User>,
        message: Option<String>,
    },
    Cancel {
        message: Option<String>,
    },
}

impl LoginOutcome {
    pub fn pass(user: Option<User>) -> Self {
        LoginOutcome::Continue {
            user,
            message: None,
        }
    }
}

/// Final state after running the chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginResult {
    pub user: Option<User>,
    pub messages: Vec<String>,
}

pub trait AuthMethod: Send + Sync {
    fn name(&self) -> &str;

    /// Form inputs this backend needs
    fn login_inputs(&self) -> &'static [&'static str] {
        &[]
    }

    /// Handle a login form submission
    fn login(
        &self,
        current: Option<User>,
        _attempt: &LoginAttempt<'_>,
        _users: &dyn UserDirectory,
    ) -> LoginOutcome {
        LoginOutcome::pass(current)
    }

    /// Authenticate from request data on every request
    fn request(
        &self,
        current: Option<User>,
        _remote_user: Option<&str>,
        _users: &dyn UserDirectory,
    ) -> Option<User> {
        current
    }
}

/// Username/password check against the user directory
#[derive(Debug, Clone, Default)]
pub struct MoinAuth;

impl AuthMethod for MoinAuth {
    fn name(&self) -> &str {
        "moin"
    }

    fn login_inputs(&self) -> &'static [&'static str] {
        &["username", "password"]
    }

    fn login(
        &self,
        current: Option<User>,
        attempt: &LoginAttempt<'_>,
        users: &dyn UserDirectory,
    ) -> LoginOutcome {
        let (username, password) = (attempt.username.unwrap_or(""), attempt.password.unwrap_or(""));
        if username.is_empty() && password.is_empty() {
            return LoginOutcome::pass(current);
        }

        let user = users
            .by_name(username)
            .filter(|_| users.check_password(username, password));
        match user {
            Some(mut user) => {
                info!("User {} logged in", user.name);
                user.valid = true;
                user.auth_method = Some(self.name().to_string());
                LoginOutcome::pass(Some(user))
            }
            None => {
                debug!("Rejected login for {username:?}");
                LoginOutcome::Continue {
                    user: current,
                    message: Some(AuthError::InvalidCredentials.to_string()),
                }
            }
        }
    }
}

/// Trusts a username already authenticated by the web server
#[derive(Debug, Clone, Default)]
pub struct GivenAuth {
    pub options: GivenAuthConfig,
}

impl GivenAuth {
    pub fn new(options: GivenAuthConfig) -> Self {
        Self { options }
    }

    /// Apply the configured domain stripping and case/blank normalization.
    ///
    /// ```
    /// use wikiref_core::auth::GivenAuth;
    /// use wikiref_core::config::GivenAuthConfig;
    ///
    /// let auth = GivenAuth::new(GivenAuthConfig {
    ///     strip_maildomain: true,
    ///     strip_windomain: true,
    ///     titlecase: true,
    ///     remove_blanks: true,
    ///     autocreate: false,
    /// });
    /// assert_eq!(auth.transform_username("testDomain\\test name@moinmoin.org"), "TestName");
    /// ```
    pub fn transform_username(&self, name: &str) -> String {
        let mut name = name;
        if self.options.strip_maildomain {
            name = name.split('@').next().unwrap_or(name);
        }
        if self.options.strip_windomain {
            name = name.rsplit('\\').next().unwrap_or(name);
        }

        let mut name = name.to_string();
        if self.options.titlecase {
            name = name
                .split_whitespace()
                .map(titlecase_word)
                .collect::<Vec<_>>()
                .join(" ");
        }
        if self.options.remove_blanks {
            name = name.split_whitespace().collect();
        }
        name
    }

    fn lookup(&self, name: &str, users: &dyn UserDirectory) -> Result<User, AuthError> {
        if let Some(user) = users.by_name(name) {
            return Ok(user);
        }
        if self.options.autocreate {
            info!("Creating user {name} for given login");
            return users
                .create(name)
                .ok_or_else(|| AuthError::CreateFailed(name.to_string()));
        }
        Err(AuthError::InvalidCredentials)
    }
}

impl AuthMethod for GivenAuth {
    fn name(&self) -> &str {
        "given"
    }

    fn login_inputs(&self) -> &'static [&'static str] {
        &["special_no_input"]
    }

    fn request(
        &self,
        current: Option<User>,
        remote_user: Option<&str>,
        users: &dyn UserDirectory,
    ) -> Option<User> {
        // always revalidate our own logins
        let current = current.filter(|u| u.auth_method.as_deref() != Some(self.name()));
        if current.is_some() {
            return current;
        }

        let name = self.transform_username(remote_user?);
        if name.is_empty() {
            return None;
        }

        match self.lookup(&name, users) {
            Ok(mut user) => {
                user.valid = true;
                user.auth_method = Some(self.name().to_string());
                Some(user)
            }
            Err(err) => {
                debug!("Given user {name:?} not accepted: {err}");
                None
            }
        }
    }
}

/// Uppercase letters that follow a non-letter, lowercase the rest
fn titlecase_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alpha = false;
    for c in word.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

/// Build the backend chain described by the configuration
pub fn methods_from_config(config: &Config) -> Vec<Box<dyn AuthMethod>> {
    config
        .auth
        .methods
        .iter()
        .map(|method| -> Box<dyn AuthMethod> {
            match method {
                AuthMethodConfig::Moin => Box::new(MoinAuth),
                AuthMethodConfig::Given(options) => Box::new(GivenAuth::new(options.clone())),
            }
        })
        .collect()
}

/// Run a login attempt through the chain, collecting user-facing messages
pub fn handle_login(
    methods: &[Box<dyn AuthMethod>],
    current: Option<User>,
    attempt: &LoginAttempt<'_>,
    users: &dyn UserDirectory,
) -> LoginResult {
    let mut result = LoginResult {
        user: current,
        messages: Vec::new(),
    };

    for method in methods {
        if attempt.stage.is_some_and(|stage| stage != method.name()) {
            continue;
        }
        match method.login(result.user.take(), attempt, users) {
            LoginOutcome::Continue { user, message } => {
                result.user = user;
                result.messages.extend(message);
            }
            LoginOutcome::Cancel { message } => {
                result.messages.extend(message);
                break;
            }
        }
    }

    result
}

/// Per-request authentication through the chain
pub fn handle_request(
    methods: &[Box<dyn AuthMethod>],
    current: Option<User>,
    remote_user: Option<&str>,
    users: &dyn UserDirectory,
) -> Option<User> {
    methods
        .iter()
        .fold(current, |user, method| method.request(user, remote_user, users))
}
