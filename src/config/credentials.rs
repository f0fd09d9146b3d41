use super::ConfigError;
use std::fmt;

pub const USERNAME_ENV: &str = "QUALYS_USERNAME";
pub const PASSWORD_ENV: &str = "QUALYS_PASSWORD";

/// HTTP basic auth pair. The password never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Source of API credentials, resolved when a client is built
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials, ConfigError>;
}

/// Credentials known up front (command line, tests)
#[derive(Debug, Clone)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self(Credentials::new(username, password))
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        validate(self.0.clone())
    }
}

/// Reads credentials from environment variables on demand
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username_var: String,
    password_var: String,
}

impl EnvCredentials {
    pub fn new(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(USERNAME_ENV, PASSWORD_ENV)
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, ConfigError> {
        let read = |var: &str| {
            std::env::var(var).map_err(|_| ConfigError::MissingCredential(var.to_string()))
        };

        validate(Credentials::new(
            read(&self.username_var)?,
            read(&self.password_var)?,
        ))
    }
}

fn validate(credentials: Credentials) -> Result<Credentials, ConfigError> {
    if credentials.username.trim().is_empty() {
        return Err(ConfigError::MissingCredential("username".to_string()));
    }
    if credentials.password.is_empty() {
        return Err(ConfigError::MissingCredential("password".to_string()));
    }
    Ok(credentials)
}
