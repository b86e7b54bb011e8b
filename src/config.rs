//! API credentials, resolved from arguments, environment, or files.

use std::fmt;
use std::fs;

use crate::constants::{
    ENV_CLIENT, ENV_CLIENT_FILE, ENV_TOKEN, ENV_TOKEN_FILE, HEADER_CLIENT, HEADER_TOKEN, MASK_TOKEN,
    STATUS_BAD_REQUEST,
};
use crate::error::ApiError;

/// Token and client name sent with every API request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    client: String,
}

impl Credentials {
    #[must_use]
    pub fn new(token: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: client.into(),
        }
    }

    /// Resolve credentials from the process environment
    ///
    /// Each value is taken from the explicit argument if given, else from
    /// `ZONT_API_TOKEN` / `ZONT_API_CLIENT`, else from the first line of the file
    /// named by `ZONT_API_TOKEN_FILE` / `ZONT_API_CLIENT_FILE`.
    ///
    /// # Errors
    /// Status 400 when the token or client cannot be found or its file cannot be read.
    pub fn resolve(token: Option<String>, client: Option<String>) -> Result<Self, ApiError> {
        Self::resolve_with(token, client, |name| std::env::var(name).ok())
    }

    /// [`Credentials::resolve`] with a custom environment lookup
    ///
    /// # Errors
    /// Same as [`Credentials::resolve`].
    pub fn resolve_with<F>(
        token: Option<String>,
        client: Option<String>,
        env: F,
    ) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(token, ENV_TOKEN, ENV_TOKEN_FILE, &env)?.ok_or_else(|| {
            ApiError::new("token not provided", STATUS_BAD_REQUEST).with_description(format!(
                "Token must be provided either explicitly, or via {ENV_TOKEN} environment \
                 variable, or via file pointed via {ENV_TOKEN_FILE} environment variable"
            ))
        })?;

        let client = lookup(client, ENV_CLIENT, ENV_CLIENT_FILE, &env)?.ok_or_else(|| {
            ApiError::new("client not provided", STATUS_BAD_REQUEST).with_description(format!(
                "Client must be provided either explicitly or via {ENV_CLIENT} environment \
                 variable, or via file pointed via {ENV_CLIENT_FILE} environment variable"
            ))
        })?;

        Ok(Self { token, client })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Request headers identifying this library and authenticating the client
    #[must_use]
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_owned(), user_agent()),
            (HEADER_CLIENT.to_owned(), self.client.clone()),
            (HEADER_TOKEN.to_owned(), self.token.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &MASK_TOKEN)
            .field("client", &self.client)
            .finish()
    }
}

pub(crate) fn user_agent() -> String {
    format!("zont_api/{}", env!("CARGO_PKG_VERSION"))
}

/// Explicit value, then environment variable, then first line of the named file
fn lookup<F>(
    explicit: Option<String>,
    var: &str,
    file_var: &str,
    env: &F,
) -> Result<Option<String>, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        return Ok(Some(value));
    }
    if let Some(value) = env(var).filter(|v| !v.is_empty()) {
        return Ok(Some(value));
    }
    let Some(path) = env(file_var).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        ApiError::new(format!("cannot read {file_var}"), STATUS_BAD_REQUEST)
            .with_description(format!("{path}: {e}"))
    })?;
    let first_line = contents.split('\n').next().unwrap_or_default();
    Ok(Some(first_line.to_owned()).filter(|v| !v.is_empty()))
}
