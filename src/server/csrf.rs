// src/server/csrf.rs

use tracing::debug;

pub const DEFAULT_COOKIE_NAME: &str = "csrftoken";
pub const COOKIE_ENV_VAR: &str = "ROWDECK_COOKIE";

/// Reads the anti-forgery token out of a `Cookie` header string. Shared by
/// every view's mutation client.
#[derive(Clone, Debug)]
pub struct CsrfTokenProvider {
    cookie_name: String,
    cookies: Option<String>,
}

impl CsrfTokenProvider {
    pub fn new(cookie_name: &str, cookies: Option<String>) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
            cookies,
        }
    }

    /// Cookies from config, or from `ROWDECK_COOKIE` when config has none.
    pub fn from_env_or(cookie_name: &str, configured: Option<String>) -> Self {
        let cookies = configured.or_else(|| std::env::var(COOKIE_ENV_VAR).ok());
        if cookies.is_none() {
            debug!("No cookie string configured; requests will carry no CSRF token");
        }
        Self::new(cookie_name, cookies)
    }

    pub fn cookie_header(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    pub fn token(&self) -> Option<String> {
        let cookies = self.cookies.as_deref()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == self.cookie_name).then(|| value.to_string())
        })
    }
}
