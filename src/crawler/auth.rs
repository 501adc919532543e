//! Moving the shared session between authentication phases
//!
//! Authentication happens outside the crawl: the session logs in before the
//! `after_login` phase and logs out before `after_logout`, and the crawler is
//! simply handed a browser that is already in the right state.

use crate::config::AuthConfig;
use crate::crawler::browser::Browser;
use crate::crawler::fetcher::HttpBrowser;
use crate::SweepError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Something that can log a browser session in and out
#[async_trait]
pub trait Authenticator<B: Browser + ?Sized>: Send {
    /// Authenticates the session; failure ends the session
    async fn login(&mut self, browser: &mut B) -> Result<(), SweepError>;

    /// Drops the authentication; callers may tolerate failure
    async fn logout(&mut self, browser: &mut B) -> Result<(), SweepError>;
}

/// Authenticator for sessions without an `[auth]` section
///
/// Both operations succeed without touching the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl<B: Browser + ?Sized> Authenticator<B> for NoAuth {
    async fn login(&mut self, _browser: &mut B) -> Result<(), SweepError> {
        tracing::debug!("No [auth] section, login skipped");
        Ok(())
    }

    async fn logout(&mut self, _browser: &mut B) -> Result<(), SweepError> {
        tracing::debug!("No [auth] section, logout skipped");
        Ok(())
    }
}

/// HTML form login over the HTTP browser's cookie jar
///
/// Posts the credentials as `application/x-www-form-urlencoded`. The session
/// cookies set by the response stay in the browser's jar for every later
/// navigation.
#[derive(Debug, Clone)]
pub struct FormLogin {
    login_url: Url,
    logout_url: Option<Url>,
    email_field: String,
    password_field: String,
    email: String,
    password: String,
    success_path: Option<String>,
    timeout: Duration,
}

impl FormLogin {
    pub fn new(config: &AuthConfig, timeout: Duration) -> Result<Self, SweepError> {
        let login_url = Url::parse(&config.login_url)
            .map_err(|e| SweepError::Auth(format!("invalid login-url: {}", e)))?;
        let logout_url = config
            .logout_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| SweepError::Auth(format!("invalid logout-url: {}", e)))?;

        Ok(Self {
            login_url,
            logout_url,
            email_field: config.email_field.clone(),
            password_field: config.password_field.clone(),
            email: config.email.clone(),
            password: config.password.clone(),
            success_path: config.success_path.clone(),
            timeout,
        })
    }
}

#[async_trait]
impl Authenticator<HttpBrowser> for FormLogin {
    async fn login(&mut self, browser: &mut HttpBrowser) -> Result<(), SweepError> {
        tracing::info!("Logging in at {}", self.login_url);

        let form = [
            (self.email_field.as_str(), self.email.as_str()),
            (self.password_field.as_str(), self.password.as_str()),
        ];

        let response = browser
            .client()
            .post(self.login_url.clone())
            .form(&form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SweepError::Auth(format!("login request failed: {}", e)))?;

        let navigation = browser
            .load_response(response)
            .await
            .map_err(|e| SweepError::Auth(e.to_string()))?;

        if navigation.status >= 400 {
            return Err(SweepError::Auth(format!(
                "login answered HTTP {}",
                navigation.status
            )));
        }

        if let Some(path) = &self.success_path {
            if !navigation.final_url.path().starts_with(path.as_str()) {
                return Err(SweepError::Auth(format!(
                    "login landed on {} instead of {}",
                    navigation.final_url.path(),
                    path
                )));
            }
        }

        tracing::info!("Logged in, landed on {}", navigation.final_url);
        Ok(())
    }

    async fn logout(&mut self, browser: &mut HttpBrowser) -> Result<(), SweepError> {
        let Some(logout_url) = &self.logout_url else {
            return Err(SweepError::Auth("no logout-url configured".to_string()));
        };

        tracing::info!("Logging out at {}", logout_url);
        let navigation = browser
            .navigate(logout_url, self.timeout)
            .await
            .map_err(|e| SweepError::Auth(e.to_string()))?;

        if navigation.status >= 400 {
            return Err(SweepError::Auth(format!(
                "logout answered HTTP {}",
                navigation.status
            )));
        }

        Ok(())
    }
}
