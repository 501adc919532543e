use crate::config::types::{
    AuthConfig, Config, CrawlerConfig, OutputConfig, PhaseEntry, UserAgentConfig,
};
use crate::state::Phase;
use crate::url::DomainScope;
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    if let Some(auth) = &config.auth {
        validate_auth_config(auth)?;
    }
    validate_phases(config)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be >= 100ms, got {}ms",
            config.navigation_timeout_ms
        )));
    }

    if let Some(base_url) = &config.base_url {
        parse_http_url("base-url", base_url)?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_dir.is_empty() {
        return Err(ConfigError::Validation(
            "report_dir cannot be empty".to_string(),
        ));
    }

    if config.report_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "report_prefix cannot be empty".to_string(),
        ));
    }

    if config.formats.is_empty() {
        return Err(ConfigError::Validation(
            "at least one report format is required".to_string(),
        ));
    }

    Ok(())
}

/// Validates the login form settings
fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    parse_http_url("login-url", &config.login_url)?;

    if let Some(logout_url) = &config.logout_url {
        parse_http_url("logout-url", logout_url)?;
    }

    if config.email_field.is_empty() || config.password_field.is_empty() {
        return Err(ConfigError::Validation(
            "email_field and password_field cannot be empty".to_string(),
        ));
    }

    if config.email.is_empty() {
        return Err(ConfigError::Validation(
            "auth email cannot be empty".to_string(),
        ));
    }

    if let Some(path) = &config.success_path {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "success_path must start with '/', got '{}'",
                path
            )));
        }
    }

    Ok(())
}

/// Validates phases, their seeds and the domain scope they share
fn validate_phases(config: &Config) -> Result<(), ConfigError> {
    if config.phases.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[phase]] is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in &config.phases {
        if !seen.insert(entry.name) {
            return Err(ConfigError::Validation(format!(
                "phase '{}' is configured more than once",
                entry.name
            )));
        }
    }

    if seen.contains(&Phase::AfterLogin) && config.auth.is_none() {
        return Err(ConfigError::Validation(
            "phase 'after_login' requires an [auth] section".to_string(),
        ));
    }

    let scope_url = config
        .scope_url()
        .ok_or_else(|| ConfigError::Validation("no base-url and no seeds".to_string()))?;
    let scope = DomainScope::parse(scope_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid scope URL '{}': {}", scope_url, e)))?;

    for entry in &config.phases {
        validate_phase_seeds(entry, &scope)?;
    }

    Ok(())
}

fn validate_phase_seeds(entry: &PhaseEntry, scope: &DomainScope) -> Result<(), ConfigError> {
    if entry.seeds.is_empty() {
        return Err(ConfigError::Validation(format!(
            "phase '{}' must have at least one seed URL",
            entry.name
        )));
    }

    for seed in &entry.seeds {
        let url = parse_http_url("seed", seed)?;
        if !scope.contains(&url) {
            return Err(ConfigError::Validation(format!(
                "seed '{}' of phase '{}' is outside the crawl scope {}",
                seed, entry.name, scope
            )));
        }
    }

    Ok(())
}

fn parse_http_url(what: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use HTTP or HTTPS",
            what, value
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            what, value
        )));
    }

    Ok(url)
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
