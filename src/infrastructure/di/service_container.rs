//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{BookmarkService, PolicyService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::csv_source::{parse_delimiter, CsvRowSource};
use crate::infrastructure::http::ReqwestClient;
use crate::infrastructure::token::{CommandToken, StaticToken};
use crate::infrastructure::traits::{
    CommandRunner, HttpClient, Prompter, RealCommandRunner, TerminalPrompter, TokenProvider,
};
use crate::infrastructure::InfraResult;

/// Container holding the settings and the I/O boundary implementations.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// HTTP client for the policy API
    pub http: Arc<dyn HttpClient>,

    /// Access token source
    pub token: Arc<dyn TokenProvider>,

    /// Confirmation prompt
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let http = ReqwestClient::new(Duration::from_secs(settings.timeout_secs))?;
        let token = token_provider(&settings, Arc::new(RealCommandRunner));
        Ok(Self::with_deps(
            settings,
            Arc::new(http),
            token,
            Arc::new(TerminalPrompter),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        http: Arc<dyn HttpClient>,
        token: Arc<dyn TokenProvider>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            http,
            token,
            prompter,
        }
    }

    pub fn bookmark_service(&self) -> ApplicationResult<BookmarkService> {
        BookmarkService::new(&self.settings.separator, self.settings.toplevel_name.as_str())
    }

    pub fn policy_service(&self) -> PolicyService {
        PolicyService::new(
            self.token.clone(),
            self.http.clone(),
            self.settings.api_base_url.as_str(),
            self.settings.customer.as_str(),
            self.settings.policy_schema.as_str(),
        )
    }

    /// Row source for `input` using the configured delimiter.
    pub fn row_source(&self, input: &Path) -> ApplicationResult<CsvRowSource> {
        let delimiter = parse_delimiter(&self.settings.delimiter)
            .map_err(|message| ApplicationError::Config { message })?;
        Ok(CsvRowSource::new(input, delimiter))
    }
}

/// Static token when one is configured, otherwise the token command.
pub fn token_provider(
    settings: &Settings,
    runner: Arc<dyn CommandRunner>,
) -> Arc<dyn TokenProvider> {
    match settings.access_token.as_deref() {
        Some(token) if !token.trim().is_empty() => Arc::new(StaticToken::new(token)),
        _ => Arc::new(CommandToken::new(runner, settings.token_command.as_str())),
    }
}
