//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/managed-bookmarks/config.toml`
//! 3. Explicit config file: `--config <PATH>`
//! 4. Environment variables: `MANAGED_BOOKMARKS__*` prefix
//! 5. Command line flags

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DomainError, OrgUnit};
use crate::infrastructure::csv_source::parse_delimiter;

/// Prefix of environment overrides, e.g. `MANAGED_BOOKMARKS__ORG_UNIT`.
pub const ENV_PREFIX: &str = "MANAGED_BOOKMARKS";

/// Unified configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Target org unit (`orgunits/<id>` or bare id)
    pub org_unit: String,
    /// Display name of the managed bookmarks folder
    pub toplevel_name: String,
    /// Separator between folder names in the path column
    pub separator: String,
    /// Input cell delimiter (single character or "tab")
    pub delimiter: String,
    /// Customer id in the API URL
    pub customer: String,
    /// Chrome Policy API base URL
    pub api_base_url: String,
    /// Policy schema receiving the bookmarks
    pub policy_schema: String,
    /// Bearer token; when unset `token_command` is run
    pub access_token: Option<String>,
    /// Command printing an access token on stdout
    pub token_command: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org_unit: "orgunits/my_customer".into(),
            toplevel_name: "Company Bookmarks".into(),
            separator: " > ".into(),
            delimiter: ",".into(),
            customer: "my_customer".into(),
            api_base_url: "https://chromepolicy.googleapis.com".into(),
            policy_schema: "chrome.users.ManagedBookmarks".into(),
            access_token: None,
            token_command: "gcloud auth print-access-token".into(),
            timeout_secs: 30,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub org_unit: Option<String>,
    pub toplevel_name: Option<String>,
    pub separator: Option<String>,
    pub delimiter: Option<String>,
    pub customer: Option<String>,
    pub api_base_url: Option<String>,
    pub policy_schema: Option<String>,
    pub access_token: Option<String>,
    pub token_command: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "managed-bookmarks").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let pick = |o: &Option<String>, base: &String| o.clone().unwrap_or_else(|| base.clone());
        Self {
            org_unit: pick(&overlay.org_unit, &self.org_unit),
            toplevel_name: pick(&overlay.toplevel_name, &self.toplevel_name),
            separator: pick(&overlay.separator, &self.separator),
            delimiter: pick(&overlay.delimiter, &self.delimiter),
            customer: pick(&overlay.customer, &self.customer),
            api_base_url: pick(&overlay.api_base_url, &self.api_base_url),
            policy_schema: pick(&overlay.policy_schema, &self.policy_schema),
            access_token: overlay
                .access_token
                .clone()
                .or_else(|| self.access_token.clone()),
            token_command: pick(&overlay.token_command, &self.token_command),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
        }
    }

    /// Expand `~` and `$VAR` in the token command.
    fn expand_paths(&mut self) {
        self.token_command = shellexpand::full(&self.token_command)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.token_command.clone());
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply MANAGED_BOOKMARKS__* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(config_err)?;

        let get = |key: &str| config.get_string(key).ok();
        let timeout_secs = match get("timeout_secs") {
            Some(val) => Some(val.parse::<u64>().map_err(|e| ApplicationError::Config {
                message: format!("{ENV_PREFIX}__TIMEOUT_SECS: {e}"),
            })?),
            None => None,
        };
        let raw = RawSettings {
            org_unit: get("org_unit"),
            toplevel_name: get("toplevel_name"),
            separator: get("separator"),
            delimiter: get("delimiter"),
            customer: get("customer"),
            api_base_url: get("api_base_url"),
            policy_schema: get("policy_schema"),
            access_token: get("access_token"),
            token_command: get("token_command"),
            timeout_secs,
        };

        Ok(settings.merge_with(&raw))
    }

    /// Check values that would only fail later, at build or push time.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.separator.is_empty() {
            return Err(DomainError::EmptySeparator.into());
        }
        self.org_unit()?;
        parse_delimiter(&self.delimiter).map_err(|message| ApplicationError::Config { message })?;
        if self.timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "timeout_secs must be greater than 0".into(),
            });
        }
        Ok(())
    }

    pub fn org_unit(&self) -> Result<OrgUnit, ApplicationError> {
        Ok(OrgUnit::parse(&self.org_unit)?)
    }

    /// Show the effective configuration as TOML, token masked.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        let mut shown = self.clone();
        if shown.access_token.is_some() {
            shown.access_token = Some("***".into());
        }
        toml::to_string_pretty(&shown).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# managed-bookmarks configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/managed-bookmarks/config.toml
#   Explicit: --config <PATH>
#   Env:      MANAGED_BOOKMARKS__* environment variables (e.g. MANAGED_BOOKMARKS__ORG_UNIT)
#   Flags:    --org-unit, --toplevel-name, --separator, --delimiter

# Org unit whose managed bookmarks get overwritten
# org_unit = "orgunits/my_customer"

# Name of the managed bookmarks folder shown in the browser
# toplevel_name = "Company Bookmarks"

# Separator between folder names in the path column (e.g. "HR > Benefits")
# separator = " > "

# Cell delimiter of the input file ("," or "tab")
# delimiter = ","

# customer = "my_customer"
# api_base_url = "https://chromepolicy.googleapis.com"
# policy_schema = "chrome.users.ManagedBookmarks"

# Bearer token; prefer MANAGED_BOOKMARKS__ACCESS_TOKEN over storing it here
# access_token = "ya29..."

# Command printing an access token when access_token is unset
# token_command = "gcloud auth print-access-token"

# timeout_secs = 30
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_validating_then_ok() {
        let settings = Settings::default();
        settings.validate().expect("defaults are valid");
        assert_eq!(settings.org_unit().unwrap().id(), "my_customer");
    }

    #[test]
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let merged = base.merge_with(&RawSettings {
            toplevel_name: Some("Intranet".into()),
            timeout_secs: Some(5),
            ..RawSettings::default()
        });

        assert_eq!(merged.toplevel_name, "Intranet");
        assert_eq!(merged.timeout_secs, 5);
        assert_eq!(merged.separator, base.separator);
        assert_eq!(merged.org_unit, base.org_unit);
    }

    #[test]
    fn given_empty_separator_when_validating_then_domain_error() {
        let settings = Settings {
            separator: String::new(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Domain(DomainError::EmptySeparator))
        ));
    }

    #[test]
    fn given_zero_timeout_when_validating_then_config_error() {
        let settings = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_access_token_when_showing_then_masked() {
        let settings = Settings {
            access_token: Some("secret".into()),
            ..Settings::default()
        };
        let shown = settings.to_toml().unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("access_token = \"***\""));
    }

    #[test]
    fn given_template_when_parsing_then_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.org_unit.is_none());
    }

    // tests touching MANAGED_BOOKMARKS__* share the process environment
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn given_env_var_and_explicit_file_when_loading_then_env_wins() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // Arrange
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.toml");
        std::fs::write(&path, "toplevel_name = \"File\"\nseparator = \"/\"\n").unwrap();
        std::env::set_var("MANAGED_BOOKMARKS__TOPLEVEL_NAME", "EnvName");

        // Act
        let result = Settings::load(Some(&path));

        // Cleanup
        std::env::remove_var("MANAGED_BOOKMARKS__TOPLEVEL_NAME");

        // Assert
        let settings = result.unwrap();
        assert_eq!(settings.toplevel_name, "EnvName");
        assert_eq!(settings.separator, "/");
    }

    #[test]
    fn given_non_numeric_timeout_env_when_loading_then_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // Arrange
        std::env::set_var("MANAGED_BOOKMARKS__TIMEOUT_SECS", "soon");

        // Act
        let result = Settings::load(None);

        // Cleanup
        std::env::remove_var("MANAGED_BOOKMARKS__TIMEOUT_SECS");

        // Assert
        match result {
            Err(ApplicationError::Config { message }) => {
                assert!(message.contains("MANAGED_BOOKMARKS__TIMEOUT_SECS"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
