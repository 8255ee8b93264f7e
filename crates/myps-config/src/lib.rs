//! # myps-config
//!
//! Layered MySQL credential resolution using figment.
//!
//! Sources, lowest to highest priority, merged field by field:
//! 1. Built-in defaults (nothing set)
//! 2. The `[client]` section of a MySQL option file: the explicit
//!    `--defaults-extra-file`, or else `~/.my.cnf` when it exists
//! 3. Explicit per-field overrides (command-line flags and their environment
//!    fallbacks)
//!
//! An empty user after all layers falls back to the operating-system user.
//!
//! # Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use myps_config::{CredentialResolver, CredentialSettings, DefaultsFile};
//!
//! let overrides = CredentialSettings {
//!     host: Some("db1".into()),
//!     ..Default::default()
//! };
//! let descriptor = CredentialResolver::new(DefaultsFile::Home, overrides)
//!     .connect_timeout(Duration::from_secs(5))
//!     .resolve()
//!     .expect("credentials");
//! println!("{}", descriptor.redacted());
//! ```

mod descriptor;
mod error;
mod option_file;
mod settings;

pub use descriptor::{
    ConnectionDescriptor, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT, PASSWORD_MASK,
};
pub use error::ConfigError;
pub use option_file::OptionFile;
pub use settings::CredentialSettings;

use std::path::PathBuf;
use std::time::Duration;

use figment::{Figment, providers::Serialized};
use tracing::debug;

/// Which option file, if any, feeds the credential chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultsFile {
    /// Must exist and parse.
    Explicit(PathBuf),
    /// `~/.my.cnf`, silently skipped when absent.
    Home,
    /// No option file at all.
    Disabled,
}

impl DefaultsFile {
    /// Path to the user-level option file.
    #[must_use]
    pub fn home_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".my.cnf"))
    }

    fn load(&self) -> Result<Option<OptionFile>, ConfigError> {
        match self {
            Self::Explicit(path) => OptionFile::load(path).map(Some),
            Self::Home => match Self::home_path().filter(|path| path.is_file()) {
                Some(path) => OptionFile::load(path).map(Some),
                None => Ok(None),
            },
            Self::Disabled => Ok(None),
        }
    }
}

/// Builds a [`ConnectionDescriptor`] from the configured layers.
#[derive(Clone, Debug)]
pub struct CredentialResolver {
    defaults_file: DefaultsFile,
    overrides: CredentialSettings,
    connect_timeout: Duration,
    os_user: Option<String>,
}

impl CredentialResolver {
    #[must_use]
    pub fn new(defaults_file: DefaultsFile, overrides: CredentialSettings) -> Self {
        Self {
            defaults_file,
            overrides,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            os_user: os_user_name(),
        }
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replace the operating-system user used as the last-resort username.
    #[must_use]
    pub fn os_user(mut self, user: Option<String>) -> Self {
        self.os_user = user;
        self
    }

    /// Build the figment provider chain.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the selected option file cannot be read or
    /// parsed.
    pub fn figment(&self) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(CredentialSettings::default()));

        match self.defaults_file.load()? {
            Some(file) => {
                debug!(path = %file.path().display(), "reading defaults file");
                figment = figment.merge(file);
            }
            None => debug!(source = ?self.defaults_file, "no defaults file"),
        }

        Ok(figment.merge(Serialized::defaults(&self.overrides)))
    }

    /// Resolve the final connection descriptor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an option file is unreadable or malformed, or
    /// if the merged layers fail to extract.
    pub fn resolve(&self) -> Result<ConnectionDescriptor, ConfigError> {
        let merged: CredentialSettings = self.figment()?.extract()?;

        let user = merged
            .user
            .filter(|user| !user.is_empty())
            .or_else(|| self.os_user.clone())
            .unwrap_or_default();

        let descriptor = ConnectionDescriptor {
            host: merged
                .host
                .filter(|host| !host.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: merged.port.unwrap_or(DEFAULT_PORT),
            user,
            password: merged.password,
            socket: merged.socket.filter(|s| !s.is_empty()).map(PathBuf::from),
            connect_timeout: self.connect_timeout,
        };
        debug!(dsn = %descriptor.redacted(), "resolved connection");
        Ok(descriptor)
    }
}

fn os_user_name() -> Option<String> {
    ["USER", "LOGNAME"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|user| !user.is_empty())
}
