//! MySQL option file (`my.cnf` style) as a figment provider.
//!
//! Only the `[client]` section is read, and only the `user`, `password`,
//! `socket`, `host` and `port` keys. Everything else in the file is ignored,
//! including valueless boolean options (`no-auto-rehash`, `skip-ssl`) and
//! `!include` directives, which the INI grammar does not accept.

use std::path::{Path, PathBuf};

use figment::value::{Dict, Map};
use figment::{Metadata, Profile, Provider, providers::Serialized};
use ini::Ini;

use crate::error::ConfigError;
use crate::settings::CredentialSettings;

const CLIENT_SECTION: &str = "client";

/// A parsed option file, ready to be merged into a figment.
#[derive(Clone, Debug)]
pub struct OptionFile {
    path: PathBuf,
    client: CredentialSettings,
}

impl OptionFile {
    /// Read and parse the option file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Unreadable` if the file cannot be read,
    /// `ConfigError::Malformed` if it does not parse, and
    /// `ConfigError::InvalidValue` if `port` is not a valid port number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    /// Parse option file text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Same as [`OptionFile::load`], minus the read failure.
    pub fn parse(origin: impl AsRef<Path>, text: &str) -> Result<Self, ConfigError> {
        let path = origin.as_ref().to_path_buf();
        let ini = Ini::load_from_str(&without_bare_options(text)).map_err(|parse| ConfigError::Malformed {
            path: path.clone(),
            reason: parse.to_string(),
        })?;
        let client = client_section(&ini)?;
        Ok(Self { path, client })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `[client]` values found in the file.
    #[must_use]
    pub const fn client(&self) -> &CredentialSettings {
        &self.client
    }
}

/// Drop lines that are neither blank, a comment, a section header nor a
/// `key = value` pair.
fn without_bare_options(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let line = line.trim();
            line.is_empty()
                || line.starts_with(['#', ';', '['])
                || line.contains(['=', ':'])
        })
        .fold(String::with_capacity(text.len()), |mut kept, line| {
            kept.push_str(line);
            kept.push('\n');
            kept
        })
}

fn client_section(ini: &Ini) -> Result<CredentialSettings, ConfigError> {
    let Some(section) = ini.section(Some(CLIENT_SECTION)) else {
        return Ok(CredentialSettings::default());
    };

    let port = section
        .get("port")
        .map(|raw| {
            raw.trim()
                .parse::<u16>()
                .map_err(|error| ConfigError::InvalidValue {
                    field: "client.port".into(),
                    reason: format!("'{raw}': {error}"),
                })
        })
        .transpose()?;

    Ok(CredentialSettings {
        host: section.get("host").map(String::from),
        port,
        user: section.get("user").map(String::from),
        password: section.get("password").map(String::from),
        socket: section.get("socket").map(String::from),
    })
}

impl Provider for OptionFile {
    fn metadata(&self) -> Metadata {
        Metadata::named("MySQL option file").source(self.path.as_path())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(&self.client).data()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_client_section() {
        let file = OptionFile::parse(
            "my.cnf",
            "[mysqld]\nport = 9999\n\n[client]\nuser = ops\npassword = s3cret\nhost = db1\nport = 3307\nsocket = /tmp/mysql.sock\n",
        )
        .expect("valid option file");

        assert_eq!(
            file.client(),
            &CredentialSettings {
                host: Some("db1".into()),
                port: Some(3307),
                user: Some("ops".into()),
                password: Some("s3cret".into()),
                socket: Some("/tmp/mysql.sock".into()),
            }
        );
    }

    #[test]
    fn missing_client_section_is_empty() {
        let file = OptionFile::parse("my.cnf", "[mysqld]\nuser = mysql\n").expect("valid");
        assert_eq!(file.client(), &CredentialSettings::default());
    }

    #[test]
    fn empty_password_is_kept() {
        let file = OptionFile::parse("my.cnf", "[client]\npassword =\n").expect("valid");
        assert_eq!(file.client().password.as_deref(), Some(""));
    }

    #[test]
    fn bad_port_is_rejected() {
        let error = OptionFile::parse("my.cnf", "[client]\nport = mysql\n").unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { ref field, .. } if field == "client.port"));
    }

    #[test]
    fn valueless_options_are_skipped() {
        let file = OptionFile::parse(
            "my.cnf",
            "!includedir /etc/mysql/conf.d/\n[client]\nhost = db1\nskip-ssl\n\n[mysql]\nno-auto-rehash\n",
        )
        .expect("valueless keys are allowed");
        assert_eq!(file.client().host.as_deref(), Some("db1"));
    }

    #[test]
    fn unterminated_section_is_malformed() {
        let error = OptionFile::parse("my.cnf", "[client\nhost = x\n").unwrap_err();
        assert!(matches!(error, ConfigError::Malformed { .. }));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let error = OptionFile::load(dir.path().join("absent.cnf")).unwrap_err();
        assert!(matches!(error, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.cnf");
        std::fs::write(&path, "[client]\nhost = from-disk\n").unwrap();

        let file = OptionFile::load(&path).expect("readable");
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.client().host.as_deref(), Some("from-disk"));
    }
}
