//! Integration tests for the credential precedence chain.
//!
//! Uses figment::Jail so `HOME` can point at a sandboxed directory.

use figment::Jail;
use myps_config::{ConfigError, CredentialResolver, CredentialSettings, DefaultsFile};

#[test]
fn explicit_flag_beats_defaults_file() {
    Jail::expect_with(|jail| {
        jail.create_file("extra.cnf", "[client]\nhost = A\nuser = fileuser\n")?;
        let overrides = CredentialSettings {
            host: Some("B".into()),
            ..Default::default()
        };

        let path = jail.directory().join("extra.cnf");
        let descriptor = CredentialResolver::new(DefaultsFile::Explicit(path), overrides)
            .resolve()
            .expect("resolves");

        assert_eq!(descriptor.host, "B");
        assert_eq!(descriptor.user, "fileuser");
        Ok(())
    });
}

#[test]
fn merge_is_field_by_field() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "extra.cnf",
            "[client]\nhost = filehost\nport = 3310\npassword = filepass\nsocket = /tmp/file.sock\n",
        )?;
        let overrides = CredentialSettings {
            user: Some("flaguser".into()),
            port: Some(4000),
            ..Default::default()
        };

        let path = jail.directory().join("extra.cnf");
        let descriptor = CredentialResolver::new(DefaultsFile::Explicit(path), overrides)
            .resolve()
            .expect("resolves");

        assert_eq!(descriptor.host, "filehost");
        assert_eq!(descriptor.port, 4000);
        assert_eq!(descriptor.user, "flaguser");
        assert_eq!(descriptor.password.as_deref(), Some("filepass"));
        assert_eq!(
            descriptor.socket.as_deref(),
            Some(std::path::Path::new("/tmp/file.sock"))
        );
        Ok(())
    });
}

#[test]
fn explicit_password_flag_overrides_file_with_empty_value() {
    Jail::expect_with(|jail| {
        jail.create_file("extra.cnf", "[client]\npassword = filepass\n")?;
        let overrides = CredentialSettings {
            password: Some(String::new()),
            ..Default::default()
        };

        let path = jail.directory().join("extra.cnf");
        let descriptor = CredentialResolver::new(DefaultsFile::Explicit(path), overrides)
            .resolve()
            .expect("resolves");

        assert_eq!(descriptor.password.as_deref(), Some(""));
        Ok(())
    });
}

#[test]
fn home_option_file_is_read_when_present() {
    Jail::expect_with(|jail| {
        jail.set_env("HOME", jail.directory().display().to_string());
        jail.create_file(".my.cnf", "[client]\nhost = homehost\n")?;

        let descriptor = CredentialResolver::new(DefaultsFile::Home, CredentialSettings::default())
            .resolve()
            .expect("resolves");

        assert_eq!(descriptor.host, "homehost");
        Ok(())
    });
}

#[test]
fn home_option_file_with_valueless_options_is_read() {
    Jail::expect_with(|jail| {
        jail.set_env("HOME", jail.directory().display().to_string());
        jail.create_file(
            ".my.cnf",
            "[client]\nhost = homehost\n\n[mysql]\nno-auto-rehash\n",
        )?;

        let descriptor = CredentialResolver::new(DefaultsFile::Home, CredentialSettings::default())
            .resolve()
            .expect("valueless options outside [client] are ignored");

        assert_eq!(descriptor.host, "homehost");
        Ok(())
    });
}

#[test]
fn empty_host_in_option_file_falls_back_to_localhost() {
    Jail::expect_with(|jail| {
        jail.create_file("extra.cnf", "[client]\nhost =\nuser = ops\n")?;
        let path = jail.directory().join("extra.cnf");

        let descriptor = CredentialResolver::new(DefaultsFile::Explicit(path), CredentialSettings::default())
            .resolve()
            .expect("resolves");

        assert_eq!(descriptor.host, "localhost");
        assert_eq!(descriptor.user, "ops");
        Ok(())
    });
}

#[test]
fn absent_home_option_file_is_skipped() {
    Jail::expect_with(|jail| {
        jail.set_env("HOME", jail.directory().display().to_string());

        let descriptor = CredentialResolver::new(DefaultsFile::Home, CredentialSettings::default())
            .os_user(Some("fallback".into()))
            .resolve()
            .expect("absence is not an error");

        assert_eq!(descriptor.host, "localhost");
        assert_eq!(descriptor.user, "fallback");
        Ok(())
    });
}

#[test]
fn disabled_ignores_home_option_file() {
    Jail::expect_with(|jail| {
        jail.set_env("HOME", jail.directory().display().to_string());
        jail.create_file(".my.cnf", "[client]\nhost = homehost\n")?;

        let descriptor =
            CredentialResolver::new(DefaultsFile::Disabled, CredentialSettings::default())
                .resolve()
                .expect("resolves");

        assert_eq!(descriptor.host, "localhost");
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("nope.cnf");
        let error = CredentialResolver::new(DefaultsFile::Explicit(path), CredentialSettings::default())
            .resolve()
            .unwrap_err();

        assert!(matches!(error, ConfigError::Unreadable { .. }));
        Ok(())
    });
}

#[test]
fn malformed_explicit_file_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.cnf", "[client\nhost = x\n")?;
        let path = jail.directory().join("bad.cnf");
        let error = CredentialResolver::new(DefaultsFile::Explicit(path), CredentialSettings::default())
            .resolve()
            .unwrap_err();

        assert!(matches!(error, ConfigError::Malformed { .. }));
        Ok(())
    });
}
