use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use myps_config::{CredentialResolver, CredentialSettings, DefaultsFile, PASSWORD_MASK};
use myps_core::FilterCriteria;

/// Connection options. Unset flags fall back to the MySQL client
/// environment variables, then to the option file.
#[derive(Clone, Args)]
#[command(next_help_heading = "Connection")]
pub struct ConnectionArgs {
    /// Hostname
    #[arg(long, env = "MYSQL_HOST")]
    pub mysql_host: Option<String>,

    /// Port
    #[arg(long, env = "MYSQL_TCP_PORT")]
    pub mysql_port: Option<u16>,

    /// Username
    #[arg(long, env = "MYSQL_USER")]
    pub mysql_user: Option<String>,

    /// Password (an empty value means "no password", not "unset")
    #[arg(long, env = "MYSQL_PWD", hide_env_values = true)]
    pub mysql_password: Option<String>,

    /// Path to the server's unix socket
    #[arg(long, env = "MYSQL_UNIX_PORT")]
    pub mysql_socket: Option<String>,

    /// Timeout to establish the connection (e.g. 30s, 500ms, 2m)
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    pub mysql_timeout: Duration,

    /// Read the [client] section of this option file instead of ~/.my.cnf
    #[arg(long, value_name = "PATH")]
    pub defaults_extra_file: Option<PathBuf>,

    /// Do not read ~/.my.cnf
    #[arg(long, conflicts_with = "defaults_extra_file")]
    pub no_defaults: bool,
}

impl fmt::Debug for ConnectionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionArgs")
            .field("mysql_host", &self.mysql_host)
            .field("mysql_port", &self.mysql_port)
            .field("mysql_user", &self.mysql_user)
            .field(
                "mysql_password",
                &self.mysql_password.as_ref().map(|_| PASSWORD_MASK),
            )
            .field("mysql_socket", &self.mysql_socket)
            .field("mysql_timeout", &self.mysql_timeout)
            .field("defaults_extra_file", &self.defaults_extra_file)
            .field("no_defaults", &self.no_defaults)
            .finish()
    }
}

impl ConnectionArgs {
    fn defaults_file(&self) -> DefaultsFile {
        match (&self.defaults_extra_file, self.no_defaults) {
            (Some(path), _) => DefaultsFile::Explicit(path.clone()),
            (None, true) => DefaultsFile::Disabled,
            (None, false) => DefaultsFile::Home,
        }
    }

    fn overrides(&self) -> CredentialSettings {
        CredentialSettings {
            host: self.mysql_host.clone().filter(|v| !v.is_empty()),
            port: self.mysql_port,
            user: self.mysql_user.clone().filter(|v| !v.is_empty()),
            password: self.mysql_password.clone(),
            socket: self.mysql_socket.clone().filter(|v| !v.is_empty()),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> CredentialResolver {
        CredentialResolver::new(self.defaults_file(), self.overrides())
            .connect_timeout(self.mysql_timeout)
    }
}

/// Session filters. `%` and `_` are `LIKE` wildcards.
#[derive(Clone, Debug, Default, Args)]
#[command(next_help_heading = "Filter")]
pub struct FilterArgs {
    /// Only sessions running for at least this many seconds
    #[arg(short, long)]
    pub time: Option<String>,

    /// Sessions of this user
    #[arg(short, long)]
    pub user: Option<String>,

    /// Sessions using this database
    #[arg(short, long)]
    pub db: Option<String>,

    /// Sessions running this command (Query, Sleep, ...)
    #[arg(short, long)]
    pub command: Option<String>,

    /// Sessions in this state
    #[arg(short, long)]
    pub state: Option<String>,

    /// Sessions whose query text matches
    #[arg(short, long)]
    pub info: Option<String>,
}

impl From<&FilterArgs> for FilterCriteria {
    fn from(args: &FilterArgs) -> Self {
        Self {
            time: args.time.clone(),
            user: args.user.clone(),
            db: args.db.clone(),
            command: args.command.clone(),
            state: args.state.clone(),
            info: args.info.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Args)]
#[command(next_help_heading = "Display")]
pub struct DisplayArgs {
    /// Log the connection DSN (password masked), queries and arguments
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Do not truncate INFO (like SHOW FULL PROCESSLIST)
    #[arg(short, long)]
    pub full: bool,
}

/// Everything `grep` takes; `kill` adds confirmation handling on top.
#[derive(Clone, Debug, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    /// Shortcut for --info when --info is not given
    #[arg(value_name = "INFO")]
    pub pattern: Option<String>,
}

impl SessionArgs {
    /// Filter criteria with the positional shortcut applied.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from(&self.filter).with_positional(self.pattern.clone())
    }
}

#[derive(Clone, Debug, Args)]
pub struct KillArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Parse `<n>ms`, `<n>s`, `<n>m`, `<n>h`, or bare seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration '{raw}'"))?;

    match unit {
        "" | "s" => Ok(Duration::from_secs(value)),
        "ms" => Ok(Duration::from_millis(value)),
        "m" => Ok(Duration::from_secs(value.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(value.saturating_mul(3600))),
        other => Err(format!(
            "unknown duration unit '{other}' in '{raw}' (use ms, s, m or h)"
        )),
    }
}
