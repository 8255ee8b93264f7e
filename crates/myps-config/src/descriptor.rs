//! The resolved connection descriptor.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder printed wherever a password would appear.
pub const PASSWORD_MASK: &str = "xxxx";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to open one server connection.
///
/// Lives only for the process lifetime. `Debug` and [`redacted`](Self::redacted)
/// never print the password.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub socket: Option<PathBuf>,
    /// Bounds connection establishment only.
    pub connect_timeout: Duration,
}

impl ConnectionDescriptor {
    /// DSN-style rendering for logs, e.g. `ops:xxxx@tcp(db1:3306)/`.
    #[must_use]
    pub fn redacted(&self) -> String {
        let credentials = match self.password {
            Some(_) => format!("{}:{PASSWORD_MASK}", self.user),
            None => self.user.clone(),
        };
        let address = match &self.socket {
            Some(socket) => format!("unix({})", socket.display()),
            None => format!("tcp({}:{})", self.host, self.port),
        };
        format!("{credentials}@{address}/")
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| PASSWORD_MASK))
            .field("socket", &self.socket)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
