//! Partial credential settings, one per configuration layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::PASSWORD_MASK;

/// Credential fields as supplied by a single source.
///
/// Unset fields are skipped on serialization, so merging a layer only
/// overwrites the fields that layer actually sets.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// `Some("")` is an explicit empty password, distinct from unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket: Option<String>,
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| PASSWORD_MASK))
            .field("socket", &self.socket)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_masks_password() {
        let settings = CredentialSettings {
            user: Some("ops".into()),
            password: Some("hunter2".into()),
            ..Default::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains(PASSWORD_MASK));
        assert!(rendered.contains("ops"));
    }
}
