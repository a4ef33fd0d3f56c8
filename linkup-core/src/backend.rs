//! Where events are read from and written to.

use std::fmt;

use tracing::{debug, warn};

use crate::remote::{Remote, RemoteSource};

/// Data backend capability, decided once at startup.
pub enum DataBackend {
    /// A remote document store is configured and its provider is installed.
    Remote(Box<dyn RemoteSource>),
    /// Everything lives in the local store.
    LocalOnly,
}

impl DataBackend {
    /// Probe the configured remote: usable only if its provider executable is installed.
    pub fn probe(remote: Option<&Remote>) -> Self {
        let Some(remote) = remote else {
            debug!("no remote configured, using local store only");
            return DataBackend::LocalOnly;
        };

        if !remote.provider.is_installed() {
            warn!(
                "remote provider '{}' is not installed ({} not in PATH), using local store only",
                remote.provider.name(),
                remote.provider.binary_name()
            );
            return DataBackend::LocalOnly;
        }

        DataBackend::Remote(Box::new(remote.clone()))
    }

    pub fn remote(&self) -> Option<&dyn RemoteSource> {
        match self {
            DataBackend::Remote(source) => Some(source.as_ref()),
            DataBackend::LocalOnly => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataBackend::Remote(_))
    }
}

impl fmt::Display for DataBackend {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataBackend::Remote(source) => write!(f, "remote ({})", source.name()),
            DataBackend::LocalOnly => write!(f, "local only"),
        }
    }
}
