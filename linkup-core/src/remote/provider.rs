//! Provider subprocess protocol.
//!
//! A remote document store is reached through an external executable
//! (e.g., `linkup-provider-docstore`) speaking JSON over stdin/stdout.
//! Any executable that speaks the protocol can be a provider.
//!
//! Calls are not given a timeout: a slow store only delays the command
//! waiting on it.

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;

use crate::error::{LinkupError, LinkupResult};
use crate::remote::protocol::{Command, ProviderCommand, Request, Response};

const BINARY_PREFIX: &str = "linkup-provider-";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("{}{}", BINARY_PREFIX, self.0)
    }

    fn binary_path(&self) -> LinkupResult<std::path::PathBuf> {
        which::which(self.binary_name())
            .map_err(|_| LinkupError::ProviderNotInstalled(self.binary_name()))
    }

    /// Whether the provider executable can be found on `PATH`.
    pub fn is_installed(&self) -> bool {
        self.binary_path().is_ok()
    }

    /// Call a typed provider command and return the result.
    ///
    /// The response type is inferred from the command's associated type.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> LinkupResult<C::Response> {
        self.call_raw(C::command(), cmd).await
    }

    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> LinkupResult<R> {
        let params = serde_json::to_value(params)?;
        let request_json = serde_json::to_string(&Request { command, params })?;

        let binary_path = self.binary_path()?;

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .spawn()
            .map_err(|e| {
                LinkupError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| LinkupError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(LinkupError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        let Some(line) = response_str.lines().find(|l| !l.trim().is_empty()) else {
            return Err(LinkupError::Provider("Provider returned no response".into()));
        };

        let response: Response<R> = serde_json::from_str(line)
            .map_err(|e| LinkupError::Provider(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(LinkupError::Provider(error)),
        }
    }
}
