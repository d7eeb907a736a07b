use crate::error::{BadEnvVarSnafu, ParseEnvIntegerSnafu, ParseServerAddressSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::{net::SocketAddr, sync::Arc, time::Duration};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            server_config: Arc::new(ServerConfig::new()?),
        })
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

impl From<ServerConfig> for RuntimeConfiguration {
    fn from(server_config: ServerConfig) -> Self {
        Self {
            server_config: Arc::new(server_config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub server_address: SocketAddr,
    pub body_limit: usize,
    pub request_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            body_limit: DEFAULT_BODY_LIMIT,
            request_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> RosterResult<Self> {
        Self::from_lookup(optional_env_var)
    }

    /// Builds the config from any variable lookup, `Ok(None)` meaning unset.
    pub fn from_lookup(
        mut lookup: impl FnMut(&'static str) -> RosterResult<Option<String>>,
    ) -> RosterResult<Self> {
        let server_ip =
            lookup("ROSTER_SERVER_IP")?.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string());
        let server_address = server_ip
            .parse()
            .context(ParseServerAddressSnafu { original: server_ip })?;

        let body_limit = match lookup("ROSTER_BODY_LIMIT")? {
            Some(limit) => limit.parse().context(ParseEnvIntegerSnafu {
                name: "ROSTER_BODY_LIMIT",
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        let request_timeout = match lookup("ROSTER_REQUEST_TIMEOUT_MS")? {
            Some(ms) => Some(Duration::from_millis(ms.parse().context(
                ParseEnvIntegerSnafu {
                    name: "ROSTER_REQUEST_TIMEOUT_MS",
                },
            )?)),
            None => None,
        };

        Ok(Self {
            server_address,
            body_limit,
            request_timeout,
        })
    }
}

fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(source) => Err(source).context(BadEnvVarSnafu { name }),
    }
}
