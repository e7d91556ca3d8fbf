use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Flask backend running on this machine.
    #[default]
    Local,
    /// Any other backend, e.g. the rack controller on the home network.
    Custom { server_url: String },
}

const LOCAL_SERVER_URL: &str = "http://127.0.0.1:5000";

impl Environment {
    /// Returns the backend base URL associated with the environment.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_SERVER_URL.to_string(),
            Environment::Custom { server_url } => server_url.clone(),
        }
    }

    /// Builds an environment from a base URL, folding the local default back into `Local`.
    pub fn from_url(url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if url == LOCAL_SERVER_URL {
            Environment::Local
        } else {
            Environment::Custom {
                server_url: url.to_string(),
            }
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::from_url(trimmed));
        }
        Err(format!(
            "Invalid server URL: {}. Expected `local` or an http(s):// URL.",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.server_url())
    }
}
