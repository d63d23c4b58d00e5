use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, ServiceAccountKey};

use super::app_config::ConfigError;

/// Service account key read from the environment. `Debug` never prints the key material.
#[derive(Clone)]
pub struct ServiceAccountCredentials {
    key: ServiceAccountKey,
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.key.client_email)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountCredentials {
    pub fn from_env(var_name: &str) -> error_stack::Result<Self, ConfigError> {
        let json = std::env::var(var_name)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| report!(ConfigError::MissingCredentials(var_name.to_string())))?;

        Self::from_json(&json).attach_printable_lazy(|| format!("Read from {}", var_name))
    }

    pub fn from_json(json: &str) -> error_stack::Result<Self, ConfigError> {
        let key = oauth2::parse_service_account_key(json).change_context_lazy(|| {
            ConfigError::InvalidCredentials("service account JSON".to_string())
        })?;
        Ok(ServiceAccountCredentials { key })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn into_key(self) -> ServiceAccountKey {
        self.key
    }
}
