//! Chaincode configuration loaded via OrthoConfig.
//!
//! Settings come from `REGNET_*` environment variables (and any config file
//! OrthoConfig discovers). [`ChaincodeSettings::to_config`] validates them
//! into the values the contracts are built from.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    ContractPolicy, DEFAULT_ORG, NamespaceError, Namespaces, OwnerKeying, PolicyParseError,
    RequestRetention,
};
use crate::outbound::DEFAULT_REGISTRAR_MSP;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGNET")]
pub struct ChaincodeSettings {
    /// Organisation prefix for every key namespace.
    #[ortho_config(default = DEFAULT_ORG.to_owned())]
    pub org: String,
    /// Owner key derivation: `display-name` or `national-id`.
    pub owner_keying: Option<String>,
    /// Request handling after approval: `retain` or `delete`.
    pub request_retention: Option<String>,
    /// Comma-separated MSP IDs granted the registrar role.
    pub registrar_msps: Option<String>,
}

/// Errors raised while validating settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The organisation prefix is unusable.
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
    /// A policy name is not recognised.
    #[error(transparent)]
    Policy(#[from] PolicyParseError),
    /// The registrar list was set but named no MSP.
    #[error("registrar MSP list must name at least one MSP")]
    EmptyRegistrarMsps,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChaincodeConfig {
    /// Key namespaces.
    pub namespaces: Namespaces,
    /// Contract policies.
    pub policy: ContractPolicy,
    /// MSP IDs holding the registrar role.
    pub registrar_msps: Vec<String>,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            namespaces: Namespaces::default(),
            policy: ContractPolicy::default(),
            registrar_msps: vec![DEFAULT_REGISTRAR_MSP.to_owned()],
        }
    }
}

impl ChaincodeSettings {
    /// Return the configured organisation prefix.
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Return the configured owner keying.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyParseError`] for an unknown name.
    pub fn owner_keying(&self) -> Result<OwnerKeying, PolicyParseError> {
        self.owner_keying
            .as_deref()
            .map_or(Ok(OwnerKeying::default()), str::parse::<OwnerKeying>)
    }

    /// Return the configured request retention.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyParseError`] for an unknown name.
    pub fn request_retention(&self) -> Result<RequestRetention, PolicyParseError> {
        self.request_retention
            .as_deref()
            .map_or(Ok(RequestRetention::default()), str::parse::<RequestRetention>)
    }

    /// Return the registrar MSP IDs, falling back to the default.
    pub fn registrar_msps(&self) -> Vec<String> {
        self.registrar_msps.as_deref().map_or_else(
            || vec![DEFAULT_REGISTRAR_MSP.to_owned()],
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|msp| !msp.is_empty())
                    .map(str::to_owned)
                    .collect()
            },
        )
    }

    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any value is unusable.
    pub fn to_config(&self) -> Result<ChaincodeConfig, ConfigError> {
        let registrar_msps = self.registrar_msps();
        if registrar_msps.is_empty() {
            return Err(ConfigError::EmptyRegistrarMsps);
        }
        Ok(ChaincodeConfig {
            namespaces: Namespaces::for_org(self.org())?,
            policy: ContractPolicy {
                owner_keying: self.owner_keying()?,
                request_retention: self.request_retention()?,
            },
            registrar_msps,
        })
    }
}
