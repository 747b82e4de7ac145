use std::fs;
use std::path::{Path, PathBuf};

use presale_merkle::{Digest, RootInput, WhitelistError, ZERO_DIGEST};
use presale_vesting::{PresaleSchedule, RawSchedule, VestingError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid params toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid schedule: {0}")]
    Schedule(#[from] VestingError),
    #[error("invalid whitelist root: {0}")]
    Root(#[from] WhitelistError),
}

/// Presale parameters mirrored from the program's configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresaleParams {
    pub schedule: RawSchedule,
    #[serde(default)]
    pub whitelist: WhitelistParams,
    #[serde(default)]
    pub token: TokenParams,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistParams {
    #[serde(default)]
    pub enabled: bool,
    /// Hex string (optionally `0x`-prefixed) or an array of 32 bytes
    #[serde(default)]
    pub root: RootInput,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParams {
    /// Decimal places of the sale token
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    pub symbol: Option<String>,
}

fn default_decimals() -> u8 { 9 }

impl Default for TokenParams {
    fn default() -> Self { Self { decimals: default_decimals(), symbol: None } }
}

impl PresaleParams {
    pub fn schedule(&self) -> Result<PresaleSchedule, ParamsError> {
        Ok(PresaleSchedule::try_from(&self.schedule)?)
    }

    pub fn whitelist_root(&self) -> Result<Digest, ParamsError> {
        Ok(self.whitelist.root.resolve()?)
    }

    /// Root the purchase gate checks against; zero when the whitelist is off.
    pub fn gate_root(&self) -> Result<Digest, ParamsError> {
        if self.whitelist.enabled {
            self.whitelist_root()
        } else {
            Ok(ZERO_DIGEST)
        }
    }
}

/// Parse presale parameters from TOML text
pub fn load_params_toml(input: &str) -> Result<PresaleParams, ParamsError> {
    let params = toml::from_str::<PresaleParams>(input)?;
    // validate eagerly so a bad file fails at load time
    params.schedule()?;
    params.whitelist_root()?;
    Ok(params)
}

pub fn load_params_file(path: &Path) -> Result<PresaleParams, ParamsError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ParamsError::Io { path: path.to_path_buf(), source })?;
    let params = load_params_toml(&text)?;
    debug!(path = %path.display(), "loaded presale params");
    Ok(params)
}
