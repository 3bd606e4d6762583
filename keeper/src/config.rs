//! Keeper configuration

use anyhow::{Context, Result};
use backstop_sim::LocalParams;
use serde::{Deserialize, Serialize};

const SETTLEMENT_UNIT: u128 = 1_000_000;
const GWEI: u128 = 1_000_000_000;
const FEED_UNIT: u128 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,

    /// Stop after this many ticks (run forever when absent)
    pub max_ticks: Option<u64>,

    /// Print every committed fund event as a JSON line
    pub print_events: bool,

    /// Local network seed
    pub local: LocalConfig,
}

/// Seed of the simulated network, in whole tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Distribution threshold (USDC)
    pub threshold: u64,
    /// USDC held directly by the fund
    pub fund_wallet: u64,
    /// USDC the fund holds inside the vault
    pub fund_vault_deposit: u64,
    /// WETH the fund holds inside the vault, in gwei
    pub fund_collateral_gwei: u64,
    /// WETH price (USD)
    pub collateral_price: u64,
    /// Stake per beneficiary staker
    pub stakes: Vec<u64>,
    /// Settlement value shock applied at each tick (USDC), cycled
    pub shocks: Vec<i64>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            threshold: 1_000,
            fund_wallet: 100,
            fund_vault_deposit: 1_500,
            fund_collateral_gwei: 0,
            collateral_price: 2_000,
            stakes: vec![1, 1],
            shocks: vec![0, 250, -2_000, 0, 1_000],
        }
    }
}

impl LocalConfig {
    pub fn to_params(&self) -> LocalParams {
        LocalParams {
            threshold: self.threshold as u128 * SETTLEMENT_UNIT,
            fund_wallet: self.fund_wallet as u128 * SETTLEMENT_UNIT,
            fund_vault_deposit: self.fund_vault_deposit as u128 * SETTLEMENT_UNIT,
            fund_collateral: self.fund_collateral_gwei as u128 * GWEI,
            collateral_price: self.collateral_price as u128 * FEED_UNIT,
            stakes: self.stakes.iter().map(|s| *s as u128).collect(),
        }
    }

    /// Shock for `tick` in settlement units
    pub fn shock_at(&self, tick: u64) -> i128 {
        if self.shocks.is_empty() {
            return 0;
        }
        let idx = (tick % self.shocks.len() as u64) as usize;
        self.shocks[idx] as i128 * SETTLEMENT_UNIT as i128
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("BACKSTOP_KEEPER_CONFIG")
            .unwrap_or_else(|_| "keeper-config.toml".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let config_str = std::fs::read_to_string(expanded.as_ref())
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Create default configuration
    pub fn default_local() -> Self {
        Self {
            poll_interval_ms: 500,
            max_ticks: Some(10),
            print_events: true,
            local: LocalConfig::default(),
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_local();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        let expanded = shellexpand::tilde(path);
        std::fs::write(expanded.as_ref(), toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
