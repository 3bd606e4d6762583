//! Backstop Keeper
//!
//! Off-chain service that watches the insurance fund and triggers `repay`
//! when the fund's vault account is in deficit and `distribute_fee` when
//! it holds surplus above its threshold.

mod client;
mod config;
mod planner;

use anyhow::{Context, Result};
use backstop_common::fmt_key;
use client::{FundClient, LocalClient};
use config::Config;
use planner::{plan, Action};
use std::time::Duration;
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Backstop Keeper");

    // Load configuration
    let config = Config::load().unwrap_or_else(|_| {
        log::warn!("Failed to load config, using default local config");
        Config::default_local()
    });

    let client = LocalClient::new(&config.local).context("Failed to deploy local network")?;
    log::info!(
        "Watching fund {} on the local network",
        fmt_key(&client.deployment().fund.address())
    );

    let summary = run(&client, &config).await?;
    log::info!(
        "Keeper stopped after {} ticks: {} repays, {} distributions",
        summary.ticks,
        summary.repays,
        summary.distributions
    );
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub repays: u64,
    pub distributions: u64,
    pub failures: u64,
}

/// Main event loop
async fn run<C: FundClient>(client: &C, config: &Config) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut interval = time::interval(Duration::from_millis(config.poll_interval_ms.max(1)));

    loop {
        if config.max_ticks.is_some_and(|max| summary.ticks >= max) {
            break;
        }
        interval.tick().await;

        if let Err(e) = process_tick(client, summary.ticks, &mut summary) {
            log::error!("Error processing tick {}: {}", summary.ticks, e);
            summary.failures += 1;
        }
        summary.ticks += 1;

        if config.print_events {
            for event in client.new_events() {
                println!("{}", serde_json::to_string(&event).context("Failed to encode event")?);
            }
        }
    }

    Ok(summary)
}

/// Advance the network, read the fund and act on the plan
fn process_tick<C: FundClient>(client: &C, tick: u64, summary: &mut RunSummary) -> Result<()> {
    client.tick(tick)?;
    let snapshot = client.snapshot()?;
    log::debug!("Snapshot: {}", serde_json::to_string(&snapshot)?);

    match plan(&snapshot) {
        Action::Repay { amount } => match client.repay() {
            Ok(repaid) => {
                log::info!("Repaid {} (planned {})", repaid.repaid_amount, amount);
                summary.repays += 1;
            }
            Err(e) if e.is_nothing_to_do() => log::debug!("Repay skipped: {}", e),
            Err(e) => return Err(e.into()),
        },
        Action::DistributeFee { surplus } => match client.distribute_fee() {
            Ok(distributed) => {
                log::info!("Distributed {} (planned {})", distributed.surplus, surplus);
                summary.distributions += 1;
            }
            Err(e) if e.is_nothing_to_do() => log::debug!("Distribution skipped: {}", e),
            Err(e) => return Err(e.into()),
        },
        Action::Idle => {
            log::debug!("Nothing to do");
        }
    }
    Ok(())
}
