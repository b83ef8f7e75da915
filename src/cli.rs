//! # Disburser CLI
//!
//! Plan-building and inspection commands. Nothing here talks to a chain:
//! submission goes through a [`LedgerClient`](crate::client::LedgerClient)
//! implementation wired up by the embedding application.

use crate::{
    address::AccountId32,
    amount,
    config::DistributionConfig,
    distribution::{self, DistributionPlan},
    recipients::{self, Recipient, VestedRecipient},
    vesting,
};
use clap::{Parser, Subcommand};
use eyre::{WrapErr, bail};
use std::path::{Path, PathBuf};
use tracing::info;

/// Batch token transfer and vesting distribution tool.
#[derive(Debug, Parser)]
#[command(author, about = "Disburser", long_about = None)]
pub struct Args {
    /// Path to a JSON configuration file.
    ///
    /// Missing fields fall back to chain-agnostic defaults.
    #[arg(long, value_name = "CONFIG", env = "DISBURSER_CONFIG")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a distribution plan from a recipient list and print it.
    Plan {
        /// Recipient list, `.csv` or `.json`.
        #[arg(long, value_name = "FILE")]
        recipients: PathBuf,
        /// Treat entries as vested grants (requires vestedMonths and
        /// startingBlock columns).
        #[arg(long)]
        vested: bool,
        /// Source account for privileged force-vested transfers.
        #[arg(long, value_name = "ADDRESS")]
        source: Option<String>,
        /// Write the plan to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Convert a decimal token amount to minimal denomination.
    Convert {
        /// The amount, e.g. `1.5`.
        amount: String,
    },
    /// Preview the vesting schedule for an amount and duration.
    Schedule {
        /// The amount, e.g. `100`.
        amount: String,
        /// Duration in 28-day months.
        #[arg(long)]
        months: u32,
        /// Block height at which the unlock begins.
        #[arg(long, default_value_t = 0)]
        starting_block: u32,
    },
    /// Decode an SS58 address and re-encode it with the configured prefix.
    Address {
        /// The address to inspect.
        address: String,
    },
}

impl Args {
    /// Runs the selected command.
    pub fn run(self) -> eyre::Result<()> {
        let config = match &self.config {
            Some(path) => DistributionConfig::load(path)
                .wrap_err_with(|| format!("loading config from `{}`", path.display()))?,
            None => DistributionConfig::default(),
        };

        match self.command {
            Command::Plan { recipients, vested, source, output } => {
                let plan = build_plan(&config, &recipients, vested, source.as_deref())?;
                emit_plan(&plan, output.as_deref())
            }
            Command::Convert { amount } => {
                let minimal = amount::to_minimal_denomination(&amount, config.decimals)?;
                println!("{minimal}");
                Ok(())
            }
            Command::Schedule { amount, months, starting_block } => {
                let locked = amount::to_minimal_denomination(&amount, config.decimals)?;
                let schedule = vesting::compute_schedule(
                    starting_block,
                    locked,
                    months,
                    config.block_time_secs,
                )?;
                println!("{}", serde_json::to_string_pretty(&schedule)?);
                Ok(())
            }
            Command::Address { address } => {
                let (account, prefix) = AccountId32::from_ss58(&address)?;
                println!("public key: 0x{}", hex_key(&account));
                println!("input prefix: {prefix}");
                println!("re-encoded: {}", account.to_ss58(config.ss58_prefix)?);
                Ok(())
            }
        }
    }
}

fn build_plan(
    config: &DistributionConfig,
    path: &Path,
    vested: bool,
    source: Option<&str>,
) -> eyre::Result<DistributionPlan> {
    let source = source
        .map(|address| {
            address
                .parse::<AccountId32>()
                .wrap_err_with(|| format!("invalid source address `{address}`"))
        })
        .transpose()?;

    let calls = if vested {
        let list: Vec<VestedRecipient> = read_list(path)?;
        info!(recipients = list.len(), path = %path.display(), "loaded vested recipients");
        distribution::build_vested_transfer_calls(
            &list,
            config.decimals,
            config.block_time_secs,
            source.as_ref(),
        )?
    } else {
        if source.is_some() {
            bail!("--source only applies to vested plans");
        }
        let list: Vec<Recipient> = read_list(path)?;
        info!(recipients = list.len(), path = %path.display(), "loaded recipients");
        distribution::build_transfer_calls(&list, config.decimals)?
    };

    Ok(distribution::compose_plan(calls, config.chunk_size, config.sudo)?)
}

fn read_list<T: serde::de::DeserializeOwned>(path: &Path) -> eyre::Result<Vec<T>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => Ok(recipients::read_csv(path)?),
        Some("json") => Ok(recipients::read_json(path)?),
        _ => bail!("unsupported recipient list format `{}` (expected .csv or .json)", path.display()),
    }
}

fn emit_plan(plan: &DistributionPlan, output: Option<&Path>) -> eyre::Result<()> {
    let rendered = serde_json::to_string_pretty(plan)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .wrap_err_with(|| format!("writing plan to `{}`", path.display()))?;
            info!(path = %path.display(), chunks = plan.composed.len(), "plan written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn hex_key(account: &AccountId32) -> String {
    account.0.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn plan_from_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        let records = vec![Recipient {
            address: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".into(),
            amount: "2.5".into(),
        }];
        recipients::write_csv(&path, &records).unwrap();

        let config = DistributionConfig::default();
        let plan = build_plan(&config, &path, false, None).unwrap();
        assert_eq!(plan.recipients, 1);
        assert_eq!(plan.composed.len(), 1);
    }

    #[test]
    fn source_on_plain_plan_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.json");
        recipients::write_json::<Recipient>(&path, &[]).unwrap();

        let config = DistributionConfig::default();
        let err = build_plan(
            &config,
            &path,
            false,
            Some("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("--source"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let config = DistributionConfig::default();
        let err = build_plan(&config, Path::new("list.txt"), false, None).unwrap_err();
        assert!(err.to_string().contains("unsupported recipient list format"));
    }
}
