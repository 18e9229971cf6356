//! Preview the orders of a scenario
//!
//! Loads a scenario and its orders from the content directory, evaluates every
//! order through the preview service and prints the resolution ledgers.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_content::ContentFactory;
use tactics_core::{AttackDeclaration, EntityId, ResolutionRecord, TerminalStatus};
use tactics_runtime::{PreviewService, ServiceConfig};

use crate::dirs;

/// Evaluate a scenario's orders and print each resolution ledger
#[derive(Parser)]
pub struct Preview {
    /// Scenario name (file stem under `scenarios/`, e.g. ridge_skirmish)
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Content directory (defaults to $TACTICS_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Instead of the orders file, list every attack this unit could make
    #[arg(short, long, value_name = "ID")]
    attacker: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Maximum number of evaluations running at once
    #[arg(short, long, default_value_t = 8)]
    jobs: usize,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One block per order with its ledger
    Summary,
    /// Full JSON output
    Json,
}

type Outcome = (AttackDeclaration, Result<ResolutionRecord, String>);

impl Preview {
    pub fn execute(self) -> Result<()> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        runtime.block_on(self.run())
    }

    async fn run(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::content_dir(self.data_dir.clone()));
        let snapshot = factory
            .load_scenario(&self.scenario)
            .with_context(|| format!("Failed to load scenario `{}`", self.scenario))?;

        let config = ServiceConfig::default().with_max_concurrency(self.jobs);
        let service = PreviewService::new(config, snapshot)?;

        let outcomes: Vec<Outcome> = match self.attacker {
            Some(id) => service
                .offerable_orders(EntityId(id))
                .await?
                .into_iter()
                .map(|(order, record)| (order, Ok(record)))
                .collect(),
            None => {
                let orders = factory.load_orders(&self.scenario)?;
                let records = service.evaluate_many(orders.clone()).await?;
                orders
                    .into_iter()
                    .zip(records)
                    .map(|(order, record)| (order, record.map_err(|e| e.to_string())))
                    .collect()
            }
        };

        match self.format {
            OutputFormat::Summary => {
                println!(
                    "{} {}",
                    style("Scenario:").bold().cyan(),
                    self.scenario
                );
                println!(
                    "{} {}",
                    style("Snapshot:").bold().cyan(),
                    service.digest()
                );
                println!(
                    "{} {}",
                    style("Units:").bold().cyan(),
                    service.snapshot().units.len()
                );
                println!();
                if outcomes.is_empty() {
                    println!("{}", style("No attacks to show").dim());
                }
                for (index, (order, outcome)) in outcomes.iter().enumerate() {
                    print_outcome(index, order, outcome);
                }
            }
            OutputFormat::Json => print_json(&outcomes)?,
        }

        Ok(())
    }
}

fn print_outcome(index: usize, order: &AttackDeclaration, outcome: &Result<ResolutionRecord, String>) {
    println!("{} {}", style(format!("[{}]", index)).bold(), order);

    let record = match outcome {
        Ok(record) => record,
        Err(message) => {
            println!("    {} {}", style("error:").red().bold(), message);
            println!();
            return;
        }
    };

    let headline = match &record.status {
        TerminalStatus::Normal => style(format!(
            "target number {}",
            record.target_number().unwrap_or_default()
        ))
        .green()
        .bold(),
        TerminalStatus::AutomaticSuccess(reason) => {
            style(format!("automatic hit: {}", reason)).cyan().bold()
        }
        TerminalStatus::AutomaticFail(reason) => {
            style(format!("automatic miss: {}", reason)).yellow().bold()
        }
        TerminalStatus::Impossible(reason) => style(format!("impossible: {}", reason)).red(),
    };
    println!("    {}", headline);

    if record.status.is_normal() {
        println!("    {}", style(record.description()).dim());
    }
    if record.is_offerable() {
        let tables = &record.classification;
        print!(
            "    hit table {}, side {}",
            tables.hit_table, tables.side_table
        );
        if let Some(cover) = tables.cover {
            print!(", cover {}", cover);
        }
        if let Some(location) = tables.aimed_location {
            print!(", aimed at {:?}", location);
        }
        println!();
    }
    println!();
}

fn print_json(outcomes: &[Outcome]) -> Result<()> {
    let entries: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|(order, outcome)| match outcome {
            Ok(record) => serde_json::json!({ "order": order, "record": record }),
            Err(message) => serde_json::json!({ "order": order, "error": message }),
        })
        .collect();
    let json = serde_json::to_string_pretty(&entries).context("Failed to serialize records")?;
    println!("{}", json);
    Ok(())
}
