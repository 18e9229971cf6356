//! Validate the content directory
//!
//! Loads the rule options, every scenario and, where present, its orders, then
//! evaluates each order so that malformed declarations surface before play.

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use tactics_content::ContentFactory;
use tactics_core::evaluate;

use crate::dirs;

/// Load every scenario and resolve every order in the content directory
#[derive(Parser)]
pub struct CheckContent {
    /// Content directory (defaults to $TACTICS_DATA_DIR or the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::content_dir(self.data_dir));
        println!(
            "{} {}",
            style("Checking content in").bold().cyan(),
            factory.data_dir().display()
        );

        let rules = factory.load_rules()?;
        println!(
            "  {} rules.toml ({} options set)",
            style("✓").green(),
            rules.iter().count()
        );

        let mut failures = 0usize;
        for name in factory.scenario_names()? {
            match check_scenario(&factory, &name) {
                Ok(summary) => println!("  {} {} {}", style("✓").green(), name, style(summary).dim()),
                Err(e) => {
                    failures += 1;
                    println!("  {} {}: {:#}", style("✗").red(), name, e);
                }
            }
        }

        if failures > 0 {
            bail!("{} scenario(s) failed validation", failures);
        }
        println!("{}", style("All content is valid").green().bold());
        Ok(())
    }
}

fn check_scenario(factory: &ContentFactory, name: &str) -> Result<String> {
    if !factory.has_orders(name) {
        let snapshot = factory.load_scenario(name)?;
        return Ok(format!("({} units, no orders)", snapshot.units.len()));
    }

    let (snapshot, orders) = factory.load_engagement(name)?;
    let env = snapshot.env();
    let mut offerable = 0usize;
    for (index, order) in orders.iter().enumerate() {
        let record = evaluate(order, &env)
            .map_err(|e| anyhow::anyhow!("order {} ({}) failed: {}", index, order, e))?;
        if record.is_offerable() {
            offerable += 1;
        }
    }

    Ok(format!(
        "({} units, {} orders, {} offerable)",
        snapshot.units.len(),
        orders.len(),
        offerable
    ))
}
