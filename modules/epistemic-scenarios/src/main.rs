use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use epistemic_scenarios::{Demo, UpdateMode, WiseMen};
use epistemic_tableau::TableauConfig;

#[derive(Parser)]
#[command(name = "epistemic")]
#[command(about = "Multi-agent epistemic logic scenarios")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, env = "EPISTEMIC_JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the wise-men announcements and print each model
    WiseMen {
        /// Remove the fewest worlds per announcement instead of restricting
        #[arg(long)]
        prune: bool,
    },

    /// Run a built-in tableau demo and print the proof tree and witness
    Tableau {
        /// One of: satisfiable, contradiction, knowledge
        #[arg(long, env = "EPISTEMIC_DEMO", default_value_t = Demo::Satisfiable)]
        demo: Demo,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("epistemic=info".parse()?))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::WiseMen { prune } => wise_men(prune, cli.json),
        Commands::Tableau { demo } => tableau(demo, cli.json),
    }
}

fn wise_men(prune: bool, json: bool) -> Result<()> {
    let mode = if prune {
        UpdateMode::Prune
    } else {
        UpdateMode::Solve
    };
    let scenario = WiseMen::new()?;
    info!(mode = ?mode, worlds = scenario.structure.len(), "Running wise men");
    let steps = scenario.run(mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    println!("Initial model");
    println!("{}", scenario.structure);
    for step in &steps {
        println!("After announcement {}: {}", step.index, step.announcement);
        println!("{}", step.model);
    }
    Ok(())
}

fn tableau(demo: Demo, json: bool) -> Result<()> {
    let config = TableauConfig::from_env()?;
    config.log_summary();
    let report = demo.run(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", report.rendered);
    println!();
    println!("Result: {:?}", report.satisfiability);
    if let Some(witness) = &report.witness {
        println!("Witness");
        println!("{witness}");
    }
    Ok(())
}
