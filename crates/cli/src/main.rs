use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use endcap::{run_search, run_search_serial, SearchError, SearchOutcome};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod params;
mod provenance;
mod report;

use params::ParamsFile;

#[derive(Parser)]
#[command(name = "endcap")]
#[command(about = "Search concentric endcap ring layouts")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run the search and print every accepted configuration
    Search {
        #[command(flatten)]
        input: InputArgs,
        /// Emit one JSON document instead of text
        #[arg(long)]
        json: bool,
        /// Sweep the full grid on the calling thread
        #[arg(long)]
        serial: bool,
    },
    /// Print the resolved parameter record
    Params {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct InputArgs {
    /// JSON parameter file; defaults apply to missing keys
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override `step_length`
    #[arg(long)]
    step: Option<f64>,
    /// Override `side_granularity`
    #[arg(long)]
    granularity: Option<usize>,
}

impl InputArgs {
    fn resolve(&self) -> Result<ParamsFile> {
        let mut file = match &self.config {
            Some(path) => ParamsFile::load(path)?,
            None => ParamsFile::default(),
        };
        if let Some(step) = self.step {
            file.step = step;
        }
        if let Some(g) = self.granularity {
            file.side_granularity = g;
        }
        Ok(file)
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Search {
            input,
            json,
            serial,
        } => search(input, json, serial),
        Action::Params { input } => show_params(input),
        Action::Report => report(),
    }
}

fn search(input: InputArgs, json: bool, serial: bool) -> Result<()> {
    let file = input.resolve()?;
    let params = file.to_params();
    tracing::info!(config = ?input.config, serial, "search");
    let result = if serial {
        run_search_serial(params)
    } else {
        run_search(params)
    };
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e @ SearchError::UnsupportedSpeciesCount { .. }) => {
            tracing::error!(%e, "search skipped");
            SearchOutcome {
                params,
                configurations: Vec::new(),
                samples: 0,
                workers: 0,
            }
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        let doc = report::outcome_json(&outcome, serde_json::to_value(&file)?);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }
    print!("{}", report::render_params(&params));
    for cfg in &outcome.configurations {
        print!("{}", report::render_configuration(cfg));
    }
    println!("Accepted configurations: {}", outcome.configurations.len());
    println!("Total cycles: {}", outcome.samples);
    Ok(())
}

fn show_params(input: InputArgs) -> Result<()> {
    let file = input.resolve()?;
    println!("{}", serde_json::to_string_pretty(&file)?);
    print!("{}", report::render_params(&file.to_params()));
    Ok(())
}

fn report() -> Result<()> {
    let params = serde_json::to_value(ParamsFile::default())?;
    let obj = provenance::block(params, serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
