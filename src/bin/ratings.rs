use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use scorecast::data;
use scorecast::model::poisson::{Config, PoissonModel};
use scorecast::model::ScoreModel;
use scorecast::names::Aliases;
use scorecast::print;

/// Fits the shrinkage-Poisson strengths and prints the rating table.
#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// results files to fit on (football-data.co.uk season CSVs)
    #[clap(short = 'd', long = "data", num_args = 1..)]
    data: Vec<PathBuf>,

    /// shrinkage constant
    #[clap(short = 'k', long, default_value_t = 1.1)]
    shrinkage: f64,

    /// time decay alpha per day of match age
    #[clap(long)]
    decay: Option<f64>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.data.is_empty() {
            return Err(anyhow!("at least one results file must be specified"));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let matches = data::read_matches_from_files(&args.data)?;
    info!("fitting on {} historical matches", matches.len());

    let config = Config {
        shrinkage_k: args.shrinkage,
        time_decay_alpha: args.decay,
        ..Config::default()
    };
    let mut model = PoissonModel::try_new(config, Arc::new(Aliases::default()))?;
    model.fit(&matches)?;

    let (teams, strengths) = model
        .strength_table()
        .ok_or(anyhow!("no strengths fitted"))?;
    println!(
        "{}",
        Console::default().render(&print::tabulate_strengths(teams, strengths))
    );
    Ok(())
}
