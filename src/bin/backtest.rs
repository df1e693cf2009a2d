use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use scorecast::backtest;
use scorecast::data;
use scorecast::model::ModelKind;
use scorecast::names::Aliases;
use scorecast::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// results files to replay (football-data.co.uk season CSVs)
    #[clap(short = 'd', long = "data", num_args = 1..)]
    data: Vec<PathBuf>,

    /// models to evaluate
    #[clap(short = 'm', long = "model", value_parser = parse_model_kind,
        default_values_t = vec![ModelKind::Poisson, ModelKind::DixonColes])]
    models: Vec<ModelKind>,

    /// matches withheld as the initial training window
    #[clap(long, default_value_t = backtest::DEFAULT_MIN_TRAIN_SIZE)]
    min_train_size: usize,

    /// JSON file overriding the built-in team name aliases
    #[clap(long)]
    aliases: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.data.is_empty() {
            return Err(anyhow!("at least one results file must be specified"));
        }
        if self.models.is_empty() {
            return Err(anyhow!("at least one model must be specified"));
        }
        Ok(())
    }
}
fn parse_model_kind(s: &str) -> anyhow::Result<ModelKind> {
    ModelKind::from_str(s).map_err(|_| anyhow!("unsupported model {s}"))
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
    info!(
        "replaying {} matches with a {}-match training window",
        matches.len(),
        args.min_train_size
    );
    let aliases = Arc::new(match &args.aliases {
        Some(path) => Aliases::read_json_file(path)?,
        None => Aliases::default(),
    });

    let mut rankings = vec![];
    for kind in &args.models {
        info!("backtesting {kind}");
        let summary = backtest::run(&matches, args.min_train_size, || {
            kind.create(&aliases).unwrap_or_else(|error| {
                panic!("cannot create {kind} model: {error}");
            })
        });
        println!("{kind}:");
        println!("{}", Console::default().render(&print::tabulate_backtest(&summary)));
        rankings.push((kind, summary.total_points()));
    }

    rankings.sort_by(|a, b| b.1.cmp(&a.1));
    for (kind, total_points) in rankings {
        info!("{kind}: {total_points} points");
    }
    Ok(())
}
