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

use scorecast::data;
use scorecast::model::ModelKind;
use scorecast::names::Aliases;
use scorecast::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// fixtures file with one home,away record per line
    fixtures: Option<PathBuf>,

    /// results files to fit on (football-data.co.uk season CSVs)
    #[clap(short = 'd', long = "data", num_args = 1..)]
    data: Vec<PathBuf>,

    /// prediction model
    #[clap(short = 'm', long, value_parser = parse_model_kind, default_value = "dixon-coles")]
    model: ModelKind,

    /// JSON file overriding the built-in team name aliases
    #[clap(long)]
    aliases: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.fixtures
            .as_ref()
            .ok_or(anyhow!("fixtures file must be specified"))?;
        if self.data.is_empty() {
            return Err(anyhow!("at least one results file must be specified"));
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
    info!("fitting {} on {} historical matches", args.model, matches.len());
    let aliases = match &args.aliases {
        Some(path) => Aliases::read_json_file(path)?,
        None => Aliases::default(),
    };
    let mut model = args.model.create(&Arc::new(aliases))?;
    model.fit(&matches)?;

    let fixtures = data::read_fixtures_from_file(args.fixtures.unwrap())?;
    let predictions = model.predict_matches(&fixtures);
    let table = print::tabulate_predictions(model.as_ref(), &predictions);
    println!("{}", Console::default().render(&table));
    Ok(())
}
