use clap::Parser;
use log::{error, info};
use std::{fs, path::PathBuf, process};
use sunside::{Engine, EngineConfig, Result, RouteRequest, SeatLayout};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Inputs {
    /// JSON request: departure and routed polyline
    #[arg(short, long)]
    request: PathBuf,
    /// JSON engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON seat layout
    #[arg(short, long)]
    layout: Option<PathBuf>,
}

fn run(inputs: &Inputs) -> Result<String> {
    let config = match &inputs.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let layout = match &inputs.layout {
        Some(path) => serde_json::from_str::<SeatLayout>(&fs::read_to_string(path)?)?,
        None => SeatLayout::default(),
    };
    let engine = Engine::new(config, layout)?;
    let request = RouteRequest::from_json(&fs::read_to_string(&inputs.request)?)?;
    let report = engine.handle(&request)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() {
    pretty_env_logger::init_timed();
    let inputs = Inputs::parse();
    info!("initialising sunside");

    match run(&inputs) {
        Ok(report) => {
            println!("{}", report);
            info!("assessment completed")
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
