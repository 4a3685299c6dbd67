use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use facet::{Config, RecordStore, StubUserApi, UserService, Walkthrough};

#[derive(Parser, Debug)]
#[clap(name = "facet", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    /// JSON or YAML file providing the patch to apply and the views to report.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Which view(s) to report on. Overrides the configured views.
    views: Vec<String>,
}

fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    match run(&args) {
        Ok(walkthrough) => match print_walkthrough(&walkthrough) {
            Ok(_) => log::info!("Success!"),
            Err(e) => log::error!("Failed to print results: {}", e),
        },
        Err(e) => log::error!("Failed: {:?}", e),
    }
}

fn run(args: &Args) -> Result<Walkthrough> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if !args.views.is_empty() {
        config.views = args.views.clone();
    }

    let views = config.view_names()?;
    let store = RecordStore::predefined()?;
    let mut service = UserService::new(StubUserApi, store);
    service.run(config.patch, &views)
}

fn print_walkthrough(walkthrough: &Walkthrough) -> Result<()> {
    println!("fetched: {}", serde_json::to_string_pretty(&walkthrough.fetched)?);
    println!("patch: {}", serde_json::to_string_pretty(&walkthrough.patch)?);
    for stage in &walkthrough.stages {
        for (view, data) in &stage.views {
            println!(
                "{} through {} view: {}",
                stage.label,
                view,
                serde_json::to_string_pretty(data)?
            );
        }
    }
    Ok(())
}
