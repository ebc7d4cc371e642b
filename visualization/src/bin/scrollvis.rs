//! Headless ScrollVis runner
//!
//! Loads a JSON record array, replays a scroll path against the in-memory
//! scene and prints the settled scene as JSON.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use scrollvis_core::{load_records_from_path, CanvasConfig};
use scrollvis_visualization::{Scene, ScrollDriver, ScrollEvent, ScrollVis};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a scroll path over a record set", long_about = None)]
struct Cli {
    /// JSON array of records with `positive`, `negative` and `sentiment` columns
    #[arg(long)]
    records: PathBuf,

    /// Section indices reported by the simulated scroll tracker
    #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4,5,6")]
    path: Vec<usize>,

    /// Optional canvas configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Progress fed to the active section after each activation
    #[arg(long)]
    progress: Option<f64>,

    /// Print the scene after every step instead of only at the end
    #[arg(long)]
    each: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<CanvasConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        None => Ok(CanvasConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let records = load_records_from_path(&cli.records)?;
    let vis = ScrollVis::new(&records, &config, Scene::new())?;
    let mut driver = ScrollDriver::new(vis);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for &index in &cli.path {
        driver.handle(ScrollEvent::Active(index))?;
        if let Some(progress) = cli.progress {
            driver.handle(ScrollEvent::Progress(index, progress))?;
        }

        let scene = driver.vis_mut().renderer_mut();
        scene.settle();
        info!("Section {} settled at {}ms", index, scene.clock_ms());

        if cli.each {
            serde_json::to_writer_pretty(&mut out, &scene.snapshot())?;
            writeln!(out)?;
        }
    }

    if !cli.each {
        serde_json::to_writer_pretty(&mut out, &driver.vis().renderer().snapshot())?;
        writeln!(out)?;
    }

    Ok(())
}
