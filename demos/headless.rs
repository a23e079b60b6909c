//! Headless host for kmeans3d
//!
//! Drives a simulation at a fixed frame rate without a window, the way an
//! interactive renderer would, and logs what it would have drawn. Commands
//! can be scheduled from a JSON script and the final frame exported as JSON.
//!
//! ```text
//! RUST_LOG=info headless --seed 7 -k 6 --frames 300 --auto-step --export frame.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use kmeans3d_core::{Bounded, SimulationConfig};
use kmeans3d_simulation::{Command, FrameSnapshot, Simulation};
use serde::Deserialize;

/// Run the k-means animation core without a window
#[derive(Parser, Debug)]
#[command(name = "headless", version, about)]
struct Cli {
    /// JSON file with a SimulationConfig; missing fields use defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Initial number of clusters (overrides the config file)
    #[arg(short, long)]
    k: Option<usize>,

    /// Cluster radius (overrides the config file)
    #[arg(long)]
    radius: Option<f32>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Start in auto-stepping mode
    #[arg(long)]
    auto_step: bool,

    /// Use the parallel assignment pass
    #[arg(long)]
    parallel: bool,

    /// JSON list of {"frame": N, "command": ...} entries to apply
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the final frame snapshot to this JSON file
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ScriptEntry {
    frame: usize,
    command: Command,
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(k) = cli.k {
        config.initial_k = k;
    }
    if let Some(radius) = cli.radius {
        config.cluster_radius = radius;
    }
    config.parallel_assignment |= cli.parallel;
    Ok(config)
}

fn load_script(path: &Path) -> Result<Vec<ScriptEntry>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
    let mut entries: Vec<ScriptEntry> =
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))?;
    entries.sort_by_key(|e| e.frame);
    Ok(entries)
}

fn log_frame(frame: usize, snapshot: &FrameSnapshot<'_>) {
    let sizes: Vec<usize> = snapshot.clusters.iter().map(|c| c.members.len()).collect();
    log::info!(
        "frame {:>5} | k={} mode={:?} phase={:.2} focus=({:.1}, {:.1}, {:.1}) sizes={:?}",
        frame,
        snapshot.active_k,
        snapshot.mode,
        snapshot.phase,
        snapshot.focus.x,
        snapshot.focus.y,
        snapshot.focus.z,
        sizes
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    anyhow::ensure!(cli.fps > 0.0, "fps must be positive");
    let config = load_config(&cli)?;
    let script = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let mut sim = Simulation::with_scene(config)?;
    let (min, max) = sim.points().bounding_box();
    log::info!(
        "Scene: {} points, bounds ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
        sim.points().len(),
        min.x,
        min.y,
        min.z,
        max.x,
        max.y,
        max.z
    );

    if cli.auto_step {
        sim.apply(Command::ToggleAutoStep)?;
    }

    let dt = 1.0 / cli.fps;
    let log_every = cli.fps.round().max(1.0) as usize;
    let mut pending = script.into_iter().peekable();

    for frame in 0..cli.frames {
        while let Some(entry) = pending.next_if(|e| e.frame <= frame) {
            log::info!("frame {:>5} | {:?}", frame, entry.command);
            sim.apply(entry.command)?;
        }

        sim.frame(dt)?;

        if frame % log_every == 0 {
            log_frame(frame, &sim.snapshot());
        }
    }

    let snapshot = sim.snapshot();
    println!(
        "Finished {} frames: k={}, {} points, mode {:?}",
        cli.frames,
        snapshot.active_k,
        snapshot.point_count(),
        snapshot.mode
    );
    for cluster in &snapshot.clusters {
        println!(
            "  cluster {:>3}: {:>6} points at ({:>8.2}, {:>8.2}, {:>8.2})",
            cluster.index,
            cluster.members.len(),
            cluster.position.x,
            cluster.position.y,
            cluster.position.z
        );
    }

    if let Some(path) = &cli.export {
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Exported snapshot to {}", path.display());
    }

    Ok(())
}
