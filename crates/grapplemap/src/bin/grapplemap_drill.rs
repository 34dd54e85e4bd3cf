use bevy::{log::LogPlugin, prelude::*};
use clap::Parser;
use grapplemap::prelude::*;
use grapplemap_core::command::Command;
use rand::{SeedableRng, rngs::StdRng};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Plays a GrappleMap drill headlessly and prints where playback is on every tick.
#[derive(Parser, Resource, Debug)]
#[command(version, about)]
struct Cli {
    /// Position database, `.ron` or `.json`
    #[arg(short, long)]
    db: PathBuf,
    /// Playback settings in RON
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Share link of the drill to play, e.g. `217,-45,12` or `p12`
    #[arg(short, long)]
    path: Option<String>,
    /// Play a random drill instead
    #[arg(long)]
    random: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    mirror: bool,
    #[arg(long, default_value_t = 120)]
    ticks: usize,
    /// Seconds per tick
    #[arg(long, default_value_t = 1. / 60.)]
    dt: f32,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("grapplemap_drill: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DrillError> {
    let config = match &cli.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };
    let graph = Graph::load(&cli.db)?;

    let link = if cli.random {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let steps = random_path(
            &graph,
            config.random_path_min_frames,
            config.random_path_max_attempts,
            &mut rng,
        )?;
        PathLink::Steps(steps)
    } else {
        cli.path.as_deref().ok_or(DrillError::NoDrill)?.parse()?
    };
    println!("{link}");

    let mut app = App::new();
    app //
        .add_plugins(LogPlugin::default())
        .add_plugins(GrapplePlugin { config })
        .insert_resource(GraphDatabase(Arc::new(graph)));

    let mut player = app.world_mut().resource_mut::<DrillPlayer>();
    player.load(link);
    if cli.mirror {
        player.send(Command::ToggleMirror);
    }

    app.insert_resource(cli);
    app.finish();
    app.cleanup();

    let (ticks, dt) = {
        let cli = app.world().resource::<Cli>();
        (cli.ticks, Duration::from_secs_f32(cli.dt.max(0.)))
    };

    for tick in 0..ticks {
        app.world_mut().resource_mut::<Time>().advance_by(dt);
        app.update();

        let mut player = app.world_mut().resource_mut::<DrillPlayer>();
        if let Some(error) = player.take_error() {
            return Err(error.into());
        }
        if let Some(c) = player.controller().map(|c| c.cursor()) {
            println!(
                "{tick:>5} frame {:>4} step {:>3} frame_in_step {:>3} k {:.3}",
                c.frame, c.seqindex, c.frame_in_seq, c.k
            );
        }
    }

    Ok(())
}
