use std::collections::VecDeque;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glam::Vec3;
use islewalk_agents::Agent;
use islewalk_common::TileCoord;
use islewalk_input::Action;
use islewalk_kernel::World;
use islewalk_nav::{GridModel, Path, Pathfinder, SearchConfig};
use islewalk_sim::{Outcome, Session, SimConfig};
use islewalk_tools::{MapView, WorldInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "islewalk-cli", about = "CLI tool for islewalk operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON session config; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the world seed
    #[arg(short, long)]
    seed: Option<u64>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SimConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and a summary of the generated island
    Info {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the effective session config as JSON
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Draw the island as text
    Map {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Find a path between two tiles and draw it
    Path {
        #[command(flatten)]
        config: ConfigArgs,
        /// Start tile as x,y
        #[arg(long, value_parser = parse_tile, allow_hyphen_values = true)]
        from: TileCoord,
        /// Goal tile as x,y
        #[arg(long, value_parser = parse_tile, allow_hyphen_values = true)]
        to: TileCoord,
    },
    /// Run a headless session
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,
        /// Number of frames to step
        #[arg(short, long, default_value = "300")]
        ticks: u64,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 30.0)]
        dt: f32,
        /// Override the NPC count
        #[arg(short, long)]
        npcs: Option<usize>,
        /// Tiles (x,y) to click, each issued once the player is idle
        #[arg(long, value_parser = parse_tile, allow_hyphen_values = true)]
        click: Vec<TileCoord>,
        /// Draw the final state
        #[arg(long)]
        map: bool,
    },
}

fn parse_tile(s: &str) -> Result<TileCoord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(TileCoord::new(x, y))
}

/// Route between two tiles, or a reason there is none.
fn plan_route(
    world: &World,
    search: SearchConfig,
    from: TileCoord,
    to: TileCoord,
) -> Result<Path, &'static str> {
    if !world.in_bounds(from) {
        return Err("start is off the map");
    }
    if let Some(path) = Pathfinder::new(search).search(from, to, world) {
        return Ok(path);
    }
    Err(if !world.in_bounds(to) {
        "goal is off the map"
    } else if world.is_blocked(to) {
        "goal is blocked"
    } else {
        "no route within the search limit"
    })
}

fn tile_center(tile: TileCoord) -> Vec3 {
    let (x, z) = tile.center_xz();
    Vec3::new(x, 0.0, z)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { config } => {
            let config = config.load()?;
            let world = World::new(config.world)?;
            println!("islewalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", WorldInspector::summary(&world));
        }
        Commands::Config { config } => {
            println!("{}", config.load()?.to_json_pretty()?);
        }
        Commands::Map { config } => {
            let world = World::new(config.load()?.world)?;
            print!("{}", MapView::new(&world));
        }
        Commands::Path { config, from, to } => {
            let config = config.load()?;
            let world = World::new(config.world)?;
            match plan_route(&world, config.player.motion.search, from, to) {
                Ok(path) => {
                    let tiles: Vec<String> = path.iter().map(ToString::to_string).collect();
                    println!("Path {from} -> {to}: {} tiles", path.len());
                    println!("  {}", tiles.join(" "));
                    print!("{}", MapView::new(&world).with_path(&path));
                }
                Err(reason) => println!("No path {from} -> {to}: {reason}"),
            }
        }
        Commands::Simulate {
            config,
            ticks,
            dt,
            npcs,
            click,
            map,
        } => {
            let mut config = config.load()?;
            if let Some(count) = npcs {
                config.npcs.count = count;
            }
            tracing::debug!(?config, "effective config");
            let mut session = Session::new(config)?;
            let mut clicks: VecDeque<TileCoord> = click.into();

            for _ in 0..ticks {
                if !session.player().is_moving() {
                    if let Some(tile) = clicks.pop_front() {
                        let outcome = session.handle(Action::PointerPick(tile_center(tile)));
                        if let Outcome::Player(retarget) = outcome {
                            println!("tick {}: click {tile} -> {retarget:?}", session.tick());
                        }
                    }
                }
                session.step(dt);
            }

            println!("{}", WorldInspector::summary(session.world()));
            println!("tick={} npcs={}", session.tick(), session.npcs().len());
            println!("player {}", WorldInspector::inspect_agent(session.player()));
            for npc in session.npcs().iter() {
                println!("npc    {}", WorldInspector::inspect_agent(npc));
            }
            let eye = session.camera().eye();
            println!("camera eye=({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            if !clicks.is_empty() {
                println!("{} click(s) not issued", clicks.len());
            }

            if map {
                let mut view = MapView::new(session.world());
                for npc in session.npcs().iter() {
                    view = view.with_agent(npc, 'n');
                }
                print!("{}", view.with_agent(session.player(), '@'));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use islewalk_kernel::ObjectKind;

    #[test]
    fn parse_tile_accepts_signed_pairs() {
        assert_eq!(parse_tile("3,4"), Ok(TileCoord::new(3, 4)));
        assert_eq!(parse_tile(" -1 , 7 "), Ok(TileCoord::new(-1, 7)));
    }

    #[test]
    fn parse_tile_rejects_malformed_input() {
        assert!(parse_tile("3").unwrap_err().contains("expected x,y"));
        assert!(parse_tile("a,2").unwrap_err().contains("bad x"));
        assert!(parse_tile("2,").unwrap_err().contains("bad y"));
        assert!(parse_tile("1,2,3").is_err());
    }

    #[test]
    fn config_args_default_and_seed_override() {
        let args = ConfigArgs {
            config: None,
            seed: None,
        };
        assert_eq!(args.load().unwrap(), SimConfig::default());

        let args = ConfigArgs {
            config: None,
            seed: Some(42),
        };
        assert_eq!(args.load().unwrap().world.seed, 42);
    }

    #[test]
    fn config_args_seed_overrides_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sim.json");
        std::fs::write(&path, r#"{ "world": { "seed": 5, "width": 12 } }"#).unwrap();

        let args = ConfigArgs {
            config: Some(path.clone()),
            seed: Some(9),
        };
        let config = args.load().unwrap();
        assert_eq!(config.world.width, 12);
        assert_eq!(config.world.seed, 9);

        let args = ConfigArgs {
            config: Some(path),
            seed: None,
        };
        assert_eq!(args.load().unwrap().world.seed, 5);
    }

    #[test]
    fn config_args_missing_file_names_the_path() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/islewalk.json")),
            seed: None,
        };
        let err = format!("{:#}", args.load().unwrap_err());
        assert!(err.contains("/nonexistent/islewalk.json"), "{err}");
    }

    #[test]
    fn off_map_start_is_rejected() {
        let world = World::flat(5, 5).unwrap();
        let search = SearchConfig::default();
        assert_eq!(
            plan_route(&world, search, TileCoord::new(-1, 0), TileCoord::new(2, 0)),
            Err("start is off the map")
        );
        assert_eq!(
            plan_route(&world, search, TileCoord::new(0, 5), TileCoord::new(2, 0)),
            Err("start is off the map")
        );
    }

    #[test]
    fn route_failures_explain_the_goal() {
        let mut world = World::flat(5, 5).unwrap();
        world
            .place_object(TileCoord::new(4, 4), ObjectKind::Rock, 0.2)
            .unwrap();
        let search = SearchConfig::default();
        let from = TileCoord::new(0, 0);
        assert_eq!(
            plan_route(&world, search, from, TileCoord::new(7, 0)),
            Err("goal is off the map")
        );
        assert_eq!(
            plan_route(&world, search, from, TileCoord::new(4, 4)),
            Err("goal is blocked")
        );
        assert_eq!(
            plan_route(&world, SearchConfig { max_iterations: 1 }, from, TileCoord::new(3, 3)),
            Err("no route within the search limit")
        );
    }

    #[test]
    fn route_found_on_open_map() {
        let world = World::flat(5, 5).unwrap();
        let path = plan_route(&world, SearchConfig::default(), TileCoord::new(0, 0), TileCoord::new(3, 3))
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), Some(&TileCoord::new(3, 3)));
    }
}
