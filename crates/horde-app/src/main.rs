use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use horde_app::autopilot::Autopilot;
use horde_app::game_loop::{spawn_game_loop, ChannelOnly, InputSource};
use horde_app::platform::{self, LoggingPlatform};
use horde_app::state::{GameLoopCommand, LoopSettings};
use horde_core::commands::PlayerCommand;
use horde_core::constants::TICK_RATE;
use horde_core::enums::Edition;
use horde_core::state::GameStateSnapshot;
use horde_core::types::{format_clock, MissionId, ShopItemId};
use horde_progression::storage::FileStore;
use horde_progression::Profile;
use horde_sim::{GameSession, SessionConfig};

#[derive(Parser)]
#[command(author, version, about = "Headless HORDE zombie arena", long_about = None)]
struct Cli {
    /// Directory holding the progression save
    #[arg(long, global = true, default_value = "horde-save")]
    save_dir: PathBuf,
    /// classic, upgraded or platform
    #[arg(long, global = true, default_value = "platform")]
    edition: Edition,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play one session until the player dies
    Play {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Stop after this many seconds of game time
        #[arg(long)]
        seconds: Option<u64>,
        /// Wall-clock speed-up; 0 runs as fast as possible
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        #[arg(long, value_enum, default_value_t = InputMode::Autopilot)]
        input: InputMode,
    },
    /// Show score, upgrades, missions and the shop
    Status,
    /// Buy a shop item by id
    Buy { item: u32 },
    /// Claim a social mission by id
    Claim { mission: u32 },
    /// Watch a rewarded advert for bonus score
    Reward,
    /// Wipe all progression
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputMode {
    /// Built-in scripted player
    Autopilot,
    /// JSON player commands, one per line, on stdin
    Stdin,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut profile = Profile::load(Box::new(FileStore::new(&cli.save_dir)), cli.edition);

    match cli.cmd {
        Cmd::Play {
            seed,
            seconds,
            speed,
            input,
        } => play(profile, seed, seconds, speed, input)?,
        Cmd::Status => print_status(&profile),
        Cmd::Buy { item } => {
            let bought = profile.purchase(ShopItemId(item))?;
            println!(
                "Bought {} ({}). Score left: {}",
                bought.name,
                bought.effect.describe(),
                profile.store().total_score
            );
        }
        Cmd::Claim { mission } => {
            let done = profile.claim_social_mission(MissionId(mission))?;
            println!("Claimed {} for {} score", done.id, done.reward);
        }
        Cmd::Reward => {
            if !profile.edition().has_platform_services() {
                bail!("rewarded adverts are only available in the {} edition", Edition::Platform);
            }
            match platform::offer_rewarded_ad(&mut LoggingPlatform::default(), &mut profile) {
                Some(total) => println!("Bonus granted. Total score: {total}"),
                None => println!("Advert not completed, no bonus"),
            }
        }
        Cmd::Reset => {
            profile
                .reset()
                .context("failed to write reset progression")?;
            println!("Progression reset");
        }
    }
    Ok(())
}

fn play(profile: Profile, seed: u64, seconds: Option<u64>, speed: f64, mode: InputMode) -> Result<()> {
    let session = GameSession::new(
        SessionConfig {
            seed,
            spawner_enabled: true,
        },
        profile,
    );
    let settings = LoopSettings {
        speed,
        max_ticks: seconds.map(|s| s * TICK_RATE as u64),
    };
    let input: Box<dyn InputSource> = match mode {
        InputMode::Autopilot => Box::new(Autopilot::new()),
        InputMode::Stdin => Box::new(ChannelOnly),
    };

    let latest = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) =
        spawn_game_loop(session, settings, input, latest.clone()).context("failed to start game loop")?;

    // The loop stops when every sender is gone, so the stdin reader owns it in that mode.
    let _held_tx = match mode {
        InputMode::Autopilot => Some(cmd_tx),
        InputMode::Stdin => {
            spawn_stdin_reader(cmd_tx).context("failed to start stdin reader")?;
            None
        }
    };

    let mut last_report = 0.0;
    while !handle.is_finished() {
        std::thread::sleep(Duration::from_millis(200));
        if let Some(snapshot) = latest.lock().ok().and_then(|lock| lock.clone()) {
            if snapshot.time.elapsed_secs - last_report >= 5.0 {
                last_report = snapshot.time.elapsed_secs;
                report(&snapshot);
            }
        }
    }

    let outcome = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;

    let mut platform = LoggingPlatform::default();
    for request in outcome.platform_requests {
        platform::dispatch(&mut platform, request);
    }

    for id in &outcome.missions_completed {
        println!("Completed {id}");
    }
    match outcome.summary {
        Some(summary) => println!(
            "Game over after {} ticks: scored {}, {} missions complete, total score {}",
            outcome.ticks, summary.final_score, summary.completed_missions, summary.total_score
        ),
        None => println!(
            "Stopped after {} ticks, session score not banked. Total score {}",
            outcome.ticks,
            outcome.profile.store().total_score
        ),
    }
    Ok(())
}

fn report(snapshot: &GameStateSnapshot) {
    let hud = &snapshot.hud;
    info!(
        "[play] {} | health {:.0}/{:.0} | ammo {}/{}{} | score {} | kills {} | zombies {}",
        format_clock(snapshot.time.elapsed_secs),
        hud.health,
        hud.max_health,
        hud.ammo,
        hud.max_ammo,
        if hud.reloading { " (reloading)" } else { "" },
        hud.score,
        hud.zombies_killed,
        snapshot.zombies.len()
    );
}

fn spawn_stdin_reader(tx: mpsc::Sender<GameLoopCommand>) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("horde-stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<PlayerCommand>(line) {
                    Ok(cmd) => {
                        if tx.send(GameLoopCommand::PlayerCommand(cmd)).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("[input] Ignoring malformed command {line:?}: {e}"),
                }
            }
        })
}

fn print_status(profile: &Profile) {
    let store = profile.store();
    println!("Edition: {}", profile.edition());
    println!("Total score: {}", store.total_score);
    println!(
        "Health {} | ammo {} | damage x{:.2} | reload {}ms | speed x{:.2} | damage taken x{:.2} | regen {}/s",
        store.max_health,
        store.max_ammo,
        store.damage_multiplier,
        store.reload_time_ms,
        store.movement_speed_multiplier,
        store.damage_reduction,
        store.health_regen_per_second
    );

    println!("\nMissions ({} complete):", profile.completed_mission_count());
    for mission in profile.mission_views() {
        println!(
            "  [{}] {:>2}. {:<32} {:>12}  +{}",
            if mission.completed { "x" } else { " " },
            mission.id.0,
            mission.title,
            mission.progress,
            mission.reward
        );
    }

    println!("\nShop:");
    for item in profile.shop_items() {
        println!(
            "  {:>2}. {:<20} {:>5}  {}",
            item.id.0,
            item.name,
            item.price,
            item.effect.describe()
        );
    }
}
