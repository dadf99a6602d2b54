//! Game loop thread: runs a session at 60Hz and publishes snapshots.
//!
//! The session is moved into the thread and handed back, with its profile,
//! through the join handle. Commands arrive via `mpsc` channel and from an
//! in-loop `InputSource`. The latest snapshot is kept in shared state for
//! polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use horde_core::commands::PlayerCommand;
use horde_core::constants::TICK_RATE;
use horde_core::events::{GameEvent, PlatformRequest};
use horde_core::state::GameStateSnapshot;
use horde_core::types::MissionId;
use horde_sim::GameSession;

use crate::state::{GameLoopCommand, LoopSettings, SessionOutcome};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Something that reacts to each snapshot with commands for the next tick.
pub trait InputSource: Send {
    fn poll(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Input source that never issues commands; everything comes over the channel.
pub struct ChannelOnly;

impl InputSource for ChannelOnly {
    fn poll(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the outcome once the
/// player dies, the tick limit is reached, or a shutdown is requested.
pub fn spawn_game_loop(
    session: GameSession,
    settings: LoopSettings,
    input: Box<dyn InputSource>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<SessionOutcome>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("horde-game-loop".into())
        .spawn(move || run_game_loop(session, settings, input, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, the tick limit, Shutdown or channel disconnect.
pub fn run_game_loop(
    mut session: GameSession,
    settings: LoopSettings,
    mut input: Box<dyn InputSource>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> SessionOutcome {
    let mut ticks = 0u64;
    let mut missions_completed = Vec::new();
    let mut platform_requests = Vec::new();
    let mut next_tick_time = Instant::now();

    let pacing = (settings.speed > 0.001).then(|| TICK_DURATION.div_f64(settings.speed));

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => session.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    info!("[loop] Shutdown requested after {ticks} ticks");
                    return finish(session, ticks, missions_completed, platform_requests);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("[loop] Command channel closed");
                    return finish(session, ticks, missions_completed, platform_requests);
                }
            }
        }

        // 2. Advance one tick
        let snapshot = session.tick(TICK_DURATION);
        ticks += 1;

        // 3. Collect what the host acts on after the run
        for event in &snapshot.events {
            match event {
                GameEvent::MissionCompleted { mission_id, .. } => missions_completed.push(*mission_id),
                GameEvent::Platform { request } => platform_requests.push(*request),
                _ => {}
            }
        }

        // 4. Let the input source react before the snapshot is published
        session.queue_commands(input.poll(&snapshot));

        // 5. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if session.is_game_over() {
            return finish(session, ticks, missions_completed, platform_requests);
        }
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            info!("[loop] Tick limit of {ticks} reached");
            return finish(session, ticks, missions_completed, platform_requests);
        }

        // 6. Sleep until next tick
        if let Some(tick_duration) = pacing {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind; reset instead of catching up
                next_tick_time = now;
            }
        }
    }
}

fn finish(
    session: GameSession,
    ticks: u64,
    missions_completed: Vec<MissionId>,
    platform_requests: Vec<PlatformRequest>,
) -> SessionOutcome {
    let summary = session.summary();
    SessionOutcome {
        profile: session.into_profile(),
        summary,
        ticks,
        missions_completed,
        platform_requests,
    }
}
