//! Tank Duel headless runner
//!
//! Plays a scripted duel (both tanks steer toward each other and fire) until
//! the match ends or the frame cap is hit, then prints the final snapshot as
//! JSON. Useful as a soak test and as a reference frontend.
//!
//! Usage: `tank-duel [seed]`. `TANK_DUEL_SETTINGS` may point at a settings file.

#[cfg(not(target_arch = "wasm32"))]
use tank_duel::{
    Game, Settings,
    audio::LogPlayer,
    consts::SIM_DT,
    normalize_angle,
    sim::{GamePhase, MatchState, Tank, Team},
};

/// Three minutes of play at the nominal rate
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 60 * 180;

/// Heading error tolerated before the driver steers
#[cfg(not(target_arch = "wasm32"))]
const AIM_TOLERANCE: f32 = 0.1;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tank Duel (headless) starting...");

    let settings = match std::env::var_os("TANK_DUEL_SETTINGS") {
        Some(path) => Settings::load_or_default(std::path::Path::new(&path)),
        None => Settings::default(),
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| match arg.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed argument {:?}: {}", arg, e);
                None
            }
        })
        .or(settings.seed)
        .unwrap_or_else(clock_seed);

    let mut game = Game::new(&settings, seed).with_player(Box::new(LogPlayer));
    let mut frames = 0;
    while frames < MAX_FRAMES && game.state.phase != GamePhase::MatchOver {
        let keys = driver_keys(&game.state);
        if !game.frame(SIM_DT, keys.as_slice()) {
            break;
        }
        frames += 1;
    }

    let snapshot = game.snapshot();
    match snapshot.banner() {
        Some(banner) => log::info!("{} after {} frames", banner, frames),
        None => log::info!("No winner after {} frames", frames),
    }
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Keys a simple driver would hold: turn toward the opponent, keep advancing
#[cfg(not(target_arch = "wasm32"))]
fn driver_keys(state: &MatchState) -> Vec<&'static str> {
    let mut keys = Vec::new();
    for team in Team::ALL {
        let me = state.tank(team);
        let foe = state.tank(team.opponent());
        if !me.is_alive() || !foe.is_alive() {
            continue;
        }
        let (advance, left, right) = match team {
            Team::Blue => ("W", "A", "D"),
            Team::Red => ("I", "J", "L"),
        };
        let error = aim_error(me, foe);
        if error > AIM_TOLERANCE {
            keys.push(right);
        } else if error < -AIM_TOLERANCE {
            keys.push(left);
        }
        keys.push(advance);
    }
    keys
}

#[cfg(not(target_arch = "wasm32"))]
fn aim_error(me: &Tank, foe: &Tank) -> f32 {
    let to_foe = foe.center() - me.center();
    normalize_angle(to_foe.y.atan2(to_foe.x) - me.angle)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the product on wasm; a browser frontend drives `Game`
}
