//! Pooper Hunt entry point
//!
//! Runs the simulation headless: a scripted shooter clicks on the nearest live
//! enemy every half second, draw calls are recorded instead of displayed.
//!
//! Usage: `pooper-hunt [config.json] [frames]`

use std::process::ExitCode;

use pooper_hunt::consts::{DIRECTION_TICK_MS, TARGET_FPS};
use pooper_hunt::platform::{Clock, InputSource, IntervalTimer, ManualClock, ScriptedInput};
use pooper_hunt::renderer::{DrawList, ImageCache, MemoryLoader, draw_scene, preload_sprites};
use pooper_hunt::sim::{GameState, InputEvent, TickInput, TickOutcome, tick};
use pooper_hunt::{ConfigError, GameConfig};

const DEFAULT_FRAMES: u64 = 60 * 30;
const SHOT_INTERVAL_FRAMES: u64 = 30;

const SPRITES: [&str; 6] = [
    "background.png",
    "crate.png",
    "canpooper_left.png",
    "canpooper_right.png",
    "canpooper_left_dead.png",
    "canpooper_right_dead.png",
];

fn load_config(path: Option<&str>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Io {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
            GameConfig::from_json(&json)
        }
        None => Ok(GameConfig::default()),
    }
}

fn run(config: GameConfig, frames: u64) -> Result<GameState, Box<dyn std::error::Error>> {
    let mut state = GameState::new(config, 0x5eed)?;
    let mut cache = ImageCache::new(MemoryLoader::new(SPRITES), "assets");
    preload_sprites(&mut cache, &state)?;

    let frame_ms = 1000 / u64::from(TARGET_FPS);
    let mut clock = ManualClock::new(0);
    let mut direction_timer = IntervalTimer::new(DIRECTION_TICK_MS, clock.now_ms());
    let mut input = ScriptedInput::new();
    let mut draw_list = DrawList::new();

    for frame in 0..frames {
        // Aim at the first live enemy's center
        if frame % SHOT_INTERVAL_FRAMES == 0 {
            if let Some(target) = state.enemies.iter().find(|e| !e.is_dead()) {
                input.click_at(target.body.center());
            }
        }

        let mut events = input.poll_events();
        if direction_timer.poll(clock.now_ms()) {
            events.push(InputEvent::DirectionTick);
        }

        if tick(&mut state, &TickInput::new(events), clock.now_ms()) == TickOutcome::Quit {
            break;
        }

        draw_list.clear();
        draw_scene(&state, &mut cache, &mut draw_list)?;
        clock.advance(frame_ms);
    }

    log::info!(
        "Last frame issued {} draw calls, cursor at {:?}",
        draw_list.len(),
        input.cursor_position()
    );
    Ok(state)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pooper Hunt (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let frames = args
        .get(1)
        .and_then(|f| f.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    match run(config, frames) {
        Ok(state) => {
            log::info!(
                "Finished after {} frames: score {}, kills {}, {} enemies alive",
                state.frame,
                state.score,
                state.kills,
                state.enemies.len()
            );
            println!("score: {} kills: {}", state.score, state.kills);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
