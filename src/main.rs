/// Entry point and main loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use config::{AppConfig, GeneralConfig};
use error::AppError;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound;
use ui::view::App;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let (config, problems) = AppConfig::load();
    init_logging(&config.general);
    for problem in &problems {
        log::warn!("config: {problem}; using defaults");
    }
    log::info!("starting with {:?}", config);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = run(&mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
    }

    println!();
    println!("Gracias por jugar Proyecto Final.");
}

/// Logs go to a file; the terminal belongs to the renderer. `RUST_LOG`
/// overrides the configured level.
fn init_logging(cfg: &GeneralConfig) {
    let Some(path) = &cfg.log_file else { return };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Cannot open log file {}: {e}; logging disabled", path.display());
            return;
        }
    };
    let _ = env_logger::Builder::new()
        .filter_level(cfg.log_level)
        .parse_env("RUST_LOG")
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn run(renderer: &mut Renderer, config: &AppConfig) -> Result<(), AppError> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    let device = sound::default_device(&config.audio);
    let mut app = App::new(device, config.audio.clone(), Instant::now());
    // Timers are polled every frame; the tick only paces redraws.
    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    let mut last_draw: Option<Instant> = None;

    while !app.should_quit() {
        kb.drain_events();
        gp.update();

        let actions: Vec<_> = kb.actions().into_iter().chain(gp.actions()).collect();
        let acted = !actions.is_empty();
        let now = Instant::now();
        app.frame(actions, now);

        if acted || last_draw.map_or(true, |t| now.duration_since(t) >= tick_rate) {
            renderer.render(&app, gp.connected, now)?;
            last_draw = Some(now);
        }
        std::thread::sleep(FRAME_SLEEP);
    }

    app.shutdown();
    Ok(())
}
