//! Snake Arcade entry point
//!
//! Native: a session steered by the autopilot, headless by default for
//! soak testing the simulation. The browser build is driven through
//! `web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;

    use snake_arcade::persistence::FileStorage;
    use snake_arcade::platform::{Clock, InputCommand, ManualClock, SystemClock};
    use snake_arcade::renderer::AsciiRenderer;
    use snake_arcade::sim::{GameEvent, autopilot_turn};
    use snake_arcade::{Game, Settings, Tuning};

    /// Display refresh interval the frame loop runs at
    const FRAME_MS: u64 = 16;

    #[derive(Parser, Debug)]
    #[command(name = "snake-arcade", about = "Autopilot Snake Arcade session")]
    struct Args {
        /// Display frames to run
        #[arg(long, default_value_t = 20_000)]
        frames: u64,

        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for high scores, badges and settings
        #[arg(long, default_value = ".snake-arcade")]
        data: PathBuf,

        /// Player code name
        #[arg(long)]
        name: Option<String>,

        /// Pace frames against the wall clock instead of simulated time
        #[arg(long)]
        realtime: bool,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        let args = Args::parse();
        log::info!("Snake Arcade (native) starting...");

        let mut storage = FileStorage::open(&args.data)?;
        let settings = Settings::load(&storage).with_player_name(args.name.as_deref());
        settings.save(&mut storage)?;

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        if args.realtime {
            let game = Game::new(settings, Tuning::default(), seed, SystemClock::new(), storage);
            play(game, args.frames, || {
                std::thread::sleep(Duration::from_millis(FRAME_MS))
            });
        } else {
            let clock = ManualClock::new(0);
            let game = Game::new(settings, Tuning::default(), seed, clock.clone(), storage);
            play(game, args.frames, || clock.advance(FRAME_MS));
        }
        Ok(())
    }

    /// Run the autopilot for `frames` display frames, calling `wait`
    /// before each one
    fn play<C: Clock>(mut game: Game<C, FileStorage>, frames: u64, mut wait: impl FnMut()) {
        for _ in 0..frames {
            wait();
            if game.state().phase.awaits_acknowledge() {
                game.handle(InputCommand::Acknowledge);
            }
            if let Some(dir) = autopilot_turn(game.state()) {
                game.handle(InputCommand::Turn(dir));
            }
            for event in game.frame().events {
                match event {
                    GameEvent::GameOver { entry } => {
                        println!("Mission failed: score {} at level {}", entry.score, entry.level)
                    }
                    GameEvent::Victory { entry } => println!(
                        "Mission complete: score {} with {} lives left",
                        entry.score, entry.lives
                    ),
                    other => log::debug!("{:?}", other),
                }
            }
        }

        let mut renderer = AsciiRenderer::new();
        game.render(&mut renderer);
        println!("{}", renderer.output());

        println!("\nCodename     Score  Level  Lives  Badges");
        for entry in &game.highscores().entries {
            println!(
                "{:<12} {:>5}  {:>5}  {:>5}  {:>6}",
                entry.player_name,
                entry.score,
                entry.level,
                entry.lives,
                game.badges().count(&entry.player_name)
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
