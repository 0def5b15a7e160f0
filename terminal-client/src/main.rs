mod render;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal,
};
use engine::{
    CollisionPolicy, Direction, GameState, GameStatus, SessionSettings, WrapMode, log, logger,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WrapModeArg {
    Toroidal,
    Bounded,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CollisionPolicyArg {
    Terminate,
    Reset,
}

#[derive(Parser)]
#[command(name = "snake_terminal")]
struct Args {
    /// Optional YAML settings file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    #[arg(long, value_enum)]
    wrap_mode: Option<WrapModeArg>,

    #[arg(long, value_enum)]
    collision_policy: Option<CollisionPolicyArg>,

    /// Seed for deterministic sessions; omitted means entropy.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    tick_interval_ms: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn arg_wrap_mode_to_engine(mode: WrapModeArg) -> WrapMode {
    match mode {
        WrapModeArg::Toroidal => WrapMode::Toroidal,
        WrapModeArg::Bounded => WrapMode::Bounded,
    }
}

fn arg_collision_policy_to_engine(policy: CollisionPolicyArg) -> CollisionPolicy {
    match policy {
        CollisionPolicyArg::Terminate => CollisionPolicy::Terminate,
        CollisionPolicyArg::Reset => CollisionPolicy::Reset,
    }
}

fn build_settings(args: &Args) -> Result<SessionSettings, String> {
    let mut settings = match &args.config {
        Some(path) => SessionSettings::load_yaml_file(path)?.unwrap_or_default(),
        None => SessionSettings::default(),
    };

    if let Some(width) = args.width {
        settings.field_width = width;
    }
    if let Some(height) = args.height {
        settings.field_height = height;
    }
    if let Some(mode) = args.wrap_mode {
        settings.wrap_mode = arg_wrap_mode_to_engine(mode);
    }
    if let Some(policy) = args.collision_policy {
        settings.collision_policy = arg_collision_policy_to_engine(policy);
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(interval) = args.tick_interval_ms {
        settings.tick_interval_ms = interval;
    }

    settings.validate()?;
    Ok(settings)
}

fn run_session(game: &mut GameState, tick_interval: Duration) -> std::io::Result<()> {
    let mut last_tick = Instant::now();
    render::draw(&game.snapshot())?;

    loop {
        if event::poll(Duration::from_millis(30))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Up | KeyCode::Char('w') => game.request_direction(Direction::Up),
                    KeyCode::Down | KeyCode::Char('s') => game.request_direction(Direction::Down),
                    KeyCode::Left | KeyCode::Char('a') => game.request_direction(Direction::Left),
                    KeyCode::Right | KeyCode::Char('d') => {
                        game.request_direction(Direction::Right)
                    }
                    KeyCode::Char('r') => {
                        if game.status() == GameStatus::Over {
                            game.reset();
                        }
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            game.step();
            render::draw(&game.snapshot())?;
            last_tick = Instant::now();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = build_settings(&args)?;
    let tick_interval = Duration::from_millis(settings.tick_interval_ms);
    let mut game = GameState::new(&settings)?;

    terminal::enable_raw_mode()?;
    execute!(std::io::stdout(), Hide)?;

    let result = run_session(&mut game, tick_interval);

    terminal::disable_raw_mode()?;
    execute!(std::io::stdout(), Show)?;
    result?;

    log!("Session finished. Final score: {}", game.score());
    Ok(())
}
