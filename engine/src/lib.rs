pub mod food;
pub mod game_state;
pub mod grid;
pub mod logger;
pub mod session_rng;
pub mod settings;
pub mod snake;
pub mod types;

pub use food::{BoardFull, Food};
pub use game_state::{GameSnapshot, GameState, StepOutcome};
pub use grid::Grid;
pub use session_rng::SessionRng;
pub use settings::SessionSettings;
pub use snake::Snake;
pub use types::{
    CollisionPolicy, CollisionReason, Direction, EndReason, GameStatus, Point, WrapMode,
};
