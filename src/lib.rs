// Library surface for headless/integration tests and reuse.
// The terminal host (CLI, key mapping, rendering) stays in main.rs.
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod game;
pub mod logging;
pub mod round;
pub mod runtime;
pub mod session;

pub use game::{Game, Status};
pub use round::Round;
