//! Classboard Application
//!
//! Headless application shell: signs in through the session context, checks
//! route access, replays pointer-event scripts through a canvas editor and
//! exports the resulting document.

mod app;
mod cli;

pub use app::{App, AppConfig, AppError, parse_events, replay_events};
pub use cli::{Cli, Command, SignInArgs};
