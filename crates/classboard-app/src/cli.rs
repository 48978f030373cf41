//! Command line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Classboard canvas tools.
#[derive(Debug, Parser)]
#[command(name = "classboard", version, about)]
pub struct Cli {
    /// Directory for persisted client state (the signed-in session).
    #[arg(long, env = "CLASSBOARD_STORAGE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Keep all state in memory for this run.
    #[arg(long, global = true, conflicts_with = "storage_dir")]
    pub ephemeral: bool,

    /// Editor config file (JSON).
    #[arg(long, env = "CLASSBOARD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Optional sign-in flags.
#[derive(Debug, Clone, Args)]
pub struct SignInArgs {
    /// Sign in with this email before running the command.
    #[arg(long, requires = "password")]
    pub email: Option<String>,

    /// Password for `--email`.
    #[arg(long, requires = "email")]
    pub password: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a pointer-event script through a canvas editor and export it.
    Replay {
        /// JSON array of pointer events.
        #[arg(long)]
        events: PathBuf,

        /// Section the canvas belongs to.
        #[arg(long)]
        section: String,

        /// Horizontal on-screen offset of the drawing surface.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset_x: f64,

        /// Vertical on-screen offset of the drawing surface.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset_y: f64,

        /// Write the document JSON here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write an SVG rendering.
        #[arg(long)]
        svg: Option<PathBuf>,

        #[command(flatten)]
        sign_in: SignInArgs,
    },
    /// Show what navigating to a path would display.
    Route {
        /// Dashboard path, e.g. `/teacher` or `/canvas/math-7`.
        path: String,

        #[command(flatten)]
        sign_in: SignInArgs,
    },
    /// Sign in and persist the session.
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the persisted session.
    SignOut,
}
