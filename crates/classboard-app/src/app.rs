//! Application state and command execution.

use crate::cli::{Cli, Command, SignInArgs};
use classboard_core::auth::{AuthError, Credentials, MockAuthBackend, Session, SessionContext};
use classboard_core::config::{ConfigError, EditorConfig};
use classboard_core::document::{DocumentError, SceneDocument};
use classboard_core::editor::{EditorSession, EditorUpdate};
use classboard_core::input::PointerEvent;
use classboard_core::routes::{Navigation, Route, resolve};
use classboard_core::storage::{FileStorage, MemoryStorage, Storage, StorageError};
use classboard_render::{RenderContext, Renderer, RendererError, SvgRenderer};
use kurbo::Vec2;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid event script: {0}")]
    Events(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Access to {path} denied, redirected to {redirect}")]
    AccessDenied { path: String, redirect: String },
    #[error("No such page: {0}")]
    NotFound(String),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AppError + '_ {
    move |source| AppError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Settings for every editor session.
    pub editor: EditorConfig,
    /// Where persisted state lives; `None` uses the platform default.
    pub storage_dir: Option<PathBuf>,
    /// Keep state in memory only.
    pub ephemeral: bool,
}

impl AppConfig {
    /// Build the config from command line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        let editor = match &cli.config {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            editor,
            storage_dir: cli.storage_dir.clone(),
            ephemeral: cli.ephemeral,
        })
    }

    fn storage(&self) -> Result<Arc<dyn Storage>, AppError> {
        if self.ephemeral {
            return Ok(Arc::new(MemoryStorage::new()));
        }
        let storage = match &self.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        log::debug!("Using storage at {}", storage.base_path().display());
        Ok(Arc::new(storage))
    }
}

/// Parse a pointer-event script.
pub fn parse_events(json: &str) -> Result<Vec<PointerEvent>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Replay `events` through a fresh editor for `section_id`.
///
/// The session must be allowed to open `/canvas/<section_id>`.
pub fn replay_events(
    session: Option<&Session>,
    section_id: &str,
    events: &[PointerEvent],
    offset: Vec2,
    config: &EditorConfig,
) -> Result<SceneDocument, AppError> {
    let route = Route::Canvas {
        section_id: section_id.to_string(),
    };
    match resolve(&route.path(), session) {
        Navigation::Render(_) => {}
        Navigation::Redirect(to) => {
            return Err(AppError::AccessDenied {
                path: route.path(),
                redirect: to.path(),
            });
        }
        Navigation::NotFound => return Err(AppError::NotFound(route.path())),
    }

    let mut editor = EditorSession::open(section_id, config);
    editor.set_surface_offset(offset);
    let committed = events
        .iter()
        .filter(|event| matches!(editor.handle_pointer_event(event), EditorUpdate::Committed(_)))
        .count();
    log::debug!("Replayed {} events ({} strokes committed)", events.len(), committed);
    Ok(editor.close())
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    session: SessionContext,
}

impl App {
    /// Create the app and restore any persisted session.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        let storage = config.storage()?;
        let backend = Arc::new(MockAuthBackend::with_demo_accounts());
        let mut session = SessionContext::new(backend, storage);
        session.init().await?;
        Ok(Self { config, session })
    }

    /// Current session, if signed in.
    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    async fn sign_in_if_requested(&mut self, args: &SignInArgs) -> Result<(), AppError> {
        if let (Some(email), Some(password)) = (&args.email, &args.password) {
            self.session
                .sign_in(&Credentials::new(email.as_str(), password.as_str()))
                .await?;
        }
        Ok(())
    }

    /// Execute one command, writing human output to `out`.
    pub async fn run(&mut self, command: Command, out: &mut dyn Write) -> Result<(), AppError> {
        match command {
            Command::Replay {
                events,
                section,
                offset_x,
                offset_y,
                out: out_path,
                svg,
                sign_in,
            } => {
                self.sign_in_if_requested(&sign_in).await?;
                let script = std::fs::read_to_string(&events).map_err(io_error(&events))?;
                let events = parse_events(&script)?;
                let document = replay_events(
                    self.session(),
                    &section,
                    &events,
                    Vec2::new(offset_x, offset_y),
                    &self.config.editor,
                )?;

                let json = document.to_json()?;
                match out_path {
                    Some(path) => {
                        std::fs::write(&path, &json).map_err(io_error(&path))?;
                        log::info!("Wrote {} strokes to {}", document.object_count(), path.display());
                    }
                    None => writeln!(out, "{}", json).map_err(io_error(Path::new("stdout")))?,
                }

                if let Some(path) = svg {
                    let rendered = SvgRenderer::from_config(&self.config.editor)
                        .render(&RenderContext::new(&document))?;
                    std::fs::write(&path, rendered).map_err(io_error(&path))?;
                    log::info!("Wrote SVG to {}", path.display());
                }
            }
            Command::Route { path, sign_in } => {
                self.sign_in_if_requested(&sign_in).await?;
                let line = match resolve(&path, self.session()) {
                    Navigation::Render(route) => format!("render {}", route),
                    Navigation::Redirect(route) => format!("redirect {}", route),
                    Navigation::NotFound => "not found".to_string(),
                };
                writeln!(out, "{}", line).map_err(io_error(Path::new("stdout")))?;
            }
            Command::SignIn { email, password } => {
                let session = self
                    .session
                    .sign_in(&Credentials::new(email, password))
                    .await?;
                let line = format!("Signed in as {} ({})", session.user.email, session.role());
                writeln!(out, "{}", line).map_err(io_error(Path::new("stdout")))?;
            }
            Command::SignOut => {
                self.session.sign_out().await?;
                writeln!(out, "Signed out").map_err(io_error(Path::new("stdout")))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classboard_core::auth::{DEMO_PASSWORD, Role};
    use pollster::block_on;
    use tempfile::TempDir;

    const SCRIPT: &str = r#"[
        { "type": "down", "position": { "x": 110, "y": 60 } },
        { "type": "move", "position": { "x": 120, "y": 60 } },
        { "type": "up", "position": { "x": 120, "y": 60 } },
        { "type": "move", "position": { "x": 300, "y": 300 } }
    ]"#;

    fn ephemeral() -> AppConfig {
        AppConfig {
            ephemeral: true,
            ..AppConfig::default()
        }
    }

    fn signed_in(role: Role) -> App {
        let mut app = block_on(App::start(ephemeral())).unwrap();
        let email = format!("{}@classboard.dev", role);
        block_on(app.session.sign_in(&Credentials::new(email, DEMO_PASSWORD))).unwrap();
        app
    }

    fn run(app: &mut App, command: Command) -> Result<String, AppError> {
        let mut out = Vec::new();
        block_on(app.run(command, &mut out))?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events(SCRIPT).unwrap();
        assert_eq!(events.len(), 4);
        assert!(matches!(parse_events("[{\"type\": \"jump\"}]"), Err(AppError::Events(_))));
    }

    #[test]
    fn test_replay_applies_offset() {
        let app = signed_in(Role::Student);
        let events = parse_events(SCRIPT).unwrap();
        let doc = replay_events(
            app.session(),
            "math-7",
            &events,
            Vec2::new(100.0, 50.0),
            &EditorConfig::default(),
        )
        .unwrap();

        let objects = doc.layers()[0].objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].path().as_str(), "M 10 10 L 20 10");
    }

    #[test]
    fn test_replay_requires_sign_in() {
        let events = parse_events(SCRIPT).unwrap();
        let result = replay_events(None, "math-7", &events, Vec2::ZERO, &EditorConfig::default());
        match result {
            Err(AppError::AccessDenied { path, redirect }) => {
                assert_eq!(path, "/canvas/math-7");
                assert_eq!(redirect, "/login");
            }
            other => panic!("expected access denied, got {:?}", other.map(|d| d.object_count())),
        }
    }

    #[test]
    fn test_replay_unknown_section_path() {
        let app = signed_in(Role::Teacher);
        let result = replay_events(app.session(), "a/b", &[], Vec2::ZERO, &EditorConfig::default());
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_replay_command_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let events = dir.path().join("events.json");
        let out = dir.path().join("doc.json");
        let svg = dir.path().join("doc.svg");
        std::fs::write(&events, SCRIPT).unwrap();

        let mut app = block_on(App::start(ephemeral())).unwrap();
        let printed = run(
            &mut app,
            Command::Replay {
                events,
                section: "art-1".to_string(),
                offset_x: 100.0,
                offset_y: 50.0,
                out: Some(out.clone()),
                svg: Some(svg.clone()),
                sign_in: SignInArgs {
                    email: Some("student@classboard.dev".to_string()),
                    password: Some(DEMO_PASSWORD.to_string()),
                },
            },
        )
        .unwrap();
        assert!(printed.is_empty());

        let doc = SceneDocument::from_json(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(doc.object_count(), 1);
        let rendered = std::fs::read_to_string(svg).unwrap();
        assert!(rendered.starts_with("<svg"));
        assert!(rendered.contains("M 10 10 L 20 10"));
    }

    #[test]
    fn test_route_command() {
        let mut app = signed_in(Role::Parent);
        let printed = run(
            &mut app,
            Command::Route {
                path: "/teacher".to_string(),
                sign_in: SignInArgs {
                    email: None,
                    password: None,
                },
            },
        )
        .unwrap();
        assert_eq!(printed.trim(), "redirect /parent");
    }

    #[test]
    fn test_session_persists_across_runs() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            storage_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };

        let mut first = block_on(App::start(config.clone())).unwrap();
        let printed = run(
            &mut first,
            Command::SignIn {
                email: "teacher@classboard.dev".to_string(),
                password: DEMO_PASSWORD.to_string(),
            },
        )
        .unwrap();
        assert_eq!(printed.trim(), "Signed in as teacher@classboard.dev (teacher)");

        let mut second = block_on(App::start(config.clone())).unwrap();
        assert_eq!(second.session().map(|s| s.role()), Some(Role::Teacher));
        run(&mut second, Command::SignOut).unwrap();

        let third = block_on(App::start(config)).unwrap();
        assert!(third.session().is_none());
    }

    #[test]
    fn test_bad_credentials() {
        let mut app = block_on(App::start(ephemeral())).unwrap();
        let result = run(
            &mut app,
            Command::SignIn {
                email: "teacher@classboard.dev".to_string(),
                password: "nope".to_string(),
            },
        );
        assert!(matches!(result, Err(AppError::Auth(AuthError::InvalidCredentials))));
    }
}
