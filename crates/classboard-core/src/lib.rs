//! Classboard Core Library
//!
//! Platform-agnostic logic for the Classboard dashboard: freehand stroke
//! capture, the layered scene document, mock authentication and role-based
//! view routing.

pub mod access;
pub mod auth;
pub mod config;
pub mod document;
pub mod editor;
pub mod input;
pub mod recorder;
pub mod routes;
pub mod shapes;
pub mod storage;

pub use access::{Access, DenyReason, authorize};
pub use auth::{AuthBackend, AuthError, Credentials, MockAuthBackend, Registration, Role, Session, SessionContext, User};
pub use config::{ConfigError, EditorConfig};
pub use document::{CanvasInfo, DocumentError, Layer, SceneDocument, FORMAT_VERSION};
pub use editor::{EditorSession, EditorUpdate};
pub use input::{MouseButton, PointerEvent};
pub use recorder::{InProgressStroke, StrokeRecorder};
pub use routes::{Navigation, Route, resolve};
pub use shapes::{PathData, StrokePath, StrokeStyle};
