//! Presentation session lifecycle.
//!
//! [`SessionController`] holds at most one live [`Session`] and replaces it
//! atomically on [`SessionController::reload`]. Concrete rendering lives
//! behind [`PresentationHost`]; [`LayoutHost`] is the file-backed default.

pub mod controller;
pub mod errors;
pub mod layout_host;
pub mod traits;
pub mod types;

pub use controller::SessionController;
pub use errors::SessionError;
pub use layout_host::{LayoutHost, WidgetStrip};
pub use traits::{ContentProvider, PresentationHost};
pub use types::{Session, SessionId, SessionSnapshot};
