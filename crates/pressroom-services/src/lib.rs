//! External-service clients: generative draft rewriting and best-effort
//! completion notifications.

pub mod draft;
pub mod email;
pub mod notify;

pub use draft::{DraftGenerator, GeminiClient, GenerativeBackend};
pub use email::EmailService;
pub use notify::{IntakeEvent, Notifier};
