//! Client for a remote notes collection with model-backed note reviews.

pub mod analysis;
pub mod api_client;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod shell;

pub use api_client::{NotesApiClient, NotesBackend};
pub use config::Config;
pub use controller::NotesClient;
pub use error::{ClientError, ClientResult};
pub use notes_client_types::Note;
