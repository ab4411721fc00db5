//! # ShareSync - Interactive Front-End for Platform-Native Sync Tools
//!
//! ShareSync synchronizes two locations (local directories or SMB network
//! shares) by delegating the transfer to `rsync` (POSIX) or `robocopy`
//! (Windows) and normalizing their textual output into one structured
//! result. There is no transfer engine here: shares are mounted through the
//! OS, the backend tool does the copying, and this crate turns its output
//! into a `SyncResult`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sharesync::sync::SyncBuilder;
//! use sharesync::types::{Credentials, Direction};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = SyncBuilder::new()
//!         .source("/srv/photos")
//!         .destination("smb://nas.local/backup/photos")
//!         .destination_credentials(Credentials::new("alice", "secret"))
//!         .direction(Direction::OneWay)
//!         .delete_extraneous(true)
//!         .sync()
//!         .await?;
//!     println!("copied {} files", result.files_copied);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod resolve;
pub mod runner;
pub mod session;
pub mod sync;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use backend::{build_commands, Backend, BackendStats};
pub use config::{Config, PromptPolicy};
pub use error::{ResolveError, SyncError};
pub use sync::SyncBuilder;
pub use types::{Credentials, Direction, SyncCommand, SyncRequest, SyncResult};

// vim: ts=4
