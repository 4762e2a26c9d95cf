//! Domain types shared across Lexanon.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`EntityId`])
//! - **Error types** ([`LexanonError`], [`RedactionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Configuration, logging and entity editing return [`Result<T, LexanonError>`]:
//!
//! ```rust,no_run
//! use lexanon::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = lexanon::config::load_config("lexanon.toml")?;
//!     println!("{}", config.application.log_level);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{LexanonError, RedactionError};
pub use ids::EntityId;
pub use result::Result;
