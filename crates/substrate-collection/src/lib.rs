//! Spore papers for the Substrate simulation.
//!
//! A spore paper has a fixed number of slots. Once every slot holds the
//! same spore-harvestable mushroom, a collection timer runs; when it
//! expires the mushrooms rot away and the paper is printed with their
//! spore type. A printed paper never collects again.
//!
//! # Modules
//!
//! - [`config`] -- Per-paper-type tunables
//! - [`timer`] -- The collection timer, insert and take actions
//! - [`error`] -- Error and rejection types

pub mod config;
pub mod error;
pub mod timer;

pub use config::SporePaperConfig;
pub use error::{CollectionError, CollectionRejection};
pub use timer::{CollectionTick, CollectionTimer, printed_paper_code};
