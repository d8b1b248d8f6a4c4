//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod collab;
pub mod config;
pub mod deck;
pub mod effects;
pub mod events;
pub mod rng;
pub mod run;
pub mod state;

pub use cards::*;
pub use catalog::*;
pub use collab::*;
pub use config::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use rng::*;
pub use run::*;
pub use state::*;
