//! File-backed collaborators: catalog loading, the deck library and the
//! high score store.

pub mod library;
pub mod load;
pub mod schema;
pub mod score;

pub use library::*;
pub use load::*;
pub use schema::*;
pub use score::*;
