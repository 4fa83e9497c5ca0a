//! Sol-fa editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serde bridging and error conversion
//! - `theory`: stateless functions (keys, transposition, chords, harmonization)
//! - `editing`: stateless track edits (range, clipboard, batch, shortcuts)
//! - `session`: the `SolfaEditor` class that owns an editing session

pub mod editing;
pub mod helpers;
pub mod session;
pub mod theory;

pub use editing::*;
pub use session::SolfaEditor;
pub use theory::*;
