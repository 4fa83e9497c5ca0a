//! Tonic sol-fa notation editor WASM module
//!
//! Scale degrees and key signatures, four-part (SATB) note tracks, chord
//! derivation with voice-leading checks, selection and clipboard editing,
//! undo history and keyboard shortcuts. The browser UI drives an
//! [`api::SolfaEditor`]; everything below it is plain Rust and testable
//! off-wasm.

pub mod api;
pub mod config;
pub mod errors;
pub mod harmony;
pub mod models;
pub mod playback;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod transposition;
pub mod undo;

// Re-export commonly used types
pub use config::EditorConfig;
pub use errors::{Result, SolfaError};
pub use models::*;
pub use session::{EditorEvent, EditorSession};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }

    log::info!("Sol-fa editor WASM module initialized");
}
