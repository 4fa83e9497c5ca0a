//! Shared helpers for the WASM API
//!
//! Console logging macros, serde bridging between `JsValue` and the core
//! types, and conversion of core errors into JavaScript exceptions.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::errors::SolfaError;

// ============================================================================
// Console output
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Write one `[WASM]`-prefixed line to the browser console
pub fn console_line(level: ConsoleLevel, msg: &str) {
    match level {
        ConsoleLevel::Debug => console_log(&format!("[WASM] {}", msg)),
        ConsoleLevel::Info => console_info(&format!("[WASM] {}", msg)),
        ConsoleLevel::Warn => console_warn(&format!("[WASM] ⚠️ {}", msg)),
        ConsoleLevel::Error => console_error(&format!("[WASM] ❌ {}", msg)),
    }
}

#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Error, &format!($($arg)*))
    };
}

// ============================================================================
// JsValue <-> core types
// ============================================================================

/// Deserialize an argument; failures become a logged JS error naming `context`
pub fn deserialize<T: DeserializeOwned>(value: JsValue, context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| validation_error(format!("{}: {}", context, e)))
}

/// Like [`deserialize`], with `undefined` and `null` mapping to `None`
pub fn deserialize_optional<T: DeserializeOwned>(value: JsValue, context: &str) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    deserialize(value, context).map(Some)
}

pub fn serialize<T: Serialize>(value: &T, context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| validation_error(format!("{}: {}", context, e)))
}

// ============================================================================
// Errors
// ============================================================================

/// Convert a core error to a JsValue, logging it on the way out
pub fn solfa_error(err: SolfaError) -> JsValue {
    validation_error(err.to_string())
}

/// Parse a string argument with one of the core `FromStr` impls
pub fn parse_arg<T: FromStr<Err = SolfaError>>(value: &str) -> Result<T, JsValue> {
    value.parse().map_err(solfa_error)
}

/// Log `msg` to the console and wrap it for throwing into JS
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    crate::wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}
