//! Editor session configuration
//!
//! Every field has a default, so `{}` is a valid config. Signature names are
//! kept as strings in the serialized form and resolved through the static
//! tables by [`EditorConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SolfaError};
use crate::models::{KeySignature, TimeSignature};
use crate::transposition::MembershipStrategy;

pub const MIN_TEMPO: u32 = 20;
pub const MAX_TEMPO: u32 = 400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Measures shown in a new composition
    pub measure_count: u32,
    pub time_signature: String,
    pub key_signature: String,
    /// Beats per minute
    pub tempo: u32,
    pub history_limit: usize,
    /// Derive A/T/B notes whenever a soprano note is committed
    pub auto_harmonize: bool,
    /// Enforce voice-leading rules during harmonization
    pub strict_voice_leading: bool,
    pub membership_strategy: MembershipStrategy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            measure_count: 16,
            time_signature: TimeSignature::default().as_str().to_string(),
            key_signature: "C major".to_string(),
            tempo: 120,
            history_limit: 100,
            auto_harmonize: true,
            strict_voice_leading: true,
            membership_strategy: MembershipStrategy::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| SolfaError::Config(format!("invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SolfaError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.measure_count == 0 {
            return Err(SolfaError::Config("measure_count must be at least 1".to_string()));
        }
        if self.history_limit == 0 {
            return Err(SolfaError::Config("history_limit must be at least 1".to_string()));
        }
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&self.tempo) {
            return Err(SolfaError::Config(format!(
                "tempo {} out of range ({}-{})",
                self.tempo, MIN_TEMPO, MAX_TEMPO
            )));
        }
        self.resolved_time_signature()?;
        self.resolved_key_signature()?;
        Ok(())
    }

    pub fn resolved_time_signature(&self) -> Result<TimeSignature> {
        self.time_signature.parse()
    }

    pub fn resolved_key_signature(&self) -> Result<KeySignature> {
        KeySignature::named(&self.key_signature)
    }
}
