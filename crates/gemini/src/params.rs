//! Named generation parameter presets.
//!
//! A request selects a preset by config identifier; unknown identifiers
//! fall back to the default preset rather than failing the request.

use serde::Serialize;

/// Sampling parameters sent as the request's `generationConfig`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Balanced preset used when no config is specified.
    pub fn default_preset() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 1024,
        }
    }

    /// Low-temperature preset for deterministic output.
    pub fn precise() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 20,
            max_output_tokens: 1024,
        }
    }

    /// High-temperature preset for exploratory output.
    pub fn creative() -> Self {
        Self {
            temperature: 0.95,
            top_p: 0.97,
            top_k: 64,
            max_output_tokens: 2048,
        }
    }

    /// Resolve a config identifier to its preset. Unknown identifiers
    /// resolve to the default preset.
    pub fn for_config(config: &str) -> Self {
        match config {
            "precise" => Self::precise(),
            "creative" => Self::creative(),
            _ => Self::default_preset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_configs_resolve_to_their_presets() {
        assert_eq!(GenerationParams::for_config("precise"), GenerationParams::precise());
        assert_eq!(GenerationParams::for_config("creative"), GenerationParams::creative());
    }

    #[test]
    fn unknown_config_falls_back_to_default() {
        assert_eq!(
            GenerationParams::for_config("does-not-exist"),
            GenerationParams::default_preset()
        );
        assert_eq!(
            GenerationParams::for_config("default"),
            GenerationParams::default_preset()
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(GenerationParams::default_preset()).expect("json");
        assert!(json.get("topP").is_some());
        assert!(json.get("maxOutputTokens").is_some());
    }
}
