// Data-driven scene configuration.
//
// Everything a scene needs lives in `SceneConfig`: the grammar to expand,
// the draw-walk parameters, and the tone-walk parameters. Configs load
// from JSON and validate as a whole: a config that fails validation is
// rejected wholesale, so a previously loaded good config is never half
// overwritten by a bad one.
//
// Named preset constructors (`SceneConfig::sprig()`, `::bush()`, etc.)
// produce different figures by tuning the same parameter set. `sprig` is
// the default scene; `koch_island` is the classic space-filling island
// with no falloff.
//
// See also: `seedsong_grammar::rules` for the stricter validation that
// applies when rules arrive as raw JSON text on the command line.

use seedsong_grammar::{Grammar, RuleSet};
use seedsong_music::{Scale, ToneParams};
use seedsong_turtle::DrawParams;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, FRAC_PI_8};
use std::path::Path;

/// A complete scene: what to grow and how to draw and sound it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    pub grammar: Grammar,
    pub draw: DrawParams,
    pub tone: ToneParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig::sprig()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

impl SceneConfig {
    /// Preset names `preset()` understands, in listing order.
    pub const PRESET_NAMES: [&'static str; 6] = [
        "sprig",
        "bush",
        "blossom",
        "dragon",
        "sierpinski",
        "koch_island",
    ];

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<SceneConfig> {
        match name {
            "sprig" => Some(SceneConfig::sprig()),
            "bush" => Some(SceneConfig::bush()),
            "blossom" => Some(SceneConfig::blossom()),
            "dragon" => Some(SceneConfig::dragon()),
            "sierpinski" => Some(SceneConfig::sierpinski()),
            "koch_island" => Some(SceneConfig::koch_island()),
            _ => None,
        }
    }

    /// Sprig: the default scene. A single stem that sprouts a leaning
    /// copy of itself at every level.
    pub fn sprig() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F]");
        SceneConfig {
            grammar: Grammar {
                axiom: "F".to_string(),
                rules,
                iterations: 5,
            },
            draw: DrawParams {
                segment_length: 50.0,
                turn_angle: FRAC_PI_6,
                falloff: 0.9,
            },
            tone: ToneParams::default(),
        }
    }

    /// Bush: branches both ways at every segment. Dense and shrubby.
    pub fn bush() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F]F[-F]");
        SceneConfig {
            grammar: Grammar {
                axiom: "F".to_string(),
                rules,
                iterations: 4,
            },
            draw: DrawParams {
                segment_length: 40.0,
                turn_angle: FRAC_PI_8,
                falloff: 0.75,
            },
            tone: ToneParams {
                note_duration: 0.15,
                ..ToneParams::default()
            },
        }
    }

    /// Blossom: a bush that ends every branch in a petal wedge.
    pub fn blossom() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "F[+F$]F[-F$]");
        SceneConfig {
            grammar: Grammar {
                axiom: "F".to_string(),
                rules,
                iterations: 3,
            },
            draw: DrawParams {
                segment_length: 35.0,
                turn_angle: FRAC_PI_6,
                falloff: 0.8,
            },
            tone: ToneParams {
                scale: Scale::Major,
                ..ToneParams::default()
            },
        }
    }

    /// Dragon curve: two step symbols folding the path back on itself at
    /// right angles. No falloff, so every segment is equal.
    pub fn dragon() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "F+G");
        rules.insert('G', "F-G");
        SceneConfig {
            grammar: Grammar {
                axiom: "F".to_string(),
                rules,
                iterations: 10,
            },
            draw: DrawParams {
                segment_length: 8.0,
                turn_angle: FRAC_PI_2,
                falloff: 1.0,
            },
            tone: ToneParams {
                scale: Scale::NaturalMinor,
                note_duration: 0.1,
                ..ToneParams::default()
            },
        }
    }

    /// Sierpinski arrowhead: alternating step symbols trace the gasket
    /// with sixty-degree turns. Even iteration counts keep it upright.
    pub fn sierpinski() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "G-F-G");
        rules.insert('G', "F+G+F");
        SceneConfig {
            grammar: Grammar {
                axiom: "F".to_string(),
                rules,
                iterations: 6,
            },
            draw: DrawParams {
                segment_length: 6.0,
                turn_angle: FRAC_PI_3,
                falloff: 1.0,
            },
            tone: ToneParams {
                scale: Scale::Dorian,
                note_duration: 0.1,
                ..ToneParams::default()
            },
        }
    }

    /// Koch island: a square that grows fjords on every side. Full-length
    /// segments and quarter turns.
    pub fn koch_island() -> Self {
        let mut rules = RuleSet::new();
        rules.insert('F', "FF-F-F-F-FF");
        SceneConfig {
            grammar: Grammar {
                axiom: "F-F-F-F".to_string(),
                rules,
                iterations: 4,
            },
            draw: DrawParams {
                segment_length: 4.0,
                turn_angle: FRAC_PI_2,
                falloff: 1.0,
            },
            tone: ToneParams {
                scale: Scale::WholeTone,
                note_duration: 0.05,
                ..ToneParams::default()
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and validation
// ---------------------------------------------------------------------------

impl SceneConfig {
    /// Parse and validate a config from JSON text. Either the whole config
    /// is good or the caller keeps whatever it had before.
    pub fn from_json_str(json: &str) -> Result<SceneConfig, Box<dyn std::error::Error>> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON, the format `load` reads back.
    pub fn to_json_string(&self) -> String {
        // SceneConfig contains no map keys or values serde can fail on.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<SceneConfig, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        SceneConfig::from_json_str(&json)
    }

    /// Check the whole config is usable: a non-empty axiom and in-range
    /// draw and tone parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.grammar.axiom.is_empty() {
            return Err("grammar axiom must not be empty".to_string());
        }
        self.draw.validate()?;
        self.tone.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = SceneConfig::default();
        let json = config.to_json_string();
        let restored = SceneConfig::from_json_str(&json).unwrap();
        // Verify a few fields survived the roundtrip.
        assert_eq!(restored.grammar.axiom, "F");
        assert_eq!(restored.grammar.iterations, 5);
        assert_eq!(restored.grammar.rules.get('F'), Some("F[+F]"));
        assert_eq!(restored.draw.segment_length, 50.0);
        assert_eq!(restored.tone.base_frequency, 220.0);
    }

    #[test]
    fn config_loads_from_json_string() {
        let json = r#"{
            "grammar": {
                "axiom": "F-F-F-F",
                "rules": { "F": "FF-F-F-F-FF" },
                "iterations": 3
            },
            "draw": {
                "segment_length": 4.0,
                "turn_angle": 1.5707963267948966,
                "falloff": 1.0
            },
            "tone": {
                "scale": "WholeTone",
                "note_duration": 0.05,
                "base_frequency": 220.0,
                "volume": 0.8
            }
        }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.grammar.axiom, "F-F-F-F");
        assert_eq!(config.grammar.iterations, 3);
        assert_eq!(config.draw.turn_angle, FRAC_PI_2);
        assert_eq!(config.tone.scale, Scale::WholeTone);
    }

    #[test]
    fn invalid_configs_are_rejected_wholesale() {
        let mut config = SceneConfig::sprig();
        config.draw.falloff = 0.0;
        assert!(config.validate().is_err());

        config = SceneConfig::sprig();
        config.grammar.axiom.clear();
        assert!(config.validate().is_err());

        config = SceneConfig::sprig();
        config.tone.volume = 2.0;
        assert!(config.validate().is_err());

        // from_json_str applies the same check to parsed text.
        let json = r#"{
            "grammar": { "axiom": "", "rules": {}, "iterations": 1 },
            "draw": { "segment_length": 10.0, "turn_angle": 0.5, "falloff": 0.9 },
            "tone": { "scale": "Pentatonic", "note_duration": 0.2,
                      "base_frequency": 220.0, "volume": 0.8 }
        }"#;
        assert!(SceneConfig::from_json_str(json).is_err());
    }

    #[test]
    fn every_preset_name_resolves_and_validates() {
        for name in SceneConfig::PRESET_NAMES {
            let config = SceneConfig::preset(name)
                .unwrap_or_else(|| panic!("preset {name} missing"));
            config
                .validate()
                .unwrap_or_else(|e| panic!("preset {name} invalid: {e}"));
        }
        assert!(SceneConfig::preset("redwood").is_none());
    }

    #[test]
    fn preset_koch_island_keeps_full_length() {
        let koch = SceneConfig::koch_island();
        assert_eq!(koch.draw.falloff, 1.0);
        assert_eq!(koch.grammar.axiom, "F-F-F-F");
    }

    #[test]
    fn preset_dragon_rewrites_both_step_symbols() {
        let dragon = SceneConfig::dragon();
        assert_eq!(dragon.grammar.rules.len(), 2);
        assert!(dragon.grammar.rules.get('G').is_some());
    }

    #[test]
    fn preset_blossom_has_petals() {
        let blossom = SceneConfig::blossom();
        assert!(blossom.grammar.rules.get('F').unwrap().contains('$'));
    }
}
