//! Game-balance constants for genesis, breeding and the genetic code.
//!
//! Only the *shape* of the heredity rules is fixed in code. Every number
//! here is tunable from `data/genetics.json`; `GeneticsConfig::default()`
//! carries the shipped values and is what tests use.

use crate::types::{Allele, NumericKind, NumericTrait};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "genetics.json";
pub const DEFAULT_DNA_SALT: &str = "DEVELOPMENT_ONLY_SALT";
/// Largest accepted environmental jitter.
pub const MAX_JITTER: Allele = 1_000;

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MutationConfig {
    /// Per-allele probability of a mutation step during breeding.
    pub rate:         f64,
    /// Magnitude of a numeric mutation step.
    pub step:         Allele,
    /// Numeric alleles never drop below this value.
    pub allele_floor: Allele,
}

/// Half-open `[min, max)` range of wild allele values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlleleRange {
    pub min: Allele,
    pub max: Allele,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WildConfig {
    pub personality:    AlleleRange,
    pub physiological:  AlleleRange,
    /// Probability that a single wild ability allele is non-null.
    pub ability_chance: f64,
}

impl WildConfig {
    pub fn range_for(&self, kind: NumericKind) -> AlleleRange {
        match kind {
            NumericKind::Personality   => self.personality,
            NumericKind::Physiological => self.physiological,
        }
    }
}

/// One row of the environmental influence table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentalInfluence {
    pub token:  String,
    #[serde(rename = "trait")]
    pub target: NumericTrait,
    pub value:  Allele,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    /// Environmental alleles land within `value ± jitter`.
    pub jitter:     Allele,
    /// Precedence is table order: the first listed token present wins.
    pub influences: Vec<EnvironmentalInfluence>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyConfig {
    /// Allele used for both sides when a legacy payload predates moodSensitivity.
    pub mood_sensitivity: Allele,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneticsConfig {
    pub mutation:    MutationConfig,
    pub wild:        WildConfig,
    pub environment: EnvironmentConfig,
    pub legacy:      LegacyConfig,
    pub dna_salt:    String,
}

impl GeneticsConfig {
    /// Load from `<data_dir>/genetics.json`.
    /// In tests, use GeneticsConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneticsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::info!(
            "Loaded genetics config from {path} ({} environmental influences)",
            config.environment.influences.len()
        );
        Ok(config)
    }

    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.dna_salt = salt.into();
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.mutation.rate) {
            anyhow::bail!("mutation.rate must be within [0, 1], got {}", self.mutation.rate);
        }
        if self.mutation.step <= 0 {
            anyhow::bail!("mutation.step must be positive, got {}", self.mutation.step);
        }
        for (name, range) in [
            ("wild.personality", self.wild.personality),
            ("wild.physiological", self.wild.physiological),
        ] {
            if range.min >= range.max {
                anyhow::bail!("{name} is empty: [{}, {})", range.min, range.max);
            }
        }
        if !(0.0..=1.0).contains(&self.wild.ability_chance) {
            anyhow::bail!(
                "wild.ability_chance must be within [0, 1], got {}",
                self.wild.ability_chance
            );
        }
        if !(0..=MAX_JITTER).contains(&self.environment.jitter) {
            anyhow::bail!(
                "environment.jitter must be within [0, {MAX_JITTER}], got {}",
                self.environment.jitter
            );
        }
        if let Some(row) = self.environment.influences.iter().find(|r| r.token.is_empty()) {
            anyhow::bail!("environmental influence for {} has an empty token", row.target);
        }
        if self.dna_salt.is_empty() {
            anyhow::bail!("dna_salt must not be empty");
        }
        Ok(())
    }
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        use NumericTrait::*;

        let influences = [
            ("Ancient Tome", Intellectual, 70),
            ("Heart Amulet", Nurturer, 70),
            ("Muse Flower", Mischievous, 70),
            ("Nutrient Bar", Metabolism, 8),
            ("Espresso", Metabolism, 9),
            ("Chamomile", Metabolism, 2),
            ("Metabolism-Slowing Tonic", Metabolism, 2),
            ("book", Intellectual, 80),
            ("Fancy Bookshelf", Intellectual, 75),
            ("Masterwork Chair", Recluse, 75),
            ("Logic-Boosting Snack", Intellectual, 60),
            ("Stamina-Up Tea", Adventurer, 65),
            ("Shiny Stone", Mischievous, 60),
            ("Frostbloom", Recluse, 70),
            ("Berries", Nurturer, 50),
        ]
        .into_iter()
        .map(|(token, target, value)| EnvironmentalInfluence {
            token: token.to_owned(),
            target,
            value,
        })
        .collect();

        Self {
            mutation: MutationConfig {
                rate:         0.05,
                step:         1,
                allele_floor: 1,
            },
            wild: WildConfig {
                personality:    AlleleRange { min: 10, max: 31 },
                physiological:  AlleleRange { min: 1, max: 11 },
                ability_chance: 0.01,
            },
            environment: EnvironmentConfig {
                jitter: 1,
                influences,
            },
            legacy: LegacyConfig { mood_sensitivity: 5 },
            dna_salt: DEFAULT_DNA_SALT.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GeneticsConfig::default().validate().expect("default config validates");
    }

    #[test]
    fn shipped_data_file_matches_defaults() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
        let loaded = GeneticsConfig::load(dir).expect("load data/genetics.json");
        assert_eq!(loaded, GeneticsConfig::default());
    }

    #[test]
    fn rejects_empty_wild_range() {
        let mut config = GeneticsConfig::default();
        config.wild.physiological = AlleleRange { min: 5, max: 5 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_jitter() {
        let mut config = GeneticsConfig::default();
        config.environment.jitter = i32::MAX;
        assert!(config.validate().is_err());

        config.environment.jitter = MAX_JITTER;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_categorical_influence_target() {
        let json = r#"{ "token": "Moon Charm", "trait": "specialAbility", "value": 1 }"#;
        assert!(serde_json::from_str::<EnvironmentalInfluence>(json).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GeneticsConfig::load("/definitely/not/here").unwrap_err();
        assert!(err.to_string().contains("genetics.json"));
    }
}
