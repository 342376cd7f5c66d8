//! Shared primitive types used across the heredity engine.
//!
//! RULE: The trait catalog is closed. Every per-trait loop walks
//! `Trait::ALL` in order, and that order fixes how much entropy each
//! operation consumes from the generator. Never reorder — only append.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stored value for a numeric trait.
pub type Allele = i32;

/// Exactly two alleles per trait.
pub type AllelePair<T> = [T; 2];

/// Numeric traits: the five personality axes plus the physiological pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericTrait {
    Adventurer,
    Nurturer,
    Mischievous,
    Intellectual,
    Recluse,
    #[serde(rename = "metabolism")]
    Metabolism,
    #[serde(rename = "moodSensitivity")]
    MoodSensitivity,
}

/// Which baseline population a numeric trait draws its wild alleles from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Typically 0–100.
    Personality,
    /// Typically 1–10.
    Physiological,
}

impl NumericTrait {
    pub const ALL: [NumericTrait; 7] = [
        Self::Adventurer,
        Self::Nurturer,
        Self::Mischievous,
        Self::Intellectual,
        Self::Recluse,
        Self::Metabolism,
        Self::MoodSensitivity,
    ];

    pub const PERSONALITY: [NumericTrait; 5] = [
        Self::Adventurer,
        Self::Nurturer,
        Self::Mischievous,
        Self::Intellectual,
        Self::Recluse,
    ];

    pub const fn kind(self) -> NumericKind {
        match self {
            Self::Adventurer
            | Self::Nurturer
            | Self::Mischievous
            | Self::Intellectual
            | Self::Recluse => NumericKind::Personality,
            Self::Metabolism | Self::MoodSensitivity => NumericKind::Physiological,
        }
    }

    /// Key used in genetic-code payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Adventurer      => "Adventurer",
            Self::Nurturer        => "Nurturer",
            Self::Mischievous     => "Mischievous",
            Self::Intellectual    => "Intellectual",
            Self::Recluse         => "Recluse",
            Self::Metabolism      => "metabolism",
            Self::MoodSensitivity => "moodSensitivity",
        }
    }
}

impl fmt::Display for NumericTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Any trait in the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Trait {
    Numeric(NumericTrait),
    SpecialAbility,
}

impl Trait {
    pub const ALL: [Trait; 8] = [
        Self::Numeric(NumericTrait::Adventurer),
        Self::Numeric(NumericTrait::Nurturer),
        Self::Numeric(NumericTrait::Mischievous),
        Self::Numeric(NumericTrait::Intellectual),
        Self::Numeric(NumericTrait::Recluse),
        Self::Numeric(NumericTrait::Metabolism),
        Self::Numeric(NumericTrait::MoodSensitivity),
        Self::SpecialAbility,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Numeric(t)     => t.key(),
            Self::SpecialAbility => "specialAbility",
        }
    }
}

impl From<NumericTrait> for Trait {
    fn from(t: NumericTrait) -> Self {
        Self::Numeric(t)
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rare categorical abilities. Absence is modelled as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    #[serde(rename = "Night Owl")]
    NightOwl,
    #[serde(rename = "Photosynthetic")]
    Photosynthetic,
}

impl SpecialAbility {
    pub const CATALOG: [SpecialAbility; 2] = [Self::NightOwl, Self::Photosynthetic];

    pub const fn label(self) -> &'static str {
        match self {
            Self::NightOwl       => "Night Owl",
            Self::Photosynthetic => "Photosynthetic",
        }
    }
}

impl fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
