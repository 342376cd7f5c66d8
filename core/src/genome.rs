//! Genotype, phenotype and the Genome that pairs them.
//!
//! RULE: The genotype is authoritative; the phenotype is a cache.
//! Any code that changes alleles must go through a `Genome` method that
//! recomputes the phenotype with the owner's generator. Hand-editing the
//! phenotype is never allowed.
//!
//! Dominance rules:
//!   - Numeric traits express the larger allele.
//!   - `specialAbility`: non-null beats null; two different abilities are
//!     resolved by one `choice` draw on the supplied generator.
//!   - Homozygous means the two alleles are exactly equal. For
//!     `specialAbility` a null pair is not homozygous.

use crate::{
    config::{GeneticsConfig, WildConfig},
    rng::SeededRng,
    types::{Allele, AllelePair, NumericTrait, SpecialAbility, Trait},
};
use serde::{Deserialize, Serialize};

// ── Genotype ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genotype {
    #[serde(rename = "Adventurer")]
    pub adventurer:       AllelePair<Allele>,
    #[serde(rename = "Nurturer")]
    pub nurturer:         AllelePair<Allele>,
    #[serde(rename = "Mischievous")]
    pub mischievous:      AllelePair<Allele>,
    #[serde(rename = "Intellectual")]
    pub intellectual:     AllelePair<Allele>,
    #[serde(rename = "Recluse")]
    pub recluse:          AllelePair<Allele>,
    #[serde(rename = "metabolism")]
    pub metabolism:       AllelePair<Allele>,
    #[serde(rename = "moodSensitivity")]
    pub mood_sensitivity: AllelePair<Allele>,
    #[serde(rename = "specialAbility")]
    pub special_ability:  AllelePair<Option<SpecialAbility>>,
}

impl Genotype {
    /// Every numeric trait at `[value, value]`, no special ability.
    pub fn uniform(value: Allele) -> Self {
        Self {
            adventurer:       [value; 2],
            nurturer:         [value; 2],
            mischievous:      [value; 2],
            intellectual:     [value; 2],
            recluse:          [value; 2],
            metabolism:       [value; 2],
            mood_sensitivity: [value; 2],
            special_ability:  [None; 2],
        }
    }

    /// Draw an unbred genotype from the wild baseline.
    pub fn wild(rng: &mut SeededRng, wild: &WildConfig) -> Self {
        let mut genotype = Self::uniform(0);
        for t in NumericTrait::ALL {
            let range = wild.range_for(t.kind());
            let first = rng.next_int(range.min, range.max);
            let second = rng.next_int(range.min, range.max);
            *genotype.numeric_mut(t) = [first, second];
        }
        let first = wild_ability(rng, wild);
        let second = wild_ability(rng, wild);
        genotype.special_ability = [first, second];
        genotype
    }

    pub fn numeric(&self, t: NumericTrait) -> &AllelePair<Allele> {
        match t {
            NumericTrait::Adventurer      => &self.adventurer,
            NumericTrait::Nurturer        => &self.nurturer,
            NumericTrait::Mischievous     => &self.mischievous,
            NumericTrait::Intellectual    => &self.intellectual,
            NumericTrait::Recluse         => &self.recluse,
            NumericTrait::Metabolism      => &self.metabolism,
            NumericTrait::MoodSensitivity => &self.mood_sensitivity,
        }
    }

    pub fn numeric_mut(&mut self, t: NumericTrait) -> &mut AllelePair<Allele> {
        match t {
            NumericTrait::Adventurer      => &mut self.adventurer,
            NumericTrait::Nurturer        => &mut self.nurturer,
            NumericTrait::Mischievous     => &mut self.mischievous,
            NumericTrait::Intellectual    => &mut self.intellectual,
            NumericTrait::Recluse         => &mut self.recluse,
            NumericTrait::Metabolism      => &mut self.metabolism,
            NumericTrait::MoodSensitivity => &mut self.mood_sensitivity,
        }
    }

    /// Apply the dominance rules, walking traits in canonical order.
    pub fn express(&self, rng: &mut SeededRng) -> Phenotype {
        let mut phenotype = Phenotype::default();
        for t in Trait::ALL {
            match t {
                Trait::Numeric(n) => {
                    let [a, b] = *self.numeric(n);
                    phenotype.record_numeric(n, a.max(b), a == b);
                }
                Trait::SpecialAbility => {
                    let (expressed, homozygous) = express_ability(self.special_ability, rng);
                    phenotype.special_ability = expressed;
                    phenotype.is_homozygous_special_ability = homozygous;
                }
            }
        }
        phenotype
    }
}

/// A single wild ability allele: usually null, rarely a catalog entry.
pub(crate) fn wild_ability(rng: &mut SeededRng, wild: &WildConfig) -> Option<SpecialAbility> {
    if rng.chance(wild.ability_chance) {
        rng.choice(&SpecialAbility::CATALOG).copied()
    } else {
        None
    }
}

fn express_ability(
    alleles: AllelePair<Option<SpecialAbility>>,
    rng: &mut SeededRng,
) -> (Option<SpecialAbility>, bool) {
    match alleles {
        [None, None] => (None, false),
        [Some(a), None] | [None, Some(a)] => (Some(a), false),
        [Some(a), Some(b)] if a == b => (Some(a), true),
        [Some(a), Some(b)] => {
            let picked = rng.choice(&[a, b]).copied();
            log::debug!("specialAbility tie-break {a} vs {b} -> {picked:?}");
            (picked, false)
        }
    }
}

// ── Phenotype ────────────────────────────────────────────────────────────────

/// Expressed values read by the simulation layer. Never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phenotype {
    #[serde(rename = "Adventurer")]
    pub adventurer:       Allele,
    #[serde(rename = "Nurturer")]
    pub nurturer:         Allele,
    #[serde(rename = "Mischievous")]
    pub mischievous:      Allele,
    #[serde(rename = "Intellectual")]
    pub intellectual:     Allele,
    #[serde(rename = "Recluse")]
    pub recluse:          Allele,
    #[serde(rename = "metabolism")]
    pub metabolism:       Allele,
    #[serde(rename = "moodSensitivity")]
    pub mood_sensitivity: Allele,
    #[serde(rename = "specialAbility")]
    pub special_ability:  Option<SpecialAbility>,

    #[serde(rename = "isHomozygousAdventurer")]
    pub is_homozygous_adventurer:       bool,
    #[serde(rename = "isHomozygousNurturer")]
    pub is_homozygous_nurturer:         bool,
    #[serde(rename = "isHomozygousMischievous")]
    pub is_homozygous_mischievous:      bool,
    #[serde(rename = "isHomozygousIntellectual")]
    pub is_homozygous_intellectual:     bool,
    #[serde(rename = "isHomozygousRecluse")]
    pub is_homozygous_recluse:          bool,
    #[serde(rename = "isHomozygousMetabolism")]
    pub is_homozygous_metabolism:       bool,
    #[serde(rename = "isHomozygousMoodSensitivity")]
    pub is_homozygous_mood_sensitivity: bool,
    #[serde(rename = "isHomozygousSpecialAbility")]
    pub is_homozygous_special_ability:  bool,
}

impl Phenotype {
    pub fn value(&self, t: NumericTrait) -> Allele {
        match t {
            NumericTrait::Adventurer      => self.adventurer,
            NumericTrait::Nurturer        => self.nurturer,
            NumericTrait::Mischievous     => self.mischievous,
            NumericTrait::Intellectual    => self.intellectual,
            NumericTrait::Recluse         => self.recluse,
            NumericTrait::Metabolism      => self.metabolism,
            NumericTrait::MoodSensitivity => self.mood_sensitivity,
        }
    }

    pub fn is_homozygous(&self, t: Trait) -> bool {
        match t {
            Trait::Numeric(NumericTrait::Adventurer)      => self.is_homozygous_adventurer,
            Trait::Numeric(NumericTrait::Nurturer)        => self.is_homozygous_nurturer,
            Trait::Numeric(NumericTrait::Mischievous)     => self.is_homozygous_mischievous,
            Trait::Numeric(NumericTrait::Intellectual)    => self.is_homozygous_intellectual,
            Trait::Numeric(NumericTrait::Recluse)         => self.is_homozygous_recluse,
            Trait::Numeric(NumericTrait::Metabolism)      => self.is_homozygous_metabolism,
            Trait::Numeric(NumericTrait::MoodSensitivity) => self.is_homozygous_mood_sensitivity,
            Trait::SpecialAbility                         => self.is_homozygous_special_ability,
        }
    }

    /// Strongest personality axis. Ties go to the earlier axis.
    pub fn dominant_archetype(&self) -> NumericTrait {
        NumericTrait::PERSONALITY
            .into_iter()
            .fold(NumericTrait::Adventurer, |best, t| {
                if self.value(t) > self.value(best) { t } else { best }
            })
    }

    fn record_numeric(&mut self, t: NumericTrait, value: Allele, homozygous: bool) {
        let (slot, flag) = match t {
            NumericTrait::Adventurer => {
                (&mut self.adventurer, &mut self.is_homozygous_adventurer)
            }
            NumericTrait::Nurturer => (&mut self.nurturer, &mut self.is_homozygous_nurturer),
            NumericTrait::Mischievous => {
                (&mut self.mischievous, &mut self.is_homozygous_mischievous)
            }
            NumericTrait::Intellectual => {
                (&mut self.intellectual, &mut self.is_homozygous_intellectual)
            }
            NumericTrait::Recluse => (&mut self.recluse, &mut self.is_homozygous_recluse),
            NumericTrait::Metabolism => {
                (&mut self.metabolism, &mut self.is_homozygous_metabolism)
            }
            NumericTrait::MoodSensitivity => {
                (&mut self.mood_sensitivity, &mut self.is_homozygous_mood_sensitivity)
            }
        };
        *slot = value;
        *flag = homozygous;
    }
}

// ── Genome ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    genotype:  Genotype,
    phenotype: Phenotype,
}

impl Genome {
    /// A fresh wild genome, as at pet genesis.
    pub fn wild(rng: &mut SeededRng, config: &GeneticsConfig) -> Self {
        let genotype = Genotype::wild(rng, &config.wild);
        Self::from_genotype(genotype, rng)
    }

    /// Build from known alleles, computing the phenotype now.
    pub fn from_genotype(genotype: Genotype, rng: &mut SeededRng) -> Self {
        let phenotype = genotype.express(rng);
        Self { genotype, phenotype }
    }

    /// Build from a previously computed pair without spending entropy.
    /// The phenotype is trusted as-is.
    pub fn from_parts(genotype: Genotype, phenotype: Phenotype) -> Self {
        Self { genotype, phenotype }
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    pub fn phenotype(&self) -> &Phenotype {
        &self.phenotype
    }

    /// Recompute the phenotype from the current genotype and cache it.
    pub fn calculate_phenotype(&mut self, rng: &mut SeededRng) -> &Phenotype {
        self.phenotype = self.genotype.express(rng);
        &self.phenotype
    }

    pub fn set_numeric(&mut self, t: NumericTrait, alleles: AllelePair<Allele>, rng: &mut SeededRng) {
        *self.genotype.numeric_mut(t) = alleles;
        self.calculate_phenotype(rng);
    }

    pub fn set_special_ability(
        &mut self,
        alleles: AllelePair<Option<SpecialAbility>>,
        rng: &mut SeededRng,
    ) {
        self.genotype.special_ability = alleles;
        self.calculate_phenotype(rng);
    }

    /// Shift both alleles of a numeric trait by `delta`, never below `floor`.
    pub fn shift_numeric(
        &mut self,
        t: NumericTrait,
        delta: Allele,
        floor: Allele,
        rng: &mut SeededRng,
    ) {
        let [a, b] = *self.genotype.numeric(t);
        let shifted = [
            a.saturating_add(delta).max(floor),
            b.saturating_add(delta).max(floor),
        ];
        log::debug!("{t} alleles [{a}, {b}] -> {shifted:?}");
        self.set_numeric(t, shifted, rng);
    }
}
