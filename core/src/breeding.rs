//! Breeding engine — one parent, the environment, and mutation.
//!
//! For each trait, in `Trait::ALL` order:
//!   1. Parental allele: one of the parent's two, picked uniformly.
//!   2. Second allele: near the target of the first matching environmental
//!      influence, or drawn from the wild baseline when none applies.
//!   3. Mutation: each of the two alleles rolls independently.
//!
//! RULE: Same parent genotype + same token list + same generator state
//! produces the same child. Offspring preview depends on this.
//!
//! Unrecognised tokens are ignored. Callers have already checked that the
//! tokens are things the pet actually owns.

use crate::{
    config::{EnvironmentConfig, GeneticsConfig, MutationConfig},
    genome::{wild_ability, Genome, Genotype},
    rng::SeededRng,
    types::{Allele, NumericTrait, SpecialAbility, Trait},
};
use std::collections::BTreeMap;

/// Targets bound by the active tokens, keyed by trait.
pub type InfluenceTargets = BTreeMap<NumericTrait, Allele>;

/// Walk the influence table in order; the first listed token that is
/// present binds its trait.
pub fn resolve_influences<S: AsRef<str>>(env: &EnvironmentConfig, tokens: &[S]) -> InfluenceTargets {
    let mut targets = InfluenceTargets::new();
    for row in &env.influences {
        if targets.contains_key(&row.target) {
            continue;
        }
        if tokens.iter().any(|t| t.as_ref() == row.token) {
            targets.insert(row.target, row.value);
        }
    }
    targets
}

/// Produce a child genome. Never fails.
pub fn breed<S: AsRef<str>>(
    parent: &Genome,
    tokens: &[S],
    rng: &mut SeededRng,
    config: &GeneticsConfig,
) -> Genome {
    let targets = resolve_influences(&config.environment, tokens);
    if !targets.is_empty() {
        log::debug!("Environmental influences active: {targets:?}");
    }

    let parent_genotype = parent.genotype();
    let mut child = Genotype::uniform(0);

    for t in Trait::ALL {
        match t {
            Trait::Numeric(n) => {
                let inherited = pick_allele(parent_genotype.numeric(n), rng);
                let second = match targets.get(&n) {
                    Some(&target) => environmental_allele(target, rng, config),
                    None => {
                        let range = config.wild.range_for(n.kind());
                        rng.next_int(range.min, range.max)
                    }
                };
                let inherited = maybe_mutate_numeric(n, inherited, rng, &config.mutation);
                let second = maybe_mutate_numeric(n, second, rng, &config.mutation);
                *child.numeric_mut(n) = [inherited, second];
            }
            Trait::SpecialAbility => {
                let inherited = pick_allele(&parent_genotype.special_ability, rng);
                let second = wild_ability(rng, &config.wild);
                let inherited = maybe_mutate_ability(inherited, rng, &config.mutation);
                let second = maybe_mutate_ability(second, rng, &config.mutation);
                child.special_ability = [inherited, second];
            }
        }
    }

    Genome::from_genotype(child, rng)
}

fn pick_allele<T: Copy>(pair: &[T; 2], rng: &mut SeededRng) -> T {
    match rng.choice(pair) {
        Some(&allele) => allele,
        None => pair[0],
    }
}

fn environmental_allele(target: Allele, rng: &mut SeededRng, config: &GeneticsConfig) -> Allele {
    let jitter = config.environment.jitter;
    let offset = rng.next_int(jitter.saturating_neg(), jitter.saturating_add(1));
    target.saturating_add(offset).max(config.mutation.allele_floor)
}

fn maybe_mutate_numeric(
    t: NumericTrait,
    allele: Allele,
    rng: &mut SeededRng,
    mutation: &MutationConfig,
) -> Allele {
    if !rng.chance(mutation.rate) {
        return allele;
    }
    let mutated = mutate_numeric(allele, rng, mutation);
    log::debug!("Mutation on {t}: {allele} -> {mutated}");
    mutated
}

fn maybe_mutate_ability(
    allele: Option<SpecialAbility>,
    rng: &mut SeededRng,
    mutation: &MutationConfig,
) -> Option<SpecialAbility> {
    if !rng.chance(mutation.rate) {
        return allele;
    }
    let mutated = mutate_ability(allele, rng);
    log::debug!("Mutation on specialAbility: {allele:?} -> {mutated:?}");
    mutated
}

/// Shift by ±step (direction is a fair coin), floored.
pub fn mutate_numeric(allele: Allele, rng: &mut SeededRng, mutation: &MutationConfig) -> Allele {
    let shifted = if rng.chance(0.5) {
        allele.saturating_add(mutation.step)
    } else {
        allele.saturating_sub(mutation.step)
    };
    shifted.max(mutation.allele_floor)
}

/// Null gains a catalog ability. A present ability either clears or
/// becomes a different catalog entry; it never stays the same.
pub fn mutate_ability(allele: Option<SpecialAbility>, rng: &mut SeededRng) -> Option<SpecialAbility> {
    match allele {
        None => rng.choice(&SpecialAbility::CATALOG).copied(),
        Some(current) => {
            if rng.chance(0.5) {
                return None;
            }
            let others: Vec<SpecialAbility> = SpecialAbility::CATALOG
                .into_iter()
                .filter(|a| *a != current)
                .collect();
            rng.choice(&others).copied()
        }
    }
}
