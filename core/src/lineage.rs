//! A lineage context: one pet's generator plus its genome.
//!
//! RULE: A `Lineage` exclusively owns its generator. Every draw for this
//! pet (breeding, allele edits, phenotype refresh) goes through it, and
//! all access must be serialized by whoever holds the `Lineage`.
//!
//! `genesis` is the only place in the crate allowed to read true entropy,
//! and only to mint the initial seed.

use crate::{
    breeding,
    codec::GeneticCodec,
    config::GeneticsConfig,
    error::GeneticsResult,
    genome::Genome,
    rng::{Seed, SeededRng},
    snapshot::LineageSnapshot,
    types::{Allele, NumericTrait},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    pub generation: u32,
    pub rng:        SeededRng,
    pub genome:     Genome,
}

impl Lineage {
    /// A brand new wild pet with an entropy-minted seed.
    pub fn genesis(config: &GeneticsConfig) -> Self {
        let seed: u32 = rand::random();
        log::info!("Genesis with minted seed {seed}");
        Self::from_seed(seed, config)
    }

    /// A wild pet from a known seed.
    pub fn from_seed(seed: impl Into<Seed>, config: &GeneticsConfig) -> Self {
        let mut rng = SeededRng::new(seed);
        let genome = Genome::wild(&mut rng, config);
        Self {
            generation: 1,
            rng,
            genome,
        }
    }

    /// A generation-1 pet decoded from a genetic code string.
    pub fn import(dna: &str, codec: &GeneticCodec) -> GeneticsResult<Self> {
        let genome = codec.deserialize(dna)?;
        Ok(Self {
            generation: 1,
            rng: SeededRng::new(dna),
            genome,
        })
    }

    pub fn export(&self, codec: &GeneticCodec) -> GeneticsResult<String> {
        codec.serialize(&self.genome)
    }

    /// The child `confirm_offspring` would produce, without advancing
    /// this lineage's generator.
    pub fn preview_offspring<S: AsRef<str>>(&self, tokens: &[S], config: &GeneticsConfig) -> Genome {
        let mut scratch = self.rng.clone();
        breeding::breed(&self.genome, tokens, &mut scratch, config)
    }

    /// Breed for real. The child gets its own generator, seeded from the
    /// parent's next draw.
    pub fn confirm_offspring<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        config: &GeneticsConfig,
    ) -> Lineage {
        let genome = breeding::breed(&self.genome, tokens, &mut self.rng, config);
        let child_seed = self.rng.next_u32();
        let generation = self.generation.saturating_add(1);
        log::info!(
            "Generation {generation} born (seed {child_seed}, archetype {})",
            genome.phenotype().dominant_archetype()
        );
        Lineage {
            generation,
            rng: SeededRng::new(child_seed),
            genome,
        }
    }

    /// Shift both alleles of a trait (e.g. a consumable), floored at the
    /// configured allele floor, then refresh the phenotype.
    pub fn shift_alleles(&mut self, t: NumericTrait, delta: Allele, config: &GeneticsConfig) {
        self.genome
            .shift_numeric(t, delta, config.mutation.allele_floor, &mut self.rng);
    }

    pub fn snapshot(&self) -> LineageSnapshot {
        LineageSnapshot::capture(self)
    }
}
