//! Snapshot serialization — the persisted shape of one lineage.
//!
//! Only the generator's seed and stream position plus the genotype are
//! stored. The phenotype is never persisted; `restore` recomputes it on a
//! scratch copy of the restored generator, so the live stream resumes at
//! exactly the captured position.

use crate::{
    error::GeneticsResult,
    genome::{Genome, Genotype},
    lineage::Lineage,
    rng::SeededRng,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageSnapshot {
    pub generation: u32,
    pub seed:       u32,
    pub rng_state:  u32,
    pub genotype:   Genotype,
}

impl LineageSnapshot {
    pub fn capture(lineage: &Lineage) -> Self {
        Self {
            generation: lineage.generation,
            seed:       lineage.rng.seed(),
            rng_state:  lineage.rng.state(),
            genotype:   lineage.genome.genotype().clone(),
        }
    }

    pub fn restore(self) -> Lineage {
        let rng = SeededRng::restore(self.seed, self.rng_state);
        let genome = Genome::from_genotype(self.genotype, &mut rng.clone());
        Lineage {
            generation: self.generation,
            rng,
            genome,
        }
    }

    pub fn to_json(&self) -> GeneticsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> GeneticsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
