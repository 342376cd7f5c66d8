//! Heredity engine for a simulated pet.
//!
//! Dependency order, leaves first:
//!   rng → genome → breeding → codec
//!
//! `lineage` ties one generator to one genome; `snapshot` is its
//! persisted shape.

pub mod breeding;
pub mod codec;
pub mod config;
pub mod error;
pub mod genome;
pub mod lineage;
pub mod migration;
pub mod rng;
pub mod snapshot;
pub mod types;

pub use codec::GeneticCodec;
pub use config::GeneticsConfig;
pub use error::{GeneticsError, GeneticsResult};
pub use genome::{Genome, Genotype, Phenotype};
pub use lineage::Lineage;
pub use rng::{Seed, SeededRng};
pub use types::{Allele, AllelePair, NumericTrait, SpecialAbility, Trait};
