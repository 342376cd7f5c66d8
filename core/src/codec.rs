//! Genetic code codec — shareable, checksum-protected genotype strings.
//!
//! Wire format: `<base64(json(genotype))>.<checksum>`
//!
//!   - Only the genotype travels. The phenotype is recomputed on import.
//!   - checksum = xxh32(encoded ++ salt), 8 lowercase hex digits.
//!   - On import the phenotype is computed with a temporary generator
//!     seeded from the checksum value, so every installation importing the
//!     same string expresses the same phenotype.
//!
//! The checksum guards against casual or accidental edits only. It is not
//! a cryptographic signature.

use crate::{
    config::{GeneticsConfig, LegacyConfig},
    error::{GeneticsError, GeneticsResult},
    genome::{Genome, Genotype},
    migration::{self, CURRENT_SCHEMA, SCHEMA_KEY},
    rng::SeededRng,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use xxhash_rust::xxh32::xxh32;

pub const DNA_DELIMITER: char = '.';

/// Canonical payload: schema marker first, then the genotype fields.
#[derive(Serialize)]
struct DnaPayload<'a> {
    schema: u64,
    #[serde(flatten)]
    genotype: &'a Genotype,
}

#[derive(Debug, Clone)]
pub struct GeneticCodec {
    salt:   String,
    legacy: LegacyConfig,
}

impl GeneticCodec {
    pub fn new(salt: impl Into<String>, legacy: LegacyConfig) -> Self {
        Self { salt: salt.into(), legacy }
    }

    pub fn from_config(config: &GeneticsConfig) -> Self {
        Self::new(config.dna_salt.clone(), config.legacy.clone())
    }

    /// Numeric checksum of an encoded payload.
    pub fn checksum_value(&self, encoded: &str) -> u32 {
        let mut input = Vec::with_capacity(encoded.len() + self.salt.len());
        input.extend_from_slice(encoded.as_bytes());
        input.extend_from_slice(self.salt.as_bytes());
        xxh32(&input, 0)
    }

    /// Checksum as it appears on the wire.
    pub fn checksum(&self, encoded: &str) -> String {
        format!("{:08x}", self.checksum_value(encoded))
    }

    /// Encode a genome's genotype as a genetic code string.
    pub fn serialize(&self, genome: &Genome) -> GeneticsResult<String> {
        let payload = DnaPayload {
            schema:   CURRENT_SCHEMA,
            genotype: genome.genotype(),
        };
        let json = serde_json::to_string(&payload)?;
        let encoded = STANDARD.encode(json);
        let checksum = self.checksum(&encoded);
        Ok(format!("{encoded}{DNA_DELIMITER}{checksum}"))
    }

    /// Decode and validate a genetic code string.
    pub fn deserialize(&self, text: &str) -> GeneticsResult<Genome> {
        let result = self.decode(text);
        if let Err(e) = &result {
            log::warn!("Rejected genetic code: {e}");
        }
        result
    }

    fn decode(&self, text: &str) -> GeneticsResult<Genome> {
        let (encoded, checksum) = split_parts(text)?;

        let expected = self.checksum_value(encoded);
        if checksum != format!("{expected:08x}") {
            return Err(GeneticsError::IntegrityCheckFailed);
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| GeneticsError::structure(format!("payload is not base64: {e}")))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| GeneticsError::structure(format!("payload is not JSON: {e}")))?;

        let mut value = migration::migrate(value, &self.legacy)?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove(SCHEMA_KEY);
        }
        let genotype: Genotype = serde_json::from_value(value)
            .map_err(|e| GeneticsError::structure(e.to_string()))?;

        let mut rng = SeededRng::new(expected);
        Ok(Genome::from_genotype(genotype, &mut rng))
    }
}

/// Exactly two non-empty, period-delimited parts.
fn split_parts(text: &str) -> GeneticsResult<(&str, &str)> {
    let mut parts = text.split(DNA_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(encoded), Some(checksum), None) if !encoded.is_empty() && !checksum.is_empty() => {
            Ok((encoded, checksum))
        }
        _ => Err(GeneticsError::InvalidFormat),
    }
}
