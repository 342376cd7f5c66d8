//! Versioned migration of decoded genetic-code payloads.
//!
//! Payloads carry a `schema` key. A payload without one predates it and
//! is schema 1. Migration runs after the checksum has been verified and
//! before the payload is parsed into a `Genotype`, so structural
//! validation only ever sees the current shape.
//!
//! Schema 1 → 2:
//!   - A trait stored as a flat scalar becomes the homozygous pair `[v, v]`.
//!   - A missing `moodSensitivity` gets the configured legacy pair.
//!   - A missing `specialAbility` becomes `[null, null]`.
//!
//! Personality axes and `metabolism` have no legacy default.

use crate::{
    config::LegacyConfig,
    error::{GeneticsError, GeneticsResult},
    types::{NumericTrait, Trait},
};
use serde_json::{json, Map, Value};

pub const SCHEMA_KEY: &str = "schema";
pub const CURRENT_SCHEMA: u64 = 2;

type MigrationStep = fn(&mut Map<String, Value>, &LegacyConfig);

/// `MIGRATIONS[n]` upgrades schema `n + 1` to `n + 2`. Append only.
const MIGRATIONS: [MigrationStep; (CURRENT_SCHEMA - 1) as usize] = [v1_to_v2];

/// Bring a decoded payload up to `CURRENT_SCHEMA`.
pub fn migrate(payload: Value, legacy: &LegacyConfig) -> GeneticsResult<Value> {
    let Value::Object(mut fields) = payload else {
        return Err(GeneticsError::structure("payload is not an object"));
    };

    let mut schema = match fields.get(SCHEMA_KEY) {
        None => 1,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| GeneticsError::structure("schema is not an unsigned integer"))?,
    };
    if schema == 0 || schema > CURRENT_SCHEMA {
        return Err(GeneticsError::structure(format!("unsupported schema {schema}")));
    }

    for step in &MIGRATIONS[(schema - 1) as usize..] {
        step(&mut fields, legacy);
        schema += 1;
        log::info!("Migrated genetic code payload to schema {schema}");
    }

    fields.insert(SCHEMA_KEY.to_owned(), json!(schema));
    Ok(Value::Object(fields))
}

fn v1_to_v2(fields: &mut Map<String, Value>, legacy: &LegacyConfig) {
    for t in Trait::ALL {
        if let Some(value) = fields.get_mut(t.key()) {
            if is_flat(value) {
                let flat = value.take();
                *value = Value::Array(vec![flat.clone(), flat]);
            }
        }
    }

    let mood = NumericTrait::MoodSensitivity.key();
    if !fields.contains_key(mood) {
        fields.insert(mood.to_owned(), json!([legacy.mood_sensitivity, legacy.mood_sensitivity]));
    }
    let ability = Trait::SpecialAbility.key();
    if !fields.contains_key(ability) {
        fields.insert(ability.to_owned(), json!([null, null]));
    }
}

fn is_flat(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Number(_) | Value::String(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> LegacyConfig {
        LegacyConfig { mood_sensitivity: 5 }
    }

    #[test]
    fn current_payload_passes_through() {
        let payload = json!({ "schema": 2, "Adventurer": [1, 2] });
        assert_eq!(migrate(payload.clone(), &legacy()).unwrap(), payload);
    }

    #[test]
    fn flat_values_become_homozygous_pairs() {
        let migrated = migrate(json!({ "metabolism": 7, "specialAbility": "Night Owl" }), &legacy()).unwrap();
        assert_eq!(migrated["metabolism"], json!([7, 7]));
        assert_eq!(migrated["specialAbility"], json!(["Night Owl", "Night Owl"]));
        assert_eq!(migrated["schema"], json!(2));
    }

    #[test]
    fn missing_newer_traits_are_filled() {
        let migrated = migrate(json!({ "Recluse": [3, 4] }), &legacy()).unwrap();
        assert_eq!(migrated["moodSensitivity"], json!([5, 5]));
        assert_eq!(migrated["specialAbility"], json!([null, null]));
        assert!(migrated.get("Adventurer").is_none());
    }

    #[test]
    fn future_or_bogus_schema_is_rejected() {
        assert!(migrate(json!({ "schema": 3 }), &legacy()).is_err());
        assert!(migrate(json!({ "schema": "two" }), &legacy()).is_err());
        assert!(migrate(json!([1, 2]), &legacy()).is_err());
    }
}
