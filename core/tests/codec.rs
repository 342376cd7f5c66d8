use base64::{engine::general_purpose::STANDARD, Engine};
use heredity_core::{
    GeneticCodec, GeneticsConfig, GeneticsError, Genome, Genotype, SeededRng, SpecialAbility,
};

fn codec() -> GeneticCodec {
    GeneticCodec::from_config(&GeneticsConfig::default())
}

fn sample_genome(seed: u32) -> Genome {
    let mut rng = SeededRng::new(seed);
    Genome::wild(&mut rng, &GeneticsConfig::default())
}

/// Sign an arbitrary JSON payload so it passes the integrity check.
fn signed(codec: &GeneticCodec, json: &str) -> String {
    let encoded = STANDARD.encode(json);
    format!("{encoded}.{}", codec.checksum(&encoded))
}

#[test]
fn round_trip_preserves_genotype() {
    let codec = codec();
    for seed in [1u32, 2, 3, 500, 9_999] {
        let genome = sample_genome(seed);
        let dna = codec.serialize(&genome).unwrap();
        let imported = codec.deserialize(&dna).unwrap();
        assert_eq!(imported.genotype(), genome.genotype());
    }
}

#[test]
fn round_trip_preserves_abilities() {
    let codec = codec();
    let mut genotype = Genotype::uniform(12);
    genotype.special_ability = [Some(SpecialAbility::Photosynthetic), None];
    let genome = Genome::from_genotype(genotype, &mut SeededRng::new(1u32));

    let imported = codec.deserialize(&codec.serialize(&genome).unwrap()).unwrap();
    assert_eq!(imported.genotype(), genome.genotype());
    assert_eq!(imported.phenotype().special_ability, Some(SpecialAbility::Photosynthetic));
}

#[test]
fn wire_format_has_two_parts() {
    let dna = codec().serialize(&sample_genome(4)).unwrap();
    let parts: Vec<&str> = dna.split('.').collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].len(), 8);
    assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn any_single_payload_flip_fails_integrity() {
    let codec = codec();
    let dna = codec.serialize(&sample_genome(21)).unwrap();
    let (encoded, checksum) = dna.split_once('.').unwrap();

    for (i, original) in encoded.char_indices() {
        let replacement = if original == 'A' { 'B' } else { 'A' };
        let mut tampered = encoded.to_owned();
        tampered.replace_range(i..i + 1, &replacement.to_string());
        let err = codec.deserialize(&format!("{tampered}.{checksum}")).unwrap_err();
        assert!(
            matches!(err, GeneticsError::IntegrityCheckFailed),
            "payload flip at {i} gave {err:?}"
        );
    }
}

#[test]
fn any_single_checksum_flip_fails_integrity() {
    let codec = codec();
    let dna = codec.serialize(&sample_genome(22)).unwrap();
    let (encoded, checksum) = dna.split_once('.').unwrap();

    for (i, original) in checksum.char_indices() {
        for replacement in ['0', 'f', 'Z'] {
            if replacement == original {
                continue;
            }
            let mut tampered = checksum.to_owned();
            tampered.replace_range(i..i + 1, &replacement.to_string());
            let err = codec.deserialize(&format!("{encoded}.{tampered}")).unwrap_err();
            assert!(
                matches!(err, GeneticsError::IntegrityCheckFailed),
                "checksum flip at {i} gave {err:?}"
            );
        }
    }
}

#[test]
fn malformed_strings_fail_format_check() {
    let codec = codec();
    for bad in ["abc", "a.b.c", "", ".", "payload.", ".checksum", "a..b"] {
        let err = codec.deserialize(bad).unwrap_err();
        assert!(matches!(err, GeneticsError::InvalidFormat), "{bad:?} gave {err:?}");
        assert_eq!(err.to_string(), "Invalid DNA Format");
    }
}

#[test]
fn different_salt_rejects_foreign_codes() {
    let ours = codec();
    let theirs = GeneticCodec::from_config(&GeneticsConfig::default().with_salt("another-install"));
    let dna = theirs.serialize(&sample_genome(5)).unwrap();
    assert!(matches!(ours.deserialize(&dna), Err(GeneticsError::IntegrityCheckFailed)));
}

#[test]
fn signed_payload_missing_traits_is_invalid_structure() {
    let codec = codec();
    let dna = signed(&codec, r#"{"schema":2,"wrong":"data"}"#);
    let err = codec.deserialize(&dna).unwrap_err();
    assert!(matches!(err, GeneticsError::InvalidStructure { .. }), "{err:?}");
    assert!(err.to_string().starts_with("Invalid Genotype Structure"));
}

#[test]
fn signed_payload_with_bad_pair_shape_is_invalid_structure() {
    let codec = codec();
    let mut value = serde_json::to_value(Genotype::uniform(10)).unwrap();
    value["schema"] = serde_json::json!(2);
    value["Recluse"] = serde_json::json!([1, 2, 3]);
    let dna = signed(&codec, &value.to_string());
    assert!(matches!(codec.deserialize(&dna), Err(GeneticsError::InvalidStructure { .. })));

    value["Recluse"] = serde_json::json!(["high", "low"]);
    let dna = signed(&codec, &value.to_string());
    assert!(matches!(codec.deserialize(&dna), Err(GeneticsError::InvalidStructure { .. })));
}

#[test]
fn signed_garbage_is_invalid_structure() {
    let codec = codec();
    let not_base64 = "@@@@";
    let dna = format!("{not_base64}.{}", codec.checksum(not_base64));
    assert!(matches!(codec.deserialize(&dna), Err(GeneticsError::InvalidStructure { .. })));

    let dna = signed(&codec, "this is not json");
    assert!(matches!(codec.deserialize(&dna), Err(GeneticsError::InvalidStructure { .. })));
}

#[test]
fn import_is_identical_across_instances() {
    let mut genotype = Genotype::uniform(10);
    genotype.special_ability = [Some(SpecialAbility::NightOwl), Some(SpecialAbility::Photosynthetic)];
    let genome = Genome::from_genotype(genotype, &mut SeededRng::new(1u32));
    let dna = codec().serialize(&genome).unwrap();

    let first = codec().deserialize(&dna).unwrap();
    for _ in 0..50 {
        let other_install = codec().deserialize(&dna).unwrap();
        assert_eq!(other_install.phenotype(), first.phenotype());
    }
    assert!(first.phenotype().special_ability.is_some());
}

#[test]
fn legacy_payload_is_migrated_before_validation() {
    let codec = codec();
    let legacy = r#"{
        "Adventurer": 40,
        "Nurturer": [12, 30],
        "Mischievous": [10, 10],
        "Intellectual": 25,
        "Recluse": [11, 19],
        "metabolism": 6
    }"#;
    let genome = codec.deserialize(&signed(&codec, legacy)).unwrap();

    let genotype = genome.genotype();
    assert_eq!(genotype.adventurer, [40, 40]);
    assert_eq!(genotype.intellectual, [25, 25]);
    assert_eq!(genotype.metabolism, [6, 6]);
    assert_eq!(genotype.mood_sensitivity, [5, 5]);
    assert_eq!(genotype.special_ability, [None, None]);
    assert!(genome.phenotype().is_homozygous_adventurer);
    assert_eq!(genome.phenotype().nurturer, 30);
}

#[test]
fn legacy_payload_missing_core_trait_is_rejected() {
    let codec = codec();
    let legacy = r#"{ "Nurturer": 3, "Mischievous": 3, "Intellectual": 3, "Recluse": 3, "metabolism": 3 }"#;
    let err = codec.deserialize(&signed(&codec, legacy)).unwrap_err();
    assert!(matches!(err, GeneticsError::InvalidStructure { .. }));
    assert!(err.to_string().contains("Adventurer"), "{err}");
}
