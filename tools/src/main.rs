//! dna-tool: headless runner for the heredity engine.
//!
//! Usage:
//!   dna-tool wild     --seed 12345
//!   dna-tool breed    --seed 12345 --tokens "Ancient Tome,Espresso" --count 3
//!   dna-tool breed    --dna <code> --tokens book
//!   dna-tool import   --dna <code>
//!   dna-tool snapshot --seed 12345
//!
//! `--data-dir` points at the directory holding genetics.json (default
//! ./data; built-in defaults are used if it is missing). The DNA_SALT
//! environment variable overrides the configured salt.

use anyhow::{Context, Result};
use heredity_core::{GeneticCodec, GeneticsConfig, Genome, Lineage};
use std::env;

#[derive(serde::Serialize)]
struct GenomeReport<'a> {
    generation: u32,
    archetype:  String,
    genotype:   &'a heredity_core::Genotype,
    phenotype:  &'a heredity_core::Phenotype,
    dna:        String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("wild");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");

    let config = load_config(data_dir)?;
    let codec = GeneticCodec::from_config(&config);

    match command {
        "wild" => {
            let lineage = lineage_from_args(&args, &codec, &config)?;
            print_report(&lineage.genome, lineage.generation, &codec)?;
        }
        "breed" => {
            let mut lineage = lineage_from_args(&args, &codec, &config)?;
            let tokens = parse_tokens(flag_value(&args, "--tokens").unwrap_or(""));
            let count = parse_arg(&args, "--count", 1u32);

            print_report(&lineage.genome, lineage.generation, &codec)?;
            for _ in 0..count {
                lineage = lineage.confirm_offspring(tokens.as_slice(), &config);
                print_report(&lineage.genome, lineage.generation, &codec)?;
            }
        }
        "import" => {
            let dna = flag_value(&args, "--dna").context("import requires --dna")?;
            match Lineage::import(dna, &codec) {
                Ok(lineage) => print_report(&lineage.genome, lineage.generation, &codec)?,
                Err(e) => {
                    println!("{}", serde_json::json!({ "error": e.to_string() }));
                }
            }
        }
        "snapshot" => {
            let lineage = lineage_from_args(&args, &codec, &config)?;
            println!("{}", lineage.snapshot().to_json()?);
        }
        other => anyhow::bail!("Unknown command: {other}"),
    }

    Ok(())
}

fn load_config(data_dir: &str) -> Result<GeneticsConfig> {
    let config = if std::path::Path::new(data_dir).join("genetics.json").exists() {
        GeneticsConfig::load(data_dir)?
    } else {
        log::warn!("No genetics.json under {data_dir}; using built-in defaults");
        GeneticsConfig::default()
    };
    Ok(match env::var("DNA_SALT") {
        Ok(salt) if !salt.is_empty() => config.with_salt(salt),
        _ => config,
    })
}

fn lineage_from_args(args: &[String], codec: &GeneticCodec, config: &GeneticsConfig) -> Result<Lineage> {
    if let Some(dna) = flag_value(args, "--dna") {
        return Lineage::import(dna, codec).context("Cannot import --dna");
    }
    Ok(match flag_value(args, "--seed") {
        Some(seed) => match seed.parse::<u32>() {
            Ok(n) => Lineage::from_seed(n, config),
            Err(_) => Lineage::from_seed(seed, config),
        },
        None => Lineage::genesis(config),
    })
}

fn print_report(genome: &Genome, generation: u32, codec: &GeneticCodec) -> Result<()> {
    let report = GenomeReport {
        generation,
        archetype: genome.phenotype().dominant_archetype().to_string(),
        genotype: genome.genotype(),
        phenotype: genome.phenotype(),
        dna: codec.serialize(genome)?,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
