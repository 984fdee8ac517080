use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// First seed of a generated benchmark sequence when none is given.
pub const DEFAULT_SEED_START: u32 = 0x5EED_0001;

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

pub fn parse_seed_file(path: &Path) -> Result<Vec<u32>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading seed file {}", path.display()))?;
    let mut seeds = Vec::new();
    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        seeds.push(parse_seed(trimmed)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("seed file {} had no seeds", path.display()));
    }
    Ok(seeds)
}

/// Explicit seeds win; otherwise `count` seeds from an LCG walk starting at
/// `start`.
pub fn resolve_seeds(
    seeds: Option<&str>,
    seed_file: Option<&Path>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u32>> {
    if let Some(path) = seed_file {
        return parse_seed_file(path);
    }

    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }

    let start = match seed_start {
        Some(start) => parse_seed(start)?,
        None => DEFAULT_SEED_START,
    };
    if seed_count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }

    let mut out = Vec::with_capacity(seed_count as usize);
    let mut cur = start;
    for _ in 0..seed_count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_parse_as_hex_or_decimal() {
        assert_eq!(parse_seed("0xDEADBEEF").unwrap(), 0xDEAD_BEEF);
        assert_eq!(parse_seed(" 42 ").unwrap(), 42);
        assert!(parse_seed("").is_err());
        assert!(parse_seed("0xZZ").is_err());
        assert_eq!(seed_to_hex(0xBEEF), "0x0000beef");
    }

    #[test]
    fn csv_skips_blanks_and_rejects_empty_lists() {
        assert_eq!(parse_seed_csv("1, ,0x10,").unwrap(), vec![1, 16]);
        assert!(parse_seed_csv(" , ").is_err());
    }

    #[test]
    fn generated_seed_walk_is_stable() {
        let seeds = resolve_seeds(None, None, Some("1"), 3).unwrap();
        assert_eq!(seeds, vec![1, 1_015_568_748, 1_586_005_467]);
        assert_eq!(
            resolve_seeds(None, None, None, 1).unwrap(),
            vec![DEFAULT_SEED_START]
        );
        assert!(resolve_seeds(None, None, None, 0).is_err());
    }
}
