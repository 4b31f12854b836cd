use anyhow::{Result, bail};
use montyhall_game::entropy_seed;
use std::collections::HashSet;

/// Seed for one experiment and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub from_entropy: bool,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            from_entropy: false,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            seed: entropy_seed(),
            from_entropy: true,
        }
    }
}

/// Resolve CLI seed tokens into concrete seeds.
///
/// Supports decimal integers (negative values use their magnitude),
/// `0x`-prefixed hex, and the keyword `random`, which draws a fresh seed
/// from OS entropy. Duplicates are dropped, keeping first occurrence order.
/// With no tokens, `fallback` is used, or a random seed when it is absent.
pub fn resolve_seed_inputs(tokens: &[String], fallback: Option<u64>) -> Result<Vec<SeedInfo>> {
    let mut pending: Vec<SeedInfo> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("random") || token.eq_ignore_ascii_case("entropy") {
            pending.push(SeedInfo::from_entropy());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(SeedInfo::from_numeric(value));
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            pending.push(SeedInfo::from_numeric(value.unsigned_abs()));
            continue;
        }

        if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            && let Ok(value) = u64::from_str_radix(&hex.replace('_', ""), 16)
        {
            pending.push(SeedInfo::from_numeric(value));
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut seen = HashSet::new();
    pending.retain(|info| seen.insert(info.seed));

    if pending.is_empty() {
        pending.push(fallback.map_or_else(SeedInfo::from_entropy, SeedInfo::from_numeric));
    }

    Ok(pending)
}
