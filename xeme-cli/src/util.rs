use anyhow::{Result, bail};
use log::warn;
use xeme_core::Variant;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Round counts from CLI tokens.
///
/// Anything that is not a positive integer becomes 1; the core itself
/// rejects zero rounds, so the coercion has to happen here.
pub fn coerce_rounds(tokens: &[String]) -> Vec<u32> {
    let mut rounds: Vec<u32> = tokens
        .iter()
        .map(|token| match token.parse::<i64>() {
            Ok(value) if value >= 1 => u32::try_from(value).unwrap_or_else(|_| {
                warn!("rounds {value} too large, using {}", u32::MAX);
                u32::MAX
            }),
            Ok(value) => {
                warn!("rounds {value} is not positive, using 1");
                1
            }
            Err(_) => {
                warn!("rounds `{token}` is not an integer, using 1");
                1
            }
        })
        .collect();
    if rounds.is_empty() {
        rounds.push(1);
    }
    rounds
}

/// Resolve preset names, expanding `all` to every built-in game.
pub fn expand_presets(tokens: &[String]) -> Result<Vec<Variant>> {
    let mut variants = Vec::new();
    for token in tokens {
        if token.eq_ignore_ascii_case("all") {
            for variant in Variant::ALL {
                if !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
            continue;
        }
        let variant: Variant = token.parse()?;
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    if variants.is_empty() {
        bail!("no presets selected");
    }
    Ok(variants)
}
