//! Tier orders: ranked partitions of the raw value space.
//!
//! Index 0 is the lowest rank. Built-in orders partition `0..bound`
//! exactly; edited orders may not, and nothing here assumes they do.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XemeError};
use crate::numbers::usize_to_u32;
use crate::transform::Transform;

/// One rank class of raw values.
pub type Tier = BTreeSet<u32>;

/// An ordered sequence of tiers, lowest rank first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierOrder {
    tiers: Vec<Tier>,
}

impl TierOrder {
    #[must_use]
    pub const fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    #[must_use]
    pub const fn from_tiers(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    /// Build an order from plain lists, collapsing duplicates inside a list.
    #[must_use]
    pub fn from_lists(lists: &[Vec<u32>]) -> Self {
        lists
            .iter()
            .map(|list| list.iter().copied().collect::<Tier>())
            .collect()
    }

    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    #[must_use]
    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] when `index` is past the last tier.
    pub fn tier_mut(&mut self, index: usize) -> Result<&mut Tier> {
        self.tiers
            .get_mut(index)
            .ok_or_else(|| out_of_range("tier index", index))
    }

    /// Append a tier above every existing one.
    pub fn push_tier(&mut self, tier: Tier) {
        self.tiers.push(tier);
    }

    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] when `index > len`.
    pub fn insert_tier(&mut self, index: usize, tier: Tier) -> Result<()> {
        if index > self.tiers.len() {
            return Err(out_of_range("tier index", index));
        }
        self.tiers.insert(index, tier);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] when `index` is past the last tier.
    pub fn remove_tier(&mut self, index: usize) -> Result<Tier> {
        if index >= self.tiers.len() {
            return Err(out_of_range("tier index", index));
        }
        Ok(self.tiers.remove(index))
    }

    /// Move the tier at `from` so it ends up at index `to`, shifting the rest.
    ///
    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] when either index is past the last tier.
    pub fn move_tier(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tiers.len();
        if from >= len {
            return Err(out_of_range("tier index", from));
        }
        if to >= len {
            return Err(out_of_range("tier index", to));
        }
        let tier = self.tiers.remove(from);
        self.tiers.insert(to, tier);
        Ok(())
    }

    /// Prepend an empty lowest tier, turning a player order into a house order.
    #[must_use]
    pub fn with_leading_empty(mut self) -> Self {
        self.tiers.insert(0, Tier::new());
        self
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.tiers.iter().any(|tier| tier.contains(&value))
    }

    /// Tiers as plain ascending lists, in rank order.
    #[must_use]
    pub fn to_lists(&self) -> Vec<Vec<u32>> {
        self.tiers
            .iter()
            .map(|tier| tier.iter().copied().collect())
            .collect()
    }

    /// Check that every value of `0..bound` sits in exactly one tier and
    /// that no tier holds a value outside that range.
    ///
    /// # Errors
    ///
    /// Returns [`XemeError::PartitionViolation`] for the lowest value with a
    /// tier count other than one, or [`XemeError::InvalidParameter`] for a
    /// zero bound or an out-of-range value.
    pub fn check_partition(&self, bound: u32) -> Result<()> {
        if bound == 0 {
            return Err(XemeError::invalid("bound", bound, "must be at least 1"));
        }
        let mut occurrences = vec![0_usize; bound as usize];
        for tier in &self.tiers {
            for &value in tier {
                let Some(count) = occurrences.get_mut(value as usize) else {
                    return Err(XemeError::invalid(
                        "raw value",
                        value,
                        "outside the value space",
                    ));
                };
                *count += 1;
            }
        }
        match occurrences.iter().position(|&count| count != 1) {
            Some(value) => Err(XemeError::PartitionViolation {
                value: usize_to_u32(value),
                occurrences: occurrences[value],
            }),
            None => Ok(()),
        }
    }

    /// Normal form used for equivalence: each tier sorted, tiers sorted with
    /// the empty tier first and then by minimum value.
    #[must_use]
    pub fn canonical(&self) -> Vec<Vec<u32>> {
        let mut lists = self.to_lists();
        lists.sort();
        lists
    }

    /// Same tier count and the same set of tiers, ignoring their sequence.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.tiers.len() == other.tiers.len() && self.canonical() == other.canonical()
    }

    /// Parse the line-per-tier display format.
    ///
    /// Each line lists comma-separated display values; every value is
    /// expanded to its raw preimage under `transform`. A line without values
    /// is an empty tier.
    ///
    /// # Errors
    ///
    /// Returns [`XemeError::MalformedConfiguration`] for a token that is not
    /// a non-negative integer, or one whose raw value falls outside `bound`.
    pub fn parse_display(text: &str, transform: Transform, bound: u32) -> Result<Self> {
        text.trim()
            .lines()
            .enumerate()
            .map(|(line_no, line)| {
                let displays = line
                    .split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token.parse::<u32>().map_err(|_| {
                            XemeError::malformed(format!(
                                "line {}: `{token}` is not a display value",
                                line_no + 1
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let tier = transform.preimage_multi(displays, bound);
                if let Some(&value) = tier.range(bound..).next() {
                    return Err(XemeError::malformed(format!(
                        "line {}: {value} is outside 0..{bound}",
                        line_no + 1
                    )));
                }
                Ok(tier)
            })
            .collect()
    }

    /// Render the line-per-tier display format read by [`Self::parse_display`].
    ///
    /// An empty tier renders as a lone `,` so leading and trailing empty
    /// tiers survive trimming.
    #[must_use]
    pub fn format_display(&self, transform: Transform) -> String {
        self.tiers
            .iter()
            .map(|tier| format_tier(tier, transform))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Distinct display values of one tier, ascending and comma-separated.
#[must_use]
pub fn format_tier(tier: &Tier, transform: Transform) -> String {
    if tier.is_empty() {
        return ",".to_string();
    }
    tier.iter()
        .map(|&raw| transform.apply(raw))
        .collect::<BTreeSet<_>>()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn out_of_range(name: &'static str, index: usize) -> XemeError {
    XemeError::invalid(name, usize_to_u32(index), "no tier at this position")
}

impl FromIterator<Tier> for TierOrder {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        Self {
            tiers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TierOrder {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}
