//! Rank resolution against a tier order.

use crate::error::{Result, XemeError};
use crate::numbers::usize_to_u32;
use crate::order::TierOrder;

/// Index of the first tier containing `value`.
///
/// # Errors
///
/// Returns [`XemeError::ValueNotRanked`] when no tier contains `value`.
pub fn rank_of(order: &TierOrder, value: u32) -> Result<usize> {
    order
        .tiers()
        .iter()
        .position(|tier| tier.contains(&value))
        .ok_or(XemeError::ValueNotRanked { value })
}

/// Ranks of every value in `0..bound`, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    ranks: Vec<usize>,
}

impl RankTable {
    /// Resolve every value of `0..bound` against `order`.
    ///
    /// When tiers overlap the lowest tier wins, matching [`rank_of`].
    ///
    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] for a zero bound and
    /// [`XemeError::ValueNotRanked`] for the lowest value no tier covers.
    pub fn build(order: &TierOrder, bound: u32) -> Result<Self> {
        if bound == 0 {
            return Err(XemeError::invalid("bound", bound, "must be at least 1"));
        }
        let mut slots: Vec<Option<usize>> = vec![None; bound as usize];
        for (rank, tier) in order.tiers().iter().enumerate() {
            for &value in tier {
                if let Some(slot) = slots.get_mut(value as usize)
                    && slot.is_none()
                {
                    *slot = Some(rank);
                }
            }
        }
        let ranks = slots
            .into_iter()
            .enumerate()
            .map(|(value, rank)| {
                rank.ok_or(XemeError::ValueNotRanked {
                    value: usize_to_u32(value),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { ranks })
    }

    /// # Errors
    ///
    /// Returns [`XemeError::ValueNotRanked`] when `value` is outside the table.
    pub fn rank(&self, value: u32) -> Result<usize> {
        self.ranks
            .get(value as usize)
            .copied()
            .ok_or(XemeError::ValueNotRanked { value })
    }

    #[must_use]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    #[must_use]
    pub fn bound(&self) -> u32 {
        usize_to_u32(self.ranks.len())
    }
}
