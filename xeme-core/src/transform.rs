//! Display transforms over the raw value space and their preimages.
//!
//! A raw value is what the wheel produces (`0..bound`). A display value is
//! what the game actually ranks and pays on. Several raw values share a
//! display value, so every inverse is a set.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE;
use crate::error::{Result, XemeError};

/// Validated transform modulus (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Base(u32);

impl Base {
    /// # Errors
    ///
    /// Returns [`XemeError::InvalidParameter`] when `base` is zero.
    pub const fn new(base: u32) -> Result<Self> {
        if base == 0 {
            return Err(XemeError::InvalidParameter {
                name: "base",
                value: 0,
                reason: "must be at least 1",
            });
        }
        Ok(Self(base))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Base {
    fn default() -> Self {
        Self(DEFAULT_BASE)
    }
}

impl TryFrom<u32> for Base {
    type Error = XemeError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Base> for u32 {
    fn from(value: Base) -> Self {
        value.0
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fold a raw value into display space: `((v mod b) + v / b) mod b`.
#[must_use]
pub const fn xemmify(value: u32, base: Base) -> u32 {
    let b = base.get();
    ((value % b) + value / b) % b
}

/// Checked form of [`xemmify`] over all integers.
///
/// Negative values use floored division, so the result always lands in
/// `0..base` and agrees with [`xemmify`] on non-negative input.
///
/// # Errors
///
/// Returns [`XemeError::InvalidParameter`] when `base` is not positive.
pub fn reduce(value: i64, base: i64) -> Result<i64> {
    if base <= 0 {
        return Err(XemeError::invalid("base", base, "must be at least 1"));
    }
    Ok((value.rem_euclid(base) + value.div_euclid(base)).rem_euclid(base))
}

/// Which display transform is active, independent of its modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransformMode {
    /// Quotient-folding modulo ("xeme").
    #[default]
    #[serde(alias = "xeme")]
    Modulo,
    /// Plain last-digit modulo ("qq").
    #[serde(alias = "qq")]
    Digit,
    /// Raw values are shown and weighted as-is.
    #[serde(alias = "raw")]
    Raw,
}

impl TransformMode {
    pub const ALL: [Self; 3] = [Self::Modulo, Self::Digit, Self::Raw];

    #[must_use]
    pub const fn with_base(self, base: Base) -> Transform {
        match self {
            Self::Modulo => Transform::Modulo(base),
            Self::Digit => Transform::Digit(base),
            Self::Raw => Transform::Raw,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modulo => "modulo",
            Self::Digit => "digit",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete display transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Modulo(Base),
    Digit(Base),
    Raw,
}

impl Default for Transform {
    fn default() -> Self {
        Self::Modulo(Base::default())
    }
}

impl Transform {
    #[must_use]
    pub const fn mode(self) -> TransformMode {
        match self {
            Self::Modulo(_) => TransformMode::Modulo,
            Self::Digit(_) => TransformMode::Digit,
            Self::Raw => TransformMode::Raw,
        }
    }

    /// Map a raw value to its display value.
    #[must_use]
    pub const fn apply(self, value: u32) -> u32 {
        match self {
            Self::Modulo(base) => xemmify(value, base),
            Self::Digit(base) => value % base.get(),
            Self::Raw => value,
        }
    }

    /// Every raw value in `0..bound` whose display value is `display`.
    ///
    /// The raw transform returns the singleton `{display}` regardless of bound.
    #[must_use]
    pub fn preimage(self, display: u32, bound: u32) -> BTreeSet<u32> {
        match self {
            Self::Raw => BTreeSet::from([display]),
            Self::Modulo(_) | Self::Digit(_) => {
                (0..bound).filter(|&raw| self.apply(raw) == display).collect()
            }
        }
    }

    /// Union of [`Self::preimage`] over several display values.
    #[must_use]
    pub fn preimage_multi<I>(self, displays: I, bound: u32) -> BTreeSet<u32>
    where
        I: IntoIterator<Item = u32>,
    {
        displays
            .into_iter()
            .flat_map(|display| self.preimage(display, bound))
            .collect()
    }
}

/// Raw values in `0..bound` that fold to `display` under the xeme transform.
#[must_use]
pub fn inverse_preimage(display: u32, bound: u32, base: Base) -> BTreeSet<u32> {
    Transform::Modulo(base).preimage(display, bound)
}

/// Union of [`inverse_preimage`] over several display values.
#[must_use]
pub fn inverse_preimage_multi<I>(displays: I, bound: u32, base: Base) -> BTreeSet<u32>
where
    I: IntoIterator<Item = u32>,
{
    Transform::Modulo(base).preimage_multi(displays, bound)
}
