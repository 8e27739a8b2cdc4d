//! Xeme Calculation Engine
//!
//! Exact expected-value and house-edge math for wager games ranked by the
//! xeme transform over a roulette-like value space. The crate has no UI or
//! platform dependencies: hosts supply raw inputs, configurations, and
//! weight edits, and read back EV, edge, and tier tables.

pub mod calculator;
pub mod config;
pub mod constants;
pub mod error;
pub mod ev;
pub mod numbers;
pub mod order;
pub mod preset;
pub mod rank;
pub mod transform;
pub mod weights;

// Re-export commonly used types
pub use calculator::Calculator;
pub use config::{Configuration, OrdersConfig, ValidatedState, WeightsConfig};
pub use constants::{DEFAULT_BASE, DEFAULT_BOUND, DEFAULT_WEIGHT};
pub use error::{Result, XemeError};
pub use ev::{EvReport, compute_ev, edge_for_rounds, evaluate, return_for_rounds};
pub use order::{Tier, TierOrder, format_tier};
pub use preset::{
    Grouping, Preset, PresetStatus, Variant, build_house_order, build_player_order, detect_preset,
};
pub use rank::{RankTable, rank_of};
pub use transform::{
    Base, Transform, TransformMode, inverse_preimage, inverse_preimage_multi, reduce, xemmify,
};
pub use weights::WeightTable;
