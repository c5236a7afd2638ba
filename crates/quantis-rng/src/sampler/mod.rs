//! Scaled sampler: turns raw device bytes into bounded numbers and strings.
//!
//! The sampler provides:
//! - Pure scaling/encoding functions ([`scale`])
//! - Call-scoped result types ([`types`])
//! - Draws against a device session ([`engine::Sampler`])

pub mod engine;
pub mod scale;
pub mod types;

pub use engine::Sampler;
pub use scale::{hex_encode, round_to_cents, scale_int, scale_unit, unit_interval};
pub use types::{HexStringArray, ScaledDouble, ScaledInt, ScaledIntArray};
