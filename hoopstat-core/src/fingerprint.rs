//! Dataset fingerprinting.
//!
//! A BLAKE3 hash over the filtered records identifies exactly which games a
//! result was computed from, so two runs can be checked for reproducibility
//! without diffing the series.

use crate::domain::GameRecord;

/// Hash of the records in order. Field order is fixed; every field is
/// length- or width-delimited so adjacent fields can't run together.
pub fn dataset_hash(records: &[GameRecord]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(records.len() as u64).to_le_bytes());
    for r in records {
        for text in [r.game_id.0.as_str(), r.matchup.as_str()] {
            hasher.update(&(text.len() as u64).to_le_bytes());
            hasher.update(text.as_bytes());
        }
        hasher.update(r.game_date.format("%Y-%m-%d").to_string().as_bytes());
        hasher.update(r.outcome.map_or("-", |o| o.code()).as_bytes());
        for v in [r.points, r.rebounds, r.assists, r.blocks, r.steals] {
            hasher.update(&v.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}
