//! Archive task bookkeeping and the two archive tables.
//!
//! The position and command repositories both expose `archive_range`, which copies live rows
//! in `[start, end)` into the archive table and deletes the originals. Rows are read
//! `CHUNK_SIZE` at a time in `id` order, so memory stays bounded however large the range.
//! Callers run it on a transaction so the copy and delete commit together.

pub mod command;
pub mod position;
pub mod task;

/// Rows read and moved per round, kept under SQLite's bound-parameter limit.
pub(crate) const CHUNK_SIZE: u64 = 500;

/// Counts produced by moving one range into an archive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovedRows {
    pub copied: u64,
    pub deleted: u64,
}
