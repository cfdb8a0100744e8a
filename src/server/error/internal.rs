use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// An archive run copied a different number of rows than it deleted.
    ///
    /// The surrounding transaction is rolled back so no rows are lost. Results in a
    /// 500 Internal Server Error with a generic message returned to client.
    #[error("Archive batch {batch_id} copied {copied} rows but removed {deleted}")]
    ArchiveCountMismatch {
        batch_id: String,
        copied: u64,
        deleted: u64,
    },

    /// Every attempt to claim a queue entry lost to a concurrent dequeuer.
    #[error("Failed to claim a queue entry after {attempts} attempts")]
    ClaimRetriesExhausted { attempts: u32 },
}
