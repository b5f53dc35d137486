pub mod fs;
pub mod memory;
pub mod opensearch;

pub use fs::{FsObjectSource, FsStore};
pub use memory::MemoryStore;
pub use opensearch::OpenSearchStore;

use crate::Document;

/// `uploadedAt` descending; ids break ties so listings are stable.
pub(crate) fn sort_by_recency(documents: &mut [Document]) {
    documents.sort_by(|left, right| {
        right
            .uploaded_at
            .cmp(&left.uploaded_at)
            .then_with(|| left.id.cmp(&right.id))
    });
}
