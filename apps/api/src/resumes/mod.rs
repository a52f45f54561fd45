// Saved resumes: listing, retrieval, deletion and re-download, scoped to the signed-in owner.

pub mod handlers;
pub mod listing;

pub use listing::ResumeSummary;
