//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod conventional;
pub mod release_notes;
pub mod version;

pub use commit::{CommitRecord, ENTRY_SEPARATOR, FIELD_SEPARATOR};
pub use conventional::{CommitType, ConventionalCommit, KnownType};
pub use release_notes::ReleaseNotes;
pub use version::{BumpType, SemanticVersion};
