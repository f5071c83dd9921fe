//! Object descriptors produced by the lister.

/// Identifies one remote object within a bucket.
///
/// Metadata fields are carried through from the listing response but never
/// interpreted by the pipeline. A descriptor is a value: produced once by
/// the lister, consumed once by the remediator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// Object key, unique within the bucket.
    pub key: String,
    /// Object size in bytes, as reported by the listing.
    pub size: Option<u64>,
    /// Last-modified timestamp, as reported by the listing.
    pub last_modified: Option<String>,
    /// Entity tag, as reported by the listing.
    pub etag: Option<String>,
}

impl ObjectDescriptor {
    /// Creates a descriptor carrying only a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
            last_modified: None,
            etag: None,
        }
    }
}
