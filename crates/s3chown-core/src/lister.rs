//! Paginated enumeration of remote objects.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::TRACING_TARGET_LISTER;
use crate::descriptor::ObjectDescriptor;
use crate::error::StoreResult;
use crate::store::ObjectStore;

/// Path delimiter used for prefix and cursor normalization.
pub const DELIMITER: char = '/';

/// Normalizes the listing scope once, before enumeration begins.
///
/// Strips exactly one leading delimiter from the prefix. When the prefix
/// denotes a folder (trailing delimiter) and no explicit cursor was given,
/// the prefix itself becomes the cursor, so the folder marker object, if
/// present, is skipped.
pub fn normalize_scope(prefix: &str, start_after: &str) -> (String, String) {
    let prefix = prefix.strip_prefix(DELIMITER).unwrap_or(prefix);
    let start_after = if prefix.ends_with(DELIMITER) && start_after.is_empty() {
        prefix
    } else {
        start_after
    };
    (prefix.to_owned(), start_after.to_owned())
}

/// Pull-based iterator over a paginated object listing.
///
/// Presents the listing as one flat sequence of descriptors; successive
/// pages are fetched transparently when the internal buffer runs dry. A
/// page-fetch failure is yielded once, after which the sequence ends.
/// Restartable only by constructing a new lister with an updated cursor.
pub struct ObjectLister<S> {
    store: Arc<S>,
    bucket: String,
    prefix: String,
    start_after: String,
    buffer: VecDeque<ObjectDescriptor>,
    continuation: Option<String>,
    started: bool,
    exhausted: bool,
}

impl<S: ObjectStore> ObjectLister<S> {
    /// Creates a lister for the given scope, normalizing prefix and cursor.
    pub fn new(store: Arc<S>, bucket: impl Into<String>, prefix: &str, start_after: &str) -> Self {
        let (prefix, start_after) = normalize_scope(prefix, start_after);

        Self {
            store,
            bucket: bucket.into(),
            prefix,
            start_after,
            buffer: VecDeque::new(),
            continuation: None,
            started: false,
            exhausted: false,
        }
    }

    /// The normalized prefix this lister enumerates.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The effective exclusive start cursor.
    pub fn start_after(&self) -> &str {
        &self.start_after
    }

    /// Returns the next descriptor, fetching further pages as needed.
    ///
    /// Returns `None` once the listing is drained. An empty bucket/prefix
    /// combination is not an error: the sequence is simply empty.
    pub async fn next(&mut self) -> Option<StoreResult<ObjectDescriptor>> {
        loop {
            if let Some(descriptor) = self.buffer.pop_front() {
                return Some(Ok(descriptor));
            }

            if self.exhausted || (self.started && self.continuation.is_none()) {
                self.exhausted = true;
                return None;
            }

            let page = self
                .store
                .list_page(
                    &self.bucket,
                    &self.prefix,
                    &self.start_after,
                    self.continuation.as_deref(),
                )
                .await;

            match page {
                Ok(page) => {
                    tracing::debug!(
                        target: TRACING_TARGET_LISTER,
                        bucket = %self.bucket,
                        prefix = %self.prefix,
                        objects = page.objects.len(),
                        truncated = page.continuation.is_some(),
                        "Fetched listing page"
                    );

                    self.started = true;
                    self.continuation = page.continuation;
                    self.buffer.extend(page.objects);
                }
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
