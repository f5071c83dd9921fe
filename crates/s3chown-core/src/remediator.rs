//! Two-step ownership remediation for a single object.

use crate::TRACING_TARGET_REMEDIATOR;
use crate::descriptor::ObjectDescriptor;
use crate::error::{RemediateError, RemediationStep};
use crate::store::{AclHandle, ObjectStore};

/// Applies the two-step ownership remediation to one object.
///
/// The canned ACL grant must precede the self-copy: the copy relies on the
/// read/write permission that the grant establishes for the invoking
/// principal under the store's per-object deny-by-default policy. Either
/// step failing aborts this object only; the error carries the key and the
/// failing step so the dispatcher can log it and move on.
///
/// Logging is strictly post-outcome: nothing is recorded for a step until
/// its remote call has returned.
pub async fn remediate<S, H>(
    store: &S,
    acl: &H,
    bucket: &str,
    object: &ObjectDescriptor,
) -> Result<(), RemediateError>
where
    S: ObjectStore + ?Sized,
    H: AclHandle + ?Sized,
{
    let key = object.key.as_str();

    acl.grant_bucket_owner_full_control(bucket, key)
        .await
        .map_err(|source| RemediateError {
            key: key.to_owned(),
            step: RemediationStep::AclUpdate,
            source,
        })?;

    tracing::debug!(
        target: TRACING_TARGET_REMEDIATOR,
        bucket = %bucket,
        key = %key,
        "Applied bucket-owner-full-control ACL"
    );

    store
        .copy_in_place(bucket, key)
        .await
        .map_err(|source| RemediateError {
            key: key.to_owned(),
            step: RemediationStep::Copy,
            source,
        })?;

    tracing::debug!(
        target: TRACING_TARGET_REMEDIATOR,
        bucket = %bucket,
        key = %key,
        "Copied object over itself"
    );

    tracing::info!(
        target: TRACING_TARGET_REMEDIATOR,
        location = %format!("s3://{bucket}/{key}"),
        "Entitled bucket owner to full control on object"
    );

    Ok(())
}
