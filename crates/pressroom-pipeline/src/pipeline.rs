//! Intake Orchestrator: sequences the pipeline stages for one submission.
//!
//! Stage order: dedup → archive → extract → draft → format → persist →
//! notify. Data flows strictly forward. Archive and extraction failures are
//! logged and replaced with fallback text; draft generation is fail-open by
//! construction; notification is fire-and-forget. Only validation and the
//! final persistence write can fail the operation.

use std::sync::Arc;

use chrono::Utc;

use pressroom_content::{to_blocks, ContentStore};
use pressroom_core::{
    AttachmentSource, IntakeError, NewsItem, NewsItemPatch, ReviewStatus, Submission,
};
use pressroom_processing::{DocumentKind, ExtractorRouter};
use pressroom_services::{DraftGenerator, IntakeEvent, Notifier};
use pressroom_storage::{archive_key, Storage};

use crate::archiver::{ArchivedDocument, Archiver};
use crate::dedup::{idempotency_key, DedupGuard};

/// Result of a processed submission. Degraded outcomes are still successes:
/// the record exists and a reviewer can see what happened.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub item_id: String,
    pub message: String,
    pub degraded: bool,
    pub already_processed: bool,
}

/// The pipeline controller. All collaborators are injected at construction;
/// lifecycle is owned by process startup.
pub struct IntakePipeline {
    content_store: Arc<dyn ContentStore>,
    storage: Arc<dyn Storage>,
    dedup: DedupGuard,
    archiver: Archiver,
    extractor: ExtractorRouter,
    drafts: DraftGenerator,
    notifier: Notifier,
}

impl IntakePipeline {
    pub fn new(
        content_store: Arc<dyn ContentStore>,
        storage: Arc<dyn Storage>,
        extractor: ExtractorRouter,
        drafts: DraftGenerator,
        notifier: Notifier,
    ) -> Self {
        Self {
            dedup: DedupGuard::new(content_store.clone()),
            archiver: Archiver::new(storage.clone()),
            content_store,
            storage,
            extractor,
            drafts,
            notifier,
        }
    }

    /// Run one submission through the pipeline.
    pub async fn process(&self, submission: Submission) -> Result<IntakeOutcome, IntakeError> {
        submission.validate()?;

        let origin = submission.origin;
        let external_id = submission.external_id.clone();
        let key = idempotency_key(origin, &external_id);

        tracing::info!(
            submission_id = %external_id,
            origin = %origin,
            has_attachment = submission.attachment.is_some(),
            "Submission received"
        );

        if let Some(existing_id) = self.dedup.check(&key).await {
            return Ok(IntakeOutcome {
                item_id: existing_id,
                message: "Already processed".to_string(),
                degraded: false,
                already_processed: true,
            });
        }

        let now = Utc::now();
        let mut degraded = false;

        // Resolve the attachment URL, if any. A failed store lookup degrades
        // rather than aborting: the submission may still carry inline text.
        let attachment_url = match &submission.attachment {
            Some(AttachmentSource::Direct { url }) => Some(url.clone()),
            Some(AttachmentSource::ResolveFromStore { item_id }) => {
                match self.content_store.resolve_attachment_url(item_id).await {
                    Ok(Some(url)) => Some(url),
                    Ok(None) => {
                        tracing::warn!(
                            submission_id = %external_id,
                            item_id = %item_id,
                            "No attached file on store item, continuing without attachment"
                        );
                        degraded = true;
                        None
                    }
                    Err(e) => {
                        tracing::warn!(
                            submission_id = %external_id,
                            item_id = %item_id,
                            error = %e,
                            "Attachment lookup failed, continuing without attachment"
                        );
                        degraded = true;
                        None
                    }
                }
            }
            None => None,
        };

        // Archive + extract, degrading each stage independently. Without an
        // attachment the inline text is the text source and both stages are
        // bypassed.
        let mut archived: Option<ArchivedDocument> = None;
        let text = match attachment_url {
            Some(url) => {
                let kind_hint = DocumentKind::from_extension(&url);
                let storage_key = archive_key(origin, &external_id, now, kind_hint.extension());

                match self.archiver.archive(&url, &storage_key).await {
                    Ok(doc) => {
                        let kind = DocumentKind::classify(doc.content_type.as_deref(), &url);
                        let extracted = self
                            .extractor
                            .extract(self.storage.as_ref(), &doc.storage_key, kind)
                            .await;
                        archived = Some(doc);

                        match extracted {
                            Ok(text) if !text.is_empty() => text,
                            Ok(_) => {
                                tracing::warn!(
                                    submission_id = %external_id,
                                    stage = "extract",
                                    "Extraction produced no text, using fallback"
                                );
                                degraded = true;
                                fallback_text(&submission, "document contained no text")
                            }
                            Err(e) => {
                                tracing::warn!(
                                    submission_id = %external_id,
                                    stage = "extract",
                                    error = %e,
                                    "Extraction failed, using fallback text"
                                );
                                degraded = true;
                                fallback_text(&submission, &e.to_string())
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            submission_id = %external_id,
                            stage = "archive",
                            error = %e,
                            "Archiving failed, using fallback text"
                        );
                        degraded = true;
                        fallback_text(&submission, &e.to_string())
                    }
                }
            }
            // Validation guarantees inline text exists when no attachment
            // was resolvable at intake; the marker covers the degraded
            // resolve-from-store path.
            None => submission
                .inline_text
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| fallback_text(&submission, "no attachment resolved")),
        };

        let draft = self.drafts.generate(&text).await;
        let blocks = to_blocks(&draft);

        let title = submission
            .title
            .clone()
            .unwrap_or_else(|| format!("Press release #{}", external_id));

        let item_id = match &submission.target_item_id {
            Some(target_id) => {
                let patch = NewsItemPatch {
                    description: archived
                        .as_ref()
                        .map(|doc| format!("Archived to {}", doc.public_url)),
                    ai_content: Some(blocks),
                    status: Some(ReviewStatus::NeedsReview),
                };
                self.content_store
                    .patch_item(target_id, &patch)
                    .await
                    .map_err(|e| IntakeError::Persistence(e.to_string()))?;
                target_id.clone()
            }
            None => {
                let description = match &archived {
                    Some(doc) => format!("{}. Archived to {}", key, doc.public_url),
                    None => key.clone(),
                };
                let mut item = NewsItem::imported(title.clone(), description, blocks, origin, now);
                if let Some(note) = &submission.system_note {
                    item = item.with_comment("System", note.clone(), now);
                }
                self.content_store
                    .create_item(&item)
                    .await
                    .map_err(|e| IntakeError::Persistence(e.to_string()))?
            }
        };

        tracing::info!(
            submission_id = %external_id,
            item_id = %item_id,
            degraded = degraded,
            "Submission persisted"
        );

        self.notifier
            .notify(&IntakeEvent {
                item_id: item_id.clone(),
                title,
                external_id,
                origin,
            })
            .await;

        let message = if degraded {
            "Draft generated with fallback content".to_string()
        } else {
            "Draft generated".to_string()
        };

        Ok(IntakeOutcome {
            item_id,
            message,
            degraded,
            already_processed: false,
        })
    }
}

/// Best available substitute when archive or extraction cannot produce text:
/// the submission's own inline text, else a recognizable marker.
fn fallback_text(submission: &Submission, reason: &str) -> String {
    submission
        .inline_text
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "[extraction failed] Could not read the source document. Error: {}",
                reason
            )
        })
}
