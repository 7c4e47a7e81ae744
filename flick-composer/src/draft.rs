use flick_blob::MediaHandle;
use flick_core::{PostId, MAX_CAPTION_CHARS};

use crate::{PublishError, ValidationError};

/// Lifecycle of a single in-progress post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    Idle,
    MediaSelected,
    Submitting,
    Succeeded,
    Failed,
}

/// A validated draft, frozen for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub caption: String,
    pub media: MediaHandle,
}

/// An in-progress, not-yet-persisted post held only in client memory.
///
/// Created on screen entry, mutated by user actions and the submission
/// outcome, discarded on success or navigation-away. Purely synchronous;
/// the async publish work happens in [`PostWriter`] and its outcome is fed
/// back through [`complete`](Self::complete).
///
/// [`PostWriter`]: crate::PostWriter
#[derive(Debug, Clone)]
pub struct Draft {
    media: Option<MediaHandle>,
    caption: String,
    status: DraftStatus,
    error: Option<String>,
    published: Option<PostId>,
}

impl Draft {
    pub fn new() -> Self {
        Self {
            media: None,
            caption: String::new(),
            status: DraftStatus::Idle,
            error: None,
            published: None,
        }
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn media(&self) -> Option<&MediaHandle> {
        self.media.as_ref()
    }

    /// Message from the last failed submission, cleared on the next edit
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the published post once the draft has succeeded
    pub fn published(&self) -> Option<&PostId> {
        self.published.as_ref()
    }

    /// Pick (or re-pick) the media behind this draft. Always overwrites
    /// the held handle.
    pub fn select_media(&mut self, handle: MediaHandle) -> Result<(), ValidationError> {
        match self.status {
            DraftStatus::Idle | DraftStatus::MediaSelected | DraftStatus::Failed => {
                self.media = Some(handle);
                self.status = DraftStatus::MediaSelected;
                self.error = None;
                Ok(())
            }
            from => Err(ValidationError::InvalidState { from }),
        }
    }

    /// Update the caption. Rejected as a no-op past [`MAX_CAPTION_CHARS`]
    /// and while a submission is in flight; the held caption is unchanged
    /// in both cases.
    pub fn set_caption(&mut self, text: &str) -> Result<(), ValidationError> {
        if self.status == DraftStatus::Submitting {
            return Err(ValidationError::InvalidState {
                from: DraftStatus::Submitting,
            });
        }
        let len = text.chars().count();
        if len > MAX_CAPTION_CHARS {
            return Err(ValidationError::CaptionTooLong {
                len,
                max: MAX_CAPTION_CHARS,
            });
        }

        self.caption = text.to_string();
        if self.status == DraftStatus::Failed {
            // Editing after a failure re-enters the editable state
            self.status = DraftStatus::MediaSelected;
            self.error = None;
        }
        Ok(())
    }

    /// Validate and freeze the draft for submission.
    ///
    /// Requires a held media handle and a non-empty trimmed caption;
    /// missing media and missing caption are signalled distinctly and
    /// leave the draft exactly where it was. On success the draft enters
    /// `Submitting` and accepts no further edits until
    /// [`complete`](Self::complete).
    pub fn begin_submit(&mut self) -> Result<Submission, ValidationError> {
        match self.status {
            DraftStatus::Submitting | DraftStatus::Succeeded => {
                return Err(ValidationError::InvalidState { from: self.status })
            }
            DraftStatus::Idle | DraftStatus::MediaSelected | DraftStatus::Failed => {}
        }

        let media = match &self.media {
            Some(handle) => handle.clone(),
            None => return Err(ValidationError::MissingMedia),
        };
        let caption = self.caption.trim();
        if caption.is_empty() {
            return Err(ValidationError::MissingCaption);
        }

        self.status = DraftStatus::Submitting;
        self.error = None;
        Ok(Submission {
            caption: caption.to_string(),
            media,
        })
    }

    /// Feed the writer's outcome back into the draft.
    ///
    /// From `Submitting` only: success moves to `Succeeded` (the UI layer
    /// is expected to discard the draft), failure moves to `Failed` with
    /// the carried message and caption/media retained for an immediate
    /// retry.
    pub fn complete(
        &mut self,
        outcome: Result<&PostId, &PublishError>,
    ) -> Result<(), ValidationError> {
        if self.status != DraftStatus::Submitting {
            return Err(ValidationError::InvalidState { from: self.status });
        }
        match outcome {
            Ok(id) => {
                self.status = DraftStatus::Succeeded;
                self.published = Some(id.clone());
                self.error = None;
            }
            Err(err) => {
                self.status = DraftStatus::Failed;
                self.error = Some(err.to_string());
            }
        }
        Ok(())
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}
