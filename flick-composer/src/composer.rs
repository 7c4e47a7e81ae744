use flick_blob::MediaHandle;
use flick_core::PostId;

use crate::{Draft, DraftStatus, PostWriter, PublishError, ValidationError};

/// Glues a [`Draft`] to a [`PostWriter`] for the UI layer.
///
/// One composer per compose screen: mutation calls proxy to the draft,
/// and [`submit`](Self::submit) runs the whole publish pipeline, feeding
/// the outcome back into the draft so the screen can be driven off
/// [`status`](Self::status).
pub struct Composer {
    draft: Draft,
    writer: PostWriter,
}

impl Composer {
    pub fn new(writer: PostWriter) -> Self {
        Self {
            draft: Draft::new(),
            writer,
        }
    }

    pub fn status(&self) -> DraftStatus {
        self.draft.status()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error_message(&self) -> Option<&str> {
        self.draft.error_message()
    }

    pub fn select_media(&mut self, handle: MediaHandle) -> Result<(), ValidationError> {
        self.draft.select_media(handle)
    }

    pub fn set_caption(&mut self, text: &str) -> Result<(), ValidationError> {
        self.draft.set_caption(text)
    }

    /// Validate the draft, publish it, and record the outcome.
    ///
    /// On a validation failure the draft never leaves its current state;
    /// on a pipeline failure it lands in `Failed` with caption and media
    /// retained, ready for an immediate retry.
    pub async fn submit(&mut self) -> Result<PostId, PublishError> {
        let submission = self.draft.begin_submit()?;

        match self.writer.publish(&submission.caption, &submission.media).await {
            Ok(id) => {
                self.draft.complete(Ok(&id))?;
                Ok(id)
            }
            Err(err) => {
                self.draft.complete(Err(&err))?;
                Err(err)
            }
        }
    }
}
