/// Generation run lifecycle
///
/// One remix run at a time: the run holds the uploaded photo and walks
/// Idle -> Loading -> Succeeded | Failed. `begin` is the single gate for
/// starting a request, so a second submit while one is in flight cannot
/// issue another call.

use crate::upload::UploadedPhoto;

/// Lifecycle of the current run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// No request submitted yet (photo may or may not be set).
    #[default]
    Idle,
    /// A generation request is in flight.
    Loading,
    /// The service produced an image, held as a data URI.
    Succeeded(String),
    /// The run failed with a user-displayable message.
    Failed(String),
}

/// Per-template-run controller: the held photo plus the run state.
#[derive(Debug, Clone, Default)]
pub struct RemixRun {
    photo: Option<UploadedPhoto>,
    state: RunState,
}

impl RemixRun {
    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn photo(&self) -> Option<&UploadedPhoto> {
        self.photo.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == RunState::Loading
    }

    /// The generated image, if the run succeeded.
    pub fn result(&self) -> Option<&str> {
        match &self.state {
            RunState::Succeeded(data_uri) => Some(data_uri),
            _ => None,
        }
    }

    /// Replace (or clear) the held photo. Ignored while a request is in
    /// flight; changing the submitted photo mid-run would desynchronise
    /// the eventual result from what is displayed.
    pub fn set_photo(&mut self, photo: Option<UploadedPhoto>) {
        if self.is_loading() {
            tracing::warn!("ignoring photo change while a remix is in flight");
            return;
        }
        self.photo = photo;
    }

    /// Try to start a run. Returns the photo to submit, or `None` when
    /// nothing must be sent: either a request is already outstanding
    /// (no-op re-entry guard) or no photo is set (fails the run with the
    /// upload prompt without contacting the service).
    pub fn begin(&mut self) -> Option<UploadedPhoto> {
        if self.is_loading() {
            return None;
        }

        let Some(photo) = self.photo.clone() else {
            self.state = RunState::Failed("Please upload your image first.".to_string());
            return None;
        };

        self.state = RunState::Loading;
        Some(photo)
    }

    /// Record the outcome of the in-flight request. A settlement that
    /// arrives when no request is outstanding is dropped.
    pub fn settle(&mut self, outcome: Result<String, String>) {
        if !self.is_loading() {
            tracing::warn!("dropping settlement for a run that is not loading");
            return;
        }
        self.state = match outcome {
            Ok(data_uri) => RunState::Succeeded(data_uri),
            Err(message) => RunState::Failed(message),
        };
    }

    /// Clear photo, result and error, returning to Idle. Not available
    /// while a request is in flight.
    pub fn reset(&mut self) {
        if self.is_loading() {
            return;
        }
        self.photo = None;
        self.state = RunState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::validate_photo;

    fn some_photo() -> UploadedPhoto {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        validate_photo(png.to_vec()).unwrap()
    }

    #[test]
    fn test_begin_without_photo_fails_without_submitting() {
        let mut run = RemixRun::default();
        assert!(run.begin().is_none());
        assert_eq!(
            run.state(),
            &RunState::Failed("Please upload your image first.".to_string())
        );
    }

    #[test]
    fn test_begin_submits_exactly_once_while_loading() {
        let mut run = RemixRun::default();
        run.set_photo(Some(some_photo()));

        assert!(run.begin().is_some());
        assert!(run.is_loading());

        // A second submit while the first is in flight is a no-op.
        assert!(run.begin().is_none());
        assert!(run.is_loading());
    }

    #[test]
    fn test_successful_settlement_holds_the_result() {
        let mut run = RemixRun::default();
        run.set_photo(Some(some_photo()));
        run.begin().unwrap();

        run.settle(Ok("data:image/png;base64,QUJD".to_string()));
        assert_eq!(run.result(), Some("data:image/png;base64,QUJD"));
    }

    #[test]
    fn test_retry_after_failure_keeps_the_photo() {
        let mut run = RemixRun::default();
        run.set_photo(Some(some_photo()));
        run.begin().unwrap();
        run.settle(Err("Failed to generate image.".to_string()));
        assert!(matches!(run.state(), RunState::Failed(_)));

        // Try Again re-submits with the photo still in place.
        assert!(run.begin().is_some());
        assert!(run.is_loading());
    }

    #[test]
    fn test_reset_returns_to_idle_and_clears_everything() {
        let mut run = RemixRun::default();
        run.set_photo(Some(some_photo()));
        run.begin().unwrap();
        run.settle(Ok("data:image/png;base64,QUJD".to_string()));

        run.reset();
        assert_eq!(run.state(), &RunState::Idle);
        assert!(run.photo().is_none());
        assert!(run.result().is_none());
    }

    #[test]
    fn test_photo_changes_are_ignored_mid_flight() {
        let mut run = RemixRun::default();
        run.set_photo(Some(some_photo()));
        run.begin().unwrap();

        run.set_photo(None);
        assert!(run.photo().is_some());
    }

    #[test]
    fn test_stale_settlement_is_dropped() {
        let mut run = RemixRun::default();
        run.settle(Ok("data:image/png;base64,QUJD".to_string()));
        assert_eq!(run.state(), &RunState::Idle);
    }
}
