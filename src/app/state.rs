//! Pure application state and its transitions.
//!
//! No side effects happen here; `AppController` performs them around
//! these transitions.

use crate::domain::{AppSnapshot, AppStatus, CapturedImage, DomainError, RecognitionResult, Settings};

/// Identifies one recognition request.
pub type RequestId = u64;

/// What happened to a recognition completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion was current and updated the state.
    Applied,
    /// A newer request or a navigation superseded it.
    Stale,
}

#[derive(Debug)]
pub struct AppState {
    status: AppStatus,
    result: Option<RecognitionResult>,
    error: Option<String>,
    image: Option<CapturedImage>,
    /// Last request id handed out.
    last_request: RequestId,
    /// Request whose completion is still wanted.
    in_flight: Option<RequestId>,
    is_online: bool,
    is_supported_device: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status: AppStatus::Idle,
            result: None,
            error: None,
            image: None,
            last_request: 0,
            in_flight: None,
            is_online: true,
            is_supported_device: true,
        }
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn result(&self) -> Option<&RecognitionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_online(&self) -> bool {
        self.is_online
    }

    pub fn is_supported_device(&self) -> bool {
        self.is_supported_device
    }

    /// Back to the home screen, dropping everything from the last capture.
    pub fn go_to_home(&mut self) {
        self.in_flight = None;
        self.status = AppStatus::Idle;
        self.clear_capture();
    }

    pub fn go_to_settings(&mut self) {
        self.navigate(AppStatus::Settings);
    }

    pub fn go_to_accessibility(&mut self) {
        self.navigate(AppStatus::Accessibility);
    }

    /// Open the camera with a clean slate.
    pub fn start_camera(&mut self) {
        self.in_flight = None;
        self.status = AppStatus::Camera;
        self.clear_capture();
    }

    /// Enter `Processing` for `image` and hand out the id its completion
    /// must present.
    pub fn begin_processing(&mut self, image: CapturedImage) -> Result<RequestId, DomainError> {
        if !self.status.can_process_capture() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                operation: "process a captured image",
            });
        }
        self.last_request += 1;
        self.in_flight = Some(self.last_request);
        self.status = AppStatus::Processing;
        self.result = None;
        self.error = None;
        self.image = Some(image);
        Ok(self.last_request)
    }

    pub fn complete_success(&mut self, request: RequestId, result: RecognitionResult) -> Completion {
        if !self.take_if_current(request) {
            return Completion::Stale;
        }
        self.status = AppStatus::Result;
        self.error = None;
        self.result = Some(result);
        Completion::Applied
    }

    pub fn complete_failure(&mut self, request: RequestId, message: String) -> Completion {
        if !self.take_if_current(request) {
            return Completion::Stale;
        }
        self.status = AppStatus::Error;
        self.result = None;
        self.error = Some(message);
        Completion::Applied
    }

    /// Record a connectivity reading; returns whether it changed.
    pub fn set_online(&mut self, online: bool) -> bool {
        let changed = self.is_online != online;
        self.is_online = online;
        changed
    }

    pub fn set_supported_device(&mut self, supported: bool) {
        self.is_supported_device = supported;
    }

    #[cfg(test)]
    pub(crate) fn force_status(&mut self, status: AppStatus) {
        self.status = status;
    }

    pub fn snapshot(&self, settings: &Settings) -> AppSnapshot {
        AppSnapshot {
            status: self.status,
            result: self.result.clone(),
            error: self.error.clone(),
            image: self.image.clone(),
            is_online: self.is_online,
            is_supported_device: self.is_supported_device,
            settings: settings.clone(),
        }
    }

    /// `result` is set exactly in `Result`, `error` exactly in `Error`.
    pub fn is_consistent(&self) -> bool {
        let result_ok = self.result.is_some() == (self.status == AppStatus::Result);
        let error_ok = self.error.is_some() == (self.status == AppStatus::Error);
        let image_ok = !matches!(self.status, AppStatus::Idle | AppStatus::Camera) || self.image.is_none();
        result_ok && error_ok && image_ok
    }

    /// Leaving for a non-capture screen abandons any pending recognition.
    /// The last result or error stays only while its screen is shown.
    fn navigate(&mut self, to: AppStatus) {
        self.in_flight = None;
        self.status = to;
        self.result = None;
        self.error = None;
    }

    fn clear_capture(&mut self) {
        self.result = None;
        self.error = None;
        self.image = None;
    }

    fn take_if_current(&mut self, request: RequestId) -> bool {
        if self.in_flight == Some(request) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}
