use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{
    EventHapticDevice, EventSpeechSynthesizer, HttpConnectivityMonitor, JsonFileSettingsStore,
    SimulatedRecognizer, TomlConfigStore,
};
use crate::app::state::{AppState, Completion, RequestId};
use crate::domain::feedback::preview_vibration;
use crate::domain::{
    message, AppConfig, AppEvent, AppMode, AppSnapshot, AppStatus, CapturedImage, DomainError,
    HapticPattern, Language, MessageKey, NotificationVariant, RecognitionResult, SettingKey,
    Settings, SpeechRequest, Theme, VoiceSpeed,
};
use crate::infrastructure::init_logging;
use crate::ports::{
    ConfigStore, ConnectivityMonitor, HapticDevice, Recognizer, SettingsStore, SpeechSynthesizer,
};

/// Capacity of the event broadcast channel.
pub const EVENT_CAPACITY: usize = 128;

/// External collaborators the controller drives.
#[derive(Clone)]
pub struct Services {
    pub recognizer: Arc<dyn Recognizer>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub haptics: Arc<dyn HapticDevice>,
    pub settings_store: Arc<dyn SettingsStore>,
    pub connectivity: Arc<dyn ConnectivityMonitor>,
}

/// Filesystem locations in use.
#[derive(Debug, Clone, Serialize)]
pub struct AppPaths {
    pub data_dir: String,
    pub logs_dir: String,
    pub config_path: String,
    pub settings_path: String,
}

/// A capture accepted for recognition, to be completed by
/// [`AppController::run_recognition`].
#[derive(Debug)]
pub struct RecognitionTicket {
    pub request_id: RequestId,
    image: CapturedImage,
}

/// Application controller: owns the state machine and performs the side
/// effects of each transition.
pub struct AppController {
    config: AppConfig,
    state: Mutex<AppState>,
    settings: RwLock<Settings>,
    services: Services,
    events: broadcast::Sender<AppEvent>,
    paths: Option<AppPaths>,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller with the production adapters.
    /// This sets up configuration, logging, settings and every service.
    pub fn new() -> Result<Self, DomainError> {
        // Step 1: Initialize config store
        let config_store = TomlConfigStore::new()?;

        // Step 2: Load configuration
        let config = config_store.load()?;

        // Step 3: Initialize logging
        let log_guard = init_logging(&config_store.logs_dir(), &config.logging)?;

        info!("CurrencySense starting up");

        // Step 4: Wire services
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let settings_path = config_store.settings_path(&config.storage.settings_file);
        let services = Services {
            recognizer: Arc::new(SimulatedRecognizer::new(&config.recognition)),
            speech: Arc::new(EventSpeechSynthesizer::new(events.clone())),
            haptics: Arc::new(EventHapticDevice::new(events.clone())),
            settings_store: Arc::new(JsonFileSettingsStore::open(settings_path.clone())?),
            connectivity: Arc::new(HttpConnectivityMonitor::new(&config.connectivity)?),
        };

        let paths = AppPaths {
            data_dir: config_store.data_dir().to_string_lossy().to_string(),
            logs_dir: config_store.logs_dir().to_string_lossy().to_string(),
            config_path: config_store.config_path().to_string_lossy().to_string(),
            settings_path: settings_path.to_string_lossy().to_string(),
        };

        let mut controller = Self::with_services(config, services, events);
        controller.paths = Some(paths);
        controller._log_guard = log_guard;
        Ok(controller)
    }

    /// Build a controller around explicit services.
    ///
    /// `events` must be the sender any event-based adapters in `services`
    /// publish to, so subscribers see one ordered stream.
    pub fn with_services(
        config: AppConfig,
        services: Services,
        events: broadcast::Sender<AppEvent>,
    ) -> Self {
        let settings = services.settings_store.load_settings();
        let mut state = AppState::new();
        state.set_online(services.connectivity.is_online());

        info!(
            language = ?settings.language,
            voice_enabled = settings.voice_enabled,
            haptic_enabled = settings.haptic_enabled,
            "AppController initialized"
        );

        Self {
            config,
            state: Mutex::new(state),
            settings: RwLock::new(settings),
            services,
            events,
            paths: None,
            _log_guard: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn paths(&self) -> Option<AppPaths> {
        self.paths.clone()
    }

    pub fn connectivity(&self) -> Arc<dyn ConnectivityMonitor> {
        Arc::clone(&self.services.connectivity)
    }

    /// Subscribe to state, feedback and settings events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> AppStatus {
        self.state.lock().status()
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let settings = self.settings();
        self.state.lock().snapshot(&settings)
    }

    #[cfg(test)]
    pub(crate) fn with_state<R>(&self, apply: impl FnOnce(&mut AppState) -> R) -> R {
        apply(&mut self.state.lock())
    }

    // ==================== Navigation ====================

    pub fn go_to_home(&self) {
        self.transition("go_to_home", AppState::go_to_home);
    }

    pub fn go_to_settings(&self) {
        self.transition("go_to_settings", AppState::go_to_settings);
    }

    pub fn go_to_accessibility(&self) {
        self.transition("go_to_accessibility", AppState::go_to_accessibility);
    }

    pub fn start_camera(&self) {
        self.transition("start_camera", AppState::start_camera);
        self.announce(MessageKey::CameraReady);
    }

    // ==================== Recognition ====================

    /// Recognize `image` and settle in `Result` or `Error`.
    ///
    /// Returns `Stale` when a later capture or a navigation superseded
    /// this one before it finished.
    pub async fn process_captured_image(
        &self,
        image: CapturedImage,
    ) -> Result<Completion, DomainError> {
        let ticket = self.begin_processing(image)?;
        Ok(self.run_recognition(ticket).await)
    }

    /// Synchronous half of [`process_captured_image`]: enter `Processing`.
    ///
    /// [`process_captured_image`]: Self::process_captured_image
    pub fn begin_processing(&self, image: CapturedImage) -> Result<RecognitionTicket, DomainError> {
        let (from, request_id) = {
            let mut state = self.state.lock();
            let from = state.status();
            let request_id = state.begin_processing(image.clone()).map_err(|e| {
                warn!(from = %from, error = %e, "Capture rejected");
                e
            })?;
            (from, request_id)
        };

        info!(
            request_id = request_id,
            bytes = image.len(),
            from = %from,
            "Processing captured image"
        );
        if from != AppStatus::Processing {
            self.publish(AppEvent::StatusChanged {
                from,
                to: AppStatus::Processing,
            });
        }
        self.announce(MessageKey::Processing);

        Ok(RecognitionTicket { request_id, image })
    }

    /// Awaiting half of [`process_captured_image`]: call the recognizer and
    /// apply the outcome if the ticket is still current.
    ///
    /// [`process_captured_image`]: Self::process_captured_image
    pub async fn run_recognition(&self, ticket: RecognitionTicket) -> Completion {
        let timeout_secs = self.config.recognition.timeout_secs.max(1);
        let call = self.services.recognizer.recognize(&ticket.image);

        let outcome = match tokio::time::timeout(Duration::from_secs(timeout_secs), call).await {
            Ok(Ok(result)) => result.validate(),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DomainError::RecognitionTimeout { secs: timeout_secs }),
        };

        match outcome {
            Ok(result) => self.finish_success(ticket.request_id, result),
            Err(e) => self.finish_failure(ticket.request_id, e),
        }
    }

    fn finish_success(&self, request_id: RequestId, result: RecognitionResult) -> Completion {
        let (from, completion) = {
            let mut state = self.state.lock();
            let from = state.status();
            (from, state.complete_success(request_id, result.clone()))
        };
        if completion == Completion::Stale {
            return self.discard(request_id);
        }

        info!(
            request_id = request_id,
            denomination = %result.denomination,
            currency = %result.currency,
            confidence = result.confidence,
            "Currency recognized"
        );
        self.publish(AppEvent::StatusChanged {
            from,
            to: AppStatus::Result,
        });

        let settings = self.settings();
        if settings.haptic_enabled {
            self.vibrate(HapticPattern::Success);
        }
        if settings.voice_enabled {
            self.announce_result(&result);
        }
        self.notify(
            message(MessageKey::RecognitionSuccess, settings.language),
            result.headline(),
            NotificationVariant::Default,
        );
        completion
    }

    fn finish_failure(&self, request_id: RequestId, err: DomainError) -> Completion {
        let language = self.settings.read().language;
        let text = message(MessageKey::RecognitionError, language);

        let (from, completion) = {
            let mut state = self.state.lock();
            let from = state.status();
            (from, state.complete_failure(request_id, text.to_string()))
        };
        if completion == Completion::Stale {
            debug!(request_id = request_id, error = %err, "Superseded recognition failed");
            return self.discard(request_id);
        }

        error!(
            request_id = request_id,
            error = %err,
            backend_fault = !err.is_recognition_failure(),
            "Currency recognition failed"
        );
        self.publish(AppEvent::StatusChanged {
            from,
            to: AppStatus::Error,
        });

        if self.settings.read().haptic_enabled {
            self.vibrate(HapticPattern::Error);
        }
        self.notify(
            message(MessageKey::ErrorTitle, language),
            text,
            NotificationVariant::Destructive,
        );
        completion
    }

    fn discard(&self, request_id: RequestId) -> Completion {
        debug!(request_id = request_id, "Discarding superseded recognition");
        self.publish(AppEvent::RecognitionDiscarded { request_id });
        Completion::Stale
    }

    /// Speak the shown result again, confidence included. The user asked
    /// for it, so the voice toggle does not apply.
    ///
    /// Returns `false` when no result is on screen.
    pub fn repeat_result(&self) -> bool {
        let result = {
            let state = self.state.lock();
            state
                .result()
                .filter(|_| state.status() == AppStatus::Result)
                .cloned()
        };
        let Some(result) = result else {
            debug!("No result to repeat");
            return false;
        };

        let settings = self.settings();
        let request = SpeechRequest::new(result.spoken_summary(), settings.language)
            .with_rate(settings.speech_rate());
        self.speak(&request);
        true
    }

    /// Cut off whatever is being spoken.
    pub fn stop_speaking(&self) {
        if let Err(e) = self.services.speech.stop() {
            warn!(error = %e, "Failed to stop speech");
        }
    }

    /// Speak `result` and confirm with a success vibration.
    /// Does nothing while voice feedback is off.
    pub fn announce_result(&self, result: &RecognitionResult) {
        let settings = self.settings();
        if !settings.voice_enabled {
            return;
        }

        let request = SpeechRequest::new(result.headline(), settings.language)
            .with_rate(settings.speech_rate());
        self.speak(&request);

        if settings.haptic_enabled {
            self.vibrate(HapticPattern::Success);
        }
    }

    /// Warm up the recognizer; a failure marks the device unsupported.
    pub async fn preload_recognizer(&self) {
        match self.services.recognizer.preload().await {
            Ok(()) => {
                let capabilities = self.services.recognizer.capabilities();
                info!(backend = %capabilities.name, "Recognizer ready");
            }
            Err(e) => {
                error!(error = %e, "Failed to preload recognition model");
                self.state.lock().set_supported_device(false);
            }
        }
    }

    // ==================== Settings ====================

    pub fn set_mode(&self, mode: AppMode) -> Settings {
        self.update_settings(|s| replace(&mut s.mode, mode, SettingKey::Mode))
    }

    pub fn set_language(&self, language: Language) -> Settings {
        self.update_settings(|s| replace(&mut s.language, language, SettingKey::Language))
    }

    pub fn set_theme(&self, theme: Theme) -> Settings {
        self.update_settings(|s| s.set_theme(theme))
    }

    /// Flip dark mode (see [`Settings::toggle_dark_mode`]) with a short
    /// vibration as confirmation.
    pub fn toggle_dark_mode(&self) -> Settings {
        let settings = self.update_settings(Settings::toggle_dark_mode);
        if settings.haptic_enabled {
            self.vibrate(HapticPattern::Short);
        }
        settings
    }

    pub fn set_voice_enabled(&self, enabled: bool) -> Settings {
        self.update_settings(|s| replace(&mut s.voice_enabled, enabled, SettingKey::VoiceEnabled))
    }

    pub fn set_voice_speed(&self, speed: VoiceSpeed) -> Settings {
        self.update_settings(|s| replace(&mut s.voice_speed, speed, SettingKey::VoiceSpeed))
    }

    pub fn set_haptic_enabled(&self, enabled: bool) -> Settings {
        self.update_settings(|s| replace(&mut s.haptic_enabled, enabled, SettingKey::HapticEnabled))
    }

    /// Speak the localized test phrase. `rate_percent` maps 0..=100 onto a
    /// 0.5..=1.5 rate.
    pub fn preview_voice(&self, rate_percent: u8, volume_percent: u8) {
        let language = self.settings.read().language;
        let rate = 0.5 + f32::from(rate_percent.min(100)) / 100.0;
        let volume = f32::from(volume_percent.min(100)) / 100.0;
        let request = SpeechRequest::new(message(MessageKey::VoicePreview, language), language)
            .with_rate(rate)
            .with_volume(volume);
        self.speak(&request);
    }

    /// Vibrate a sample pattern at `intensity` (0-100).
    pub fn preview_vibration(&self, intensity: u8) {
        if let Err(e) = self.services.haptics.vibrate(&preview_vibration(intensity)) {
            warn!(error = %e, "Haptic preview failed");
        }
    }

    fn update_settings<F>(&self, apply: F) -> Settings
    where
        F: FnOnce(&mut Settings) -> Vec<SettingKey>,
    {
        let mut settings = self.settings.write();
        let changed = apply(&mut settings);
        if changed.is_empty() {
            return settings.clone();
        }

        // Persist under the lock so the store sees changes in order
        self.services.settings_store.save_settings(&settings, &changed);
        let snapshot = settings.clone();
        drop(settings);

        info!(changed = ?changed, "Settings updated");
        self.publish(AppEvent::SettingsChanged {
            settings: snapshot.clone(),
        });
        snapshot
    }

    // ==================== Connectivity ====================

    /// Re-check reachability now.
    pub async fn refresh_online_status(&self) -> bool {
        let online = self.services.connectivity.check().await;
        self.handle_connectivity_change(online);
        online
    }

    /// React to a reachability reading. Repeated readings are ignored.
    pub fn handle_connectivity_change(&self, online: bool) {
        let (changed, status) = {
            let mut state = self.state.lock();
            (state.set_online(online), state.status())
        };
        if !changed {
            return;
        }

        self.publish(AppEvent::ConnectivityChanged { online });
        let language = self.settings.read().language;

        if !online {
            warn!("Network connection lost");
            self.announce(MessageKey::OfflineMessage);
            self.notify(
                message(MessageKey::OfflineTitle, language),
                message(MessageKey::OfflineMessage, language),
                NotificationVariant::Destructive,
            );
        } else if status != AppStatus::Idle {
            info!(status = %status, "Network connection restored");
            self.announce(MessageKey::BackOnline);
            self.notify(
                message(MessageKey::OnlineTitle, language),
                message(MessageKey::BackOnline, language),
                NotificationVariant::Default,
            );
        } else {
            info!("Network connection restored");
        }
    }

    // ==================== Side effects ====================

    fn transition(&self, operation: &'static str, apply: fn(&mut AppState)) {
        let (from, to, abandoned) = {
            let mut state = self.state.lock();
            let from = state.status();
            let pending = state.in_flight();
            apply(&mut state);
            let abandoned = pending.filter(|_| state.in_flight().is_none());
            (from, state.status(), abandoned)
        };

        info!(operation = operation, from = %from, to = %to, "State transition");
        if let Some(request_id) = abandoned {
            debug!(request_id = request_id, "Pending recognition abandoned");
        }
        if from != to {
            self.publish(AppEvent::StatusChanged { from, to });
        }
        // The result announcement must not outlive its screen
        if from == AppStatus::Result && to != AppStatus::Result {
            self.stop_speaking();
        }
    }

    /// Speak a localized message if voice feedback is on.
    fn announce(&self, key: MessageKey) {
        let settings = self.settings();
        if !settings.voice_enabled {
            return;
        }
        let request = SpeechRequest::new(message(key, settings.language), settings.language)
            .with_rate(settings.speech_rate());
        self.speak(&request);
    }

    fn speak(&self, request: &SpeechRequest) {
        if let Err(e) = self.services.speech.speak(request) {
            warn!(error = %e, "Speech output failed");
        }
    }

    fn vibrate(&self, pattern: HapticPattern) {
        if let Err(e) = self.services.haptics.vibrate(&pattern.durations()) {
            warn!(pattern = ?pattern, error = %e, "Haptic output failed");
        }
    }

    fn notify(&self, title: &str, description: impl Into<String>, variant: NotificationVariant) {
        self.publish(AppEvent::Notification {
            title: title.to_string(),
            description: description.into(),
            variant,
        });
    }

    fn publish(&self, event: AppEvent) {
        // No subscribers is fine; the state is still authoritative
        let _ = self.events.send(event);
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T, key: SettingKey) -> Vec<SettingKey> {
    if *slot == value {
        Vec::new()
    } else {
        *slot = value;
        vec![key]
    }
}
