//! Test doubles for the controller's ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{broadcast, oneshot, watch};

use crate::adapters::{EventHapticDevice, EventSpeechSynthesizer, MemorySettingsStore};
use crate::app::controller::{AppController, Services, EVENT_CAPACITY};
use crate::domain::{
    AppConfig, AppEvent, AppStatus, CapturedImage, DomainError, RecognitionResult, SettingKey,
    Settings, SpeechRequest,
};
use crate::ports::{
    ConnectivityMonitor, HapticDevice, Recognizer, RecognizerCapabilities, SettingsStore,
    SpeechSynthesizer,
};

pub type Outcome = Result<RecognitionResult, DomainError>;

pub fn rupee(denomination: &str, confidence: f32) -> RecognitionResult {
    RecognitionResult::new("Indian Rupee", denomination, confidence)
}

enum Script {
    Immediate(Outcome),
    Pending(oneshot::Receiver<Outcome>),
}

/// Recognizer answering per image payload.
#[derive(Default)]
pub struct ScriptedRecognizer {
    scripts: Mutex<HashMap<String, Script>>,
    preload_fails: AtomicBool,
}

impl ScriptedRecognizer {
    pub fn resolve(&self, image: &str, outcome: Outcome) {
        self.scripts
            .lock()
            .insert(image.to_string(), Script::Immediate(outcome));
    }

    /// The recognition of `image` waits until the returned sender fires.
    pub fn pending(&self, image: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.scripts
            .lock()
            .insert(image.to_string(), Script::Pending(rx));
        tx
    }

    pub fn fail_preload(&self) {
        self.preload_fails.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn recognize(&self, image: &CapturedImage) -> Result<RecognitionResult, DomainError> {
        let script = self.scripts.lock().remove(image.as_str());
        match script {
            Some(Script::Immediate(outcome)) => outcome,
            Some(Script::Pending(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(DomainError::Recognition("request dropped".into()))),
            None => Err(DomainError::Recognition("unscripted image".into())),
        }
    }

    async fn preload(&self) -> Result<(), DomainError> {
        if self.preload_fails.load(Ordering::SeqCst) {
            Err(DomainError::Recognition("model unavailable".into()))
        } else {
            Ok(())
        }
    }

    fn capabilities(&self) -> RecognizerCapabilities {
        RecognizerCapabilities {
            name: "scripted".to_string(),
            currencies: vec!["Indian Rupee".to_string()],
            requires_network: false,
        }
    }
}

#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<SpeechRequest>>,
    stops: AtomicUsize,
}

impl RecordingSpeech {
    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.spoken.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.spoken.lock().iter().map(|r| r.text.clone()).collect()
    }
}

impl SpeechSynthesizer for RecordingSpeech {
    fn speak(&self, request: &SpeechRequest) -> Result<(), DomainError> {
        self.spoken.lock().push(request.clone());
        Ok(())
    }

    fn stop(&self) -> Result<(), DomainError> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingHaptics {
    patterns: Mutex<Vec<Vec<Duration>>>,
}

impl RecordingHaptics {
    pub fn patterns(&self) -> Vec<Vec<Duration>> {
        self.patterns.lock().clone()
    }
}

impl HapticDevice for RecordingHaptics {
    fn vibrate(&self, pattern: &[Duration]) -> Result<(), DomainError> {
        self.patterns.lock().push(pattern.to_vec());
        Ok(())
    }

    fn stop(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Connectivity driven by the test.
pub struct ManualConnectivity {
    state: watch::Sender<bool>,
    next_check: Mutex<Option<bool>>,
    check_gate: Mutex<Option<oneshot::Receiver<()>>>,
    checks: AtomicUsize,
}

impl Default for ManualConnectivity {
    fn default() -> Self {
        let (state, _) = watch::channel(true);
        Self {
            state,
            next_check: Mutex::new(None),
            check_gate: Mutex::new(None),
            checks: AtomicUsize::new(0),
        }
    }
}

impl ManualConnectivity {
    pub fn set(&self, online: bool) {
        self.state.send_replace(online);
    }

    /// Result of the following `check` calls.
    pub fn set_next_check(&self, online: bool) {
        *self.next_check.lock() = Some(online);
    }

    /// The next `check` waits until the returned sender fires or drops.
    pub fn hold_next_check(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.check_gate.lock() = Some(rx);
        tx
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityMonitor for ManualConnectivity {
    fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    async fn check(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let gate = self.check_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let scripted = *self.next_check.lock();
        let online = scripted.unwrap_or_else(|| self.is_online());
        self.set(online);
        online
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }
}

/// A controller wired to recording doubles.
pub struct Harness {
    pub controller: Arc<AppController>,
    pub recognizer: Arc<ScriptedRecognizer>,
    pub speech: Arc<RecordingSpeech>,
    pub haptics: Arc<RecordingHaptics>,
    pub store: Arc<MemorySettingsStore>,
    pub connectivity: Arc<ManualConnectivity>,
    events: broadcast::Receiver<AppEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::new(), Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_config(AppConfig::new(), settings)
    }

    pub fn with_config(config: AppConfig, settings: Settings) -> Self {
        Self::build(config, settings, false)
    }

    /// Speech and haptics go out as events instead of being recorded.
    pub fn with_event_adapters() -> Self {
        Self::build(AppConfig::new(), Settings::default(), true)
    }

    fn build(config: AppConfig, settings: Settings, event_adapters: bool) -> Self {
        let recognizer = Arc::new(ScriptedRecognizer::default());
        let speech = Arc::new(RecordingSpeech::default());
        let haptics = Arc::new(RecordingHaptics::default());
        let store = Arc::new(MemorySettingsStore::new());
        let connectivity = Arc::new(ManualConnectivity::default());

        let seeded: &dyn SettingsStore = store.as_ref();
        seeded.save_settings(&settings, &SettingKey::ALL);

        let (events, rx) = broadcast::channel(EVENT_CAPACITY);
        let mut speech_port: Arc<dyn SpeechSynthesizer> = speech.clone();
        let mut haptics_port: Arc<dyn HapticDevice> = haptics.clone();
        if event_adapters {
            speech_port = Arc::new(EventSpeechSynthesizer::new(events.clone()));
            haptics_port = Arc::new(EventHapticDevice::new(events.clone()));
        }

        let services = Services {
            recognizer: recognizer.clone(),
            speech: speech_port,
            haptics: haptics_port,
            settings_store: store.clone(),
            connectivity: connectivity.clone(),
        };
        let controller = Arc::new(AppController::with_services(config, services, events));

        Self {
            controller,
            recognizer,
            speech,
            haptics,
            store,
            connectivity,
            events: rx,
        }
    }

    pub fn force_status(&self, status: AppStatus) {
        self.controller.with_state(|state| state.force_status(status));
    }

    /// Put the controller in `Error` as if a recognition had failed.
    pub fn force_error(&self, message: &str) {
        self.controller.with_state(|state| {
            state.start_camera();
            let id = state
                .begin_processing(CapturedImage::new("frame"))
                .expect("camera accepts captures");
            state.complete_failure(id, message.to_string());
        });
    }

    /// Every event published so far.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the next event matching `accept`.
    pub async fn wait_for<F>(&mut self, accept: F) -> AppEvent
    where
        F: Fn(&AppEvent) -> bool,
    {
        let wait = async {
            loop {
                match self.events.recv().await {
                    Ok(event) if accept(&event) => return event,
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => panic!("event channel closed"),
                }
            }
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .expect("event not published in time")
    }
}
