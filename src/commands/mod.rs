use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::{AppController, AppPaths, RequestId};
use crate::domain::{AppMode, AppSnapshot, CapturedImage, Language, Settings, Theme, VoiceSpeed};

/// Commands accepted from the front-end.
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // ==================== Queries ====================
    GetState,
    GetSettings,
    GetPaths,

    // ==================== Navigation ====================
    GoToHome,
    GoToSettings,
    GoToAccessibility,
    StartCamera,

    // ==================== Recognition ====================
    /// Recognize a captured frame. The reply only acknowledges the
    /// request; the outcome arrives as events.
    ProcessImage { image: CapturedImage },

    // ==================== Settings ====================
    SetMode { mode: AppMode },
    SetLanguage { language: Language },
    SetTheme { theme: Theme },
    ToggleDarkMode,
    SetVoiceEnabled { enabled: bool },
    SetVoiceSpeed { speed: VoiceSpeed },
    SetHapticEnabled { enabled: bool },
    PreviewVoice { rate_percent: u8, volume_percent: u8 },
    PreviewVibration { intensity: u8 },

    // ==================== Result screen ====================
    /// Speak the shown result again, with its confidence.
    RepeatResult,
    StopSpeaking,

    // ==================== Connectivity ====================
    RefreshOnlineStatus,
}

impl Command {
    /// Whether the command waits on the network. Callers should run these
    /// off their read loop; their reply may then follow later replies.
    pub fn is_slow(&self) -> bool {
        matches!(self, Command::RefreshOnlineStatus)
    }
}

/// Replies to commands, one per command.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    State(AppSnapshot),
    Settings(Settings),
    Paths(AppPaths),
    Online { online: bool },
    Accepted { request_id: RequestId },
    Ok,
    Error { message: String },
}

/// Execute `command` against the controller.
///
/// Recognition runs on its own task so the caller can keep reading
/// commands, which is what lets a newer capture or a navigation
/// supersede it.
pub async fn dispatch(controller: &Arc<AppController>, command: Command) -> Reply {
    debug!(command = ?command, "Dispatching command");

    match command {
        Command::GetState => Reply::State(controller.snapshot()),
        Command::GetSettings => Reply::Settings(controller.settings()),
        Command::GetPaths => match controller.paths() {
            Some(paths) => Reply::Paths(paths),
            None => Reply::Error {
                message: "No filesystem paths in use".to_string(),
            },
        },

        Command::GoToHome => {
            controller.go_to_home();
            Reply::State(controller.snapshot())
        }
        Command::GoToSettings => {
            controller.go_to_settings();
            Reply::State(controller.snapshot())
        }
        Command::GoToAccessibility => {
            controller.go_to_accessibility();
            Reply::State(controller.snapshot())
        }
        Command::StartCamera => {
            controller.start_camera();
            Reply::State(controller.snapshot())
        }

        Command::ProcessImage { image } => match controller.begin_processing(image) {
            Ok(ticket) => {
                let request_id = ticket.request_id;
                let controller = Arc::clone(controller);
                tokio::spawn(async move {
                    controller.run_recognition(ticket).await;
                });
                Reply::Accepted { request_id }
            }
            Err(e) => Reply::Error {
                message: e.to_string(),
            },
        },

        Command::SetMode { mode } => Reply::Settings(controller.set_mode(mode)),
        Command::SetLanguage { language } => Reply::Settings(controller.set_language(language)),
        Command::SetTheme { theme } => Reply::Settings(controller.set_theme(theme)),
        Command::ToggleDarkMode => Reply::Settings(controller.toggle_dark_mode()),
        Command::SetVoiceEnabled { enabled } => {
            Reply::Settings(controller.set_voice_enabled(enabled))
        }
        Command::SetVoiceSpeed { speed } => Reply::Settings(controller.set_voice_speed(speed)),
        Command::SetHapticEnabled { enabled } => {
            Reply::Settings(controller.set_haptic_enabled(enabled))
        }
        Command::PreviewVoice {
            rate_percent,
            volume_percent,
        } => {
            controller.preview_voice(rate_percent, volume_percent);
            Reply::Ok
        }
        Command::PreviewVibration { intensity } => {
            controller.preview_vibration(intensity);
            Reply::Ok
        }

        Command::RepeatResult => {
            if controller.repeat_result() {
                Reply::Ok
            } else {
                Reply::Error {
                    message: "No result to repeat".to_string(),
                }
            }
        }
        Command::StopSpeaking => {
            controller.stop_speaking();
            Reply::Ok
        }

        Command::RefreshOnlineStatus => Reply::Online {
            online: controller.refresh_online_status().await,
        },
    }
}
