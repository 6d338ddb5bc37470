use serde::{Deserialize, Serialize};

/// The screen the application is currently showing.
///
/// Transitions (owned by `AppState`):
/// - any -> Idle (go_to_home)
/// - any -> Settings / Accessibility (navigation)
/// - any -> Camera (start_camera)
/// - Camera | Processing -> Processing (process_captured_image)
/// - Processing -> Result | Error (recognition completes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStatus {
    /// Home screen.
    #[default]
    Idle,
    /// Live camera preview, waiting for a capture.
    Camera,
    /// A captured frame is being recognized.
    Processing,
    /// Showing a recognition result.
    Result,
    /// Showing the last recognition failure.
    Error,
    /// General settings screen.
    Settings,
    /// Accessibility settings screen.
    Accessibility,
}

impl AppStatus {
    pub const ALL: [AppStatus; 7] = [
        AppStatus::Idle,
        AppStatus::Camera,
        AppStatus::Processing,
        AppStatus::Result,
        AppStatus::Error,
        AppStatus::Settings,
        AppStatus::Accessibility,
    ];

    /// Check if a captured image may be submitted from this status.
    ///
    /// Processing is included so that a newer capture supersedes an
    /// in-flight one.
    #[must_use]
    pub fn can_process_capture(&self) -> bool {
        matches!(self, AppStatus::Camera | AppStatus::Processing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Idle => "idle",
            AppStatus::Camera => "camera",
            AppStatus::Processing => "processing",
            AppStatus::Result => "result",
            AppStatus::Error => "error",
            AppStatus::Settings => "settings",
            AppStatus::Accessibility => "accessibility",
        }
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_process_capture() {
        for status in AppStatus::ALL {
            let expected = matches!(status, AppStatus::Camera | AppStatus::Processing);
            assert_eq!(status.can_process_capture(), expected, "{status}");
        }
    }

    #[test]
    fn test_status_serialization_matches_display() {
        for status in AppStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
