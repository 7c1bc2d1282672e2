//! Probe snapshot consumed by the scorer.

use serde::{Deserialize, Serialize};

/// Pixel ratio reported when the runtime exposes none.
pub const UNKNOWN_PIXEL_RATIO: f64 = 1.0;

/// Read-only snapshot of the runtime's exposed hardware and software
/// characteristics.
///
/// Unknown values use sentinels rather than errors: empty strings, `0`,
/// `0.0`, `None`, and [`UNKNOWN_PIXEL_RATIO`] for the pixel ratio. Keys are
/// camelCase on the wire so a browser client's report deserializes as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeBundle {
    pub user_agent: String,
    pub platform: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub device_pixel_ratio: f64,
    /// Logical CPU count, `0` when unknown.
    pub hardware_concurrency: u32,
    /// Approximate device memory in GiB, `0.0` when unknown.
    #[serde(rename = "deviceMemory")]
    pub device_memory_gib: f64,
    pub touch_supported: bool,
    pub max_touch_points: u32,
    /// `None` when WebGL (or the native equivalent) is unavailable.
    pub gpu_renderer: Option<String>,
    pub gpu_vendor: Option<String>,
}

impl Default for ProbeBundle {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            platform: String::new(),
            screen_width: 0,
            screen_height: 0,
            device_pixel_ratio: UNKNOWN_PIXEL_RATIO,
            hardware_concurrency: 0,
            device_memory_gib: 0.0,
            touch_supported: false,
            max_touch_points: 0,
            gpu_renderer: None,
            gpu_vendor: None,
        }
    }
}

impl ProbeBundle {
    /// Derive the OS family flags from the user-agent string.
    pub fn ua_profile(&self) -> UaProfile {
        UaProfile::from_user_agent(&self.user_agent)
    }

    /// Total screen pixels, saturating instead of overflowing.
    pub fn screen_pixels(&self) -> u64 {
        u64::from(self.screen_width).saturating_mul(u64::from(self.screen_height))
    }
}

/// OS family flags derived from a lower-cased user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UaProfile {
    pub lowered: String,
    pub android: bool,
    /// iPhone, iPad or iPod.
    pub ios: bool,
    /// Android, iOS, or any UA carrying a `mobile` token.
    pub mobile: bool,
}

impl UaProfile {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let lowered = user_agent.to_lowercase();
        let android = lowered.contains("android");
        let ios = ["iphone", "ipad", "ipod"]
            .iter()
            .any(|token| lowered.contains(token));
        let mobile = android || ios || lowered.contains("mobile");
        Self {
            lowered,
            android,
            ios,
            mobile,
        }
    }
}
