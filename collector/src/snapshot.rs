//! Probes reported by a remote client.
//!
//! A browser (or any other runtime) posts its raw probe values as JSON.
//! Every field is optional; a missing field behaves exactly like a probe
//! that failed locally.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, SnapshotError};
use crate::source::{GpuInfo, Probe, ProbeSource, TouchCapability};

/// Raw probe values as a client reported them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeSnapshot {
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub device_pixel_ratio: Option<f64>,
    pub hardware_concurrency: Option<u32>,
    /// GiB, as `navigator.deviceMemory` reports it.
    #[serde(rename = "deviceMemory")]
    pub device_memory_gib: Option<f64>,
    pub touch_supported: Option<bool>,
    pub max_touch_points: Option<u32>,
    pub gpu_renderer: Option<String>,
    pub gpu_vendor: Option<String>,
}

/// Replays a [`ProbeSnapshot`] through the [`ProbeSource`] seam.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProbeSource {
    snapshot: ProbeSnapshot,
}

impl SnapshotProbeSource {
    pub fn new(snapshot: ProbeSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot =
            serde_json::from_str(json).map_err(|source| SnapshotError::Parse { source })?;
        Ok(Self::new(snapshot))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded probe snapshot");
        Self::from_json(&json)
    }
}

fn reported<T: Clone>(value: &Option<T>, probe: Probe) -> Result<T, ProbeError> {
    value
        .clone()
        .ok_or_else(|| ProbeError::unavailable(probe, "not reported by client"))
}

impl ProbeSource for SnapshotProbeSource {
    fn user_agent(&self) -> Result<String, ProbeError> {
        reported(&self.snapshot.user_agent, Probe::UserAgent)
    }

    fn platform(&self) -> Result<String, ProbeError> {
        reported(&self.snapshot.platform, Probe::Platform)
    }

    fn screen_size(&self) -> Result<(u32, u32), ProbeError> {
        match (self.snapshot.screen_width, self.snapshot.screen_height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ProbeError::unavailable(
                Probe::Screen,
                "screen size needs both dimensions",
            )),
        }
    }

    fn device_pixel_ratio(&self) -> Result<f64, ProbeError> {
        reported(&self.snapshot.device_pixel_ratio, Probe::PixelRatio)
    }

    fn hardware_concurrency(&self) -> Result<u32, ProbeError> {
        reported(&self.snapshot.hardware_concurrency, Probe::HardwareConcurrency)
    }

    fn device_memory_gib(&self) -> Result<f64, ProbeError> {
        reported(&self.snapshot.device_memory_gib, Probe::DeviceMemory)
    }

    fn touch(&self) -> Result<TouchCapability, ProbeError> {
        let max_points = self.snapshot.max_touch_points;
        let supported = self
            .snapshot
            .touch_supported
            .or_else(|| max_points.map(|points| points > 0));
        match supported {
            Some(supported) => Ok(TouchCapability {
                supported,
                max_points: max_points.unwrap_or_default(),
            }),
            None => Err(ProbeError::unavailable(Probe::Touch, "not reported by client")),
        }
    }

    fn gpu(&self) -> Result<GpuInfo, ProbeError> {
        let renderer = self.snapshot.gpu_renderer.clone();
        let vendor = self.snapshot.gpu_vendor.clone();
        if renderer.is_none() && vendor.is_none() {
            return Err(ProbeError::unavailable(Probe::Gpu, "no WebGL debug info"));
        }
        Ok(GpuInfo { renderer, vendor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_are_unavailable() {
        let source = SnapshotProbeSource::from_json("{}").expect("empty object parses");
        assert!(source.user_agent().is_err());
        assert!(source.screen_size().is_err());
        assert!(source.touch().is_err());
        assert!(source.gpu().is_err());
    }

    #[test]
    fn half_a_screen_is_unavailable() {
        let source =
            SnapshotProbeSource::from_json(r#"{"screenWidth":1080}"#).expect("snapshot parses");
        assert!(source.screen_size().is_err());
    }

    #[test]
    fn touch_support_is_inferred_from_points() {
        let source =
            SnapshotProbeSource::from_json(r#"{"maxTouchPoints":5}"#).expect("snapshot parses");
        assert_eq!(
            source.touch().expect("touch inferred"),
            TouchCapability {
                supported: true,
                max_points: 5,
            }
        );
    }

    #[test]
    fn vendor_alone_is_enough_for_gpu() {
        let source =
            SnapshotProbeSource::from_json(r#"{"gpuVendor":"Mesa"}"#).expect("snapshot parses");
        assert_eq!(
            source.gpu().expect("gpu"),
            GpuInfo {
                renderer: None,
                vendor: Some("Mesa".to_string()),
            }
        );
    }

    #[test]
    fn device_memory_uses_the_browser_key() {
        let source =
            SnapshotProbeSource::from_json(r#"{"deviceMemory":8}"#).expect("snapshot parses");
        assert_eq!(source.device_memory_gib().expect("memory"), 8.0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SnapshotProbeSource::from_json("{not json").expect_err("must fail");
        assert!(matches!(err, SnapshotError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SnapshotProbeSource::from_path(dir.path().join("absent.json"))
            .expect_err("must fail");
        assert!(matches!(err, SnapshotError::Read { .. }));
    }
}
