//! The probe-reading seam.

use crate::error::ProbeError;

/// Every probe the collector reads, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Probe {
    UserAgent,
    Platform,
    Screen,
    PixelRatio,
    HardwareConcurrency,
    DeviceMemory,
    Touch,
    Gpu,
}

/// Touch capability as reported by the runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchCapability {
    pub supported: bool,
    /// `0` when unknown.
    pub max_points: u32,
}

/// GPU identification strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GpuInfo {
    pub renderer: Option<String>,
    pub vendor: Option<String>,
}

/// Reads raw probe values from some runtime.
///
/// Each method is independent: a failure in one must not prevent the
/// others from being read.
pub trait ProbeSource {
    fn user_agent(&self) -> Result<String, ProbeError>;

    fn platform(&self) -> Result<String, ProbeError>;

    /// `(width, height)` in CSS-equivalent pixels.
    fn screen_size(&self) -> Result<(u32, u32), ProbeError>;

    fn device_pixel_ratio(&self) -> Result<f64, ProbeError>;

    fn hardware_concurrency(&self) -> Result<u32, ProbeError>;

    fn device_memory_gib(&self) -> Result<f64, ProbeError>;

    fn touch(&self) -> Result<TouchCapability, ProbeError>;

    fn gpu(&self) -> Result<GpuInfo, ProbeError>;
}

impl<T: ProbeSource + ?Sized> ProbeSource for &T {
    fn user_agent(&self) -> Result<String, ProbeError> {
        (**self).user_agent()
    }

    fn platform(&self) -> Result<String, ProbeError> {
        (**self).platform()
    }

    fn screen_size(&self) -> Result<(u32, u32), ProbeError> {
        (**self).screen_size()
    }

    fn device_pixel_ratio(&self) -> Result<f64, ProbeError> {
        (**self).device_pixel_ratio()
    }

    fn hardware_concurrency(&self) -> Result<u32, ProbeError> {
        (**self).hardware_concurrency()
    }

    fn device_memory_gib(&self) -> Result<f64, ProbeError> {
        (**self).device_memory_gib()
    }

    fn touch(&self) -> Result<TouchCapability, ProbeError> {
        (**self).touch()
    }

    fn gpu(&self) -> Result<GpuInfo, ProbeError> {
        (**self).gpu()
    }
}

impl<T: ProbeSource + ?Sized> ProbeSource for Box<T> {
    fn user_agent(&self) -> Result<String, ProbeError> {
        (**self).user_agent()
    }

    fn platform(&self) -> Result<String, ProbeError> {
        (**self).platform()
    }

    fn screen_size(&self) -> Result<(u32, u32), ProbeError> {
        (**self).screen_size()
    }

    fn device_pixel_ratio(&self) -> Result<f64, ProbeError> {
        (**self).device_pixel_ratio()
    }

    fn hardware_concurrency(&self) -> Result<u32, ProbeError> {
        (**self).hardware_concurrency()
    }

    fn device_memory_gib(&self) -> Result<f64, ProbeError> {
        (**self).device_memory_gib()
    }

    fn touch(&self) -> Result<TouchCapability, ProbeError> {
        (**self).touch()
    }

    fn gpu(&self) -> Result<GpuInfo, ProbeError> {
        (**self).gpu()
    }
}
