//! Native host probes.
//!
//! Reads Linux/Android kernel interfaces relative to a filesystem root so
//! tests can point the source at a fabricated tree. Anything missing is
//! reported as [`ProbeError::Unavailable`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProbeError;
use crate::source::{GpuInfo, Probe, ProbeSource, TouchCapability};

const ANDROID_BUILD_PROP: &str = "system/build.prop";
const FRAMEBUFFER_SIZE: &str = "sys/class/graphics/fb0/virtual_size";
const DRM_CLASS: &str = "sys/class/drm";
const MEMINFO: &str = "proc/meminfo";
const INPUT_DEVICES: &str = "proc/bus/input/devices";

/// Android's baseline density (mdpi).
const BASELINE_DENSITY: f64 = 160.0;
const KIB_PER_GIB: f64 = 1024.0 * 1024.0;
const MIN_REPORTED_MEMORY_GIB: f64 = 0.25;
const MAX_REPORTED_MEMORY_GIB: f64 = 8.0;

/// PCI vendor ids mapped to the names WebGL would report.
const PCI_VENDORS: &[(&str, &str)] = &[
    ("0x15ad", "VMware, Inc."),
    ("0x80ee", "VirtualBox (InnoTek)"),
    ("0x1234", "QEMU/Bochs"),
    ("0x1af4", "Red Hat (QEMU virtio)"),
    ("0x1b36", "Red Hat (QEMU)"),
    ("0x1414", "Microsoft Hyper-V virtual"),
    ("0x1ab8", "Parallels"),
    ("0x8086", "Intel"),
    ("0x10de", "NVIDIA Corporation"),
    ("0x1002", "AMD"),
    ("0x5143", "Qualcomm"),
    ("0x106b", "Apple"),
];

/// Probes the machine the process runs on.
#[derive(Debug, Clone)]
pub struct HostProbeSource {
    root: PathBuf,
}

impl Default for HostProbeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbeSource {
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Resolve every kernel interface relative to `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, probe: Probe, relative: impl AsRef<Path>) -> Result<String, ProbeError> {
        let path = self.root.join(relative);
        fs::read_to_string(&path)
            .map_err(|err| ProbeError::unavailable(probe, format!("{}: {err}", path.display())))
    }

    fn build_props(&self, probe: Probe) -> Result<HashMap<String, String>, ProbeError> {
        self.read(probe, ANDROID_BUILD_PROP)
            .map(|contents| parse_build_props(&contents))
    }

    fn is_android(&self) -> bool {
        self.root.join(ANDROID_BUILD_PROP).is_file()
    }

    fn screen_from_framebuffer(&self) -> Result<(u32, u32), ProbeError> {
        let contents = self.read(Probe::Screen, FRAMEBUFFER_SIZE)?;
        parse_dimensions(contents.trim(), ',').ok_or_else(|| {
            ProbeError::unavailable(Probe::Screen, format!("malformed fb0 size {contents:?}"))
        })
    }

    fn screen_from_drm(&self) -> Result<(u32, u32), ProbeError> {
        for connector in self.drm_entries(Probe::Screen)? {
            let status = fs::read_to_string(connector.join("status")).unwrap_or_default();
            if status.trim() != "connected" {
                continue;
            }
            let modes = fs::read_to_string(connector.join("modes")).unwrap_or_default();
            if let Some(size) = modes
                .lines()
                .next()
                .and_then(|mode| parse_dimensions(mode.trim(), 'x'))
            {
                return Ok(size);
            }
        }
        Err(ProbeError::unavailable(
            Probe::Screen,
            "no connected DRM connector",
        ))
    }

    fn drm_entries(&self, probe: Probe) -> Result<Vec<PathBuf>, ProbeError> {
        let dir = self.root.join(DRM_CLASS);
        let entries = fs::read_dir(&dir)
            .map_err(|err| ProbeError::unavailable(probe, format!("{}: {err}", dir.display())))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl ProbeSource for HostProbeSource {
    fn user_agent(&self) -> Result<String, ProbeError> {
        if self.is_android() {
            let props = self.build_props(Probe::UserAgent)?;
            let release = props
                .get("ro.build.version.release")
                .map_or("unknown", String::as_str);
            let model = props.get("ro.product.model").map_or("unknown", String::as_str);
            let abi = props.get("ro.product.cpu.abi").map_or("unknown", String::as_str);
            return Ok(format!("Linux; Android {release}; {model}; {abi}"));
        }

        let info = os_info::get();
        if info.os_type() == os_info::Type::Unknown {
            return Err(ProbeError::unavailable(
                Probe::UserAgent,
                "operating system not recognised",
            ));
        }
        Ok(format!("{} {}", info.os_type(), info.version()))
    }

    fn platform(&self) -> Result<String, ProbeError> {
        let os = match std::env::consts::OS {
            "linux" | "android" => "Linux",
            "macos" => "Mac",
            "windows" => "Win",
            other => other,
        };
        Ok(format!("{os} {}", std::env::consts::ARCH))
    }

    fn screen_size(&self) -> Result<(u32, u32), ProbeError> {
        self.screen_from_framebuffer()
            .or_else(|_| self.screen_from_drm())
    }

    fn device_pixel_ratio(&self) -> Result<f64, ProbeError> {
        let props = self.build_props(Probe::PixelRatio)?;
        props
            .get("ro.sf.lcd_density")
            .and_then(|density| density.trim().parse::<f64>().ok())
            .filter(|density| *density > 0.0)
            .map(|density| density / BASELINE_DENSITY)
            .ok_or_else(|| ProbeError::unavailable(Probe::PixelRatio, "no ro.sf.lcd_density"))
    }

    fn hardware_concurrency(&self) -> Result<u32, ProbeError> {
        std::thread::available_parallelism()
            .map(|count| u32::try_from(count.get()).unwrap_or(u32::MAX))
            .map_err(|err| ProbeError::unavailable(Probe::HardwareConcurrency, err.to_string()))
    }

    fn device_memory_gib(&self) -> Result<f64, ProbeError> {
        let total_kib = match self.read(Probe::DeviceMemory, MEMINFO) {
            Ok(meminfo) => parse_mem_total_kib(&meminfo).ok_or_else(|| {
                ProbeError::unavailable(Probe::DeviceMemory, "MemTotal missing from meminfo")
            })?,
            Err(err) => physical_memory_kib().ok_or(err)?,
        };
        Ok(approximate_device_memory(total_kib as f64 / KIB_PER_GIB))
    }

    fn touch(&self) -> Result<TouchCapability, ProbeError> {
        let devices = self.read(Probe::Touch, INPUT_DEVICES)?;
        let supported = devices
            .lines()
            .filter_map(|line| line.strip_prefix("N: Name="))
            .any(|name| name.to_lowercase().contains("touch"));
        // The kernel does not expose slot counts here.
        Ok(TouchCapability {
            supported,
            max_points: 0,
        })
    }

    fn gpu(&self) -> Result<GpuInfo, ProbeError> {
        for card in self.drm_entries(Probe::Gpu)? {
            let is_card = card
                .file_name()
                .and_then(std::ffi::OsStr::to_str)
                .is_some_and(|name| name.starts_with("card") && !name.contains('-'));
            if !is_card {
                continue;
            }
            let device = card.join("device");
            let vendor = fs::read_to_string(device.join("vendor"))
                .ok()
                .map(|id| pci_vendor_name(id.trim()));
            let driver = fs::read_to_string(device.join("uevent"))
                .ok()
                .and_then(|uevent| {
                    uevent
                        .lines()
                        .find_map(|line| line.strip_prefix("DRIVER="))
                        .map(str::to_string)
                });
            let renderer = match (&vendor, driver) {
                (Some(vendor), Some(driver)) => Some(format!("{vendor} ({driver})")),
                (None, Some(driver)) => Some(driver),
                (Some(vendor), None) => Some(vendor.clone()),
                (None, None) => None,
            };
            if renderer.is_some() {
                return Ok(GpuInfo { renderer, vendor });
            }
        }
        Err(ProbeError::unavailable(Probe::Gpu, "no DRM card found"))
    }
}

fn parse_build_props(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn parse_dimensions(value: &str, separator: char) -> Option<(u32, u32)> {
    let (width, height) = value.split_once(separator)?;
    // DRM modes may carry a suffix such as "1920x1080i".
    let height: String = height.chars().take_while(char::is_ascii_digit).collect();
    Some((width.trim().parse().ok()?, height.parse().ok()?))
}

fn parse_mem_total_kib(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemTotal:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kib| kib.parse().ok())
}

#[cfg(unix)]
fn physical_memory_kib() -> Option<u64> {
    // SAFETY: sysconf has no preconditions.
    let pages = unsafe { libc::sysconf(libc::_SC_PHYS_PAGES) };
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if pages <= 0 || page_size <= 0 {
        return None;
    }
    let bytes = u64::try_from(pages)
        .ok()?
        .checked_mul(u64::try_from(page_size).ok()?)?;
    Some(bytes / 1024)
}

#[cfg(not(unix))]
fn physical_memory_kib() -> Option<u64> {
    None
}

/// Round to the nearest power of two GiB within 0.25..=8, like the Device
/// Memory API.
fn approximate_device_memory(gib: f64) -> f64 {
    if !gib.is_finite() || gib <= 0.0 {
        return 0.0;
    }
    2f64.powf(gib.log2().round()).clamp(MIN_REPORTED_MEMORY_GIB, MAX_REPORTED_MEMORY_GIB)
}

fn pci_vendor_name(id: &str) -> String {
    let id = id.to_ascii_lowercase();
    PCI_VENDORS
        .iter()
        .find(|(known, _)| *known == id)
        .map_or_else(|| format!("PCI vendor {id}"), |(_, name)| (*name).to_string())
}
