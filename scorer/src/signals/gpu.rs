//! GPU / WebGL fingerprint (cap 15).
//!
//! Missing renderer and vendor strings are inconclusive, not suspicious:
//! the group contributes nothing when both are absent. Short renderer
//! names are only suspicious on mobile user agents; desktop drivers such
//! as `Apple M2` legitimately report terse names.

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

const VIRTUAL_GPU_KEYWORDS: &[&str] = &[
    "virtualbox",
    "vmware",
    "qemu",
    "bochs",
    "parallels",
    "virtual",
    "llvmpipe",
    "mesa",
];

const SOFTWARE_RENDERER_MARKERS: &[&str] = &["generic", "software"];
const MIN_RENDERER_CHARS: usize = 10;

const KEYWORD_POINTS: u32 = 8;
const SOFTWARE_RENDERER_POINTS: u32 = 5;
const MASKED_RENDERER_POINTS: u32 = 3;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let mut tally = Tally::new(SignalGroup::Gpu);
    let renderer = bundle.gpu_renderer.as_deref();
    let vendor = bundle.gpu_vendor.as_deref();
    if renderer.is_none() && vendor.is_none() {
        return tally.finish();
    }

    let fingerprint = [renderer, vendor]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    for &keyword in VIRTUAL_GPU_KEYWORDS {
        if fingerprint.contains(keyword) {
            tally.add(KEYWORD_POINTS, Reason::GpuKeyword { keyword });
        }
    }

    if let Some(renderer) = renderer {
        let renderer = renderer.trim();
        let lowered = renderer.to_lowercase();
        if SOFTWARE_RENDERER_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            tally.add(SOFTWARE_RENDERER_POINTS, Reason::GpuSoftwareRenderer);
        }
        let masked = renderer.chars().count() < MIN_RENDERER_CHARS || lowered == "unknown";
        if ua.mobile && masked {
            tally.add(
                MASKED_RENDERER_POINTS,
                Reason::GpuRendererMasked {
                    renderer: renderer.to_string(),
                },
            );
        }
    }

    tally.finish()
}
