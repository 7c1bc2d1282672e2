//! Screen geometry and pixel-ratio anomalies (cap 20).

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

/// Common emulator and device defaults, portrait orientation.
const EMULATOR_RESOLUTIONS: &[(u32, u32)] = &[
    (1080, 1920),
    (720, 1280),
    (480, 800),
    (375, 667),
    (414, 896),
];

const COMMON_PIXEL_RATIOS: &[f64] = &[1.0, 1.5, 2.0, 2.5, 2.75, 3.0, 3.5, 4.0];
const PIXEL_RATIO_TOLERANCE: f64 = 0.1;
const MIN_PLAUSIBLE_PIXEL_RATIO: f64 = 0.5;
const MAX_PLAUSIBLE_PIXEL_RATIO: f64 = 5.0;
const MAX_MOBILE_PIXELS: u64 = 10_000_000;

const RESOLUTION_POINTS: u32 = 8;
const PIXEL_RATIO_POINTS: u32 = 6;
const PIXEL_RATIO_RANGE_POINTS: u32 = 6;
const OVERSIZED_SCREEN_POINTS: u32 = 6;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let mut tally = Tally::new(SignalGroup::Screen);
    if !ua.mobile {
        return tally.finish();
    }

    let (width, height) = (bundle.screen_width, bundle.screen_height);
    if EMULATOR_RESOLUTIONS
        .iter()
        .any(|&(w, h)| (width, height) == (w, h) || (width, height) == (h, w))
    {
        tally.add(RESOLUTION_POINTS, Reason::ScreenResolution { width, height });
    }

    let ratio = bundle.device_pixel_ratio;
    if !is_common_pixel_ratio(ratio) {
        tally.add(PIXEL_RATIO_POINTS, Reason::PixelRatioUnusual { ratio });
    }
    if !(MIN_PLAUSIBLE_PIXEL_RATIO..=MAX_PLAUSIBLE_PIXEL_RATIO).contains(&ratio) {
        tally.add(
            PIXEL_RATIO_RANGE_POINTS,
            Reason::PixelRatioOutOfRange { ratio },
        );
    }

    let pixels = bundle.screen_pixels();
    if pixels > MAX_MOBILE_PIXELS {
        tally.add(OVERSIZED_SCREEN_POINTS, Reason::ScreenTooLarge { pixels });
    }

    tally.finish()
}

fn is_common_pixel_ratio(ratio: f64) -> bool {
    COMMON_PIXEL_RATIOS
        .iter()
        .any(|common| (ratio - common).abs() < PIXEL_RATIO_TOLERANCE)
}
