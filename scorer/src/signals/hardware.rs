//! CPU and memory hints (cap 15).

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

const COMMON_MEMORY_SIZES_GIB: &[f64] = &[2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 16.0];
const MEMORY_TOLERANCE_GIB: f64 = 0.5;
const UNUSUAL_MEMORY_CEILING_GIB: f64 = 32.0;
const EXCESSIVE_MEMORY_GIB: f64 = 16.0;
const MANY_CORES: u32 = 16;

const LOW_CORES_POINTS: u32 = 4;
const HIGH_CORES_POINTS: u32 = 5;
const UNUSUAL_MEMORY_POINTS: u32 = 4;
const EXCESSIVE_MEMORY_POINTS: u32 = 6;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let mut tally = Tally::new(SignalGroup::Hardware);

    if ua.mobile {
        match bundle.hardware_concurrency {
            cores @ (1 | 2) => tally.add(LOW_CORES_POINTS, Reason::CpuCoresLow { cores }),
            cores if cores >= MANY_CORES => {
                tally.add(HIGH_CORES_POINTS, Reason::CpuCoresHigh { cores })
            }
            _ => {}
        }
    }

    // 0 means the runtime did not report memory.
    let gib = bundle.device_memory_gib;
    if gib > 0.0 {
        let common = COMMON_MEMORY_SIZES_GIB
            .iter()
            .any(|size| (gib - size).abs() < MEMORY_TOLERANCE_GIB);
        if !common && gib < UNUSUAL_MEMORY_CEILING_GIB {
            tally.add(UNUSUAL_MEMORY_POINTS, Reason::MemoryUnusual { gib });
        }
        if gib > EXCESSIVE_MEMORY_GIB {
            tally.add(EXCESSIVE_MEMORY_POINTS, Reason::MemoryExcessive { gib });
        }
    }

    tally.finish()
}
