//! Touch capability consistency (cap 10).

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

const MIN_MOBILE_TOUCH_POINTS: u32 = 5;

const TOUCH_MISSING_POINTS: u32 = 10;
const TOUCH_POINTS_LOW_POINTS: u32 = 3;
const TOUCH_ON_DESKTOP_POINTS: u32 = 2;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let mut tally = Tally::new(SignalGroup::Touch);
    let points = bundle.max_touch_points;

    if ua.mobile {
        // Any reported touch point counts as some touch capability.
        if !bundle.touch_supported && points == 0 {
            tally.add(TOUCH_MISSING_POINTS, Reason::TouchMissing);
        } else if (1..MIN_MOBILE_TOUCH_POINTS).contains(&points) {
            tally.add(TOUCH_POINTS_LOW_POINTS, Reason::TouchPointsLow { points });
        }
    } else if bundle.touch_supported && points > 0 {
        tally.add(TOUCH_ON_DESKTOP_POINTS, Reason::TouchOnDesktop { points });
    }

    tally.finish()
}
