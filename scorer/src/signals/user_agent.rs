//! User-agent keyword scan (cap 25).

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

const UA_KEYWORDS: &[&str] = &[
    "sdk",
    "emulator",
    "generic",
    "x86",
    "vbox",
    "genymotion",
    "bluestacks",
    "nox",
    "ldplayer",
    "mumu",
    "memu",
    "android sdk",
    "simulator",
];

const STRONG_KEYWORDS: &[&str] = &["emulator", "sdk", "simulator"];
const MOBILE_OS_TOKENS: &[&str] = &["android", "iphone", "ipad"];

const STRONG_KEYWORD_POINTS: u32 = 8;
const X86_ANDROID_POINTS: u32 = 10;
const KEYWORD_POINTS: u32 = 5;
const X86_MOBILE_POINTS: u32 = 7;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let mut tally = Tally::new(SignalGroup::UserAgent);

    for &keyword in UA_KEYWORDS {
        if !ua.lowered.contains(keyword) {
            continue;
        }
        let points = if keyword == "x86" && ua.android {
            X86_ANDROID_POINTS
        } else if STRONG_KEYWORDS.contains(&keyword) {
            STRONG_KEYWORD_POINTS
        } else {
            KEYWORD_POINTS
        };
        tally.add(points, Reason::UaKeyword { keyword });
    }

    // Stacks on top of the keyword-table `x86` hit.
    if ua.lowered.contains("x86")
        && MOBILE_OS_TOKENS
            .iter()
            .any(|token| ua.lowered.contains(token))
    {
        tally.add(X86_MOBILE_POINTS, Reason::UaX86OnMobile);
    }

    tally.finish()
}
