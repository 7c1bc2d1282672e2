//! Platform / user-agent mismatch (cap 15).

use super::{GroupResult, SignalGroup, Tally};
use crate::probe::ProbeBundle;
use crate::reason::Reason;

const DESKTOP_ON_ANDROID_POINTS: u32 = 10;
const X86_ON_ANDROID_POINTS: u32 = 5;
const MISMATCH_ON_IOS_POINTS: u32 = 10;

pub fn evaluate(bundle: &ProbeBundle) -> GroupResult {
    let ua = bundle.ua_profile();
    let platform = bundle.platform.to_lowercase();
    let mut tally = Tally::new(SignalGroup::Platform);

    if ua.android {
        if platform.contains("win") || platform.contains("mac") {
            tally.add(
                DESKTOP_ON_ANDROID_POINTS,
                Reason::PlatformDesktopOnAndroid {
                    platform: bundle.platform.clone(),
                },
            );
        }
        if platform.contains("x86") || platform.contains("x64") {
            tally.add(
                X86_ON_ANDROID_POINTS,
                Reason::PlatformX86OnAndroid {
                    platform: bundle.platform.clone(),
                },
            );
        }
    } else if ua.ios && (platform.contains("linux") || platform.contains("win")) {
        tally.add(
            MISMATCH_ON_IOS_POINTS,
            Reason::PlatformMismatchOnIos {
                platform: bundle.platform.clone(),
            },
        );
    }

    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";

    fn bundle(user_agent: &str, platform: &str) -> ProbeBundle {
        ProbeBundle {
            user_agent: user_agent.to_string(),
            platform: platform.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn android_on_arm_linux_is_consistent() {
        assert_eq!(evaluate(&bundle(ANDROID_UA, "Linux armv8l")).points, 0);
    }

    #[test]
    fn android_on_x86_linux_scores_five() {
        let result = evaluate(&bundle(ANDROID_UA, "Linux x86_64"));
        assert_eq!(result.points, 5);
        assert_eq!(
            result.reasons,
            vec![Reason::PlatformX86OnAndroid {
                platform: "Linux x86_64".to_string()
            }]
        );
    }

    #[test]
    fn android_on_windows_x64_hits_both_conditions() {
        let result = evaluate(&bundle(ANDROID_UA, "Win32 x64"));
        assert_eq!(result.points, 15);
        assert_eq!(result.reasons.len(), 2);
    }

    #[test]
    fn android_on_mac_scores_ten() {
        assert_eq!(evaluate(&bundle(ANDROID_UA, "MacIntel")).points, 10);
    }

    #[test]
    fn iphone_on_macintel_is_consistent() {
        assert_eq!(evaluate(&bundle(IPHONE_UA, "MacIntel")).points, 0);
    }

    #[test]
    fn iphone_on_linux_scores_ten() {
        let result = evaluate(&bundle(IPHONE_UA, "Linux x86_64"));
        assert_eq!(result.points, 10);
    }

    #[test]
    fn desktop_ua_is_never_penalised() {
        let desktop = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0";
        assert_eq!(evaluate(&bundle(desktop, "Win32")).points, 0);
        assert_eq!(evaluate(&bundle(desktop, "Linux x86_64")).points, 0);
    }
}
