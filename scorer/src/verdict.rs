//! Aggregation of group results into a verdict.

use serde::{Deserialize, Serialize};

use crate::probe::ProbeBundle;
use crate::reason::{Locale, Reason};
use crate::signals::{GroupResult, SignalGroup, evaluate_groups};

/// Scores at or above this value classify the runtime as an emulator.
pub const EMULATOR_THRESHOLD: u8 = 60;

/// Upper bound of the score.
pub const MAX_SCORE: u8 = 100;

/// Per-group breakdown kept for operator diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupScore {
    pub group: SignalGroup,
    pub points: u32,
    pub raw_points: u32,
}

/// Final classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Sum of capped group points, clamped to [`MAX_SCORE`].
    pub score: u8,
    pub is_emulator: bool,
    /// Never empty.
    pub reasons: Vec<String>,
    pub groups: Vec<GroupScore>,
}

impl Verdict {
    fn from_groups(groups: Vec<GroupResult>, locale: Locale) -> Self {
        let (total, mut reasons, breakdown) = groups.into_iter().fold(
            (0u32, Vec::new(), Vec::new()),
            |(total, mut reasons, mut breakdown), result| {
                reasons.extend(result.reasons.iter().map(|reason| reason.render(locale)));
                breakdown.push(GroupScore {
                    group: result.group,
                    points: result.points,
                    raw_points: result.raw_points,
                });
                (total.saturating_add(result.points), reasons, breakdown)
            },
        );

        if reasons.is_empty() {
            reasons.push(Reason::NoIndicators.render(locale));
        }

        let score = u8::try_from(total.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE);
        Self {
            score,
            is_emulator: score >= EMULATOR_THRESHOLD,
            reasons,
            groups: breakdown,
        }
    }
}

/// Classify a probe bundle, rendering reasons in the default locale.
pub fn classify(bundle: &ProbeBundle) -> Verdict {
    classify_with_locale(bundle, Locale::default())
}

/// Classify a probe bundle, rendering reasons in `locale`.
///
/// The score and the emulator flag never depend on the locale.
pub fn classify_with_locale(bundle: &ProbeBundle, locale: Locale) -> Verdict {
    let verdict = Verdict::from_groups(evaluate_groups(bundle), locale);
    tracing::debug!(
        score = verdict.score,
        is_emulator = verdict.is_emulator,
        reasons = verdict.reasons.len(),
        "environment classified"
    );
    verdict
}
