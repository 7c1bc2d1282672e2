//! The six signal groups.
//!
//! Each group is a pure `fn(&ProbeBundle) -> GroupResult`. Groups never
//! read another group's output, so each one can be capped and tested in
//! isolation. [`evaluate_groups`] runs them in table order.

pub mod gpu;
pub mod hardware;
pub mod platform;
pub mod screen;
pub mod touch;
pub mod user_agent;

use serde::{Deserialize, Serialize};

use crate::probe::ProbeBundle;
use crate::reason::Reason;

/// Signal groups in the order their reasons appear in a verdict.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SignalGroup {
    UserAgent,
    Platform,
    Screen,
    Hardware,
    Touch,
    Gpu,
}

impl SignalGroup {
    /// Ceiling on the group's contribution to the score. Caps sum to 100.
    pub const fn cap(self) -> u32 {
        match self {
            Self::UserAgent => 25,
            Self::Platform => 15,
            Self::Screen => 20,
            Self::Hardware => 15,
            Self::Touch => 10,
            Self::Gpu => 15,
        }
    }
}

/// Outcome of one signal group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupResult {
    pub group: SignalGroup,
    /// Contribution after applying the group cap.
    pub points: u32,
    /// Sum of every triggered condition before capping.
    pub raw_points: u32,
    /// Triggered conditions in evaluation order.
    pub reasons: Vec<Reason>,
}

type GroupEvaluator = fn(&ProbeBundle) -> GroupResult;

const SIGNAL_GROUPS: [GroupEvaluator; 6] = [
    user_agent::evaluate,
    platform::evaluate,
    screen::evaluate,
    hardware::evaluate,
    touch::evaluate,
    gpu::evaluate,
];

/// Evaluate every signal group against `bundle`, in table order.
pub fn evaluate_groups(bundle: &ProbeBundle) -> Vec<GroupResult> {
    SIGNAL_GROUPS
        .iter()
        .map(|evaluate| {
            let result = evaluate(bundle);
            tracing::debug!(
                group = %result.group,
                points = result.points,
                raw_points = result.raw_points,
                "signal group evaluated"
            );
            result
        })
        .collect()
}

/// Running total for a single group.
pub(crate) struct Tally {
    group: SignalGroup,
    raw_points: u32,
    reasons: Vec<Reason>,
}

impl Tally {
    pub(crate) fn new(group: SignalGroup) -> Self {
        Self {
            group,
            raw_points: 0,
            reasons: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, points: u32, reason: Reason) {
        self.raw_points = self.raw_points.saturating_add(points);
        self.reasons.push(reason);
    }

    pub(crate) fn finish(self) -> GroupResult {
        GroupResult {
            group: self.group,
            points: self.raw_points.min(self.group.cap()),
            raw_points: self.raw_points,
            reasons: self.reasons,
        }
    }
}
