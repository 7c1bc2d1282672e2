//! Environment-integrity scoring.
//!
//! Decides, from a snapshot of runtime probes, whether the runtime looks
//! like a virtualized or emulated client rather than a physical device.
//!
//! ```text
//! ProbeBundle ──► six signal groups (each capped) ──► fold ──► Verdict
//! ```
//!
//! Scoring is pure and deterministic: no I/O, no hidden state, no
//! randomness. Collecting probes lives in `envguard-collector`, acting on
//! the verdict lives in `envguard-gatekeeper`.
//!
//! ```rust
//! use envguard_scorer::{ProbeBundle, classify};
//!
//! let bundle = ProbeBundle {
//!     user_agent: "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".into(),
//!     platform: "Linux x86_64".into(),
//!     screen_width: 2560,
//!     screen_height: 1440,
//!     ..Default::default()
//! };
//! let verdict = classify(&bundle);
//! assert!(!verdict.is_emulator);
//! ```

pub mod probe;
pub mod reason;
pub mod signals;
pub mod verdict;

pub use probe::{ProbeBundle, UaProfile};
pub use reason::{Locale, Reason};
pub use signals::{GroupResult, SignalGroup, evaluate_groups};
pub use verdict::{
    EMULATOR_THRESHOLD, GroupScore, MAX_SCORE, Verdict, classify, classify_with_locale,
};
