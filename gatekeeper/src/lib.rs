//! Startup gate in front of an application.
//!
//! [`Gatekeeper::admit`] runs collection and classification exactly once
//! per gatekeeper, before the application does anything else. A positive
//! verdict is handed to a [`BlockSurface`]; a negative one lets startup
//! proceed without showing the score or reasons to the end user.

pub mod config;
pub mod screen;
pub mod surface;
pub mod terminal;

use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;

use envguard_collector::{ProbeSource, SignalCollector};
use envguard_scorer::{Locale, Verdict};

pub use screen::{BlockMessage, BlockScreen, EventOutcome};
pub use surface::{BlockSurface, StderrBlockSurface, SurfaceError};
pub use terminal::TerminalBlockSurface;

/// Outcome of the startup check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Admission {
    /// Normal startup may continue.
    Proceed,
    /// Startup must not continue.
    Blocked,
}

#[derive(Debug)]
struct Decision {
    admission: Admission,
    verdict: Verdict,
}

pub struct Gatekeeper<S, B> {
    collector: SignalCollector<S>,
    surface: B,
    locale: Locale,
    decision: OnceLock<Decision>,
}

impl<S: ProbeSource, B: BlockSurface> Gatekeeper<S, B> {
    pub fn new(source: S, surface: B, locale: Locale) -> Self {
        Self {
            collector: SignalCollector::new(source),
            surface,
            locale,
            decision: OnceLock::new(),
        }
    }

    /// Decide whether startup may continue.
    ///
    /// The first call collects, classifies and, when blocked, invokes the
    /// surface. Later and concurrent calls wait for that first decision and
    /// return it without probing or rendering again.
    pub fn admit(&self) -> Admission {
        self.decision.get_or_init(|| self.decide()).admission
    }

    /// The verdict behind the admission, once [`Gatekeeper::admit`] has run.
    ///
    /// For operator diagnostics only.
    pub fn diagnostics(&self) -> Option<&Verdict> {
        self.decision.get().map(|decision| &decision.verdict)
    }

    fn decide(&self) -> Decision {
        let verdict = self.collector.classify(self.locale);
        tracing::debug!(
            score = verdict.score,
            reasons = ?verdict.reasons,
            "startup verdict"
        );

        if !verdict.is_emulator {
            tracing::info!("environment admitted");
            return Decision {
                admission: Admission::Proceed,
                verdict,
            };
        }

        tracing::info!("emulated environment detected, blocking startup");
        // A panicking surface must not leave the decision cell empty.
        match panic::catch_unwind(AssertUnwindSafe(|| self.surface.block(&verdict))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(error = %err, "blocking surface failed; startup stays blocked");
            }
            Err(_) => {
                tracing::error!("blocking surface panicked; startup stays blocked");
            }
        }
        Decision {
            admission: Admission::Blocked,
            verdict,
        }
    }
}
