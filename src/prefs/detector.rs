use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::Viewport;
use crate::motion::profile::MotionProfile;

/// Viewport width below which the narrow layout applies.
pub const DEFAULT_NARROW_BREAKPOINT: f64 = 768.0;

/// Environment-derived motion preferences.
///
/// `Default` is the baseline used whenever a query cannot be answered: wide viewport, full motion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Preferences {
    /// Viewport is below the narrow breakpoint.
    pub is_narrow_viewport: bool,
    /// The user asked for reduced motion.
    pub prefers_reduced_motion: bool,
}

/// The two observed environment features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaFeature {
    /// Narrow-viewport query.
    NarrowViewport,
    /// `prefers-reduced-motion: reduce`.
    ReducedMotion,
}

/// Failure to answer a media query.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The host exposes no such query.
    #[error("media query unavailable")]
    Unavailable,
    /// The host reported an error.
    #[error("media query failed: {0}")]
    Failed(String),
}

/// A boolean environment query the host can re-evaluate on demand.
pub trait MediaQuery {
    /// Current answer.
    fn evaluate(&self) -> Result<bool, QueryError>;
}

impl<F> MediaQuery for F
where
    F: Fn() -> Result<bool, QueryError>,
{
    fn evaluate(&self) -> Result<bool, QueryError> {
        (self)()
    }
}

/// Host-writable flag; clones share state.
///
/// Stands in for a media-query list object: the host flips it, then tells the detector
/// which feature changed.
#[derive(Clone, Debug, Default)]
pub struct SharedFlag(Rc<Cell<Option<bool>>>);

impl SharedFlag {
    /// Flag with a known value.
    pub fn new(value: bool) -> Self {
        Self(Rc::new(Cell::new(Some(value))))
    }

    /// Flag whose query is unavailable.
    pub fn unavailable() -> Self {
        Self(Rc::new(Cell::new(None)))
    }

    /// Set the value seen by the next evaluation.
    pub fn set(&self, value: bool) {
        self.0.set(Some(value));
    }

    /// Make subsequent evaluations fail.
    pub fn set_unavailable(&self) {
        self.0.set(None);
    }
}

impl MediaQuery for SharedFlag {
    fn evaluate(&self) -> Result<bool, QueryError> {
        self.0.get().ok_or(QueryError::Unavailable)
    }
}

/// Where the narrow-viewport flag comes from.
pub enum NarrowSource {
    /// Derived from the viewport width seen in scroll/resize events.
    Breakpoint(f64),
    /// An explicit host query.
    Query(Box<dyn MediaQuery>),
}

impl std::fmt::Debug for NarrowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakpoint(bp) => f.debug_tuple("Breakpoint").field(bp).finish(),
            Self::Query(_) => f.write_str("Query(..)"),
        }
    }
}

/// Handle returned by [`PreferenceDetector::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(Preferences)>;

/// Sole writer of [`Preferences`]; notifies subscribers whenever either flag flips.
pub struct PreferenceDetector {
    narrow: NarrowSource,
    reduced: Box<dyn MediaQuery>,
    current: Preferences,
    generation: u64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl std::fmt::Debug for PreferenceDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceDetector")
            .field("narrow", &self.narrow)
            .field("current", &self.current)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PreferenceDetector {
    /// Build a detector and read both features immediately.
    ///
    /// A `Breakpoint` source starts wide until the first viewport is observed.
    pub fn new(narrow: NarrowSource, reduced: impl MediaQuery + 'static) -> Self {
        let mut detector = Self {
            narrow,
            reduced: Box::new(reduced),
            current: Preferences::default(),
            generation: 0,
            listeners: Vec::new(),
            next_listener: 0,
        };
        detector.current = Preferences {
            is_narrow_viewport: detector.read_narrow().unwrap_or(false),
            prefers_reduced_motion: detector.read_reduced(),
        };
        detector
    }

    /// Breakpoint-derived narrow flag plus a reduced-motion query.
    pub fn with_breakpoint(breakpoint: f64, reduced: impl MediaQuery + 'static) -> Self {
        Self::new(NarrowSource::Breakpoint(breakpoint), reduced)
    }

    /// Detector with fixed answers; used by the CLI and in tests.
    pub fn fixed(prefs: Preferences) -> Self {
        let narrow = prefs.is_narrow_viewport;
        Self::new(
            NarrowSource::Query(Box::new(SharedFlag::new(narrow))),
            SharedFlag::new(prefs.prefers_reduced_motion),
        )
    }

    /// Latest preferences.
    pub fn current(&self) -> Preferences {
        self.current
    }

    /// Profile implied by the latest preferences.
    pub fn profile(&self) -> MotionProfile {
        MotionProfile::select(self.current)
    }

    /// Incremented on every change; lets pull-based consumers detect staleness.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(Preferences) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Host notification that `feature` may have changed. Returns `true` on a flip.
    pub fn on_media_change(&mut self, feature: MediaFeature) -> bool {
        let mut next = self.current;
        match feature {
            MediaFeature::NarrowViewport => {
                if let Some(v) = self.read_narrow() {
                    next.is_narrow_viewport = v;
                }
            }
            MediaFeature::ReducedMotion => next.prefers_reduced_motion = self.read_reduced(),
        }
        self.commit(next)
    }

    /// Re-read both features.
    pub fn refresh(&mut self) -> bool {
        let mut next = self.current;
        if let Some(v) = self.read_narrow() {
            next.is_narrow_viewport = v;
        }
        next.prefers_reduced_motion = self.read_reduced();
        self.commit(next)
    }

    /// Feed a resize; only affects breakpoint-derived narrow detection.
    pub fn observe_viewport(&mut self, viewport: Viewport) -> bool {
        let NarrowSource::Breakpoint(bp) = self.narrow else {
            return false;
        };
        let next = Preferences {
            is_narrow_viewport: viewport.width < bp,
            ..self.current
        };
        self.commit(next)
    }

    fn read_narrow(&self) -> Option<bool> {
        match &self.narrow {
            NarrowSource::Breakpoint(_) => None,
            NarrowSource::Query(q) => Some(q.evaluate().unwrap_or_else(|err| {
                tracing::warn!(%err, "narrow-viewport query failed; assuming wide viewport");
                false
            })),
        }
    }

    fn read_reduced(&self) -> bool {
        self.reduced.evaluate().unwrap_or_else(|err| {
            tracing::warn!(%err, "reduced-motion query failed; assuming full motion");
            false
        })
    }

    fn commit(&mut self, next: Preferences) -> bool {
        if next == self.current {
            return false;
        }
        tracing::debug!(?next, previous = ?self.current, "preferences changed");
        self.current = next;
        self.generation += 1;
        for (_, listener) in &mut self.listeners {
            listener(next);
        }
        true
    }
}

impl Default for PreferenceDetector {
    fn default() -> Self {
        Self::with_breakpoint(DEFAULT_NARROW_BREAKPOINT, SharedFlag::unavailable())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prefs/detector.rs"]
mod tests;
