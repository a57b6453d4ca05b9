//! Folio-motion derives every scroll-driven visual parameter of a single-page portfolio.
//!
//! The host feeds scroll/resize notifications and media-preference changes; the crate
//! answers with per-frame values:
//!
//! - Load and validate a [`PageDef`]
//! - Mount it into a [`PageSession`]
//! - Call [`PageSession::scroll`] per event and pull a [`FrameState`]
//!
//! Rendering, styling and content are the host's business.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Curves, eases, springs and visual parameters.
pub mod animation;
/// Motion profiles, timed transitions, loops and particle fields.
pub mod motion;
/// Active-section navigation.
pub mod nav;
/// Serializable page model.
pub mod page;
/// Viewport and motion preference detection.
pub mod prefs;
/// One-shot reveal triggers.
pub mod reveal;
/// Section scroll progress.
pub mod scroll;
/// Page-level orchestration.
pub mod session;
/// Light/dark theme state.
pub mod theme;

pub use crate::foundation::core::{
    Point, Rect, ScrollState, SectionBox, Size, Viewport, visible_fraction,
};
pub use crate::foundation::error::{MotionError, MotionResult};

pub use crate::animation::anim::{ControlPoint, Curve, Extrapolation, Lerp, interpolate};
pub use crate::animation::ease::Ease;
pub use crate::animation::params::{AmplitudeScale, Attribute, AttributeCurves, VisualParams};
pub use crate::animation::spring::{Spring, SpringParams};
pub use crate::motion::profile::{MotionProfile, MotionProfiles, MotionTuning};
pub use crate::motion::particles::{Particle, ParticleField};
pub use crate::motion::timing::{Loop, Stagger, Transition};
pub use crate::nav::active::{ActiveSectionTracker, NavEntry, NavItemState};
pub use crate::page::model::{LayerDef, LoopDef, PageDef, RevealDef, SectionDef};
pub use crate::prefs::detector::{
    MediaFeature, MediaQuery, NarrowSource, PreferenceDetector, Preferences, QueryError,
    SharedFlag,
};
pub use crate::reveal::trigger::{RevealRegistry, RevealState, RevealTrigger, RevealVariant};
pub use crate::scroll::progress::{
    ProgressSample, ProgressTracker, ScrollEdge, ScrollRange, page_progress,
};
pub use crate::session::page_session::{
    FrameState, LayerFrame, LoopFrame, PageSession, ParticleFrame, RevealFrame,
};
pub use crate::theme::{Theme, ThemeState};
