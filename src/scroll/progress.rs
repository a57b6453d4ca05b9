use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{ScrollState, SectionBox, Viewport};
use crate::foundation::error::{MotionError, MotionResult};

/// Meeting point of an element edge and a viewport edge.
///
/// Both fields are fractions: `0` is the top (start), `1` the bottom (end). Parses from and
/// serializes to the `"<target> <viewport>"` form, e.g. `"start end"` or `"0.5 1"`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollEdge {
    /// Fraction along the tracked section's height.
    pub target: f64,
    /// Fraction along the viewport's height.
    pub viewport: f64,
}

impl ScrollEdge {
    /// Build an edge from raw fractions.
    pub const fn new(target: f64, viewport: f64) -> Self {
        Self { target, viewport }
    }

    /// Scroll offset at which this edge is reached for `section`.
    pub fn scroll_offset(self, section: SectionBox, viewport: Viewport) -> f64 {
        section.top + self.target * section.height - self.viewport * viewport.height
    }
}

fn parse_fraction(token: &str) -> MotionResult<f64> {
    match token {
        "start" => Ok(0.0),
        "center" => Ok(0.5),
        "end" => Ok(1.0),
        other => other
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| MotionError::validation(format!("invalid scroll edge token '{other}'"))),
    }
}

fn fraction_name(v: f64) -> String {
    if v == 0.0 {
        "start".to_owned()
    } else if v == 0.5 {
        "center".to_owned()
    } else if v == 1.0 {
        "end".to_owned()
    } else {
        v.to_string()
    }
}

impl FromStr for ScrollEdge {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(t), Some(v), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MotionError::validation(format!(
                "scroll edge '{s}' must have exactly two tokens"
            )));
        };
        Ok(Self::new(parse_fraction(t)?, parse_fraction(v)?))
    }
}

impl TryFrom<String> for ScrollEdge {
    type Error = MotionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for ScrollEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            fraction_name(self.target),
            fraction_name(self.viewport)
        )
    }
}

impl From<ScrollEdge> for String {
    fn from(edge: ScrollEdge) -> Self {
        edge.to_string()
    }
}

/// Scroll interval over which a section's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[ScrollEdge; 2]", into = "[ScrollEdge; 2]")]
pub struct ScrollRange {
    /// Edge at which progress is 0.
    pub start: ScrollEdge,
    /// Edge at which progress is 1.
    pub end: ScrollEdge,
}

impl ScrollRange {
    /// From the section's top entering at the viewport bottom to its bottom leaving at the top.
    pub const ENTER_EXIT: ScrollRange = ScrollRange {
        start: ScrollEdge::new(0.0, 1.0),
        end: ScrollEdge::new(1.0, 0.0),
    };
    /// From the section's top at the viewport top to its bottom at the viewport top.
    pub const LEAVE: ScrollRange = ScrollRange {
        start: ScrollEdge::new(0.0, 0.0),
        end: ScrollEdge::new(1.0, 0.0),
    };

    /// Progress of `section` at the given scroll state.
    ///
    /// Zero-height sections and degenerate ranges report progress 0.
    pub fn progress(self, section: SectionBox, scroll: ScrollState) -> ProgressSample {
        if section.height <= 0.0 {
            return ProgressSample::ZERO;
        }
        let from = self.start.scroll_offset(section, scroll.viewport);
        let to = self.end.scroll_offset(section, scroll.viewport);
        let span = to - from;
        if !span.is_finite() || span.abs() < f64::EPSILON {
            return ProgressSample::ZERO;
        }
        ProgressSample::new((scroll.scroll_y - from) / span)
    }
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::ENTER_EXIT
    }
}

impl From<[ScrollEdge; 2]> for ScrollRange {
    fn from([start, end]: [ScrollEdge; 2]) -> Self {
        Self { start, end }
    }
}

impl From<ScrollRange> for [ScrollEdge; 2] {
    fn from(r: ScrollRange) -> Self {
        [r.start, r.end]
    }
}

/// Progress value with both bounded and extrapolated readings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressSample {
    raw: f64,
}

impl ProgressSample {
    /// Progress 0.
    pub const ZERO: ProgressSample = ProgressSample { raw: 0.0 };

    /// Wrap a raw value; non-finite values collapse to 0.
    pub fn new(raw: f64) -> Self {
        Self {
            raw: if raw.is_finite() { raw } else { 0.0 },
        }
    }

    /// Progress clamped to `[0, 1]`; for reveal-style consumers.
    pub fn clamped(self) -> f64 {
        self.raw.clamp(0.0, 1.0)
    }

    /// Progress extrapolated beyond `[0, 1]`; for parallax layers.
    pub fn unclamped(self) -> f64 {
        self.raw
    }
}

/// Whole-document progress: `scroll_y / (document_height - viewport height)`, clamped.
pub fn page_progress(scroll: ScrollState, document_height: f64) -> f64 {
    let scrollable = document_height - scroll.viewport.height;
    if !scrollable.is_finite() || scrollable <= 0.0 {
        return 0.0;
    }
    (scroll.scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Handle for a section bound to a [`ProgressTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionHandle(u32);

#[derive(Clone, Debug)]
struct Binding {
    id: String,
    section: SectionBox,
    range: ScrollRange,
}

/// Tracks section geometry and the latest scroll state; progress is derived on read.
///
/// Reads always reflect the most recent [`ProgressTracker::update`], so consumers pulling within
/// the same frame never see stale values.
#[derive(Clone, Debug, Default)]
pub struct ProgressTracker {
    bindings: BTreeMap<SectionHandle, Binding>,
    latest: Option<ScrollState>,
    next_handle: u32,
}

impl ProgressTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a section when it mounts.
    pub fn bind(
        &mut self,
        id: impl Into<String>,
        section: SectionBox,
        range: ScrollRange,
    ) -> SectionHandle {
        let handle = SectionHandle(self.next_handle);
        self.next_handle += 1;
        self.bindings.insert(
            handle,
            Binding {
                id: id.into(),
                section,
                range,
            },
        );
        handle
    }

    /// Replace a bound section's geometry after a layout change.
    pub fn rebind(&mut self, handle: SectionHandle, section: SectionBox) -> bool {
        match self.bindings.get_mut(&handle) {
            Some(b) => {
                b.section = section;
                true
            }
            None => false,
        }
    }

    /// Release a binding when its section unmounts.
    pub fn release(&mut self, handle: SectionHandle) -> bool {
        self.bindings.remove(&handle).is_some()
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Record a scroll/resize notification.
    pub fn update(&mut self, scroll: ScrollState) {
        self.latest = Some(scroll);
    }

    /// Most recent scroll state, if any.
    pub fn latest(&self) -> Option<ScrollState> {
        self.latest
    }

    /// Find a live binding by section id.
    pub fn handle_of(&self, id: &str) -> Option<SectionHandle> {
        self.bindings
            .iter()
            .find_map(|(h, b)| (b.id == id).then_some(*h))
    }

    /// Geometry of a live binding.
    pub fn section(&self, handle: SectionHandle) -> Option<SectionBox> {
        self.bindings.get(&handle).map(|b| b.section)
    }

    /// Progress for `handle`; `None` if released. Zero before the first update.
    pub fn progress(&self, handle: SectionHandle) -> Option<ProgressSample> {
        let b = self.bindings.get(&handle)?;
        Some(match self.latest {
            Some(scroll) => b.range.progress(b.section, scroll),
            None => ProgressSample::ZERO,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
