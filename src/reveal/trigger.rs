use std::collections::BTreeMap;

use crate::animation::anim::Lerp;
use crate::animation::params::{Attribute, VisualParams};
use crate::foundation::core::{Rect, ScrollState, visible_fraction};
use crate::foundation::error::{MotionError, MotionResult};
use crate::motion::profile::MotionTuning;
use crate::motion::timing::Transition;

/// One-shot visibility state of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Not yet shown.
    #[default]
    Hidden,
    /// Shown; terminal.
    Visible,
}

/// Hidden → Visible the first time the visible fraction meets the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTrigger {
    threshold: f64,
    state: RevealState,
    revealed_at: Option<f64>,
}

impl RevealTrigger {
    /// `threshold` is the fraction of the element that must be visible, in `(0, 1]`.
    pub fn new(threshold: f64) -> MotionResult<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(MotionError::validation(format!(
                "reveal threshold must be in (0, 1], got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            state: RevealState::Hidden,
            revealed_at: None,
        })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Host time at which the trigger fired.
    pub fn revealed_at(&self) -> Option<f64> {
        self.revealed_at
    }

    /// Feed an intersection observation. Returns `true` only on the firing observation.
    pub fn observe(&mut self, fraction: f64, time: f64) -> bool {
        if self.state == RevealState::Visible || !(fraction >= self.threshold) {
            return false;
        }
        self.state = RevealState::Visible;
        self.revealed_at = Some(time);
        true
    }
}

/// Hidden/visible parameter pair plus the entrance transition between them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealVariant {
    /// Parameters before the reveal.
    pub hidden: VisualParams,
    /// Parameters once the transition completes.
    pub visible: VisualParams,
    /// Entrance timing.
    pub transition: Transition,
}

impl Default for RevealVariant {
    fn default() -> Self {
        Self {
            hidden: VisualParams::default()
                .with(Attribute::Opacity, 0.0)
                .with(Attribute::TranslateY, 20.0),
            visible: VisualParams::default(),
            transition: Transition::default(),
        }
    }
}

impl RevealVariant {
    /// Validate the transition.
    pub fn validate(&self) -> MotionResult<()> {
        self.transition.validate()
    }

    /// Parameters `elapsed` seconds after the reveal (`None` while hidden).
    ///
    /// `extra_delay` is added to the transition delay (stagger); amplitudes and times are
    /// scaled by `tuning`.
    pub fn sample(
        &self,
        elapsed: Option<f64>,
        extra_delay: f64,
        tuning: &MotionTuning,
    ) -> VisualParams {
        let hidden = self.hidden.scaled(tuning);
        let Some(elapsed) = elapsed else {
            return hidden;
        };
        let visible = self.visible.scaled(tuning);
        let mut transition = self.transition.tuned(tuning);
        transition.delay += extra_delay;
        VisualParams::lerp(&hidden, &visible, transition.progress(elapsed))
    }
}

/// Handle for an element registered with a [`RevealRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealHandle(u32);

#[derive(Clone, Debug)]
struct RevealEntry {
    id: String,
    rect: Rect,
    trigger: RevealTrigger,
}

/// Independent one-shot triggers for many elements.
#[derive(Clone, Debug, Default)]
pub struct RevealRegistry {
    entries: BTreeMap<RevealHandle, RevealEntry>,
    next_handle: u32,
}

impl RevealRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element at mount, in `Hidden`. `rect` is in document space.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        rect: Rect,
        threshold: f64,
    ) -> MotionResult<RevealHandle> {
        let trigger = RevealTrigger::new(threshold)?;
        let handle = RevealHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            RevealEntry {
                id: id.into(),
                rect,
                trigger,
            },
        );
        Ok(handle)
    }

    /// Update an element's geometry; its reveal state is kept.
    pub fn relayout(&mut self, handle: RevealHandle, rect: Rect) -> bool {
        match self.entries.get_mut(&handle) {
            Some(e) => {
                e.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Drop an element at unmount.
    pub fn release(&mut self, handle: RevealHandle) -> bool {
        self.entries.remove(&handle).is_some()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Observe every element against the viewport; returns the elements that fired now.
    pub fn observe(&mut self, scroll: ScrollState) -> Vec<RevealHandle> {
        let visible = scroll.visible_rect();
        let mut fired = Vec::new();
        for (&handle, entry) in &mut self.entries {
            let fraction = visible_fraction(entry.rect, visible);
            if entry.trigger.observe(fraction, scroll.time) {
                tracing::debug!(id = %entry.id, fraction, time = scroll.time, "revealed");
                fired.push(handle);
            }
        }
        fired
    }

    /// Trigger for `handle`.
    pub fn trigger(&self, handle: RevealHandle) -> Option<&RevealTrigger> {
        self.entries.get(&handle).map(|e| &e.trigger)
    }

    /// Element id for `handle`.
    pub fn id(&self, handle: RevealHandle) -> Option<&str> {
        self.entries.get(&handle).map(|e| e.id.as_str())
    }

    /// Count of elements in `Visible`.
    pub fn revealed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.trigger.state() == RevealState::Visible)
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/trigger.rs"]
mod tests;
