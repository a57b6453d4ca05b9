use std::collections::BTreeMap;

use crate::animation::anim::Extrapolation;
use crate::animation::params::{AttributeCurves, VisualParams};
use crate::animation::spring::Spring;
use crate::foundation::core::{Rect, ScrollState, SectionBox, Viewport};
use crate::foundation::error::{MotionError, MotionResult};
use crate::motion::profile::{MotionProfile, MotionProfiles, MotionTuning};
use crate::motion::particles::Particle;
use crate::motion::timing::{Loop, Stagger};
use crate::nav::active::{ActiveSectionTracker, NavEntry, NavItemState};
use crate::page::model::{LayerDef, PageDef};
use crate::prefs::detector::{PreferenceDetector, Preferences};
use crate::reveal::trigger::{RevealHandle, RevealRegistry, RevealState, RevealVariant};
use crate::scroll::progress::{ProgressSample, ProgressTracker, SectionHandle, page_progress};
use crate::theme::{Theme, ThemeState};

/// Evaluated parameters of one scroll-linked layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayerFrame {
    /// Layer id.
    pub id: String,
    /// Owning section; `None` for page-level layers.
    pub section: Option<String>,
    /// Progress fed to the curves (after extrapolation policy and smoothing).
    pub progress: f64,
    /// Mapped parameters.
    pub params: VisualParams,
}

/// Evaluated state of one reveal element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealFrame {
    /// Element id.
    pub id: String,
    /// Owning section.
    pub section: String,
    /// One-shot state.
    pub state: RevealState,
    /// Parameters along the entrance transition.
    pub params: VisualParams,
}

/// Ambient loop parameters at the session clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LoopFrame {
    /// Element id.
    pub id: String,
    /// Owning section.
    pub section: String,
    /// Parameters at the current point of the cycle.
    pub params: VisualParams,
}

/// One background particle at the session clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParticleFrame {
    /// Owning section.
    pub section: String,
    /// Position in the section's field.
    pub index: usize,
    /// Horizontal position, percent of the section width.
    pub x: f64,
    /// Vertical rest position, percent of the section height.
    pub y: f64,
    /// Diameter in px.
    pub size: f64,
    /// Drift and fade parameters.
    pub params: VisualParams,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    /// Scroll offset the frame was derived from.
    pub scroll_y: f64,
    /// Whole-document progress in `[0, 1]`.
    pub page_progress: f64,
    /// Preferences in effect.
    pub preferences: Preferences,
    /// Motion profile in effect.
    pub profile: MotionProfile,
    /// Active theme.
    pub theme: Theme,
    /// Highlighted navigation target.
    pub active_section: Option<String>,
    /// Navigation highlight per entry.
    pub nav: Vec<NavItemState>,
    /// Scroll-linked layers.
    pub layers: Vec<LayerFrame>,
    /// Reveal elements.
    pub reveals: Vec<RevealFrame>,
    /// Ambient loops.
    pub loops: Vec<LoopFrame>,
    /// Background particles.
    pub particles: Vec<ParticleFrame>,
}

#[derive(Debug)]
struct LayerSlot {
    id: String,
    section: Option<String>,
    handle: Option<SectionHandle>,
    curves: AttributeCurves,
    extrapolation: Extrapolation,
    spring: Option<Spring>,
}

#[derive(Debug)]
struct RevealSlot {
    id: String,
    section: String,
    handle: RevealHandle,
    variant: RevealVariant,
    stagger: Stagger,
    stagger_index: Option<usize>,
}

#[derive(Debug)]
struct LoopSlot {
    id: String,
    section: String,
    motion: Loop,
}

#[derive(Debug)]
struct ParticleSlot {
    section: String,
    particle: Particle,
}

/// Owns every motion primitive for one mounted page and evaluates them per scroll event.
///
/// Each primitive keeps a single writer: the session feeds scroll state in a fixed order
/// (preferences, progress, reveals, active section, springs) and renderers pull a
/// [`FrameState`] afterwards.
#[derive(Debug)]
pub struct PageSession {
    detector: PreferenceDetector,
    profiles: MotionProfiles,
    document_height: f64,
    tracker: ProgressTracker,
    section_handles: BTreeMap<String, SectionHandle>,
    layers: Vec<LayerSlot>,
    registry: RevealRegistry,
    reveals: Vec<RevealSlot>,
    loops: Vec<LoopSlot>,
    particles: Vec<ParticleSlot>,
    nav: ActiveSectionTracker,
    theme: ThemeState,
    now: Option<f64>,
}

impl PageSession {
    /// Validate `page` and mount every section.
    #[tracing::instrument(skip(page, detector), fields(sections = page.sections.len()))]
    pub fn new(page: &PageDef, detector: PreferenceDetector) -> MotionResult<Self> {
        page.validate()?;

        let mut tracker = ProgressTracker::new();
        let mut section_handles = BTreeMap::new();
        let mut layers = Vec::new();
        let mut registry = RevealRegistry::new();
        let mut reveals = Vec::new();
        let mut loops = Vec::new();
        let mut particles = Vec::new();
        let mut nav_entries = Vec::with_capacity(page.sections.len());

        for layer in &page.page_layers {
            layers.push(build_layer(layer, None, None)?);
        }

        for section in &page.sections {
            let geometry = section.section_box();
            let handle = tracker.bind(section.id.clone(), geometry, section.scroll_range);
            section_handles.insert(section.id.clone(), handle);
            nav_entries.push(NavEntry::new(
                section.id.clone(),
                section.label.clone(),
                section.index.clone(),
                Some(geometry),
            ));

            for layer in &section.layers {
                layers.push(build_layer(layer, Some(section.id.as_str()), Some(handle))?);
            }
            for reveal in &section.reveals {
                let handle = registry.register(reveal.id.clone(), reveal.rect.0, reveal.threshold)?;
                reveals.push(RevealSlot {
                    id: reveal.id.clone(),
                    section: section.id.clone(),
                    handle,
                    variant: reveal.variant,
                    stagger: section.stagger,
                    stagger_index: reveal.stagger_index,
                });
            }
            for def in &section.loops {
                loops.push(LoopSlot {
                    id: def.id.clone(),
                    section: section.id.clone(),
                    motion: def.build()?,
                });
            }
            if let Some(field) = &section.particles {
                particles.extend(field.generate()?.into_iter().map(|particle| ParticleSlot {
                    section: section.id.clone(),
                    particle,
                }));
            }
        }

        tracing::debug!(
            layers = layers.len(),
            reveals = reveals.len(),
            loops = loops.len(),
            particles = particles.len(),
            profile = ?detector.profile(),
            "page session mounted"
        );

        Ok(Self {
            detector,
            profiles: page.motion,
            document_height: page.document_height(),
            tracker,
            section_handles,
            layers,
            registry,
            reveals,
            loops,
            particles,
            nav: ActiveSectionTracker::new(nav_entries),
            theme: ThemeState::default(),
            now: None,
        })
    }

    /// Preference detector; hosts forward media-change events through it.
    pub fn detector_mut(&mut self) -> &mut PreferenceDetector {
        &mut self.detector
    }

    /// Preferences in effect.
    pub fn preferences(&self) -> Preferences {
        self.detector.current()
    }

    /// Motion profile in effect.
    pub fn profile(&self) -> MotionProfile {
        self.detector.profile()
    }

    /// Tuning of the profile in effect.
    pub fn tuning(&self) -> &MotionTuning {
        self.profiles.tuning(self.detector.profile())
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Flip the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    /// Active navigation target.
    pub fn active_section(&self) -> Option<&str> {
        self.nav.active()
    }

    /// Scroll offset for navigating to section `id`.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.nav.scroll_target(id)
    }

    /// Apply one scroll/resize notification.
    ///
    /// An event stamped earlier than the session clock is applied at the clock's time.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn scroll(&mut self, scroll: ScrollState) {
        let scroll = match self.now {
            Some(now) if scroll.time.is_nan() || scroll.time < now => scroll.at_time(now),
            _ => scroll,
        };
        self.detector.observe_viewport(scroll.viewport);
        self.tracker.update(scroll);
        self.registry.observe(scroll);
        self.nav.update_scroll(scroll);
        self.tick(scroll.time);
    }

    /// Advance the session clock to host time `time` without a new scroll position.
    ///
    /// Reveal entrances, loops and springs all read this clock. It never runs backwards: an
    /// earlier `time` is ignored.
    pub fn tick(&mut self, time: f64) {
        if !time.is_finite() {
            tracing::warn!(time, "ignoring non-finite host time");
            return;
        }
        let dt = self.now.map_or(0.0, |now| (time - now).max(0.0));
        self.now = Some(self.now.map_or(time, |now| now.max(time)));
        let reduced = self.detector.profile() == MotionProfile::Reduced;

        for slot in &mut self.layers {
            let Some(spring) = slot.spring.as_mut() else {
                continue;
            };
            let Some(target) = slot_progress(
                &self.tracker,
                slot.handle,
                slot.extrapolation,
                self.document_height,
            ) else {
                continue;
            };
            if reduced {
                spring.jump(target);
            } else {
                spring.step(target, dt);
            }
        }
    }

    /// Update a section's geometry after a layout change.
    pub fn relayout_section(&mut self, id: &str, geometry: SectionBox) -> MotionResult<()> {
        geometry.validate()?;
        let handle = *self
            .section_handles
            .get(id)
            .ok_or_else(|| MotionError::unknown("section", id))?;
        self.tracker.rebind(handle, geometry);
        self.nav.set_geometry(id, Some(geometry));
        Ok(())
    }

    /// Move a reveal element.
    pub fn relayout_reveal(&mut self, id: &str, rect: Rect) -> MotionResult<()> {
        let slot = self
            .reveals
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| MotionError::unknown("reveal element", id))?;
        self.registry.relayout(slot.handle, rect);
        Ok(())
    }

    /// Unmount a section, releasing its progress binding, layers, reveal triggers and loops.
    ///
    /// The navigation entry stays listed but is skipped until remounted.
    pub fn unmount_section(&mut self, id: &str) -> MotionResult<()> {
        let handle = self
            .section_handles
            .remove(id)
            .ok_or_else(|| MotionError::unknown("section", id))?;
        self.tracker.release(handle);
        self.nav.set_geometry(id, None);
        self.layers.retain(|l| l.handle != Some(handle));

        let registry = &mut self.registry;
        self.reveals.retain(|r| {
            if r.section == id {
                registry.release(r.handle);
                false
            } else {
                true
            }
        });
        self.loops.retain(|l| l.section != id);
        self.particles.retain(|p| p.section != id);
        tracing::debug!(section = id, "section unmounted");
        Ok(())
    }

    /// Number of live progress bindings.
    pub fn bound_sections(&self) -> usize {
        self.tracker.len()
    }

    /// Number of live reveal registrations.
    pub fn registered_reveals(&self) -> usize {
        self.registry.len()
    }

    /// Host time of the latest scroll or tick.
    pub fn now(&self) -> Option<f64> {
        self.now
    }

    /// Derive the current frame from the latest scroll state and the session clock.
    pub fn frame(&self) -> FrameState {
        let scroll = self
            .tracker
            .latest()
            .unwrap_or_else(|| ScrollState::new(0.0, Viewport::default()));
        let now = self.now.unwrap_or(scroll.time);
        let profile = self.detector.profile();
        let tuning = self.profiles.tuning(profile);

        let layers = self
            .layers
            .iter()
            .filter_map(|slot| {
                let raw = slot_progress(
                    &self.tracker,
                    slot.handle,
                    slot.extrapolation,
                    self.document_height,
                )?;
                let progress = slot.spring.as_ref().map_or(raw, |s| {
                    if s.is_primed() { s.value() } else { raw }
                });
                Some(LayerFrame {
                    id: slot.id.clone(),
                    section: slot.section.clone(),
                    progress,
                    params: slot.curves.sample(progress, tuning),
                })
            })
            .collect();

        let reveals = self
            .reveals
            .iter()
            .filter_map(|slot| {
                let trigger = self.registry.trigger(slot.handle)?;
                let elapsed = trigger.revealed_at().map(|t| (now - t).max(0.0));
                let extra_delay = slot
                    .stagger_index
                    .map_or(0.0, |i| slot.stagger.child_delay(i, tuning));
                Some(RevealFrame {
                    id: slot.id.clone(),
                    section: slot.section.clone(),
                    state: trigger.state(),
                    params: slot.variant.sample(elapsed, extra_delay, tuning),
                })
            })
            .collect();

        let loops = self
            .loops
            .iter()
            .map(|slot| LoopFrame {
                id: slot.id.clone(),
                section: slot.section.clone(),
                params: slot.motion.sample(now, tuning),
            })
            .collect();

        let particles = self
            .particles
            .iter()
            .map(|slot| ParticleFrame {
                section: slot.section.clone(),
                index: slot.particle.index,
                x: slot.particle.x,
                y: slot.particle.y,
                size: slot.particle.size,
                params: slot.particle.motion.sample(now, tuning),
            })
            .collect();

        FrameState {
            scroll_y: scroll.scroll_y,
            page_progress: page_progress(scroll, self.document_height),
            preferences: self.detector.current(),
            profile,
            theme: self.theme.current(),
            active_section: self.nav.active().map(str::to_owned),
            nav: self.nav.items(),
            layers,
            reveals,
            loops,
            particles,
        }
    }
}

fn build_layer(
    layer: &LayerDef,
    section: Option<&str>,
    handle: Option<SectionHandle>,
) -> MotionResult<LayerSlot> {
    let spring = layer.spring.map(Spring::new).transpose()?;
    Ok(LayerSlot {
        id: layer.id.clone(),
        section: section.map(str::to_owned),
        handle,
        curves: layer.build_curves()?,
        extrapolation: layer.extrapolate,
        spring,
    })
}

/// Progress for a layer; `None` when its section binding is gone.
fn slot_progress(
    tracker: &ProgressTracker,
    handle: Option<SectionHandle>,
    extrapolation: Extrapolation,
    document_height: f64,
) -> Option<f64> {
    let sample = match handle {
        Some(h) => tracker.progress(h)?,
        None => ProgressSample::new(
            tracker
                .latest()
                .map_or(0.0, |s| page_progress(s, document_height)),
        ),
    };
    Some(match extrapolation {
        Extrapolation::Clamp => sample.clamped(),
        Extrapolation::Extend => sample.unclamped(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
