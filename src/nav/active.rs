use crate::foundation::core::{ScrollState, SectionBox};

/// One navigation target.
#[derive(Clone, Debug, PartialEq)]
pub struct NavEntry {
    /// Section id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Display index, e.g. `"01"`.
    pub index: String,
    geometry: Option<SectionBox>,
}

impl NavEntry {
    /// Entry with known geometry.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        index: impl Into<String>,
        geometry: Option<SectionBox>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            index: index.into(),
            geometry,
        }
    }

    /// Current geometry; `None` while the section is not mounted.
    pub fn geometry(&self) -> Option<SectionBox> {
        self.geometry
    }
}

/// Per-entry highlight state for rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NavItemState {
    /// Section id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Display index.
    pub index: String,
    /// Whether this entry is highlighted.
    pub is_active: bool,
}

/// Sole writer of the active section.
///
/// Starts on the first entry. Midlines that fall in no section leave the active id unchanged.
#[derive(Clone, Debug, Default)]
pub struct ActiveSectionTracker {
    entries: Vec<NavEntry>,
    active: Option<String>,
}

impl ActiveSectionTracker {
    /// Tracker over `entries` in document order.
    pub fn new(entries: Vec<NavEntry>) -> Self {
        let active = entries.first().map(|e| e.id.clone());
        Self { entries, active }
    }

    /// Active section id.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Select the section containing `midline_y`. Returns `true` if the active id changed.
    ///
    /// Entries without geometry are skipped. When ranges overlap the later entry wins.
    pub fn update(&mut self, midline_y: f64) -> bool {
        let hit = self
            .entries
            .iter()
            .rev()
            .find(|e| e.geometry.is_some_and(|g| g.contains(midline_y)));
        let Some(hit) = hit else {
            return false;
        };
        if self.active.as_deref() == Some(hit.id.as_str()) {
            return false;
        }
        tracing::debug!(from = ?self.active, to = %hit.id, midline_y, "active section changed");
        self.active = Some(hit.id.clone());
        true
    }

    /// [`ActiveSectionTracker::update`] with the midline derived from a scroll state.
    pub fn update_scroll(&mut self, scroll: ScrollState) -> bool {
        self.update(scroll.midline_y())
    }

    /// Set or clear an entry's geometry (mount, relayout, unmount).
    pub fn set_geometry(&mut self, id: &str, geometry: Option<SectionBox>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.geometry = geometry;
                true
            }
            None => false,
        }
    }

    /// Scroll offset to bring `id` to the viewport top.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.geometry)
            .map(|g| g.top)
    }

    /// Highlight state for every entry.
    pub fn items(&self) -> Vec<NavItemState> {
        self.entries
            .iter()
            .map(|e| NavItemState {
                id: e.id.clone(),
                label: e.label.clone(),
                index: e.index.clone(),
                is_active: self.active.as_deref() == Some(e.id.as_str()),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/active.rs"]
mod tests;
