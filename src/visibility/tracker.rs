//! Shared visibility tracking for page regions.
//!
//! One [`VisibilityTracker`] holds every observed region in a single arena and
//! evaluates all of them once per scroll tick. Each region is owned by a
//! [`RegionObservation`] guard; dropping the guard detaches the region.
//!
//! A region moves `Hidden -> Visible` the first time the visible fraction of
//! its height reaches the configured threshold. With `trigger_once` the
//! `Visible` state is final and the region stops being tested for
//! intersection; otherwise it falls back to `Hidden` when the fraction drops
//! below the threshold. Scroll progress is recomputed on every tick either way.

use std::sync::Arc;

use parking_lot::Mutex;
use slab::Slab;
use tracing::debug;

use super::geometry::{RegionGeometry, Viewport};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the region's height that must be inside the viewport.
    pub threshold: f64,
    /// Pixels added above and below the viewport when testing intersection.
    pub root_margin: f64,
    pub trigger_once: bool,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: 0.0,
            trigger_once: true,
        }
    }
}

impl VisibilityOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

/// A state transition observed during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub region: RegionId,
    pub state: VisibilityState,
}

#[derive(Debug)]
struct RegionSlot {
    options: VisibilityOptions,
    geometry: Option<RegionGeometry>,
    state: VisibilityState,
    progress: f64,
    observing: bool,
}

impl RegionSlot {
    fn new(options: VisibilityOptions) -> Self {
        Self {
            options,
            geometry: None,
            state: VisibilityState::Hidden,
            progress: 0.0,
            observing: true,
        }
    }

    fn evaluate(&mut self, viewport: &Viewport) -> Option<VisibilityState> {
        let geometry = self.geometry?;
        self.progress = geometry.scroll_progress(viewport);
        if !self.observing {
            return None;
        }

        let ratio = geometry.visible_ratio(viewport, self.options.root_margin);
        let intersecting = ratio > 0.0 && ratio >= self.options.threshold;
        match (self.state, intersecting) {
            (VisibilityState::Hidden, true) => {
                self.state = VisibilityState::Visible;
                if self.options.trigger_once {
                    self.observing = false;
                }
                Some(VisibilityState::Visible)
            }
            (VisibilityState::Visible, false) if !self.options.trigger_once => {
                self.state = VisibilityState::Hidden;
                Some(VisibilityState::Hidden)
            }
            _ => None,
        }
    }
}

type Regions = Arc<Mutex<Slab<RegionSlot>>>;

/// Cloneable handle to the shared region arena.
#[derive(Clone, Default)]
pub struct VisibilityTracker {
    regions: Regions,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a region. It stays inert until [`RegionObservation::mount`]
    /// supplies its geometry.
    pub fn observe(&self, options: VisibilityOptions) -> RegionObservation {
        let key = self.regions.lock().insert(RegionSlot::new(options));
        RegionObservation {
            id: RegionId(key),
            regions: Arc::clone(&self.regions),
        }
    }

    /// Evaluates every mounted region against the new viewport.
    pub fn on_scroll(&self, viewport: Viewport) -> Vec<VisibilityChange> {
        let mut regions = self.regions.lock();
        let mut changes = Vec::new();
        for (key, slot) in regions.iter_mut() {
            if let Some(state) = slot.evaluate(&viewport) {
                debug!(region = key, ?state, progress = slot.progress, "Region visibility changed");
                changes.push(VisibilityChange {
                    region: RegionId(key),
                    state,
                });
            }
        }
        changes
    }

    pub fn tracked_regions(&self) -> usize {
        self.regions.lock().len()
    }
}

/// Ownership of one tracked region. Dropping it detaches the region.
pub struct RegionObservation {
    id: RegionId,
    regions: Regions,
}

impl RegionObservation {
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Supplies (or replaces) the region's layout and evaluates it once
    /// against the current viewport.
    pub fn mount(&self, geometry: RegionGeometry, viewport: Viewport) -> Option<VisibilityChange> {
        let mut regions = self.regions.lock();
        let slot = regions.get_mut(self.id.0)?;
        slot.geometry = Some(geometry);
        slot.evaluate(&viewport).map(|state| VisibilityChange {
            region: self.id,
            state,
        })
    }

    pub fn state(&self) -> VisibilityState {
        self.read(|slot| slot.state).unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.state() == VisibilityState::Visible
    }

    pub fn progress(&self) -> f64 {
        self.read(|slot| slot.progress).unwrap_or(0.0)
    }

    /// False once a trigger-once region has fired.
    pub fn is_observing(&self) -> bool {
        self.read(|slot| slot.observing).unwrap_or(false)
    }

    fn read<R>(&self, f: impl FnOnce(&RegionSlot) -> R) -> Option<R> {
        self.regions.lock().get(self.id.0).map(f)
    }
}

impl Drop for RegionObservation {
    fn drop(&mut self) {
        let mut regions = self.regions.lock();
        if regions.contains(self.id.0) {
            regions.remove(self.id.0);
        }
    }
}
