//! Per-instance animation state, stored as parallel arrays.
//!
//! Targets are written by the filter and pointer handlers; only [`tick`]
//! moves the current values. Arrays are reallocated when the instance count
//! changes and never otherwise, so indices stay stable across filter changes.
//!
//! [`tick`]: InstanceAnimation::tick

pub mod easing;
pub mod filter;

use bevy::prelude::*;

use crate::data::{FilterState, Resource};
use crate::layout::score::size_multiplier;
use crate::layout::SizeSettings;

pub use filter::{target_opacity, OpacityLevels};

#[derive(Clone, Debug)]
pub struct SmoothingRates {
    /// Per-frame lerp rate for filter-driven opacity.
    pub opacity: f32,
    pub hover: f32,
    pub click: f32,
    /// Differences below this snap to the target.
    pub epsilon: f32,
    /// Frame rate the rates above are tuned for.
    pub reference_fps: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            opacity: 0.08,
            hover: 0.15,
            click: 0.3,
            epsilon: 0.001,
            reference_fps: 60.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScaleSettings {
    pub normal: f32,
    pub hover: f32,
    pub click: f32,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            normal: 1.0,
            hover: 1.4,
            click: 1.7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntranceSettings {
    pub base_delay: f32,
    pub stagger_step: f32,
    /// Upper bound on the last item's delay; the step shrinks to fit.
    pub max_stagger: f32,
    pub duration: f32,
}

impl Default for EntranceSettings {
    fn default() -> Self {
        Self {
            base_delay: 0.1,
            stagger_step: 0.004,
            max_stagger: 1.5,
            duration: 0.6,
        }
    }
}

impl EntranceSettings {
    pub fn step_for(&self, count: usize) -> f32 {
        if count <= 1 {
            return 0.0;
        }
        self.stagger_step.min(self.max_stagger / (count - 1) as f32)
    }

    pub fn delay_for(&self, index: usize, count: usize) -> f32 {
        self.base_delay + index as f32 * self.step_for(count)
    }

    /// Time after mount when every item has finished entering.
    pub fn total_for(&self, count: usize) -> f32 {
        self.delay_for(count.saturating_sub(1), count) + self.duration
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnimationSettings {
    pub opacity: OpacityLevels,
    pub rates: SmoothingRates,
    pub scale: ScaleSettings,
    pub entrance: EntranceSettings,
    pub size: SizeSettings,
}

#[derive(Resource, Debug, Default)]
pub struct InstanceAnimation {
    settings: AnimationSettings,
    current_opacity: Vec<f32>,
    target_opacity: Vec<f32>,
    current_scale: Vec<f32>,
    target_scale: Vec<f32>,
    entrance_progress: Vec<f32>,
    size: Vec<f32>,
    rendered_opacity: Vec<f32>,
    clicked: Option<usize>,
    mounted_at: f32,
    entrance_complete: bool,
    changed: Vec<usize>,
}

impl InstanceAnimation {
    /// Opacity levels that break the ordering contract are replaced by the
    /// defaults with a warning.
    pub fn new(mut settings: AnimationSettings) -> Self {
        if !settings.opacity.is_well_ordered() {
            warn!(
                "animation: opacity levels {:?} are not ordered hidden <= filtered_out < threshold < dimmed < visible, using defaults",
                settings.opacity
            );
            settings.opacity = OpacityLevels::default();
        }
        Self {
            settings,
            entrance_complete: true,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.current_opacity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_opacity.is_empty()
    }

    /// Binds the state to a resource list. Reallocates (and re-arms the
    /// entrance wave) only when the count changed; size multipliers are
    /// always refreshed from the new scores. Returns whether it reallocated.
    ///
    /// A different list of the same length keeps the arrays, so callers
    /// mounting a new resource set follow up with [`rearm_entrance`].
    ///
    /// [`rearm_entrance`]: Self::rearm_entrance
    pub fn mount(&mut self, resources: &[Resource], now: f32) -> bool {
        let count = resources.len();
        let reallocated = count != self.len();
        if reallocated {
            let normal = self.settings.scale.normal;
            let visible = self.settings.opacity.visible;
            self.current_opacity = vec![visible; count];
            self.target_opacity = vec![visible; count];
            self.current_scale = vec![normal; count];
            self.target_scale = vec![normal; count];
            self.entrance_progress = vec![0.0; count];
            self.rendered_opacity = vec![0.0; count];
            self.changed = Vec::with_capacity(count);
            self.rearm_entrance(now);
        }

        let sizes = &self.settings.size;
        self.size = resources
            .iter()
            .map(|r| size_multiplier(r.score, sizes.min_size, sizes.max_size))
            .collect();
        reallocated
    }

    /// Restarts the entrance wave from `now` without touching the arrays.
    pub fn rearm_entrance(&mut self, now: f32) {
        self.entrance_progress.fill(0.0);
        self.rendered_opacity.fill(0.0);
        self.clicked = None;
        self.mounted_at = now;
        self.entrance_complete = self.is_empty();
    }

    /// Re-targets opacity for the current filter.
    pub fn apply_filter(&mut self, resources: &[Resource], filter: &FilterState) {
        let levels = &self.settings.opacity;
        for (target, resource) in self.target_opacity.iter_mut().zip(resources) {
            *target = target_opacity(resource, filter, levels).clamp(0.0, 1.0);
        }
    }

    /// Re-targets hover/click scale. Hover only takes effect on instances at
    /// or above the interaction threshold.
    pub fn apply_pointer(&mut self, hovered: Option<usize>, clicked: Option<usize>) {
        let scale = &self.settings.scale;
        self.clicked = clicked.filter(|&i| i < self.len());
        let hovered = hovered.filter(|&i| self.is_interactive(i));

        for (i, target) in self.target_scale.iter_mut().enumerate() {
            *target = if Some(i) == self.clicked {
                scale.click
            } else if Some(i) == hovered {
                scale.hover
            } else {
                scale.normal
            };
        }
    }

    /// Advances every instance one frame. Returns the indices whose rendered
    /// opacity or scale changed; converged instances are left out.
    pub fn tick(&mut self, now: f32, dt: f32) -> &[usize] {
        self.changed.clear();
        if self.is_empty() {
            return &self.changed;
        }

        let entrance_running = !self.entrance_complete;
        if entrance_running {
            self.advance_entrance(now);
        }

        let rates = &self.settings.rates;
        let opacity_factor = easing::smoothing_factor(rates.opacity, dt, rates.reference_fps);
        let hover_factor = easing::smoothing_factor(rates.hover, dt, rates.reference_fps);
        let click_factor = easing::smoothing_factor(rates.click, dt, rates.reference_fps);
        let epsilon = rates.epsilon;

        for i in 0..self.len() {
            let mut moved = entrance_running;

            moved |= approach(
                &mut self.current_opacity[i],
                self.target_opacity[i],
                opacity_factor,
                epsilon,
            );
            self.current_opacity[i] = self.current_opacity[i].clamp(0.0, 1.0);

            let scale_factor = if Some(i) == self.clicked {
                click_factor
            } else {
                hover_factor
            };
            moved |= approach(
                &mut self.current_scale[i],
                self.target_scale[i],
                scale_factor,
                epsilon,
            );
            self.current_scale[i] = self.current_scale[i].max(0.0);

            self.rendered_opacity[i] = self.current_opacity[i] * self.entrance_progress[i];
            if moved {
                self.changed.push(i);
            }
        }

        &self.changed
    }

    fn advance_entrance(&mut self, now: f32) {
        let entrance = &self.settings.entrance;
        let count = self.len();
        let elapsed = now - self.mounted_at;

        if elapsed >= entrance.total_for(count) {
            self.entrance_progress.fill(1.0);
            self.entrance_complete = true;
            return;
        }

        let duration = entrance.duration.max(f32::EPSILON);
        for (i, progress) in self.entrance_progress.iter_mut().enumerate() {
            let local = (elapsed - entrance.delay_for(i, count)) / duration;
            *progress = easing::ease_in_out_quad(local);
        }
    }

    /// Indices reported by the last [`tick`](Self::tick).
    pub fn changed(&self) -> &[usize] {
        &self.changed
    }

    pub fn entrance_complete(&self) -> bool {
        self.entrance_complete
    }

    /// Rendered opacity (current opacity gated by entrance). 0 for stale indices.
    pub fn opacity_at(&self, index: usize) -> f32 {
        self.rendered_opacity.get(index).copied().unwrap_or(0.0)
    }

    pub fn current_opacity_at(&self, index: usize) -> Option<f32> {
        self.current_opacity.get(index).copied()
    }

    pub fn target_opacity_at(&self, index: usize) -> Option<f32> {
        self.target_opacity.get(index).copied()
    }

    pub fn hover_scale_at(&self, index: usize) -> Option<f32> {
        self.current_scale.get(index).copied()
    }

    pub fn size_at(&self, index: usize) -> Option<f32> {
        self.size.get(index).copied()
    }

    /// Entrance × hover/click × score size.
    pub fn rendered_scale(&self, index: usize) -> Option<f32> {
        Some(self.entrance_progress.get(index)? * self.current_scale[index] * self.size[index])
    }

    pub fn rendered_opacities(&self) -> &[f32] {
        &self.rendered_opacity
    }

    pub fn is_interactive(&self, index: usize) -> bool {
        self.opacity_at(index) >= self.settings.opacity.interaction_threshold
    }

    /// Number of instances currently at or above the interaction threshold.
    pub fn visible_count(&self) -> usize {
        let threshold = self.settings.opacity.interaction_threshold;
        self.rendered_opacity
            .iter()
            .filter(|&&o| o >= threshold)
            .count()
    }
}

/// One smoothing step. Returns whether the value changed.
fn approach(current: &mut f32, target: f32, factor: f32, epsilon: f32) -> bool {
    let diff = target - *current;
    if diff == 0.0 {
        return false;
    }
    if diff.abs() < epsilon {
        *current = target;
    } else {
        *current += diff * factor;
    }
    true
}
