//! Pointer intent, hover change detection and click sequencing.
//!
//! Input systems only write intent here (cursor position, click requests).
//! Picking resolves an index each frame; the controller turns index changes
//! into hover events and runs the click pulse → callback → clear sequence on
//! scheduled timestamps rather than sleeps.

mod handler;
pub mod picking;

use bevy::prelude::*;

pub use handler::{
    channel_handler, ChannelHandler, HandlerResource, InteractionHandler, LoggingHandler,
    UniverseEvent,
};
pub use picking::{pick, PickCandidate, PickSettings};

/// NDC position used while the pointer is off the render surface; far
/// outside `[-1, 1]` so it can never resolve to an instance.
pub const OFF_SURFACE_NDC: Vec2 = Vec2::new(-10.0, -10.0);

#[derive(Clone, Debug)]
pub struct ClickTiming {
    /// Delay between the click pulse starting and the click callback.
    pub callback_delay: f32,
    /// Delay before the clicked flag clears, measured from the click.
    pub clear_delay: f32,
}

impl Default for ClickTiming {
    fn default() -> Self {
        Self {
            callback_delay: 0.15,
            clear_delay: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Idle,
    Hovering(usize),
    Clicking(usize),
}

/// Index-level events; the scene maps them to resources before dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    Hover {
        index: Option<usize>,
        screen_position: Vec2,
    },
    Click {
        index: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerIntent {
    pub ndc: Vec2,
    /// Logical pixel position; `None` while off surface.
    pub screen: Option<Vec2>,
    pub hovered: Option<usize>,
    pub clicked: Option<usize>,
}

impl PointerIntent {
    /// Inside the `[-1, 1]` NDC square of the render surface.
    pub fn on_surface(&self) -> bool {
        self.screen.is_some() && self.ndc.abs().cmple(Vec2::ONE).all()
    }
}

impl Default for PointerIntent {
    fn default() -> Self {
        Self {
            ndc: OFF_SURFACE_NDC,
            screen: None,
            hovered: None,
            clicked: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Scheduled {
    FireClick(usize),
    ClearClick(usize),
}

#[derive(Resource, Debug, Default)]
pub struct PointerController {
    intent: PointerIntent,
    timing: ClickTiming,
    click_requested: bool,
    pending: Vec<(f32, Scheduled)>,
}

impl PointerController {
    pub fn new(timing: ClickTiming) -> Self {
        Self {
            timing,
            ..Default::default()
        }
    }

    pub fn intent(&self) -> &PointerIntent {
        &self.intent
    }

    pub fn phase(&self) -> PointerPhase {
        match (self.intent.clicked, self.intent.hovered) {
            (Some(i), _) => PointerPhase::Clicking(i),
            (None, Some(i)) => PointerPhase::Hovering(i),
            (None, None) => PointerPhase::Idle,
        }
    }

    /// Cursor position while on the surface. Positions reported outside
    /// the viewport (captured drags, stale window size) count as off surface.
    pub fn cursor(&self) -> Option<Vec2> {
        self.intent.screen.filter(|_| self.intent.on_surface())
    }

    pub fn pointer_moved(&mut self, screen: Vec2, viewport: Vec2) {
        self.intent.screen = Some(screen);
        self.intent.ndc = picking::screen_to_ndc(screen, viewport);
    }

    /// Leaving clears hover immediately and parks the pointer at the
    /// off-surface sentinel.
    pub fn pointer_left(&mut self) -> Option<InteractionEvent> {
        let screen_position = self.intent.screen.unwrap_or(Vec2::NAN);
        self.intent.screen = None;
        self.intent.ndc = OFF_SURFACE_NDC;
        self.click_requested = false;
        self.intent.hovered.take().map(|_| InteractionEvent::Hover {
            index: None,
            screen_position,
        })
    }

    pub fn request_click(&mut self) {
        if self.cursor().is_some() {
            self.click_requested = true;
        }
    }

    pub fn take_click_request(&mut self) -> bool {
        std::mem::take(&mut self.click_requested)
    }

    /// Records this frame's picked index. Emits a hover event only when it
    /// differs from the previous frame's.
    pub fn resolve(&mut self, picked: Option<usize>) -> Option<InteractionEvent> {
        if picked == self.intent.hovered {
            return None;
        }
        self.intent.hovered = picked;
        Some(InteractionEvent::Hover {
            index: picked,
            screen_position: self.intent.screen.unwrap_or(Vec2::NAN),
        })
    }

    /// Starts the click sequence on the hovered instance, if any. The
    /// hovered index is already gated by interactivity during picking.
    pub fn click(&mut self, now: f32) -> bool {
        let Some(index) = self.intent.hovered else {
            return false;
        };
        self.intent.clicked = Some(index);
        self.pending
            .push((now + self.timing.callback_delay, Scheduled::FireClick(index)));
        self.pending
            .push((now + self.timing.clear_delay, Scheduled::ClearClick(index)));
        true
    }

    /// Runs every scheduled action due at `now`, in schedule order.
    pub fn advance(&mut self, now: f32) -> Vec<InteractionEvent> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let (due, later): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = later;

        let mut due = due;
        due.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut events = Vec::new();
        for (_, action) in due {
            match action {
                Scheduled::FireClick(index) => events.push(InteractionEvent::Click { index }),
                Scheduled::ClearClick(index) => {
                    if self.intent.clicked == Some(index) {
                        self.intent.clicked = None;
                    }
                }
            }
        }
        events
    }

    /// Drops hover/click state tied to the previous resource list.
    pub fn reset_indices(&mut self) {
        self.intent.hovered = None;
        self.intent.clicked = None;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn hovering(index: usize) -> PointerController {
        let mut controller = PointerController::default();
        controller.pointer_moved(Vec2::new(100.0, 100.0), VIEWPORT);
        controller.resolve(Some(index));
        controller
    }

    #[test]
    fn hover_events_fire_only_on_change() {
        let mut controller = PointerController::default();
        controller.pointer_moved(Vec2::new(10.0, 20.0), VIEWPORT);

        assert_eq!(
            controller.resolve(Some(2)),
            Some(InteractionEvent::Hover {
                index: Some(2),
                screen_position: Vec2::new(10.0, 20.0)
            })
        );
        assert_eq!(controller.resolve(Some(2)), None);
        assert!(controller.resolve(Some(5)).is_some());
        assert!(controller.resolve(None).is_some());
        assert_eq!(controller.resolve(None), None);
        assert_eq!(controller.phase(), PointerPhase::Idle);
    }

    #[test]
    fn leaving_clears_hover_and_parks_pointer() {
        let mut controller = hovering(3);
        let event = controller.pointer_left();
        assert!(matches!(event, Some(InteractionEvent::Hover { index: None, .. })));
        assert_eq!(controller.intent().ndc, OFF_SURFACE_NDC);
        assert_eq!(controller.cursor(), None);
        assert_eq!(controller.phase(), PointerPhase::Idle);
        assert_eq!(controller.pointer_left(), None);
    }

    #[test]
    fn positions_outside_the_viewport_are_off_surface() {
        let mut controller = PointerController::default();
        controller.pointer_moved(Vec2::new(900.0, 100.0), VIEWPORT);
        assert!(controller.intent().ndc.x > 1.0);
        assert_eq!(controller.cursor(), None);
        controller.request_click();
        assert!(!controller.take_click_request());

        controller.pointer_moved(Vec2::new(799.0, 599.0), VIEWPORT);
        assert_eq!(controller.cursor(), Some(Vec2::new(799.0, 599.0)));
        assert!(controller.intent().on_surface());
    }

    #[test]
    fn click_without_hover_does_nothing() {
        let mut controller = PointerController::default();
        assert!(!controller.click(0.0));
        assert!(controller.advance(1.0).is_empty());
    }

    #[test]
    fn click_sequence_pulses_then_fires_then_clears() {
        let mut controller = hovering(4);
        assert!(controller.click(1.0));
        assert_eq!(controller.phase(), PointerPhase::Clicking(4));

        assert!(controller.advance(1.1).is_empty());
        assert_eq!(controller.advance(1.16), vec![InteractionEvent::Click { index: 4 }]);
        assert_eq!(controller.phase(), PointerPhase::Clicking(4));

        assert!(controller.advance(1.21).is_empty());
        assert_eq!(controller.phase(), PointerPhase::Hovering(4));
    }

    #[test]
    fn clicking_always_returns_to_idle_when_pointer_left() {
        let mut controller = hovering(1);
        controller.click(0.0);
        controller.pointer_left();
        assert_eq!(controller.phase(), PointerPhase::Clicking(1));
        let events = controller.advance(5.0);
        assert_eq!(events, vec![InteractionEvent::Click { index: 1 }]);
        assert_eq!(controller.phase(), PointerPhase::Idle);
    }

    #[test]
    fn late_clear_does_not_cancel_a_newer_click() {
        let mut controller = hovering(1);
        controller.click(0.0);
        controller.resolve(Some(2));
        controller.click(0.1);
        controller.advance(0.21);
        assert_eq!(controller.phase(), PointerPhase::Clicking(2));
        controller.advance(0.31);
        assert_eq!(controller.phase(), PointerPhase::Hovering(2));
    }

    #[test]
    fn click_requests_need_an_on_surface_pointer() {
        let mut controller = PointerController::default();
        controller.request_click();
        assert!(!controller.take_click_request());
        controller.pointer_moved(Vec2::ONE, VIEWPORT);
        controller.request_click();
        assert!(controller.take_click_request());
        assert!(!controller.take_click_request());
    }
}
