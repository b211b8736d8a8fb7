//! Lightbox state machine.
//!
//! ```text
//!  Closed --open--> Opening --overlay in--> Open --navigate--> ContentTransitioning
//!    ^                                        |  ^                    |
//!    |                                        |  +----reveal done-----+
//!    +--overlay out-- Closing <--close--------+-----------------------+
//! ```
//!
//! The controller is sans-IO: every entry point returns the
//! [`LightboxCommand`]s the host must carry out (show the overlay, run an
//! animation step, mount content, ...). The host reports back through
//! [`LightboxController::step_complete`] and
//! [`LightboxController::content_measured`]. The current visual values
//! live in [`VisualState`] so a reactive view can render straight from it.

use crate::animation::{
    AnimatedProperty, Advance, CONTENT_FADE_IN, CONTENT_FADE_OUT, ChainPurpose, MORPH,
    OVERLAY_FADE, OVERLAY_OPACITY, Step, StepTicket, TransitionAnimator,
};
use crate::events::{EventEmitter, GalleryEvent};
use crate::surface::Surface;
use crate::types::{GalleryConfig, Size};

/// Side of the placeholder frame shown before the first item is measured.
pub const PLACEHOLDER_SIZE: f64 = 20.0;

/// Lifecycle phase of the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxPhase {
    #[default]
    Closed,
    /// Overlay fading in.
    Opening,
    /// Stable and navigable (once any reveal has finished).
    Open,
    /// Switching to another item.
    ContentTransitioning,
    /// Overlay fading out.
    Closing,
}

/// Where navigation should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Relative move (`+1` next, `-1` previous).
    Delta(isize),
    /// Absolute index (bullet activation).
    Index(usize),
}

/// Current position within the catalog while the lightbox exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub len: usize,
    /// An animation chain (or the measurement feeding one) is in flight.
    pub pending_animation: bool,
}

impl NavigationState {
    /// The index `target` resolves to, or `None` when the move is a no-op
    /// (boundary, out of range, or the current index).
    #[must_use]
    pub fn resolve(&self, target: NavTarget) -> Option<usize> {
        let index = match target {
            NavTarget::Delta(delta) => self.current_index.checked_add_signed(delta)?,
            NavTarget::Index(index) => index,
        };
        (index < self.len && index != self.current_index).then_some(index)
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.current_index + 1 >= self.len
    }

    /// One-based position, e.g. `"2/5"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.len)
    }
}

/// Lightbox frame geometry in page coordinates. `width` and `height` are
/// the content box; the host adds its frame chrome around it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything a view needs to draw the lightbox.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualState {
    pub overlay_layer: Option<u32>,
    pub overlay_opacity: f64,
    pub frame_layer: Option<u32>,
    pub frame: Option<Frame>,
    /// Catalog index whose content is mounted in the frame.
    pub content: Option<usize>,
    pub content_opacity: f64,
    /// Step currently animating, so the view can set transition timing.
    pub transition: Option<Step>,
}

impl VisualState {
    /// The state as it looks `progress` of the way through the step in
    /// flight. The stored values are already the step's targets, so
    /// `progress == 1.0` (or no step) returns them unchanged.
    #[must_use]
    pub fn at_progress(&self, progress: f64) -> Self {
        let mut shown = self.clone();
        let Some(step) = self.transition else {
            return shown;
        };
        let value = step.value_at(progress);
        match step.property {
            AnimatedProperty::OverlayOpacity => shown.overlay_opacity = value,
            AnimatedProperty::ContentOpacity => shown.content_opacity = value,
            AnimatedProperty::FrameWidth => {
                if let Some(frame) = shown.frame.as_mut() {
                    frame.left += (frame.width - value) / 2.0;
                    frame.width = value;
                }
            }
            AnimatedProperty::FrameHeight => {
                if let Some(frame) = shown.frame.as_mut() {
                    frame.top += (frame.height - value) / 2.0;
                    frame.height = value;
                }
            }
        }
        shown
    }
}

/// Something the host must do on the controller's behalf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightboxCommand {
    ShowOverlay { layer: u32 },
    ShowFrame { layer: u32 },
    /// Perform the step, then call [`LightboxController::step_complete`].
    RunStep(StepTicket),
    /// Render the item hidden and report its size through
    /// [`LightboxController::content_measured`].
    MountContent { index: usize },
    UnmountContent,
    RemoveFrame,
    RemoveOverlay,
    SubscribeGestures,
    UnsubscribeGestures,
}

/// One navigation bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    pub index: usize,
    pub selected: bool,
}

/// Owns navigation state and overlay lifecycle.
#[derive(Debug)]
pub struct LightboxController {
    len: usize,
    show_bullets: bool,
    gestures: bool,
    phase: LightboxPhase,
    nav: Option<NavigationState>,
    animator: TransitionAnimator,
    visual: VisualState,
    awaiting_measure: Option<usize>,
    events: EventEmitter,
}

impl LightboxController {
    /// Controller for a catalog of `len` items.
    #[must_use]
    pub fn new(len: usize, config: &GalleryConfig) -> Self {
        Self {
            len,
            show_bullets: config.show_navigation_bullets,
            gestures: config.enable_gesture_navigation,
            phase: LightboxPhase::Closed,
            nav: None,
            animator: TransitionAnimator::new(),
            visual: VisualState::default(),
            awaiting_measure: None,
            events: EventEmitter::new(),
        }
    }

    pub const fn events_mut(&mut self) -> &mut EventEmitter {
        &mut self.events
    }

    #[must_use]
    pub const fn phase(&self) -> LightboxPhase {
        self.phase
    }

    #[must_use]
    pub const fn navigation(&self) -> Option<&NavigationState> {
        self.nav.as_ref()
    }

    #[must_use]
    pub const fn visual(&self) -> &VisualState {
        &self.visual
    }

    #[must_use]
    pub const fn gestures_enabled(&self) -> bool {
        self.gestures
    }

    /// Whether navigation input would currently be accepted.
    #[must_use]
    pub fn accepts_navigation(&self) -> bool {
        self.phase == LightboxPhase::Open
            && self.nav.is_some_and(|n| !n.pending_animation)
            && !self.animator.is_busy()
    }

    /// Navigation bullets, or an empty list when bullets are disabled.
    #[must_use]
    pub fn bullets(&self) -> Vec<Bullet> {
        match (self.show_bullets, self.nav) {
            (true, Some(nav)) => (0..self.len)
                .map(|index| Bullet {
                    index,
                    selected: index == nav.current_index,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Open on `index` (thumbnail activation). Ignored unless closed.
    pub fn open<S: Surface>(&mut self, index: usize, surface: &mut S) -> Vec<LightboxCommand> {
        if self.phase != LightboxPhase::Closed || index >= self.len {
            tracing::debug!(index, phase = ?self.phase, "open ignored");
            return Vec::new();
        }
        self.phase = LightboxPhase::Opening;
        self.nav = Some(NavigationState {
            current_index: index,
            len: self.len,
            pending_animation: true,
        });
        let layer = surface.next_stack_layer();
        self.visual = VisualState {
            overlay_layer: Some(layer),
            ..VisualState::default()
        };
        tracing::info!(index, "lightbox opening");

        let mut commands = vec![LightboxCommand::ShowOverlay { layer }];
        commands.extend(self.start_chain(
            ChainPurpose::OverlayIn,
            vec![Step::new(
                AnimatedProperty::OverlayOpacity,
                0.0,
                OVERLAY_OPACITY,
                OVERLAY_FADE,
            )],
        ));
        commands
    }

    /// Move to the next item. No-op at the last index.
    pub fn next(&mut self) -> Vec<LightboxCommand> {
        self.apply_navigation(NavTarget::Delta(1))
    }

    /// Move to the previous item. No-op at index 0.
    pub fn previous(&mut self) -> Vec<LightboxCommand> {
        self.apply_navigation(NavTarget::Delta(-1))
    }

    /// Jump to `index` (bullet activation). No-op for the current index.
    pub fn jump_to(&mut self, index: usize) -> Vec<LightboxCommand> {
        self.apply_navigation(NavTarget::Index(index))
    }

    /// Single arbitration point for every navigation source.
    pub fn apply_navigation(&mut self, target: NavTarget) -> Vec<LightboxCommand> {
        if !self.accepts_navigation() {
            tracing::debug!(?target, phase = ?self.phase, "navigation rejected");
            return Vec::new();
        }
        let Some(nav) = self.nav.as_mut() else {
            return Vec::new();
        };
        let Some(index) = nav.resolve(target) else {
            return Vec::new();
        };
        nav.current_index = index;
        nav.pending_animation = true;
        self.phase = LightboxPhase::ContentTransitioning;
        self.events.emit(GalleryEvent::Navigated(index));

        self.start_chain(
            ChainPurpose::ContentOut,
            vec![Step::new(
                AnimatedProperty::ContentOpacity,
                self.visual.content_opacity,
                0.0,
                CONTENT_FADE_OUT,
            )],
        )
    }

    /// Close from `Open` or `ContentTransitioning`; any running chain is
    /// abandoned and the frame removed immediately.
    pub fn request_close(&mut self) -> Vec<LightboxCommand> {
        if !matches!(
            self.phase,
            LightboxPhase::Open | LightboxPhase::ContentTransitioning
        ) {
            return Vec::new();
        }
        self.animator.cancel();
        self.awaiting_measure = None;
        self.phase = LightboxPhase::Closing;
        self.visual.frame = None;
        self.visual.frame_layer = None;
        self.visual.content = None;
        self.visual.content_opacity = 0.0;
        tracing::info!("lightbox closing");

        let mut commands = vec![LightboxCommand::RemoveFrame];
        if self.gestures {
            commands.push(LightboxCommand::UnsubscribeGestures);
        }
        commands.extend(self.start_chain(
            ChainPurpose::OverlayOut,
            vec![Step::new(
                AnimatedProperty::OverlayOpacity,
                self.visual.overlay_opacity,
                0.0,
                OVERLAY_FADE,
            )],
        ));
        commands
    }

    /// The host finished the step behind `ticket`.
    pub fn step_complete<S: Surface>(
        &mut self,
        ticket: StepTicket,
        surface: &mut S,
    ) -> Vec<LightboxCommand> {
        match self.advance(ticket, surface) {
            (Advance::Next(next), _) => vec![LightboxCommand::RunStep(next)],
            (Advance::Finished(_) | Advance::Stale, commands) => commands,
        }
    }

    /// Step completion for hosts that run whole chains with
    /// [`run_chain`](crate::animation::run_chain): the next step of the
    /// same chain comes back as [`Advance::Next`] (already applied to
    /// [`VisualState`]), and the commands are whatever the end of the
    /// chain asks for.
    pub fn advance<S: Surface>(
        &mut self,
        ticket: StepTicket,
        surface: &mut S,
    ) -> (Advance, Vec<LightboxCommand>) {
        let advance = self.animator.complete(ticket);
        let commands = match advance {
            Advance::Stale => Vec::new(),
            Advance::Next(next) => {
                self.begin_step(&next);
                Vec::new()
            }
            Advance::Finished(purpose) => {
                self.visual.transition = None;
                self.chain_finished(purpose, surface)
            }
        };
        (advance, commands)
    }

    /// The mounted content for `index` measures `size`; start the reveal.
    pub fn content_measured(&mut self, index: usize, size: Size) -> Vec<LightboxCommand> {
        if self.awaiting_measure != Some(index) {
            return Vec::new();
        }
        self.awaiting_measure = None;
        let Some(frame) = self.visual.frame else {
            return Vec::new();
        };
        tracing::debug!(index, width = size.width, height = size.height, "content measured");
        self.start_chain(
            ChainPurpose::Reveal,
            vec![
                Step::new(AnimatedProperty::FrameWidth, frame.width, size.width, MORPH),
                Step::new(
                    AnimatedProperty::FrameHeight,
                    frame.height,
                    size.height,
                    MORPH,
                ),
                Step::new(AnimatedProperty::ContentOpacity, 0.0, 1.0, CONTENT_FADE_IN),
            ],
        )
    }

    /// The mounted content for `index` could not be measured. Reveal it at
    /// the frame's current size so navigation is not left blocked.
    pub fn content_measure_failed(&mut self, index: usize) -> Vec<LightboxCommand> {
        let size = self.visual.frame.map_or(
            Size::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE),
            |frame| Size::new(frame.width, frame.height),
        );
        tracing::warn!(index, "content not measurable, revealing at current frame size");
        self.content_measured(index, size)
    }

    fn chain_finished<S: Surface>(
        &mut self,
        purpose: ChainPurpose,
        surface: &mut S,
    ) -> Vec<LightboxCommand> {
        match purpose {
            ChainPurpose::OverlayIn => {
                let Some(index) = self.nav.map(|n| n.current_index) else {
                    return Vec::new();
                };
                self.phase = LightboxPhase::Open;
                let viewport = surface.viewport();
                let outer = PLACEHOLDER_SIZE + surface.frame_chrome();
                let layer = surface.next_stack_layer();
                self.visual.frame_layer = Some(layer);
                self.visual.frame = Some(Frame {
                    left: viewport.center_x() - outer / 2.0,
                    top: viewport.center_y() - outer / 2.0,
                    width: PLACEHOLDER_SIZE,
                    height: PLACEHOLDER_SIZE,
                });
                self.mount(index);
                self.events.emit(GalleryEvent::Opened);

                let mut commands = vec![
                    LightboxCommand::ShowFrame { layer },
                    LightboxCommand::MountContent { index },
                ];
                if self.gestures {
                    commands.push(LightboxCommand::SubscribeGestures);
                }
                commands
            }
            ChainPurpose::ContentOut => {
                let Some(index) = self.nav.map(|n| n.current_index) else {
                    return Vec::new();
                };
                self.mount(index);
                vec![
                    LightboxCommand::UnmountContent,
                    LightboxCommand::MountContent { index },
                ]
            }
            ChainPurpose::Reveal => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.pending_animation = false;
                }
                if self.phase == LightboxPhase::ContentTransitioning {
                    self.phase = LightboxPhase::Open;
                }
                Vec::new()
            }
            ChainPurpose::OverlayOut => {
                self.phase = LightboxPhase::Closed;
                self.nav = None;
                self.visual = VisualState::default();
                tracing::info!("lightbox closed");
                self.events.emit(GalleryEvent::Closed);
                vec![LightboxCommand::RemoveOverlay]
            }
        }
    }

    fn mount(&mut self, index: usize) {
        self.visual.content = Some(index);
        self.visual.content_opacity = 0.0;
        self.awaiting_measure = Some(index);
    }

    fn start_chain(&mut self, purpose: ChainPurpose, steps: Vec<Step>) -> Vec<LightboxCommand> {
        match self.animator.start(purpose, steps) {
            Ok(ticket) => {
                self.begin_step(&ticket);
                vec![LightboxCommand::RunStep(ticket)]
            }
            Err(err) => {
                tracing::warn!(%err, ?purpose, "animation chain not started");
                Vec::new()
            }
        }
    }

    /// Apply a step's target values; the view animates towards them.
    fn begin_step(&mut self, ticket: &StepTicket) {
        let step = ticket.step;
        self.visual.transition = Some(step);
        match step.property {
            AnimatedProperty::OverlayOpacity => self.visual.overlay_opacity = step.to,
            AnimatedProperty::ContentOpacity => self.visual.content_opacity = step.to,
            AnimatedProperty::FrameWidth => {
                if let Some(frame) = self.visual.frame.as_mut() {
                    frame.left -= (step.to - frame.width) / 2.0;
                    frame.width = step.to;
                }
            }
            AnimatedProperty::FrameHeight => {
                if let Some(frame) = self.visual.frame.as_mut() {
                    frame.top -= (step.to - frame.height) / 2.0;
                    frame.height = step.to;
                }
            }
        }
    }
}
