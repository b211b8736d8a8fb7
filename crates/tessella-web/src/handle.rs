//! Bridges [`LightboxController`] to Dioxus signals.
//!
//! The controller decides; this module carries out the
//! [`LightboxCommand`]s it returns. Views redraw from
//! [`LightboxController::visual`] plus the current [`FrameTween`], so
//! most commands need no DOM work here.

use dioxus::core::Task;
use dioxus::prelude::*;
use tessella_core::animation::run_chain;
use tessella_core::{
    ArrowHint, GalleryConfig, GalleryEvent, LightboxCommand, LightboxController, NavTarget, Size,
};

use crate::surface::DomSurface;
use crate::timing::{FrameTween, TimerRunner};

/// Signals shared by the grid (which opens the lightbox) and the
/// lightbox view.
#[derive(Clone, Copy, PartialEq)]
pub struct LightboxHandle {
    pub controller: Signal<LightboxController>,
    pub surface: Signal<DomSurface>,
    pub tween: Signal<Option<FrameTween>>,
    pub arrow: Signal<ArrowHint>,
    /// Whether swipe listeners are currently attached.
    pub gestures: Signal<bool>,
    /// Timer task for the chain in flight.
    pub running: Signal<Option<Task>>,
}

/// Create the lightbox signals for a catalog of `len` items. Lightbox
/// events are forwarded to `on_event`.
pub fn use_lightbox(
    len: usize,
    config: &GalleryConfig,
    on_event: Option<EventHandler<GalleryEvent>>,
) -> LightboxHandle {
    let config = config.clone();
    LightboxHandle {
        controller: use_signal(move || {
            let mut controller = LightboxController::new(len, &config);
            if let Some(handler) = on_event {
                controller
                    .events_mut()
                    .subscribe(move |event| handler.call(*event));
            }
            controller
        }),
        surface: use_signal(DomSurface::new),
        tween: use_signal(|| None),
        arrow: use_signal(ArrowHint::default),
        gestures: use_signal(|| false),
        running: use_signal(|| None),
    }
}

impl LightboxHandle {
    /// Thumbnail activation.
    pub fn open(mut self, index: usize) {
        let commands = {
            let mut surface = self.surface.write();
            self.controller.write().open(index, &mut *surface)
        };
        self.execute(commands);
    }

    pub fn navigate(mut self, target: NavTarget) {
        let commands = self.controller.write().apply_navigation(target);
        self.execute(commands);
    }

    pub fn close(mut self) {
        let commands = self.controller.write().request_close();
        self.execute(commands);
    }

    /// The mounted content for `index` has laid out at `size`.
    pub fn content_measured(mut self, index: usize, size: Size) {
        let commands = self.controller.write().content_measured(index, size);
        self.execute(commands);
    }

    /// The mounted content for `index` could not be measured.
    pub fn content_measure_failed(mut self, index: usize) {
        let commands = self.controller.write().content_measure_failed(index);
        self.execute(commands);
    }

    fn execute(mut self, commands: Vec<LightboxCommand>) {
        for command in commands {
            tracing::trace!(?command, "lightbox command");
            match command {
                LightboxCommand::RunStep(ticket) => {
                    // A step arriving from outside the timer task (close
                    // mid-chain) supersedes whatever is still ticking.
                    if let Some(stale) = self.running.write().take() {
                        stale.cancel();
                    }
                    self.tween.set(None);
                    let task = spawn(async move {
                        let mut follow_up = Vec::new();
                        let runner = TimerRunner::new(self.tween);
                        run_chain(ticket, &runner, |done| {
                            let mut surface = self.surface.write();
                            let (advance, commands) =
                                self.controller.write().advance(done, &mut *surface);
                            follow_up.extend(commands);
                            advance
                        })
                        .await;
                        self.running.set(None);
                        self.execute(follow_up);
                    });
                    self.running.set(Some(task));
                }
                LightboxCommand::UnmountContent | LightboxCommand::RemoveFrame => {
                    self.arrow.set(ArrowHint::Hidden);
                }
                LightboxCommand::SubscribeGestures => self.gestures.set(true),
                LightboxCommand::UnsubscribeGestures => self.gestures.set(false),
                LightboxCommand::ShowOverlay { .. }
                | LightboxCommand::ShowFrame { .. }
                | LightboxCommand::MountContent { .. }
                | LightboxCommand::RemoveOverlay => {}
            }
        }
    }
}
