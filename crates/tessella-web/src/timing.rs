//! Animation steps driven by browser timers.

use std::time::Duration;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tessella_core::{Step, StepRunner};
use web_time::Instant;

/// Delay between progress updates, roughly one display frame.
const FRAME_MS: u32 = 16;

/// How far the running step has got.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTween {
    pub step: Step,
    /// 0.0 at the start, 1.0 once the step's duration has elapsed.
    pub progress: f64,
}

/// [`StepRunner`] that publishes per-frame progress into a signal and
/// returns once the step's duration has elapsed.
#[derive(Clone, Copy)]
pub struct TimerRunner {
    tween: Signal<Option<FrameTween>>,
}

impl TimerRunner {
    #[must_use]
    pub const fn new(tween: Signal<Option<FrameTween>>) -> Self {
        Self { tween }
    }
}

impl StepRunner for TimerRunner {
    async fn run(&self, step: &Step) {
        let mut tween = self.tween;
        let step = *step;
        let started = Instant::now();
        loop {
            let progress = progress_after(started.elapsed(), step.duration);
            tween.set(Some(FrameTween { step, progress }));
            if progress >= 1.0 {
                break;
            }
            TimeoutFuture::new(FRAME_MS).await;
        }
    }
}

fn progress_after(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0)
    }
}
