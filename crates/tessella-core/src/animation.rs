//! Chained, non-overlapping transition steps.
//!
//! A chain is a fixed ordered list of [`Step`]s. The [`TransitionAnimator`]
//! releases step `k + 1` only after step `k` has been reported complete
//! through its [`StepTicket`], and at most one chain exists at a time.
//! Cancelling drops the remaining steps; tickets issued before the cancel
//! are recognised as stale and ignored.
//!
//! The animator itself never waits. Hosts either drive it by hand
//! (start a step, wait for the visual transition, call
//! [`complete`](TransitionAnimator::complete)) or use [`run_chain`] with a
//! [`StepRunner`].

use std::future::Future;
use std::time::Duration;

/// Overlay opacity once fully faded in.
pub const OVERLAY_OPACITY: f64 = 0.9;

/// Overlay fade in/out.
pub const OVERLAY_FADE: Duration = Duration::from_millis(500);

/// Frame width and height morphs.
pub const MORPH: Duration = Duration::from_millis(250);

/// Content fade-out before a navigation swap.
pub const CONTENT_FADE_OUT: Duration = Duration::from_millis(250);

/// Content fade-in at the end of a reveal.
pub const CONTENT_FADE_IN: Duration = Duration::from_millis(500);

/// Which visual property a step interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    OverlayOpacity,
    /// Frame width; the frame's left edge moves by half the change so the
    /// frame stays centred.
    FrameWidth,
    /// Frame height; the top edge moves by half the change.
    FrameHeight,
    ContentOpacity,
}

/// One property interpolation over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub property: AnimatedProperty,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl Step {
    #[must_use]
    pub const fn new(property: AnimatedProperty, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            property,
            from,
            to,
            duration,
        }
    }

    /// Linear interpolation; `progress` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn value_at(&self, progress: f64) -> f64 {
        let t = progress.clamp(0.0, 1.0);
        (self.to - self.from).mul_add(t, self.from)
    }
}

/// What a chain is for, so completion can be routed to the right handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPurpose {
    /// Overlay fade-in when the lightbox opens.
    OverlayIn,
    /// Width morph, height morph, content fade-in.
    Reveal,
    /// Content fade-out before switching items.
    ContentOut,
    /// Overlay fade-out when the lightbox closes.
    OverlayOut,
}

/// Handle for the step currently allowed to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTicket {
    chain: u64,
    position: usize,
    /// The step to perform.
    pub step: Step,
}

/// Result of reporting a step complete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// The chain continues with this step.
    Next(StepTicket),
    /// That was the last step of a chain with this purpose.
    Finished(ChainPurpose),
    /// The ticket does not belong to the active step (cancelled or
    /// already completed); nothing happened.
    Stale,
}

/// Errors when starting a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    /// Another chain is still running.
    #[error("a {0:?} chain is already running")]
    Busy(ChainPurpose),

    /// A chain needs at least one step.
    #[error("animation chain has no steps")]
    EmptyChain,
}

#[derive(Debug, Clone)]
struct ActiveChain {
    id: u64,
    purpose: ChainPurpose,
    steps: Vec<Step>,
    position: usize,
}

impl ActiveChain {
    fn ticket(&self) -> StepTicket {
        StepTicket {
            chain: self.id,
            position: self.position,
            step: self.steps[self.position],
        }
    }
}

/// Sequencer that admits one chain and one step at a time.
#[derive(Debug, Clone, Default)]
pub struct TransitionAnimator {
    active: Option<ActiveChain>,
    next_id: u64,
}

impl TransitionAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain and return the ticket for its first step.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::Busy`] while another chain is active and
    /// [`AnimationError::EmptyChain`] for an empty step list.
    pub fn start(
        &mut self,
        purpose: ChainPurpose,
        steps: Vec<Step>,
    ) -> Result<StepTicket, AnimationError> {
        if let Some(active) = &self.active {
            return Err(AnimationError::Busy(active.purpose));
        }
        if steps.is_empty() {
            return Err(AnimationError::EmptyChain);
        }
        let id = self.next_id;
        self.next_id += 1;
        let chain = ActiveChain {
            id,
            purpose,
            steps,
            position: 0,
        };
        let ticket = chain.ticket();
        tracing::trace!(?purpose, steps = chain.steps.len(), "chain started");
        self.active = Some(chain);
        Ok(ticket)
    }

    /// Report that the step behind `ticket` has settled.
    pub fn complete(&mut self, ticket: StepTicket) -> Advance {
        let Some(active) = &mut self.active else {
            return Advance::Stale;
        };
        if active.id != ticket.chain || active.position != ticket.position {
            return Advance::Stale;
        }
        active.position += 1;
        if active.position < active.steps.len() {
            return Advance::Next(active.ticket());
        }
        let purpose = active.purpose;
        self.active = None;
        Advance::Finished(purpose)
    }

    /// Abandon the active chain, returning its purpose if there was one.
    pub fn cancel(&mut self) -> Option<ChainPurpose> {
        let purpose = self.active.take().map(|c| c.purpose);
        if let Some(purpose) = purpose {
            tracing::debug!(?purpose, "chain cancelled");
        }
        purpose
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.active.is_some()
    }
}

/// Performs one step and resolves once its visual state has settled.
pub trait StepRunner {
    fn run(&self, step: &Step) -> impl Future<Output = ()>;
}

/// Run a chain from `first` to the end, one step at a time.
///
/// `complete` reports each finished step to whoever owns the animator
/// (usually a thin wrapper around [`TransitionAnimator::complete`]) and is
/// never called across an await, so other handlers may cancel the chain
/// between steps. Returns [`Advance::Finished`] when the chain ran to
/// completion, or [`Advance::Stale`] when it was cancelled.
pub async fn run_chain<R, F>(first: StepTicket, runner: &R, mut complete: F) -> Advance
where
    R: StepRunner,
    F: FnMut(StepTicket) -> Advance,
{
    let mut ticket = first;
    loop {
        runner.run(&ticket.step).await;
        let advance = complete(ticket);
        match advance {
            Advance::Next(next) => ticket = next,
            Advance::Finished(_) | Advance::Stale => return advance,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;

    fn reveal_steps() -> Vec<Step> {
        vec![
            Step::new(AnimatedProperty::FrameWidth, 20.0, 300.0, MORPH),
            Step::new(AnimatedProperty::FrameHeight, 20.0, 200.0, MORPH),
            Step::new(AnimatedProperty::ContentOpacity, 0.0, 1.0, CONTENT_FADE_IN),
        ]
    }

    #[test]
    fn value_at_interpolates_and_clamps() {
        let step = Step::new(AnimatedProperty::OverlayOpacity, 0.0, 0.9, OVERLAY_FADE);
        assert!((step.value_at(0.5) - 0.45).abs() < 1e-9);
        assert!((step.value_at(-1.0)).abs() < 1e-9);
        assert!((step.value_at(2.0) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn steps_are_released_in_order() {
        let mut animator = TransitionAnimator::new();
        let first = animator.start(ChainPurpose::Reveal, reveal_steps()).unwrap();
        assert_eq!(first.step.property, AnimatedProperty::FrameWidth);

        let Advance::Next(second) = animator.complete(first) else {
            unreachable!("expected a second step");
        };
        assert_eq!(second.step.property, AnimatedProperty::FrameHeight);

        // Completing the first ticket again does nothing.
        assert_eq!(animator.complete(first), Advance::Stale);

        let Advance::Next(third) = animator.complete(second) else {
            unreachable!("expected a third step");
        };
        assert_eq!(
            animator.complete(third),
            Advance::Finished(ChainPurpose::Reveal)
        );
        assert!(!animator.is_busy());
    }

    #[test]
    fn second_chain_is_refused_while_busy() {
        let mut animator = TransitionAnimator::new();
        animator.start(ChainPurpose::Reveal, reveal_steps()).unwrap();
        assert_eq!(
            animator.start(ChainPurpose::ContentOut, reveal_steps()),
            Err(AnimationError::Busy(ChainPurpose::Reveal))
        );
    }

    #[test]
    fn empty_chain_is_refused() {
        let mut animator = TransitionAnimator::new();
        assert_eq!(
            animator.start(ChainPurpose::Reveal, Vec::new()),
            Err(AnimationError::EmptyChain)
        );
    }

    #[test]
    fn cancel_makes_outstanding_ticket_stale() {
        let mut animator = TransitionAnimator::new();
        let ticket = animator.start(ChainPurpose::Reveal, reveal_steps()).unwrap();
        assert_eq!(animator.cancel(), Some(ChainPurpose::Reveal));
        assert_eq!(animator.complete(ticket), Advance::Stale);

        // A fresh chain after cancel does not accept the old ticket.
        animator
            .start(ChainPurpose::OverlayOut, reveal_steps())
            .unwrap();
        assert_eq!(animator.complete(ticket), Advance::Stale);
    }

    struct Recorder {
        seen: RefCell<Vec<AnimatedProperty>>,
        cancel_after: Option<(usize, Rc<RefCell<TransitionAnimator>>)>,
    }

    impl StepRunner for Recorder {
        async fn run(&self, step: &Step) {
            self.seen.borrow_mut().push(step.property);
            if let Some((after, animator)) = &self.cancel_after
                && self.seen.borrow().len() == *after
            {
                animator.borrow_mut().cancel();
            }
        }
    }

    #[test]
    fn run_chain_runs_every_step() {
        let animator = RefCell::new(TransitionAnimator::new());
        let first = animator
            .borrow_mut()
            .start(ChainPurpose::Reveal, reveal_steps())
            .unwrap();
        let runner = Recorder {
            seen: RefCell::new(Vec::new()),
            cancel_after: None,
        };

        let outcome = block_on(run_chain(first, &runner, |ticket| {
            animator.borrow_mut().complete(ticket)
        }));

        assert_eq!(outcome, Advance::Finished(ChainPurpose::Reveal));
        assert_eq!(
            *runner.seen.borrow(),
            [
                AnimatedProperty::FrameWidth,
                AnimatedProperty::FrameHeight,
                AnimatedProperty::ContentOpacity,
            ]
        );
    }

    #[test]
    fn run_chain_stops_when_cancelled_mid_flight() {
        let animator = Rc::new(RefCell::new(TransitionAnimator::new()));
        let first = animator
            .borrow_mut()
            .start(ChainPurpose::Reveal, reveal_steps())
            .unwrap();
        let runner = Recorder {
            seen: RefCell::new(Vec::new()),
            cancel_after: Some((1, Rc::clone(&animator))),
        };

        let outcome = block_on(run_chain(first, &runner, |ticket| {
            animator.borrow_mut().complete(ticket)
        }));

        assert_eq!(outcome, Advance::Stale);
        assert_eq!(*runner.seen.borrow(), [AnimatedProperty::FrameWidth]);
        assert!(!animator.borrow().is_busy());
    }
}
