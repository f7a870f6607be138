//! Frame loop bookkeeping. The scheduler never owns a callback; it only
//! tracks the single outstanding frame request and decides what a fired
//! frame is allowed to do.

use crate::config::SuspendPolicy;
use crate::host::Host;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    /// Simulate and paint, then request the next frame.
    Step,
    /// Do nothing but keep the loop alive.
    Skip,
    /// End this loop; a gate transition starts a new one.
    Stop,
}

#[derive(Debug)]
pub struct FrameScheduler<F> {
    policy: SuspendPolicy,
    pending: Option<F>,
}

impl<F: Copy + Eq + std::fmt::Debug> FrameScheduler<F> {
    pub fn new(policy: SuspendPolicy) -> Self {
        Self {
            policy,
            pending: None,
        }
    }

    pub fn policy(&self) -> SuspendPolicy {
        self.policy
    }

    /// A frame request is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// At most one request is ever outstanding.
    pub fn request<H: Host<Frame = F>>(&mut self, host: &mut H) {
        if self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    pub fn cancel<H: Host<Frame = F>>(&mut self, host: &mut H) {
        if let Some(frame) = self.pending.take() {
            host.cancel_frame(frame);
        }
    }

    /// Consume the outstanding request when its callback runs. Returns false
    /// for a callback nothing was waiting on.
    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn decide(&self, gate_open: bool) -> FrameAction {
        match (gate_open, self.policy) {
            (true, _) => FrameAction::Step,
            (false, SuspendPolicy::SkipFrame) => FrameAction::Skip,
            (false, SuspendPolicy::CancelLoop) => FrameAction::Stop,
        }
    }

    /// React to a gate transition. Only cancel-loop scheduling cares: it
    /// drops the request on close and starts a fresh loop on open.
    pub fn sync<H: Host<Frame = F>>(&mut self, gate_open: bool, host: &mut H) {
        if self.policy != SuspendPolicy::CancelLoop {
            return;
        }
        if gate_open {
            self.request(host);
        } else {
            self.cancel(host);
        }
    }
}
