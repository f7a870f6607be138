//! Toast notification queue: entries expire on their own after a fixed
//! lifetime and can be dismissed early. Timing is driven by the caller
//! passing `now`, so the queue itself owns no timers.

use crate::constants::*;
use crate::error::FxError;
use instant::Instant;
use rand::Rng;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Success,
    Error,
    Info,
    Warning,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Info => "info",
            Kind::Warning => "warning",
        }
    }
}

impl FromStr for Kind {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Kind::Success),
            "error" => Ok(Kind::Error),
            "info" => Ok(Kind::Info),
            "warning" | "warn" => Ok(Kind::Warning),
            other => Err(FxError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: String,
    pub kind: Kind,
    pub title: String,
    pub message: String,
    pub exiting: bool,
    exit_at: Instant,
    remove_at: Instant,
}

impl Notification {
    pub fn remove_at(&self) -> Instant {
        self.remove_at
    }
}

/// What a sweep changed.
#[derive(Debug, Default, PartialEq)]
pub struct Sweep {
    pub exiting: Vec<String>,
    pub removed: Vec<Notification>,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.exiting.is_empty() && self.removed.is_empty()
    }
}

pub struct NotificationQueue<R: Rng> {
    entries: Vec<Notification>,
    rng: R,
}

impl<R: Rng> NotificationQueue<R> {
    pub fn new(rng: R) -> Self {
        Self {
            entries: Vec::new(),
            rng,
        }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and return its id.
    pub fn add(&mut self, kind: Kind, title: &str, message: &str, now: Instant) -> String {
        let id = self.fresh_id();
        self.entries.push(Notification {
            id: id.clone(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            exiting: false,
            exit_at: now + Duration::from_millis(TOAST_EXIT_START_MS),
            remove_at: now + Duration::from_millis(TOAST_LIFETIME_MS),
        });
        log::debug!("[toast] add {} ({})", id, kind.as_str());
        id
    }

    /// Start the exit now; the entry goes away after the exit duration.
    /// Returns false for an unknown id.
    pub fn dismiss(&mut self, id: &str, now: Instant) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.exiting = true;
                n.exit_at = n.exit_at.min(now);
                n.remove_at = n.remove_at.min(now + Duration::from_millis(TOAST_EXIT_MS));
                true
            }
            None => false,
        }
    }

    /// Remove immediately. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Notification> {
        let idx = self.entries.iter().position(|n| n.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Apply every deadline that has passed at `now`.
    pub fn sweep(&mut self, now: Instant) -> Sweep {
        let mut out = Sweep::default();
        for n in &mut self.entries {
            if !n.exiting && now >= n.exit_at {
                n.exiting = true;
                out.exiting.push(n.id.clone());
            }
        }
        let (gone, keep): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|n| now >= n.remove_at);
        self.entries = keep;
        out.removed = gone;
        out
    }

    /// Time until the next exit or removal deadline.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.entries
            .iter()
            .flat_map(|n| {
                let exit = (!n.exiting).then_some(n.exit_at);
                exit.into_iter().chain(std::iter::once(n.remove_at))
            })
            .min()
            .map(|at| if at > now { at - now } else { Duration::ZERO })
    }

    fn fresh_id(&mut self) -> String {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        loop {
            let id: String = (0..TOAST_ID_LEN)
                .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
                .collect();
            if !self.entries.iter().any(|n| n.id == id) {
                return id;
            }
        }
    }
}
