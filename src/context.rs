//! Cancellation and deadline tokens for waiting acquisitions.

use crate::error::StlError;
use crossbeam_channel::{Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A token that tells a waiting [Vault](crate::Vault) to give up.
///
/// Clones share state: cancelling any clone fires all of them. A token with a
/// deadline also fires once the deadline has passed.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<TokenInner>,
}

struct TokenInner {
    // Dropped on cancel, which disconnects `done`.
    cancel: Mutex<Option<Sender<()>>>,
    done: Receiver<()>,
    deadline: Option<Instant>,
    cause: Mutex<Option<StlError>>,
}

impl CancelToken {
    /// A token that never fires.
    pub fn background() -> CancelToken {
        CancelToken::build(None, crossbeam_channel::never(), None)
    }

    /// A token that fires when [CancelToken::cancel] is called.
    pub fn new() -> CancelToken {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        CancelToken::build(Some(sender), receiver, None)
    }

    /// A cancellable token that also fires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> CancelToken {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        CancelToken::build(Some(sender), receiver, Some(deadline))
    }

    pub fn with_timeout(timeout: Duration) -> CancelToken {
        CancelToken::with_deadline(Instant::now() + timeout)
    }

    fn build(
        cancel: Option<Sender<()>>,
        done: Receiver<()>,
        deadline: Option<Instant>,
    ) -> CancelToken {
        CancelToken {
            inner: Arc::new(TokenInner {
                cancel: Mutex::new(cancel),
                done,
                deadline,
                cause: Mutex::new(None),
            }),
        }
    }

    /// Fire the token. Has no effect on a background token or on a token that
    /// already fired.
    pub fn cancel(&self) {
        let mut sender = self
            .inner
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if sender.is_none() {
            return;
        }
        {
            let mut cause = self
                .inner
                .cause
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if cause.is_none() {
                *cause = Some(if self.deadline_passed() {
                    StlError::DeadlineExceeded
                } else {
                    StlError::Cancelled
                });
            }
        }
        sender.take();
    }

    /// Channel that disconnects once [CancelToken::cancel] is called.
    /// Deadlines are not reflected here, see [CancelToken::deadline].
    pub fn done(&self) -> Receiver<()> {
        self.inner.done.clone()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Channel that delivers a message at the deadline, or never.
    pub(crate) fn deadline_channel(&self) -> Receiver<Instant> {
        match self.inner.deadline {
            Some(deadline) => crossbeam_channel::at(deadline),
            None => crossbeam_channel::never(),
        }
    }

    /// The reason the token fired, `None` while it has not.
    pub fn err(&self) -> Option<StlError> {
        let mut cause = self
            .inner
            .cause
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if cause.is_none() && self.deadline_passed() {
            *cause = Some(StlError::DeadlineExceeded);
        }
        *cause
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    fn deadline_passed(&self) -> bool {
        matches!(self.inner.deadline, Some(deadline) if Instant::now() >= deadline)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        CancelToken::background()
    }
}

#[cfg(test)]
mod tests {
    use crate::context::CancelToken;
    use crate::error::StlError;
    use crossbeam_channel::TryRecvError;
    use std::time::{Duration, Instant};

    #[test]
    fn test_background_never_fires() {
        let token = CancelToken::background();
        token.cancel();
        assert_eq!(token.err(), None);
        assert_eq!(token.done().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_cancel() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_done());
        assert_eq!(token.done().try_recv(), Err(TryRecvError::Empty));

        clone.cancel();
        assert_eq!(token.err(), Some(StlError::Cancelled));
        assert_eq!(token.done().try_recv(), Err(TryRecvError::Disconnected));

        // cancelling twice keeps the first cause
        token.cancel();
        assert_eq!(clone.err(), Some(StlError::Cancelled));
    }

    #[test]
    fn test_deadline() {
        let token = CancelToken::with_timeout(Duration::from_millis(20));
        assert_eq!(token.err(), None);
        let fired = token.deadline_channel().recv().unwrap();
        assert!(fired >= token.deadline().unwrap());
        assert_eq!(token.err(), Some(StlError::DeadlineExceeded));

        // cancel after the deadline does not change the cause
        token.cancel();
        assert_eq!(token.err(), Some(StlError::DeadlineExceeded));
    }

    #[test]
    fn test_cancel_before_deadline() {
        let token = CancelToken::with_deadline(Instant::now() + Duration::from_secs(60));
        token.cancel();
        assert_eq!(token.err(), Some(StlError::Cancelled));
    }
}
