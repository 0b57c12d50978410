//! Attempt budgets for busy-wait polling loops.
//!
//! Flash chips report erase/program completion by changing what a read
//! returns, so the protocol layer spins on read commands. A chip that
//! never reaches the expected value must not hang the caller; every
//! polling loop takes a [`PollPolicy`] and surfaces
//! [`Error::Timeout`](crate::Error::Timeout) when the budget runs out.

use crate::error::{Error, Result};

/// Maximum number of poll iterations before an operation is declared hung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
}

impl PollPolicy {
    /// Create a policy with an explicit attempt budget.
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// The attempt budget.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        // Generous enough for the slowest erase cycle on real hardware.
        Self::new(500_000)
    }
}

/// Run `step` until it yields a value or the budget is exhausted.
///
/// `step` returns `Ok(Some(v))` when the condition is met, `Ok(None)` to
/// keep polling, and `Err` to abort immediately (transport failures are
/// never retried). The global interrupt checker is honored between
/// attempts.
pub fn poll_until<T>(
    policy: PollPolicy,
    what: &str,
    mut step: impl FnMut() -> Result<Option<T>>,
) -> Result<T> {
    for _ in 0..policy.max_attempts() {
        if crate::is_interrupt_requested() {
            return Err(Error::Interrupted);
        }
        if let Some(value) = step()? {
            return Ok(value);
        }
    }
    Err(Error::Timeout(format!(
        "{what} still busy after {} attempts",
        policy.max_attempts()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_ready_value() {
        let mut calls = 0;
        let value = poll_until(PollPolicy::new(10), "test", || {
            calls += 1;
            Ok(if calls == 3 { Some(calls) } else { None })
        })
        .unwrap();
        assert_eq!(value, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn exhausted_budget_is_timeout() {
        let result: Result<()> = poll_until(PollPolicy::new(5), "stuck", || Ok(None));
        assert!(matches!(result, Err(Error::Timeout(_))));
    }

    #[test]
    fn interrupt_aborts_polling() {
        crate::test_set_interrupted(true);
        let result: Result<()> = poll_until(PollPolicy::new(1000), "test", || Ok(None));
        crate::test_set_interrupted(false);
        assert!(matches!(result, Err(Error::Interrupted)));
    }

    #[test]
    fn step_error_aborts_immediately() {
        let mut calls = 0;
        let result: Result<()> = poll_until(PollPolicy::new(10), "test", || {
            calls += 1;
            Err(Error::Unimplemented("boom".into()))
        });
        assert!(matches!(result, Err(Error::Unimplemented(_))));
        assert_eq!(calls, 1);
    }
}
