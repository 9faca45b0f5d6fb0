use std::future::Future;

/// Outcome of a single attempt
pub enum Attempt<T> {
    Done(T),
    Retry,
}

/// Bounded retry without backoff.
///
/// `run` returns `Ok(None)` once `max_attempts` attempts all asked to retry;
/// the caller decides which terminal error that maps to. Errors from an
/// attempt abort immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    pub async fn run<T, E, F, Fut>(&self, mut attempt: F) -> Result<Option<T>, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Attempt<T>, E>>,
    {
        for n in 1..=self.max_attempts {
            match attempt(n).await? {
                Attempt::Done(value) => return Ok(Some(value)),
                Attempt::Retry => {
                    log::debug!("Attempt {n}/{} asked to retry", self.max_attempts);
                }
            }
        }
        Ok(None)
    }
}
