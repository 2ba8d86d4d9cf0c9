pub mod address;
pub mod itinerary;
pub mod raw;

use futures::future::{select, Either};
use std::future::Future;

/// Race `fut` against `deadline`; `None` when the deadline wins
pub async fn with_timeout<F, D>(fut: F, deadline: D) -> Option<F::Output>
where
    F: Future,
    D: Future<Output = ()>,
{
    futures::pin_mut!(fut);
    futures::pin_mut!(deadline);

    match select(fut, deadline).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}

/// Browser timer future resolving after `ms` milliseconds
#[must_use]
pub fn sleep_ms(ms: u32) -> gloo_timers::future::TimeoutFuture {
    gloo_timers::future::TimeoutFuture::new(ms)
}
