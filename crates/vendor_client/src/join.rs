use std::{future::Future, pin::pin};

use futures::future::{select, Either};

/// Awaits two fallible futures concurrently, succeeding only if both do.
///
/// The first failure to settle is returned immediately and the other future
/// is dropped unfinished. When both settle with failures in the same poll,
/// the failure from `a` is returned.
pub async fn join_all_or_nothing<A, B, T, U, E>(a: A, b: B) -> Result<(T, U), E>
where
    A: Future<Output = Result<T, E>>,
    B: Future<Output = Result<U, E>>,
{
    let a = pin!(a);
    let b = pin!(b);

    match select(a, b).await {
        Either::Left((Ok(a_value), b_pending)) => Ok((a_value, b_pending.await?)),
        Either::Left((Err(err), _)) => Err(err),
        Either::Right((Ok(b_value), a_pending)) => Ok((a_pending.await?, b_value)),
        Either::Right((Err(err), _)) => Err(err),
    }
}

#[cfg(test)]
#[path = "tests/join_tests.rs"]
mod tests;
