//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of the `Args` operation.
///
/// Queries, data providers and background tasks are all expressed through
/// this single trait, differing only by the operation type they accept.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
