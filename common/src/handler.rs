//! [`Handler`] abstractions.

use std::future::Future;

/// Handler of some operation described by its `Args`.
///
/// Both [`Service`] operations and infrastructure backends are expressed as
/// [`Handler`] implementations, so a command may require from its backend only
/// the exact operations it performs.
///
/// [`Service`]: https://en.wikipedia.org/wiki/Domain-driven_design
pub trait Handler<Args = ()> {
    /// Type of a successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
