//! Lazily resolved, memoized views over a parsed [`Document`](crate::parse::spec::Document).
//!
//! Every wrapper resolves a value the first time it is asked for and hands out
//! the cached result afterwards. The caches use [`std::cell::OnceCell`], so
//! wrappers are meant for single-threaded use.

pub mod security;
pub mod wrapper;

use std::cell::OnceCell;

use crate::error::ResolveError;
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::ref_resolve::RefResolver;

pub use security::SecurityInfo;
pub use wrapper::{OperationWrapper, PathWrapper, SpecWrapper};

/// Fill `cell` from a fallible initializer. Failures are not cached.
pub(crate) fn memoize<T>(
    cell: &OnceCell<T>,
    init: impl FnOnce() -> Result<T, ResolveError>,
) -> Result<&T, ResolveError> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

/// Resolve `$ref` entries of a parameter list, keeping declaration order.
pub fn resolve_parameters(
    resolver: RefResolver<'_>,
    params: &[ParameterOrRef],
) -> Result<Vec<Parameter>, ResolveError> {
    params
        .iter()
        .map(|p| match p {
            ParameterOrRef::Parameter(param) => Ok(param.clone()),
            ParameterOrRef::Ref { ref_path } => resolver.resolve_as(ref_path),
        })
        .collect()
}
