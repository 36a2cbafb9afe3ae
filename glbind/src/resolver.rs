//! The symbol resolution seam between the binder and the platform.

use std::ffi::{c_void, CStr};

/// Maps a native symbol name to its address in the current GL context.
///
/// A resolver must return null for symbols it can't find rather than
/// panicking; the binder treats null as "not found". It may be called any
/// number of times and is only borrowed for the duration of a single
/// binding pass.
///
/// Every `FnMut(&CStr) -> *const c_void` implements this trait, so a context
/// provider's `get_proc_address` can be passed as a closure:
///
/// ```no_run
/// # use std::ffi::{c_void, CStr};
/// # fn get_proc_address(_: &CStr) -> *const c_void { std::ptr::null() }
/// let bindings = glbind::GlBindings::load_with(|symbol: &CStr| get_proc_address(symbol));
/// ```
pub trait Resolver {
    /// Look up `symbol`, returning null if it's not available.
    fn resolve(&mut self, symbol: &CStr) -> *const c_void;
}

impl<F> Resolver for F
where
    F: FnMut(&CStr) -> *const c_void,
{
    #[inline]
    fn resolve(&mut self, symbol: &CStr) -> *const c_void {
        self(symbol)
    }
}
