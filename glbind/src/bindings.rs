//! The resolver driven binder.

use std::ops::Deref;

use crate::capabilities::{Capabilities, Features};
use crate::error::{Error, ErrorKind, Result};
use crate::gl::{FnPtr, Functions};
use crate::resolver::Resolver;
use crate::version::{self, ContextInfo, Version};

/// The GL entry points bound for one context, along with the extensions that
/// context supports.
///
/// The bindings are owned by the caller, so every context, or every test, can
/// hold its own table. They're neither [`Send`] nor [`Sync`], since the
/// addresses are only valid for the context they were resolved against,
/// which is current on a single thread.
///
/// ```no_run
/// # use std::ffi::{c_void, CStr};
/// # fn get_proc_address(_: &CStr) -> *const c_void { std::ptr::null() }
/// use glbind::{gl, GlBindings};
///
/// let mut bindings = GlBindings::new();
/// bindings.initialize(|symbol: &CStr| get_proc_address(symbol)).unwrap();
///
/// if bindings.khr_debug() {
///     // Install a debug callback.
/// }
///
/// unsafe {
///     bindings.ClearColor(0.1, 0.1, 0.1, 1.0);
///     bindings.Clear(gl::COLOR_BUFFER_BIT);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GlBindings {
    fns: Functions,
    ready: bool,
    capabilities: Option<Capabilities>,
}

impl GlBindings {
    /// Create bindings where every entry point is unbound.
    pub const fn new() -> Self {
        Self { fns: Functions::unbound(), ready: false, capabilities: None }
    }

    /// Create the bindings and initialize them with `resolver`.
    pub fn load_with<R: Resolver>(resolver: R) -> Result<Self> {
        let mut bindings = Self::new();
        bindings.initialize(resolver)?;
        Ok(bindings)
    }

    /// Bind every entry point with `resolver` and collect the extensions
    /// supported by the current context.
    ///
    /// The binding stops at the first symbol the resolver has no address
    /// for, which is reported with [`ErrorKind::SymbolNotFound`]. On failure
    /// every entry point is left unbound and no capability is reported,
    /// even if a previous initialization succeeded.
    ///
    /// Calling this again re-resolves every entry point and rebuilds the
    /// capabilities from scratch.
    ///
    /// The context the resolver belongs to must be current on the calling
    /// thread, since `glGetIntegerv` and `glGetStringi` are called once the
    /// table is bound.
    pub fn initialize<R: Resolver>(&mut self, mut resolver: R) -> Result<()> {
        self.ready = false;
        self.capabilities = None;

        let mut fns = Functions::unbound();
        for (symbol, slot) in fns.slots_mut() {
            let ptr = resolver.resolve(symbol);
            if ptr.is_null() {
                let symbol = symbol.to_string_lossy();
                tracing::error!(%symbol, "failed to resolve GL entry point");
                self.fns = Functions::unbound();
                return Err(Error::symbol_not_found(&symbol));
            }

            tracing::trace!(symbol = %symbol.to_string_lossy(), ?ptr, "resolved GL entry point");
            *slot = FnPtr::new(ptr);
        }

        self.fns = fns;
        self.ready = true;
        tracing::debug!(count = crate::gl::SYMBOLS.len(), "bound GL entry points");

        // SAFETY: binding succeeded, so both query entry points are live.
        self.capabilities = Some(unsafe { Capabilities::query(&self.fns) });

        Ok(())
    }

    /// Whether the last initialization succeeded.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The bound entry points, [`None`] until initialization succeeds.
    #[inline]
    pub fn functions(&self) -> Option<&Functions> {
        self.ready.then_some(&self.fns)
    }

    /// The extensions reported by the context, [`None`] until
    /// initialization succeeds.
    #[inline]
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.capabilities.as_ref()
    }

    /// Whether the context reported `extension`.
    ///
    /// Unlike the per group accessors, this works for any extension name.
    /// Returns `false` until initialization succeeds.
    pub fn supports(&self, extension: &str) -> bool {
        self.capabilities.as_ref().is_some_and(|caps| caps.contains(extension))
    }

    /// The known capability groups supported by the context.
    pub fn features(&self) -> Features {
        self.capabilities.as_ref().map_or(Features::empty(), Capabilities::features)
    }

    pub(crate) fn capability_group(&self, extension: &str) -> bool {
        self.capabilities.as_ref().is_some_and(|caps| caps.group(extension))
    }

    /// The version of the context.
    ///
    /// The context must still be current on the calling thread.
    pub fn version(&self) -> Result<Version> {
        let fns = self.functions().ok_or(ErrorKind::NotInitialized)?;
        // SAFETY: the table is bound and its context is current.
        unsafe { version::query_version(fns) }
    }

    /// The version, vendor and renderer strings of the context.
    ///
    /// The context must still be current on the calling thread.
    pub fn context_info(&self) -> Result<ContextInfo> {
        let fns = self.functions().ok_or(ErrorKind::NotInitialized)?;
        // SAFETY: the table is bound and its context is current.
        unsafe { ContextInfo::query(fns) }
    }
}

impl Default for GlBindings {
    fn default() -> Self {
        Self::new()
    }
}

/// Gives access to the typed entry points.
///
/// Calling an entry point before initialization succeeded panics.
impl Deref for GlBindings {
    type Target = Functions;

    fn deref(&self) -> &Self::Target {
        &self.fns
    }
}
