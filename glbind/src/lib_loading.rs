//! Library loading routines.

use std::ffi::{c_char, c_void, CStr, CString};
use std::fmt;
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::Lazy;

#[cfg(windows)]
use libloading::os::windows::{Library as WinLibrary, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS};

use crate::error::{Error, ErrorKind, Result};
use crate::resolver::Resolver;

/// The platform `*GetProcAddress` entry point.
type GetProcAddress = unsafe extern "system" fn(*const c_char) -> *const c_void;

#[cfg(free_unix)]
const DEFAULT_PATHS: &[&str] = &["libGL.so.1", "libGL.so"];
#[cfg(free_unix)]
const DEFAULT_PROC_ADDRESS: Option<&str> = Some("glXGetProcAddressARB");

#[cfg(windows)]
const DEFAULT_PATHS: &[&str] = &["opengl32.dll"];
#[cfg(windows)]
const DEFAULT_PROC_ADDRESS: Option<&str> = Some("wglGetProcAddress");

#[cfg(macos_platform)]
const DEFAULT_PATHS: &[&str] = &["/System/Library/Frameworks/OpenGL.framework/OpenGL"];
#[cfg(ios_platform)]
const DEFAULT_PATHS: &[&str] = &["/System/Library/Frameworks/OpenGLES.framework/OpenGLES"];
#[cfg(apple)]
const DEFAULT_PROC_ADDRESS: Option<&str> = None;

#[cfg(android_platform)]
const DEFAULT_PATHS: &[&str] = &["libGLESv2.so"];
#[cfg(android_platform)]
const DEFAULT_PROC_ADDRESS: Option<&str> = None;

#[cfg(not(any(free_unix, windows, apple, android_platform)))]
const DEFAULT_PATHS: &[&str] = &[];
#[cfg(not(any(free_unix, windows, apple, android_platform)))]
const DEFAULT_PROC_ADDRESS: Option<&str> = None;

const NO_LIBRARY_PATHS: &str = "no GL library paths to load from";

/// The resolver opened from the platform defaults, shared by the process.
static SYSTEM: Lazy<Option<LibraryResolver>> =
    Lazy::new(|| unsafe { LibraryResolverBuilder::new().build() }.ok());

/// Configuration for a [`LibraryResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryResolverBuilder {
    paths: Vec<String>,
    proc_address: Option<String>,
}

impl LibraryResolverBuilder {
    /// Start from the platform defaults.
    pub fn new() -> Self {
        Self {
            paths: DEFAULT_PATHS.iter().map(|path| path.to_string()).collect(),
            proc_address: DEFAULT_PROC_ADDRESS.map(str::to_owned),
        }
    }

    /// Candidate library paths, tried in order.
    pub fn with_library_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// The `*GetProcAddress` export used for symbols the library doesn't
    /// export directly, like extension entry points.
    pub fn with_proc_address_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.proc_address = Some(symbol.into());
        self
    }

    /// Only resolve symbols exported by the library.
    pub fn without_proc_address(mut self) -> Self {
        self.proc_address = None;
        self
    }

    /// Open the first library that loads.
    ///
    /// An empty path list is reported as [`ErrorKind::NotSupported`].
    ///
    /// # Safety
    ///
    /// Loading a library runs its initialization routines, the paths must
    /// point to a GL implementation.
    pub unsafe fn build(self) -> Result<LibraryResolver> {
        if self.paths.is_empty() {
            return Err(ErrorKind::NotSupported(NO_LIBRARY_PATHS).into());
        }

        for path in &self.paths {
            #[cfg(windows)]
            let lib = unsafe { WinLibrary::load_with_flags(path, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS) }
                .map(From::from);

            #[cfg(not(windows))]
            let lib = unsafe { Library::new(path) };

            let lib = match lib {
                Ok(lib) => lib,
                Err(err) => {
                    tracing::debug!(%path, %err, "failed to open GL library");
                    continue;
                },
            };

            let proc_address = self.proc_address.as_deref().and_then(|symbol| {
                let symbol = CString::new(symbol).ok()?;
                // SAFETY: the symbol is copied out, the library is kept alive
                // by the resolver.
                unsafe { lib.get::<GetProcAddress>(symbol.as_bytes_with_nul()) }.ok().map(|sym| *sym)
            });

            tracing::debug!(%path, fallback = proc_address.is_some(), "opened GL library");
            return Ok(LibraryResolver { proc_address, lib: Arc::new(lib) });
        }

        Err(Error::new(None, Some(self.paths.join(", ")), ErrorKind::LibraryNotFound))
    }
}

impl Default for LibraryResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Resolver`] looking symbols up in a dynamically opened GL library.
///
/// Symbols exported by the library are preferred; the rest go through the
/// platform `*GetProcAddress`, when there's one.
#[derive(Clone)]
pub struct LibraryResolver {
    proc_address: Option<GetProcAddress>,
    lib: Arc<Library>,
}

impl LibraryResolver {
    /// The resolver for the platform's default GL library.
    ///
    /// The library is opened once per process.
    ///
    /// Targets without a default GL library report
    /// [`ErrorKind::NotSupported`].
    pub fn system() -> Result<Self> {
        if DEFAULT_PATHS.is_empty() {
            return Err(ErrorKind::NotSupported(NO_LIBRARY_PATHS).into());
        }

        SYSTEM.as_ref().cloned().ok_or_else(|| {
            Error::new(None, Some(DEFAULT_PATHS.join(", ")), ErrorKind::LibraryNotFound)
        })
    }

    /// Whether symbols missing from the library's exports can still be
    /// resolved through `*GetProcAddress`.
    pub fn has_proc_address(&self) -> bool {
        self.proc_address.is_some()
    }

    fn lookup(&self, symbol: &CStr) -> *const c_void {
        // Check if the symbol is available in the library directly. If it is,
        // just return it.
        if let Ok(sym) = unsafe { self.lib.get::<*const c_void>(symbol.to_bytes_with_nul()) } {
            if !sym.is_null() {
                return *sym;
            }
        }

        // The symbol was not available in the library, so ask the platform
        // loader for it. Core entry points past GL 1.1 are only available this
        // way on some platforms.
        match self.proc_address {
            Some(proc_address) => normalize(unsafe { proc_address(symbol.as_ptr()) }),
            None => std::ptr::null(),
        }
    }
}

impl Resolver for LibraryResolver {
    fn resolve(&mut self, symbol: &CStr) -> *const c_void {
        self.lookup(symbol)
    }
}

impl fmt::Debug for LibraryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryResolver").field("proc_address", &self.has_proc_address()).finish()
    }
}

/// `wglGetProcAddress` may return small integers instead of null on failure.
#[cfg(windows)]
fn normalize(ptr: *const c_void) -> *const c_void {
    match ptr as isize {
        -1 | 1 | 2 | 3 => std::ptr::null(),
        _ => ptr,
    }
}

#[cfg(not(windows))]
fn normalize(ptr: *const c_void) -> *const c_void {
    ptr
}
