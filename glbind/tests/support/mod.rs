//! A fake GL driver, so the binder can run without a context.
//!
//! The state lives in a thread local, every test runs on its own thread and
//! gets a fresh driver.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::{c_void, CStr, CString};
use std::ptr;

use glbind::gl::{self, types::*};

#[derive(Default)]
struct Driver {
    extension_count: Option<GLint>,
    extensions: Vec<Option<CString>>,
    integer_version: Option<(GLint, GLint)>,
    version: Option<CString>,
    vendor: Option<CString>,
    renderer: Option<CString>,
    shading_language: Option<CString>,
    pending_error: GLenum,
    get_integerv_calls: usize,
    get_stringi_calls: usize,
}

thread_local! {
    static DRIVER: RefCell<Driver> = RefCell::new(Driver::default());
}

fn with_driver<T>(f: impl FnOnce(&mut Driver) -> T) -> T {
    DRIVER.with(|driver| f(&mut driver.borrow_mut()))
}

/// Report `names` from `glGetStringi(GL_EXTENSIONS, i)`.
pub fn set_extensions(names: &[&str]) {
    set_extension_entries(&names.iter().copied().map(Some).collect::<Vec<_>>());
}

/// Like [`set_extensions`], with `None` entries returning null.
pub fn set_extension_entries(names: &[Option<&str>]) {
    with_driver(|driver| {
        driver.extensions =
            names.iter().map(|name| name.map(|name| CString::new(name).unwrap())).collect();
    });
}

/// Override the count reported for `GL_NUM_EXTENSIONS`.
pub fn set_extension_count(count: GLint) {
    with_driver(|driver| driver.extension_count = Some(count));
}

/// Answer `GL_MAJOR_VERSION`/`GL_MINOR_VERSION`, or raise `GL_INVALID_ENUM`
/// for them when `None`, like a pre 3.0 context.
pub fn set_integer_version(version: Option<(GLint, GLint)>) {
    with_driver(|driver| driver.integer_version = version);
}

/// The strings returned by `glGetString`.
pub fn set_strings(version: &str, vendor: &str, renderer: &str, shading_language: Option<&str>) {
    with_driver(|driver| {
        driver.version = Some(CString::new(version).unwrap());
        driver.vendor = Some(CString::new(vendor).unwrap());
        driver.renderer = Some(CString::new(renderer).unwrap());
        driver.shading_language = shading_language.map(|s| CString::new(s).unwrap());
    });
}

/// Make the next `glGetError` report `error`.
pub fn raise_error(error: GLenum) {
    with_driver(|driver| driver.pending_error = error);
}

/// How many times `glGetIntegerv` and `glGetStringi` were called.
pub fn query_calls() -> (usize, usize) {
    with_driver(|driver| (driver.get_integerv_calls, driver.get_stringi_calls))
}

extern "system" fn get_integerv(pname: GLenum, data: *mut GLint) {
    let value = with_driver(|driver| {
        driver.get_integerv_calls += 1;
        match (pname, driver.integer_version) {
            (gl::NUM_EXTENSIONS, _) => {
                Some(driver.extension_count.unwrap_or(driver.extensions.len() as GLint))
            },
            (gl::MAJOR_VERSION, Some((major, _))) => Some(major),
            (gl::MINOR_VERSION, Some((_, minor))) => Some(minor),
            _ => {
                driver.pending_error = gl::INVALID_ENUM;
                None
            },
        }
    });

    if let Some(value) = value {
        unsafe { *data = value };
    }
}

extern "system" fn get_stringi(name: GLenum, index: GLuint) -> *const GLubyte {
    with_driver(|driver| {
        driver.get_stringi_calls += 1;
        match driver.extensions.get(index as usize) {
            Some(Some(extension)) if name == gl::EXTENSIONS => extension.as_ptr().cast(),
            _ => ptr::null(),
        }
    })
}

extern "system" fn get_string(name: GLenum) -> *const GLubyte {
    with_driver(|driver| {
        let string = match name {
            gl::VERSION => driver.version.as_ref(),
            gl::VENDOR => driver.vendor.as_ref(),
            gl::RENDERER => driver.renderer.as_ref(),
            gl::SHADING_LANGUAGE_VERSION => driver.shading_language.as_ref(),
            _ => None,
        };
        string.map_or(ptr::null(), |string| string.as_ptr().cast())
    })
}

extern "system" fn get_error() -> GLenum {
    with_driver(|driver| std::mem::replace(&mut driver.pending_error, gl::NO_ERROR))
}

/// The address the fake driver hands out for `symbol`.
///
/// Entry points the tests never call get a distinct, non-null placeholder.
pub fn address(symbol: &str) -> *const c_void {
    match symbol {
        "glGetIntegerv" => get_integerv as *const c_void,
        "glGetStringi" => get_stringi as *const c_void,
        "glGetString" => get_string as *const c_void,
        "glGetError" => get_error as *const c_void,
        _ => {
            let index = gl::SYMBOLS
                .iter()
                .position(|known| *known == symbol)
                .unwrap_or_else(|| panic!("{symbol} is not in the symbol table"));
            ((index + 1) * 0x10) as *const c_void
        },
    }
}

/// A resolver that knows every symbol.
pub fn resolver() -> impl FnMut(&CStr) -> *const c_void {
    |symbol: &CStr| address(symbol.to_str().unwrap())
}

/// A resolver that knows every symbol but `missing`.
pub fn resolver_without(missing: &'static str) -> impl FnMut(&CStr) -> *const c_void {
    move |symbol: &CStr| {
        let symbol = symbol.to_str().unwrap();
        if symbol == missing {
            ptr::null()
        } else {
            address(symbol)
        }
    }
}
