//! The entry point table.
//!
//! Every slot is declared once in the `gl_functions!` invocation at the bottom
//! of this file. The macro produces the slot storage, the list of native
//! names walked by the binder, and one typed forwarding method per slot.

use std::ffi::{c_void, CStr};
use std::{fmt, mem, ptr};

use super::types::*;

/// Storage for the address of a single native entry point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FnPtr {
    ptr: *const c_void,
}

impl FnPtr {
    /// A slot that wasn't bound yet.
    pub const UNBOUND: FnPtr = FnPtr { ptr: ptr::null() };

    pub(crate) fn new(ptr: *const c_void) -> Self {
        Self { ptr }
    }

    /// Returns `true` if the slot holds an address.
    ///
    /// If it returns `false`, calling the corresponding function will panic.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        !self.ptr.is_null()
    }

    /// The raw address stored in the slot, null when unbound.
    #[inline]
    pub fn as_ptr(&self) -> *const c_void {
        self.ptr
    }
}

impl Default for FnPtr {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl fmt::Debug for FnPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_loaded() {
            write!(f, "FnPtr({:p})", self.ptr)
        } else {
            f.write_str("FnPtr(unbound)")
        }
    }
}

#[cold]
#[inline(never)]
fn missing_fn_panic(symbol: &'static str) -> ! {
    panic!("{symbol} was called before it was bound")
}

fn symbol_name(name: &'static str) -> &'static CStr {
    // SAFETY: every name is generated by `gl_functions!` from an identifier
    // followed by a single trailing nul.
    unsafe { CStr::from_bytes_with_nul_unchecked(name.as_bytes()) }
}

macro_rules! gl_functions {
    ($(
        $(#[$attr:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
    )*) => {
        /// Every bindable GL entry point, one slot per native symbol.
        ///
        /// Slot names are the native names without the `gl` prefix.
        #[allow(non_snake_case)]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Functions {
            $(pub $name: FnPtr,)*
        }

        /// Native names of every slot in [`Functions`], in binding order.
        pub const SYMBOLS: &[&str] = &[$(concat!("gl", stringify!($name))),*];

        #[allow(non_snake_case, clippy::too_many_arguments, clippy::missing_safety_doc)]
        impl Functions {
            /// A table where every slot is unbound.
            pub const fn unbound() -> Self {
                Self { $($name: FnPtr::UNBOUND,)* }
            }

            /// The `(native name, slot)` pairs walked by the binder.
            pub(crate) fn slots_mut(&mut self) -> Vec<(&'static CStr, &mut FnPtr)> {
                vec![$((symbol_name(concat!("gl", stringify!($name), "\0")), &mut self.$name),)*]
            }

            /// The `(native name, slot)` pairs of the table.
            pub fn slots(&self) -> Vec<(&'static str, FnPtr)> {
                vec![$((concat!("gl", stringify!($name)), self.$name),)*]
            }

            $(
                $(#[$attr])*
                #[inline]
                pub unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    if !self.$name.is_loaded() {
                        missing_fn_panic(concat!("gl", stringify!($name)));
                    }

                    // SAFETY: the slot was filled by the resolver with the
                    // address of the native symbol, which has this signature.
                    let f: unsafe extern "system" fn($($ty),*) $(-> $ret)? =
                        unsafe { mem::transmute(self.$name.as_ptr()) };
                    unsafe { f($($arg),*) }
                }
            )*
        }
    };
}

impl Functions {
    /// The address bound for the native `symbol`, e.g. `"glGetStringi"`.
    ///
    /// Returns [`None`] when the table has no such symbol.
    pub fn address_of(&self, symbol: &str) -> Option<*const c_void> {
        self.slots().into_iter().find(|(name, _)| *name == symbol).map(|(_, slot)| slot.as_ptr())
    }

    /// Whether every slot holds an address.
    pub fn is_fully_loaded(&self) -> bool {
        self.slots().iter().all(|(_, slot)| slot.is_loaded())
    }
}

impl Default for Functions {
    fn default() -> Self {
        Self::unbound()
    }
}

gl_functions! {
    fn ActiveTexture(texture: GLenum);
    fn AttachShader(program: GLuint, shader: GLuint);
    fn BindBuffer(target: GLenum, buffer: GLuint);
    fn BindTexture(target: GLenum, texture: GLuint);
    fn BindVertexArray(array: GLuint);
    fn BlendFunc(sfactor: GLenum, dfactor: GLenum);
    fn BufferData(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum);
    fn Clear(mask: GLbitfield);
    fn ClearColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    fn CompileShader(shader: GLuint);
    fn CreateProgram() -> GLuint;
    fn CreateShader(type_: GLenum) -> GLuint;
    fn DeleteBuffers(n: GLsizei, buffers: *const GLuint);
    fn DeleteProgram(program: GLuint);
    fn DeleteShader(shader: GLuint);
    fn DeleteTextures(n: GLsizei, textures: *const GLuint);
    fn DeleteVertexArrays(n: GLsizei, arrays: *const GLuint);
    fn Disable(cap: GLenum);
    fn DrawArrays(mode: GLenum, first: GLint, count: GLsizei);
    fn DrawElements(mode: GLenum, count: GLsizei, type_: GLenum, indices: *const c_void);
    fn Enable(cap: GLenum);
    fn EnableVertexAttribArray(index: GLuint);
    fn Finish();
    fn Flush();
    fn GenBuffers(n: GLsizei, buffers: *mut GLuint);
    fn GenTextures(n: GLsizei, textures: *mut GLuint);
    fn GenVertexArrays(n: GLsizei, arrays: *mut GLuint);
    fn GetAttribLocation(program: GLuint, name: *const GLchar) -> GLint;
    fn GetError() -> GLenum;
    /// Used to query the number of extensions during capability detection.
    fn GetIntegerv(pname: GLenum, data: *mut GLint);
    fn GetProgramInfoLog(
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );
    fn GetProgramiv(program: GLuint, pname: GLenum, params: *mut GLint);
    fn GetShaderInfoLog(
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );
    fn GetShaderiv(shader: GLuint, pname: GLenum, params: *mut GLint);
    fn GetString(name: GLenum) -> *const GLubyte;
    /// Used to enumerate extension names during capability detection.
    fn GetStringi(name: GLenum, index: GLuint) -> *const GLubyte;
    fn GetUniformLocation(program: GLuint, name: *const GLchar) -> GLint;
    fn LinkProgram(program: GLuint);
    fn ShaderSource(
        shader: GLuint,
        count: GLsizei,
        string: *const *const GLchar,
        length: *const GLint,
    );
    fn TexImage2D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    );
    fn TexParameteri(target: GLenum, pname: GLenum, param: GLint);
    fn Uniform1i(location: GLint, v0: GLint);
    fn Uniform4f(location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat, v3: GLfloat);
    fn UniformMatrix4fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    fn UseProgram(program: GLuint);
    fn VertexAttribPointer(
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    );
    fn Viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_table_matches_slots() {
        let fns = Functions::unbound();
        let slots = fns.slots();
        assert_eq!(slots.len(), SYMBOLS.len());
        for ((name, slot), symbol) in slots.iter().zip(SYMBOLS) {
            assert_eq!(name, symbol);
            assert!(name.starts_with("gl"));
            assert!(!slot.is_loaded());
        }

        let mut fns = Functions::unbound();
        for ((c_name, _), symbol) in fns.slots_mut().into_iter().zip(SYMBOLS) {
            assert_eq!(c_name.to_str().unwrap(), *symbol);
        }
    }

    #[test]
    fn address_of_reports_bound_slot() {
        let mut fns = Functions::unbound();
        assert_eq!(fns.address_of("glGetStringi"), Some(ptr::null()));
        assert_eq!(fns.address_of("glNotARealFunction"), None);

        fns.GetStringi = FnPtr::new(0x1000 as *const c_void);
        assert_eq!(fns.address_of("glGetStringi"), Some(0x1000 as *const c_void));
        assert!(!fns.is_fully_loaded());
    }

    #[test]
    #[should_panic(expected = "glFinish was called before it was bound")]
    fn calling_unbound_slot_panics() {
        let fns = Functions::unbound();
        unsafe { fns.Finish() };
    }
}
