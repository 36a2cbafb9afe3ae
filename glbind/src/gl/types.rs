//! Scalar types used by the GL entry points.

#![allow(non_camel_case_types)]

use std::os::raw;

pub type GLvoid = raw::c_void;
pub type GLbyte = raw::c_schar;
pub type GLubyte = raw::c_uchar;
pub type GLchar = raw::c_char;
pub type GLshort = raw::c_short;
pub type GLushort = raw::c_ushort;
pub type GLint = raw::c_int;
pub type GLuint = raw::c_uint;
pub type GLsizei = raw::c_int;
pub type GLenum = raw::c_uint;
pub type GLboolean = raw::c_uchar;
pub type GLbitfield = raw::c_uint;
pub type GLfloat = raw::c_float;
pub type GLclampf = raw::c_float;
pub type GLdouble = raw::c_double;
pub type GLintptr = isize;
pub type GLsizeiptr = isize;
pub type GLint64 = i64;
pub type GLuint64 = u64;
