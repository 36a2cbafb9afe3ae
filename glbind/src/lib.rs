//! The purpose of this library is to bind OpenGL entry points for an already
//! current context and to tell which extensions that context supports.
//!
//! The context itself comes from elsewhere, usually a windowing library that
//! also provides a `get_proc_address` function. That function, or any other
//! [`Resolver`], is handed to [`GlBindings::initialize`], which resolves every
//! entry point in [`gl::SYMBOLS`] and fails on the first one the resolver
//! can't find.
//!
//! Once bound, the extensions reported by the context are collected into
//! [`Capabilities`]. Every known capability group has an accessor on
//! [`GlBindings`], like [`GlBindings::khr_debug`], that returns `false` until
//! the bindings were successfully initialized.
//!
//! When there's no context provider with its own loader, a
//! [`LibraryResolver`] opens the platform GL library directly.
//!
//! [`LibraryResolver`]: crate::lib_loading::LibraryResolver

#![deny(rust_2018_idioms)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(improper_ctypes, improper_ctypes_definitions)]
#![deny(clippy::all)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(clippy, deny(warnings))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bindings;
pub mod capabilities;
pub mod error;
#[allow(missing_docs, clippy::all)]
pub mod gl;
#[cfg(system_library)]
pub mod lib_loading;
pub mod resolver;
pub mod version;

pub use bindings::GlBindings;
pub use capabilities::{Capabilities, Features};
pub use error::{Error, ErrorKind, Result};
pub use resolver::Resolver;
pub use version::{ContextApi, ContextInfo, Version};
