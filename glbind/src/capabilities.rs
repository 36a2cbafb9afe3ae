//! Everything related to the extensions reported by the current context.

use std::collections::hash_set;
use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

use bitflags::bitflags;

use crate::gl::{self, Functions};

/// Upper bound on the extensions enumerated from a single context.
///
/// Drivers report a few hundred; a larger count means a broken driver or a
/// lost context.
const MAX_EXTENSIONS: u32 = 4096;

macro_rules! capability_groups {
    ($(
        $(#[$($attr:tt)*])*
        $flag:ident = $bit:literal, $accessor:ident => $extension:literal;
    )*) => {
        bitflags! {
            /// The known capability groups supported by the context.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct Features: u32 {
                $(
                    $(#[$($attr)*])*
                    const $flag = 1 << $bit;
                )*
            }
        }

        /// Canonical extension names of every known capability group with
        /// the feature bit they map to.
        pub const CAPABILITY_GROUPS: &[(&str, Features)] = &[$(($extension, Features::$flag)),*];

        impl crate::bindings::GlBindings {
            $(
                #[doc = concat!("Whether the context supports `", $extension, "`.")]
                ///
                /// Returns `false` until the bindings were successfully
                /// initialized.
                #[inline]
                pub fn $accessor(&self) -> bool {
                    self.capability_group($extension)
                }
            )*
        }
    };
}

capability_groups! {
    /// `GL_ARB_debug_output`.
    ARB_DEBUG_OUTPUT = 0, arb_debug_output => "GL_ARB_debug_output";
    /// `GL_KHR_debug`.
    KHR_DEBUG = 1, khr_debug => "GL_KHR_debug";
    /// `GL_ARB_compute_shader`.
    ARB_COMPUTE_SHADER = 2, arb_compute_shader => "GL_ARB_compute_shader";
    /// `GL_ARB_texture_storage`.
    ARB_TEXTURE_STORAGE = 3, arb_texture_storage => "GL_ARB_texture_storage";
    /// `GL_ARB_buffer_storage`.
    ARB_BUFFER_STORAGE = 4, arb_buffer_storage => "GL_ARB_buffer_storage";
    /// `GL_ARB_direct_state_access`.
    ARB_DIRECT_STATE_ACCESS = 5, arb_direct_state_access => "GL_ARB_direct_state_access";
    /// `GL_ARB_multi_draw_indirect`.
    ARB_MULTI_DRAW_INDIRECT = 6, arb_multi_draw_indirect => "GL_ARB_multi_draw_indirect";
    /// `GL_ARB_shader_storage_buffer_object`.
    ARB_SHADER_STORAGE_BUFFER_OBJECT = 7,
        arb_shader_storage_buffer_object => "GL_ARB_shader_storage_buffer_object";
    /// `GL_ARB_separate_shader_objects`.
    ARB_SEPARATE_SHADER_OBJECTS = 8,
        arb_separate_shader_objects => "GL_ARB_separate_shader_objects";
    /// `GL_ARB_get_program_binary`.
    ARB_GET_PROGRAM_BINARY = 9, arb_get_program_binary => "GL_ARB_get_program_binary";
    /// `GL_ARB_texture_filter_anisotropic`.
    ARB_TEXTURE_FILTER_ANISOTROPIC = 10,
        arb_texture_filter_anisotropic => "GL_ARB_texture_filter_anisotropic";
    /// `GL_EXT_texture_filter_anisotropic`.
    EXT_TEXTURE_FILTER_ANISOTROPIC = 11,
        ext_texture_filter_anisotropic => "GL_EXT_texture_filter_anisotropic";
    /// `GL_ARB_gl_spirv`.
    ARB_GL_SPIRV = 12, arb_gl_spirv => "GL_ARB_gl_spirv";
    /// `GL_ARB_clip_control`.
    ARB_CLIP_CONTROL = 13, arb_clip_control => "GL_ARB_clip_control";
    /// `GL_ARB_timer_query`.
    ARB_TIMER_QUERY = 14, arb_timer_query => "GL_ARB_timer_query";
    /// `GL_ARB_bindless_texture`.
    ARB_BINDLESS_TEXTURE = 15, arb_bindless_texture => "GL_ARB_bindless_texture";
    /// `GL_KHR_robustness`.
    KHR_ROBUSTNESS = 16, khr_robustness => "GL_KHR_robustness";
    /// `GL_EXT_texture_compression_s3tc`.
    EXT_TEXTURE_COMPRESSION_S3TC = 17,
        ext_texture_compression_s3tc => "GL_EXT_texture_compression_s3tc";
}

/// The extensions supported by a context, collected once after binding.
///
/// The set is never mutated after construction. The flag of every known
/// capability group is computed eagerly when the set is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    extensions: HashSet<String>,
    groups: HashMap<&'static str, bool>,
}

impl Capabilities {
    /// Build the capabilities from already enumerated extension names.
    ///
    /// Duplicate names coalesce.
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_set(extensions.into_iter().map(Into::into).collect())
    }

    fn from_set(extensions: HashSet<String>) -> Self {
        let groups = CAPABILITY_GROUPS
            .iter()
            .map(|&(name, _)| (name, extensions.contains(name)))
            .collect();

        Self { extensions, groups }
    }

    /// Enumerate the extensions of the current context through the bound
    /// `glGetIntegerv` and `glGetStringi`.
    ///
    /// # Safety
    ///
    /// Both entry points must be bound to the context current on the calling
    /// thread.
    pub(crate) unsafe fn query(fns: &Functions) -> Self {
        let mut count = 0;
        unsafe { fns.GetIntegerv(gl::NUM_EXTENSIONS, &mut count) };

        let reported = count.max(0) as u32;
        let count = reported.min(MAX_EXTENSIONS);
        if count < reported {
            tracing::warn!(reported, max = MAX_EXTENSIONS, "clamping GL_NUM_EXTENSIONS");
        }

        let mut extensions = HashSet::new();
        for index in 0..count {
            let name = unsafe { fns.GetStringi(gl::EXTENSIONS, index) };
            if name.is_null() {
                tracing::warn!(index, "driver returned no name for extension");
                continue;
            }

            // SAFETY: GL returns static, nul terminated strings.
            let name = unsafe { CStr::from_ptr(name.cast()) };
            extensions.insert(name.to_string_lossy().into_owned());
        }

        tracing::debug!(count = extensions.len(), "collected GL extensions");

        Self::from_set(extensions)
    }

    /// Whether `extension` was reported by the context.
    #[inline]
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// The flag computed for the known capability group `extension`.
    ///
    /// Unknown groups are reported as unsupported; use
    /// [`Capabilities::contains`] for arbitrary names.
    #[inline]
    pub fn group(&self, extension: &str) -> bool {
        self.groups.get(extension).copied().unwrap_or(false)
    }

    /// The known capability groups supported by the context.
    pub fn features(&self) -> Features {
        CAPABILITY_GROUPS
            .iter()
            .filter(|(name, _)| self.group(name))
            .fold(Features::empty(), |features, &(_, flag)| features | flag)
    }

    /// Number of distinct extensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the context reported no extensions at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterate over the extension names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.extensions.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Capabilities {
    type IntoIter = hash_set::Iter<'a, String>;
    type Item = &'a String;

    fn into_iter(self) -> Self::IntoIter {
        self.extensions.iter()
    }
}
