//! GL version and context information.

use std::ffi::CStr;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};
use crate::gl::types::GLenum;
use crate::gl::{self, Functions};

/// The GL version reported by the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major version of the Api.
    pub major: u8,
    /// Minor version of the Api.
    pub minor: u8,
}

impl Version {
    /// Create new version with the given `major` and `minor` values.
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Parse the version out of a `GL_VERSION` string.
    ///
    /// Desktop drivers start the string with `<major>.<minor>`, optionally
    /// followed by a release number and vendor information. OpenGL ES
    /// prefixes it with `OpenGL ES `, or `OpenGL ES-CM `/`OpenGL ES-CL ` for
    /// 1.x profiles.
    pub fn parse(version: &str) -> Option<Self> {
        let (_, version) = split_api_prefix(version);
        let version = version.split_whitespace().next()?;

        let mut parts = version.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;

        Some(Self::new(major, minor))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The Api flavour of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextApi {
    /// Desktop OpenGL.
    OpenGl,

    /// OpenGL ES.
    Gles,
}

/// Strings and version reported by the current context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    /// The version of the context.
    pub version: Version,

    /// The Api flavour, derived from the version string.
    pub api: ContextApi,

    /// The company responsible for the implementation.
    pub vendor: String,

    /// The name of the renderer, usually the GPU.
    pub renderer: String,

    /// The raw `GL_VERSION` string.
    pub version_string: String,

    /// The shading language version, if the context reports one.
    pub shading_language: Option<String>,
}

impl ContextInfo {
    /// Query the context information through the bound `glGetString`.
    ///
    /// # Safety
    ///
    /// The table must be bound to the context current on the calling thread.
    pub(crate) unsafe fn query(fns: &Functions) -> Result<Self> {
        let version_string =
            unsafe { get_string(fns, gl::VERSION) }.ok_or(ErrorKind::BadVersionString)?;
        let (api, _) = split_api_prefix(&version_string);
        let version = Version::parse(&version_string).ok_or_else(|| {
            Error::new(None, Some(version_string.clone()), ErrorKind::BadVersionString)
        })?;

        Ok(Self {
            version,
            api,
            vendor: unsafe { get_string(fns, gl::VENDOR) }.unwrap_or_default(),
            renderer: unsafe { get_string(fns, gl::RENDERER) }.unwrap_or_default(),
            version_string,
            shading_language: unsafe { get_string(fns, gl::SHADING_LANGUAGE_VERSION) },
        })
    }
}

/// Upper bound on errors drained before querying, a lost context keeps
/// reporting them forever.
const MAX_PENDING_ERRORS: usize = 16;

/// Query the version, preferring the integer queries added in GL 3.0.
///
/// # Safety
///
/// The table must be bound to the context current on the calling thread.
pub(crate) unsafe fn query_version(fns: &Functions) -> Result<Version> {
    let (mut major, mut minor) = (0, 0);

    unsafe {
        // Flush errors left over by previous calls.
        for _ in 0..MAX_PENDING_ERRORS {
            if fns.GetError() == gl::NO_ERROR {
                break;
            }
        }

        fns.GetIntegerv(gl::MAJOR_VERSION, &mut major);
        fns.GetIntegerv(gl::MINOR_VERSION, &mut minor);
        match fns.GetError() {
            gl::NO_ERROR => match (u8::try_from(major), u8::try_from(minor)) {
                (Ok(major), Ok(minor)) if major > 0 => return Ok(Version::new(major, minor)),
                _ => tracing::warn!(major, minor, "driver reported an invalid GL version"),
            },
            gl::INVALID_ENUM => (),
            code => {
                return Err(Error::new(
                    Some(code as i64),
                    Some(String::from("glGetIntegerv(GL_MAJOR_VERSION)")),
                    ErrorKind::Misc,
                ))
            },
        }
    }

    tracing::debug!("integer version query unavailable, parsing GL_VERSION");
    unsafe { ContextInfo::query(fns) }.map(|info| info.version)
}

unsafe fn get_string(fns: &Functions, name: GLenum) -> Option<String> {
    let string = unsafe { fns.GetString(name) };
    if string.is_null() {
        return None;
    }

    // SAFETY: GL returns static, nul terminated strings.
    let string = unsafe { CStr::from_ptr(string.cast()) };
    Some(string.to_string_lossy().into_owned())
}

fn split_api_prefix(version: &str) -> (ContextApi, &str) {
    const PREFIXES: [&str; 3] = ["OpenGL ES-CM ", "OpenGL ES-CL ", "OpenGL ES "];

    PREFIXES
        .iter()
        .find_map(|prefix| version.strip_prefix(prefix))
        .map(|rest| (ContextApi::Gles, rest))
        .unwrap_or((ContextApi::OpenGl, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_desktop_versions() {
        assert_eq!(Version::parse("4.6.0 NVIDIA 535.54.03"), Some(Version::new(4, 6)));
        assert_eq!(Version::parse("3.3 (Core Profile) Mesa 23.1.4"), Some(Version::new(3, 3)));
        assert_eq!(Version::parse("2.1"), Some(Version::new(2, 1)));
    }

    #[test]
    fn parse_es_versions() {
        assert_eq!(Version::parse("OpenGL ES 3.2 Mesa 23.1.4"), Some(Version::new(3, 2)));
        assert_eq!(Version::parse("OpenGL ES-CM 1.1"), Some(Version::new(1, 1)));
        assert_eq!(split_api_prefix("OpenGL ES 3.0").0, ContextApi::Gles);
        assert_eq!(split_api_prefix("4.5.0").0, ContextApi::OpenGl);
    }

    #[test]
    fn reject_nonsense_versions() {
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("OpenGL"), None);
        assert_eq!(Version::parse("4"), None);
        assert_eq!(Version::parse("x.y"), None);
    }

    #[test]
    fn versions_are_ordered() {
        assert!(Version::new(4, 6) > Version::new(4, 5));
        assert!(Version::new(3, 3) < Version::new(4, 0));
        assert_eq!(Version::new(3, 2).to_string(), "3.2");
    }
}
