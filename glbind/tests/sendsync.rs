use glbind::*;

trait FailToCompileIfNotSendSync
where
    Self: Send + Sync,
{
}

impl FailToCompileIfNotSendSync for Capabilities {}
impl FailToCompileIfNotSendSync for Features {}
impl FailToCompileIfNotSendSync for Version {}
impl FailToCompileIfNotSendSync for ContextInfo {}
impl FailToCompileIfNotSendSync for Error {}
impl FailToCompileIfNotSendSync for ErrorKind {}

#[cfg(feature = "system-library")]
impl FailToCompileIfNotSendSync for lib_loading::LibraryResolver {}
#[cfg(feature = "system-library")]
impl FailToCompileIfNotSendSync for lib_loading::LibraryResolverBuilder {}
