//! Platform error numbers.
//!
//! A trimmed-down `errno` wrapper: the error numbers the crate's syscalls
//! can produce, plus a catch-all for everything else. Values outside this
//! set are reported as [`Errno::UnknownErrno`]; the raw number is still
//! recoverable through the enum's discriminant on the platform that
//! produced it.

use cfg_if::cfg_if;
use libc::c_int;
use std::{error, fmt, io};

cfg_if! {
    if #[cfg(any(apple_targets, target_os = "freebsd"))] {
        unsafe fn errno_location() -> *mut c_int {
            libc::__error()
        }
    } else if #[cfg(any(android, netbsdlike))] {
        unsafe fn errno_location() -> *mut c_int {
            libc::__errno()
        }
    } else if #[cfg(solarish)] {
        unsafe fn errno_location() -> *mut c_int {
            libc::___errno()
        }
    } else {
        unsafe fn errno_location() -> *mut c_int {
            libc::__errno_location()
        }
    }
}

cfg_if! {
    if #[cfg(linux_android)] {
        // Bionic and glibc spell ENOTSUP as EOPNOTSUPP.
        const ENOTSUP_VALUE: c_int = libc::EOPNOTSUPP;
    } else {
        const ENOTSUP_VALUE: c_int = libc::ENOTSUP;
    }
}

/// The platform error numbers this crate reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(i32)]
#[non_exhaustive]
pub enum Errno {
    UnknownErrno = 0,
    EPERM = libc::EPERM,
    ENOENT = libc::ENOENT,
    EINTR = libc::EINTR,
    EIO = libc::EIO,
    ENXIO = libc::ENXIO,
    EBADF = libc::EBADF,
    EAGAIN = libc::EAGAIN,
    ENOMEM = libc::ENOMEM,
    EACCES = libc::EACCES,
    EFAULT = libc::EFAULT,
    EBUSY = libc::EBUSY,
    EINVAL = libc::EINVAL,
    ENFILE = libc::ENFILE,
    EMFILE = libc::EMFILE,
    ENOSPC = libc::ENOSPC,
    ENODEV = libc::ENODEV,
    ENOSYS = libc::ENOSYS,
    EMSGSIZE = libc::EMSGSIZE,
    EBADMSG = libc::EBADMSG,
    ENOTSUP = ENOTSUP_VALUE,
    EAFNOSUPPORT = libc::EAFNOSUPPORT,
    EADDRNOTAVAIL = libc::EADDRNOTAVAIL,
    ENETDOWN = libc::ENETDOWN,
    ENETUNREACH = libc::ENETUNREACH,
    ENOBUFS = libc::ENOBUFS,
    EHOSTUNREACH = libc::EHOSTUNREACH,
}

impl Errno {
    /// Returns the errno of the last failed call on this thread.
    pub fn last() -> Self {
        Self::from_raw(Self::last_raw())
    }

    /// Returns the raw errno of the last failed call on this thread.
    pub fn last_raw() -> c_int {
        unsafe { *errno_location() }
    }

    pub fn from_raw(err: c_int) -> Errno {
        match err {
            libc::EPERM => Errno::EPERM,
            libc::ENOENT => Errno::ENOENT,
            libc::EINTR => Errno::EINTR,
            libc::EIO => Errno::EIO,
            libc::ENXIO => Errno::ENXIO,
            libc::EBADF => Errno::EBADF,
            libc::EAGAIN => Errno::EAGAIN,
            libc::ENOMEM => Errno::ENOMEM,
            libc::EACCES => Errno::EACCES,
            libc::EFAULT => Errno::EFAULT,
            libc::EBUSY => Errno::EBUSY,
            libc::EINVAL => Errno::EINVAL,
            libc::ENFILE => Errno::ENFILE,
            libc::EMFILE => Errno::EMFILE,
            libc::ENOSPC => Errno::ENOSPC,
            libc::ENODEV => Errno::ENODEV,
            libc::ENOSYS => Errno::ENOSYS,
            libc::EMSGSIZE => Errno::EMSGSIZE,
            libc::EBADMSG => Errno::EBADMSG,
            ENOTSUP_VALUE => Errno::ENOTSUP,
            libc::EAFNOSUPPORT => Errno::EAFNOSUPPORT,
            libc::EADDRNOTAVAIL => Errno::EADDRNOTAVAIL,
            libc::ENETDOWN => Errno::ENETDOWN,
            libc::ENETUNREACH => Errno::ENETUNREACH,
            libc::ENOBUFS => Errno::ENOBUFS,
            libc::EHOSTUNREACH => Errno::EHOSTUNREACH,
            _ => Errno::UnknownErrno,
        }
    }

    pub const fn desc(self) -> &'static str {
        match self {
            Errno::UnknownErrno => "Unknown errno",
            Errno::EPERM => "Operation not permitted",
            Errno::ENOENT => "No such file or directory",
            Errno::EINTR => "Interrupted system call",
            Errno::EIO => "I/O error",
            Errno::ENXIO => "No such device or address",
            Errno::EBADF => "Bad file number",
            Errno::EAGAIN => "Try again",
            Errno::ENOMEM => "Out of memory",
            Errno::EACCES => "Permission denied",
            Errno::EFAULT => "Bad address",
            Errno::EBUSY => "Device or resource busy",
            Errno::EINVAL => "Invalid argument",
            Errno::ENFILE => "File table overflow",
            Errno::EMFILE => "Too many open files",
            Errno::ENOSPC => "No space left on device",
            Errno::ENODEV => "No such device",
            Errno::ENOSYS => "Function not implemented",
            Errno::EMSGSIZE => "Message too long",
            Errno::EBADMSG => "Not a data message",
            Errno::ENOTSUP => "Operation not supported",
            Errno::EAFNOSUPPORT => "Address family not supported by protocol",
            Errno::EADDRNOTAVAIL => "Cannot assign requested address",
            Errno::ENETDOWN => "Network is down",
            Errno::ENETUNREACH => "Network is unreachable",
            Errno::ENOBUFS => "No buffer space available",
            Errno::EHOSTUNREACH => "No route to host",
        }
    }

    /// Returns `Ok(value)` unless `value` is the sentinel of its type, in
    /// which case the errno of the last failed call is returned.
    pub fn result<S: ErrnoSentinel + PartialEq<S>>(value: S) -> crate::Result<S> {
        if value == S::sentinel() {
            Err(Self::last())
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}: {}", self.desc())
    }
}

impl error::Error for Errno {}

impl From<Errno> for io::Error {
    fn from(err: Errno) -> Self {
        io::Error::from_raw_os_error(err as i32)
    }
}

/// The value a libc call returns to signal "consult errno".
pub trait ErrnoSentinel: Sized {
    fn sentinel() -> Self;
}

impl ErrnoSentinel for i32 {
    fn sentinel() -> Self {
        -1
    }
}

impl ErrnoSentinel for i64 {
    fn sentinel() -> Self {
        -1
    }
}

impl ErrnoSentinel for isize {
    fn sentinel() -> Self {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_round_trips_known_values() {
        assert_eq!(Errno::from_raw(libc::ENOENT), Errno::ENOENT);
        assert_eq!(Errno::from_raw(libc::ENOMEM), Errno::ENOMEM);
        assert_eq!(Errno::from_raw(ENOTSUP_VALUE), Errno::ENOTSUP);
        assert_eq!(Errno::from_raw(0), Errno::UnknownErrno);
    }

    #[test]
    fn result_passes_non_sentinel_values() {
        assert_eq!(Errno::result(0i32), Ok(0));
        assert_eq!(Errno::result(7i32), Ok(7));
        assert!(Errno::result(-1i32).is_err());
    }

    #[test]
    fn io_error_keeps_the_raw_code() {
        let io = io::Error::from(Errno::ENOTSUP);
        assert_eq!(io.raw_os_error(), Some(ENOTSUP_VALUE));
    }
}
