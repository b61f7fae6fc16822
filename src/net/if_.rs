//! Network interface name resolution.
//!
//! Resolves interface names like "eth0" into device numbers and back.

use libc::c_uint;
use std::ffi::{CStr, CString};

use crate::{Errno, Result};

/// Resolve an interface name into an interface number.
pub fn if_nametoindex(name: &CStr) -> Result<c_uint> {
    let if_index = unsafe { libc::if_nametoindex(name.as_ptr()) };

    if if_index == 0 {
        Err(Errno::last())
    } else {
        Ok(if_index)
    }
}

/// Resolve an interface number into the canonical device name.
///
/// `if_nametoindex` accepts alias names; resolving the index back yields
/// the name of the underlying device.
pub fn if_indextoname(index: c_uint) -> Result<CString> {
    let mut buf = [0 as libc::c_char; libc::IFNAMSIZ as usize];
    let ret = unsafe { libc::if_indextoname(index, buf.as_mut_ptr()) };

    if ret.is_null() {
        Err(Errno::last())
    } else {
        Ok(unsafe { CStr::from_ptr(buf.as_ptr()) }.to_owned())
    }
}

libc_bitflags!(
    /// Standard interface flags, used by `getifaddrs`
    pub struct InterfaceFlags: libc::c_int {
        /// Interface is running.
        IFF_UP;
        /// Valid broadcast address set.
        IFF_BROADCAST;
        /// Internal debugging flag.
        IFF_DEBUG;
        /// Interface is a loopback interface.
        IFF_LOOPBACK;
        /// Interface is a point-to-point link.
        IFF_POINTOPOINT;
        /// Resources allocated.
        IFF_RUNNING;
        /// No arp protocol, L2 destination address not set.
        IFF_NOARP;
        /// Interface is in promiscuous mode.
        IFF_PROMISC;
        /// Receive all multicast packets.
        IFF_ALLMULTI;
        /// Supports multicast.
        IFF_MULTICAST;
        /// Avoid use of trailers.
        #[cfg(any(linux_android, apple_targets, solarish))]
        IFF_NOTRAILERS;
        /// The driver signals L1 up.
        #[cfg(linux_android)]
        IFF_LOWER_UP;
        /// The driver signals dormant.
        #[cfg(linux_android)]
        IFF_DORMANT;
        /// Can't hear own transmissions.
        #[cfg(bsd)]
        IFF_SIMPLEX;
    }
);
