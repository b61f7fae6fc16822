//! Raw interface-address enumeration.
//!
//! Wraps the platform's `getifaddrs`/`freeifaddrs` pair behind a
//! resolve-once capability handle and decodes each list node into a flat
//! [`RawRecord`]. The decoded records are what the streaming and
//! aggregating consumers in [`crate::interfaces`] operate on.

use libc::c_int;
use std::ffi::CStr;
use std::marker::PhantomData;
use std::mem;
use std::net::Ipv4Addr;

use crate::net::if_::InterfaceFlags;
use crate::{Errno, Result};

type GetifaddrsFn = unsafe extern "C" fn(*mut *mut libc::ifaddrs) -> c_int;
type FreeifaddrsFn = unsafe extern "C" fn(*mut libc::ifaddrs);

/// Handle to the platform's interface enumeration primitive.
///
/// [`Getifaddrs::resolve`] binds the `getifaddrs`/`freeifaddrs` symbols
/// once and returns an immutable, copyable handle. On Android the symbols
/// are looked up dynamically because Bionic only gained them in API 24;
/// where they are absent the handle cannot be constructed and every
/// enumeration path reports [`Errno::ENOTSUP`]. The crate keeps no global
/// state; callers cache the handle themselves.
#[derive(Clone, Copy, Debug)]
pub struct Getifaddrs {
    getifaddrs: GetifaddrsFn,
    freeifaddrs: FreeifaddrsFn,
}

impl Getifaddrs {
    /// Bind the enumeration primitive for this process.
    #[cfg(not(android))]
    pub fn resolve() -> Result<Self> {
        Ok(Getifaddrs {
            getifaddrs: libc::getifaddrs,
            freeifaddrs: libc::freeifaddrs,
        })
    }

    /// Bind the enumeration primitive for this process.
    ///
    /// Bionic before API 24 ships neither symbol; linking against them
    /// directly would make the library unloadable there, so both are
    /// resolved through `dlsym` instead.
    #[cfg(android)]
    pub fn resolve() -> Result<Self> {
        let getifaddrs = unsafe {
            libc::dlsym(libc::RTLD_DEFAULT, b"getifaddrs\0".as_ptr().cast())
        };
        let freeifaddrs = unsafe {
            libc::dlsym(libc::RTLD_DEFAULT, b"freeifaddrs\0".as_ptr().cast())
        };
        if getifaddrs.is_null() || freeifaddrs.is_null() {
            return Err(Errno::ENOTSUP);
        }
        unsafe {
            Ok(Getifaddrs {
                getifaddrs: mem::transmute::<*mut libc::c_void, GetifaddrsFn>(getifaddrs),
                freeifaddrs: mem::transmute::<*mut libc::c_void, FreeifaddrsFn>(freeifaddrs),
            })
        }
    }

    /// Run one enumeration, yielding an owned list of raw records.
    pub(crate) fn enumerate(&self) -> Result<InterfaceAddresses> {
        let mut addrs = mem::MaybeUninit::<*mut libc::ifaddrs>::uninit();
        unsafe {
            Errno::result((self.getifaddrs)(addrs.as_mut_ptr())).map(|_| {
                InterfaceAddresses {
                    base: addrs.assume_init(),
                    free: self.freeifaddrs,
                }
            })
        }
    }
}

/// Holds the results of one `getifaddrs` call.
///
/// The list is owned by the OS allocation and released through the
/// capability's `freeifaddrs` when this value drops, on every exit path.
pub(crate) struct InterfaceAddresses {
    base: *mut libc::ifaddrs,
    free: FreeifaddrsFn,
}

impl InterfaceAddresses {
    pub(crate) fn iter(&self) -> RawRecordIter<'_> {
        RawRecordIter {
            next: self.base,
            _list: PhantomData,
        }
    }
}

impl Drop for InterfaceAddresses {
    fn drop(&mut self) {
        if !self.base.is_null() {
            unsafe { (self.free)(self.base) };
        }
    }
}

pub(crate) struct RawRecordIter<'a> {
    next: *mut libc::ifaddrs,
    _list: PhantomData<&'a InterfaceAddresses>,
}

impl Iterator for RawRecordIter<'_> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        match unsafe { self.next.as_ref() } {
            Some(ifaddr) => {
                self.next = ifaddr.ifa_next;
                Some(RawRecord::from_libc_ifaddrs(ifaddr))
            }
            None => None,
        }
    }
}

/// Upper bound on the hardware-address bytes decoded from one record.
/// `sockaddr_dl` can report oversized addresses (InfiniBand is 20 bytes);
/// consumers truncate further as their record formats require.
pub(crate) const RAW_HW_ADDR_MAX: usize = 20;

/// One OS-reported (interface, address) pairing, decoded and flattened.
#[derive(Clone, Debug)]
pub(crate) struct RawRecord {
    pub(crate) name: String,
    pub(crate) flags: InterfaceFlags,
    pub(crate) address: Option<RawAddress>,
    pub(crate) netmask: Option<RawNetmask>,
}

#[derive(Clone, Debug)]
pub(crate) enum RawAddress {
    V4(Ipv4Addr),
    V6 {
        octets: [u8; 16],
        scope_id: u32,
    },
    Link {
        raw_type: u16,
        bytes: [u8; RAW_HW_ADDR_MAX],
        len: u8,
    },
    /// An address family the engine does not interpret. The record still
    /// participates in interface discovery.
    Other,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum RawNetmask {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl RawRecord {
    fn from_libc_ifaddrs(info: &libc::ifaddrs) -> RawRecord {
        let name = unsafe { CStr::from_ptr(info.ifa_name) }
            .to_string_lossy()
            .into_owned();
        let flags = InterfaceFlags::from_bits_truncate(info.ifa_flags as c_int);
        let address = unsafe { decode_address(info.ifa_addr) };
        // The netmask's own sa_family is unreliable on some systems; it is
        // decoded according to the primary address's family.
        let netmask = match address {
            Some(RawAddress::V4(_)) => unsafe { decode_v4_netmask(info.ifa_netmask) },
            Some(RawAddress::V6 { .. }) => unsafe { decode_v6_netmask(info.ifa_netmask) },
            _ => None,
        };

        RawRecord {
            name,
            flags,
            address,
            netmask,
        }
    }
}

unsafe fn decode_address(sa: *const libc::sockaddr) -> Option<RawAddress> {
    if sa.is_null() {
        return None;
    }
    match c_int::from((*sa).sa_family) {
        libc::AF_INET => {
            let sin = &*(sa as *const libc::sockaddr_in);
            Some(RawAddress::V4(Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes())))
        }
        libc::AF_INET6 => {
            let sin6 = &*(sa as *const libc::sockaddr_in6);
            Some(RawAddress::V6 {
                octets: sin6.sin6_addr.s6_addr,
                scope_id: sin6.sin6_scope_id,
            })
        }
        #[cfg(linux_android)]
        libc::AF_PACKET => {
            let sll = &*(sa as *const libc::sockaddr_ll);
            // sll_addr holds at most 8 bytes; WSL has been seen reporting
            // sll_halen past that.
            let len = usize::from(sll.sll_halen).min(sll.sll_addr.len());
            let mut bytes = [0u8; RAW_HW_ADDR_MAX];
            bytes[..len].copy_from_slice(&sll.sll_addr[..len]);
            Some(RawAddress::Link {
                raw_type: sll.sll_hatype,
                bytes,
                len: len as u8,
            })
        }
        #[cfg(bsd)]
        libc::AF_LINK => {
            let sdl = &*(sa as *const libc::sockaddr_dl);
            let nlen = usize::from(sdl.sdl_nlen);
            let len = usize::from(sdl.sdl_alen).min(RAW_HW_ADDR_MAX);
            // LLADDR: the hardware address begins after the name bytes and
            // may extend past the struct's nominal sdl_data array.
            let lladdr = std::slice::from_raw_parts(
                (sdl.sdl_data.as_ptr() as *const u8).add(nlen),
                len,
            );
            let mut bytes = [0u8; RAW_HW_ADDR_MAX];
            bytes[..len].copy_from_slice(lladdr);
            Some(RawAddress::Link {
                raw_type: u16::from(sdl.sdl_type),
                bytes,
                len: len as u8,
            })
        }
        _ => Some(RawAddress::Other),
    }
}

unsafe fn decode_v4_netmask(sa: *const libc::sockaddr) -> Option<RawNetmask> {
    if sa.is_null() {
        return None;
    }
    let sin = &*(sa as *const libc::sockaddr_in);
    Some(RawNetmask::V4(sin.sin_addr.s_addr.to_ne_bytes()))
}

unsafe fn decode_v6_netmask(sa: *const libc::sockaddr) -> Option<RawNetmask> {
    if sa.is_null() {
        return None;
    }
    let sin6 = &*(sa as *const libc::sockaddr_in6);
    Some(RawNetmask::V6(sin6.sin6_addr.s6_addr))
}
