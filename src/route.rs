//! Default-gateway discovery via the kernel routing table.
//!
//! The BSDs expose the routing table through a `sysctl(NET_RT_DUMP)`
//! size-probe/dump protocol; the dump is a sequence of variable-length
//! `rt_msghdr` messages. Platforms without that sysctl report
//! [`Errno::ENOTSUP`].

use cfg_if::cfg_if;
use std::net::IpAddr;

use crate::{Errno, Result};

/// A default-route gateway. Only routes whose destination is the all-zero
/// address of its family are reported.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GatewayAddressInfo {
    pub interface_index: u32,
    pub address: IpAddr,
}

cfg_if! {
    if #[cfg(any(apple_targets, target_os = "freebsd"))] {
        use libc::{c_int, c_void, size_t};
        use std::mem;
        use std::net::{Ipv4Addr, Ipv6Addr};
        use std::ptr;

        /// Scan the routing table and stream every default-route gateway
        /// through `on_gateway`, optionally restricted to one interface.
        ///
        /// Each qualifying route is reported as soon as it is parsed; the
        /// scan does not deduplicate across messages.
        pub fn visit_gateways<F>(interface_index: Option<u32>, mut on_gateway: F) -> Result<()>
        where
            F: FnMut(&GatewayAddressInfo),
        {
            let dump = dump_routing_table()?;
            parse_dump(&dump, interface_index, &mut on_gateway)
        }

        fn dump_routing_table() -> Result<Vec<u8>> {
            let mut mib = [libc::CTL_NET, libc::AF_ROUTE, 0, 0, libc::NET_RT_DUMP, 0];
            let mut needed: size_t = 0;
            Errno::result(unsafe {
                libc::sysctl(
                    mib.as_mut_ptr(),
                    6,
                    ptr::null_mut(),
                    &mut needed,
                    ptr::null_mut(),
                    0,
                )
            })?;

            let mut buf = vec![0u8; needed as usize];
            loop {
                let mut len = buf.len() as size_t;
                let res = unsafe {
                    libc::sysctl(
                        mib.as_mut_ptr(),
                        6,
                        buf.as_mut_ptr().cast::<c_void>(),
                        &mut len,
                        ptr::null_mut(),
                        0,
                    )
                };
                if res == 0 {
                    buf.truncate(len as usize);
                    return Ok(buf);
                }
                let errno = Errno::last();
                if errno != Errno::ENOMEM {
                    return Err(errno);
                }
                // The table grew between the probe and the dump. The
                // kernel's size estimate can keep lagging a growing table,
                // so double the buffer instead of resizing to it.
                let doubled = buf.len().max(1).checked_mul(2).ok_or(Errno::ENOMEM)?;
                buf = vec![0u8; doubled];
            }
        }

        fn parse_dump(
            buf: &[u8],
            filter: Option<u32>,
            on_gateway: &mut dyn FnMut(&GatewayAddressInfo),
        ) -> Result<()> {
            const HDR_LEN: usize = mem::size_of::<libc::rt_msghdr>();

            let mut offset = 0usize;
            while offset + HDR_LEN <= buf.len() {
                let hdr: libc::rt_msghdr =
                    unsafe { ptr::read_unaligned(buf.as_ptr().add(offset).cast()) };
                let msglen = usize::from(hdr.rtm_msglen);
                if msglen == 0 {
                    // Advancing by zero would loop forever; the dump is
                    // malformed.
                    return Err(Errno::EBADMSG);
                }

                let index = u32::from(hdr.rtm_index);
                let wanted = filter.map_or(true, |want| want == index);
                let has_gateway_flag = hdr.rtm_flags & libc::RTF_GATEWAY != 0;
                let gateway_present = hdr.rtm_addrs & libc::RTA_GATEWAY != 0;

                if has_gateway_flag && gateway_present && wanted {
                    if let Some(address) = default_route_gateway(&buf[offset + HDR_LEN..])? {
                        on_gateway(&GatewayAddressInfo {
                            interface_index: index,
                            address,
                        });
                    }
                }

                offset += msglen;
            }
            Ok(())
        }

        /// Extract the gateway of a default route from a message body, or
        /// `None` when the route is specific or of an unhandled family.
        ///
        /// The body places the destination address first and, for the flag
        /// combination the caller checked, the gateway second.
        fn default_route_gateway(body: &[u8]) -> Result<Option<IpAddr>> {
            const SIN_LEN: usize = mem::size_of::<libc::sockaddr_in>();
            const SIN6_LEN: usize = mem::size_of::<libc::sockaddr_in6>();

            if body.len() < mem::size_of::<libc::sockaddr>() {
                return Err(Errno::EBADMSG);
            }
            let generic: libc::sockaddr = unsafe { ptr::read_unaligned(body.as_ptr().cast()) };

            match c_int::from(generic.sa_family) {
                libc::AF_INET => {
                    if body.len() < 2 * SIN_LEN {
                        return Err(Errno::EBADMSG);
                    }
                    let dest: libc::sockaddr_in =
                        unsafe { ptr::read_unaligned(body.as_ptr().cast()) };
                    if dest.sin_addr.s_addr != 0 {
                        return Ok(None);
                    }
                    let gateway: libc::sockaddr_in =
                        unsafe { ptr::read_unaligned(body.as_ptr().add(SIN_LEN).cast()) };
                    Ok(Some(IpAddr::V4(Ipv4Addr::from(
                        gateway.sin_addr.s_addr.to_ne_bytes(),
                    ))))
                }
                libc::AF_INET6 => {
                    if body.len() < 2 * SIN6_LEN {
                        return Err(Errno::EBADMSG);
                    }
                    let dest: libc::sockaddr_in6 =
                        unsafe { ptr::read_unaligned(body.as_ptr().cast()) };
                    if dest.sin6_addr.s6_addr != [0u8; 16] {
                        return Ok(None);
                    }
                    let gateway: libc::sockaddr_in6 =
                        unsafe { ptr::read_unaligned(body.as_ptr().add(SIN6_LEN).cast()) };
                    let mut octets = gateway.sin6_addr.s6_addr;
                    // Link-local gateways embed the interface index in the
                    // second segment; the index travels separately.
                    if (u16::from_be_bytes([octets[0], octets[1]]) & 0xfe80) == 0xfe80 {
                        octets[2] = 0;
                        octets[3] = 0;
                    }
                    Ok(Some(IpAddr::V6(Ipv6Addr::from(octets))))
                }
                _ => Ok(None),
            }
        }

    } else {
        /// Scan the routing table for default-route gateways.
        ///
        /// This platform has no routing-dump sysctl; the scan always
        /// reports [`Errno::ENOTSUP`] without invoking the sink.
        pub fn visit_gateways<F>(_interface_index: Option<u32>, _on_gateway: F) -> Result<()>
        where
            F: FnMut(&GatewayAddressInfo),
        {
            Err(Errno::ENOTSUP)
        }

        #[cfg(test)]
        mod tests {
            use super::*;

            #[test]
            fn reports_unsupported_without_firing_the_sink() {
                let mut fired = 0;
                let result = visit_gateways(None, |_| fired += 1);
                assert_eq!(result, Err(Errno::ENOTSUP));
                assert_eq!(fired, 0);
            }
        }
    }
}
