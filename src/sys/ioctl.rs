//! Per-interface ioctl queries.
//!
//! Everything here is best-effort: a failed socket or ioctl leaves the
//! caller's record at its "unknown" default and is never reported as an
//! error. Linux answers MTU and ethtool link/speed questions; the BSDs
//! answer the media-type question used to tell Wi-Fi from wired Ethernet.

#[cfg(any(linux_android, bsd))]
fn copy_name(dst: &mut [libc::c_char], name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() >= dst.len() {
        return false;
    }
    for (d, s) in dst.iter_mut().zip(bytes) {
        *d = *s as libc::c_char;
    }
    true
}

#[cfg(linux_android)]
mod ethtool {
    use libc::c_int;
    use std::mem;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    use super::copy_name;
    use crate::hwtype::HardwareType;
    use crate::interfaces::{NetworkInterfaceInfo, OperationalStatus};

    // linux/sockios.h; typed to match the platform's ioctl signature.
    const SIOCETHTOOL: libc::Ioctl = 0x8946;

    const ETHTOOL_GSET: u32 = 0x0000_0001;
    const ETHTOOL_GLINK: u32 = 0x0000_000a;

    // linux/ethtool.h
    #[allow(non_camel_case_types)]
    #[repr(C)]
    struct ethtool_value {
        cmd: u32,
        data: u32,
    }

    #[allow(non_camel_case_types, dead_code)]
    #[repr(C)]
    struct ethtool_cmd {
        cmd: u32,
        supported: u32,
        advertising: u32,
        speed: u16,
        duplex: u8,
        port: u8,
        phy_address: u8,
        transceiver: u8,
        autoneg: u8,
        mdio_support: u8,
        maxtxpkt: u32,
        maxrxpkt: u32,
        speed_hi: u16,
        eth_tp_mdix: u8,
        eth_tp_mdix_ctrl: u8,
        lp_advertising: u32,
        reserved: [u32; 2],
    }

    fn speed_bits(cmd: &ethtool_cmd) -> Option<i64> {
        #[cfg(android)]
        let mbits = i64::from(cmd.speed);
        #[cfg(not(android))]
        let mbits = (i64::from(cmd.speed_hi) << 16) | i64::from(cmd.speed);
        // 0xffff and 0xffffffff are the driver's "speed unknown" readings.
        if mbits > 0 && mbits != 0xffff && mbits != 0xffff_ffff {
            Some(mbits * 1_000_000)
        } else {
            None
        }
    }

    /// Lazily-opened datagram socket shared by the queries of one
    /// aggregation pass.
    #[derive(Default)]
    pub(crate) struct LinkProbe {
        fd: Option<OwnedFd>,
    }

    impl LinkProbe {
        fn fd(&mut self) -> Option<c_int> {
            if self.fd.is_none() {
                let fd = unsafe {
                    libc::socket(libc::AF_INET, libc::SOCK_DGRAM, libc::IPPROTO_IP)
                };
                if fd < 0 {
                    return None;
                }
                self.fd = Some(unsafe { OwnedFd::from_raw_fd(fd) });
            }
            self.fd.as_ref().map(AsRawFd::as_raw_fd)
        }

        /// Fill MTU, link speed and the carrier-state override for one
        /// interface entry.
        pub(crate) fn fill(&mut self, info: &mut NetworkInterfaceInfo) {
            let Some(fd) = self.fd() else { return };
            let mut req: libc::ifreq = unsafe { mem::zeroed() };
            if !copy_name(&mut req.ifr_name, &info.name) {
                return;
            }

            if unsafe { libc::ioctl(fd, libc::SIOCGIFMTU, &mut req) } == 0 {
                info.mtu = Some(unsafe { req.ifr_ifru.ifru_mtu });
            }

            // Loopback and tunnel devices carry no meaningful ethtool state.
            if matches!(
                info.hardware_type,
                HardwareType::Unknown | HardwareType::Tunnel | HardwareType::Loopback
            ) {
                return;
            }

            let mut link = ethtool_value {
                cmd: ETHTOOL_GLINK,
                data: 0,
            };
            req.ifr_ifru.ifru_data = (&mut link as *mut ethtool_value).cast();
            if unsafe { libc::ioctl(fd, SIOCETHTOOL, &mut req) } != 0 {
                return;
            }
            if link.data == 0 {
                // The driver sees no carrier even though the OS flags
                // claimed IFF_RUNNING.
                info.operational_status = OperationalStatus::Down;
            }

            // ETHTOOL_GSET rather than ETHTOOL_GLINKSETTINGS, to keep old
            // kernels answering.
            let mut cmd: ethtool_cmd = unsafe { mem::zeroed() };
            cmd.cmd = ETHTOOL_GSET;
            req.ifr_ifru.ifru_data = (&mut cmd as *mut ethtool_cmd).cast();
            if unsafe { libc::ioctl(fd, SIOCETHTOOL, &mut req) } == 0 {
                info.speed = speed_bits(&cmd);
            }
        }
    }
}

#[cfg(linux_android)]
pub(crate) use self::ethtool::LinkProbe;

#[cfg(bsd)]
mod media {
    use libc::c_int;
    use std::mem;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    use super::copy_name;

    // net/if_media.h; libc exports neither the request nor the struct.
    const SIOCGIFMEDIA: libc::c_ulong = 0xc030_6938;
    const IFM_NMASK: c_int = 0x0000_00e0;
    const IFM_IEEE80211: c_int = 0x0000_0080;

    #[allow(non_camel_case_types, dead_code)]
    #[repr(C)]
    struct ifmediareq {
        ifm_name: [libc::c_char; libc::IFNAMSIZ as usize],
        ifm_current: c_int,
        ifm_mask: c_int,
        ifm_status: c_int,
        ifm_active: c_int,
        ifm_count: c_int,
        ifm_ulist: *mut c_int,
    }

    /// Whether the interface's current media type is IEEE 802.11.
    ///
    /// Wired and wireless Ethernet share a hardware type on the BSDs; the
    /// media subtype is the only way to tell them apart. Best-effort.
    pub(crate) fn media_is_ieee80211(name: &str) -> bool {
        let fd = unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) };
        if fd < 0 {
            return false;
        }
        let fd = unsafe { OwnedFd::from_raw_fd(fd) };

        let mut req: ifmediareq = unsafe { mem::zeroed() };
        if !copy_name(&mut req.ifm_name, name) {
            return false;
        }

        unsafe { libc::ioctl(fd.as_raw_fd(), SIOCGIFMEDIA, &mut req) == 0 }
            && (req.ifm_current & IFM_NMASK) == IFM_IEEE80211
    }
}

#[cfg(bsd)]
pub(crate) use self::media::media_is_ieee80211;
