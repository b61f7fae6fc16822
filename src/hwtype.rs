//! Mapping of OS hardware-type codes to a portable classification.
//!
//! Linux reports an ARPHRD_* code in `sockaddr_ll`, the BSDs an IFT_* code
//! in `sockaddr_dl`. Both collapse onto [`HardwareType`]; codes with no
//! portable equivalent become [`HardwareType::Unknown`].

use cfg_if::cfg_if;

/// Portable classification of an interface's underlying hardware.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum HardwareType {
    Unknown,
    Ethernet,
    TokenRing,
    Fddi,
    Ppp,
    Loopback,
    Slip,
    Atm,
    Wireless80211,
    Tunnel,
}

cfg_if! {
    if #[cfg(linux_android)] {
        /// Classify an ARPHRD_* code from `sockaddr_ll`.
        pub fn classify(raw: u16) -> HardwareType {
            match raw {
                libc::ARPHRD_ETHER | libc::ARPHRD_EETHER => HardwareType::Ethernet,
                libc::ARPHRD_PRONET => HardwareType::TokenRing,
                libc::ARPHRD_SLIP
                | libc::ARPHRD_CSLIP
                | libc::ARPHRD_SLIP6
                | libc::ARPHRD_CSLIP6 => HardwareType::Slip,
                libc::ARPHRD_PPP => HardwareType::Ppp,
                libc::ARPHRD_TUNNEL | libc::ARPHRD_TUNNEL6 | libc::ARPHRD_SIT => {
                    HardwareType::Tunnel
                }
                libc::ARPHRD_LOOPBACK => HardwareType::Loopback,
                libc::ARPHRD_FDDI => HardwareType::Fddi,
                libc::ARPHRD_IEEE80211
                | libc::ARPHRD_IEEE80211_PRISM
                | libc::ARPHRD_IEEE80211_RADIOTAP => HardwareType::Wireless80211,
                _ => HardwareType::Unknown,
            }
        }
    } else if #[cfg(bsd)] {
        // net/if_types.h values; libc does not export IFT_* on every BSD.
        const IFT_ETHER: u16 = 0x06;
        const IFT_ISO88025: u16 = 0x09;
        const IFT_FDDI: u16 = 0x0f;
        const IFT_PPP: u16 = 0x17;
        const IFT_LOOP: u16 = 0x18;
        const IFT_SLIP: u16 = 0x1c;
        const IFT_ATM: u16 = 0x25;
        const IFT_GIF: u16 = 0x37;
        const IFT_STF: u16 = 0x39;

        /// Classify an IFT_* code from `sockaddr_dl`.
        pub fn classify(raw: u16) -> HardwareType {
            match raw {
                IFT_ETHER => HardwareType::Ethernet,
                IFT_ISO88025 => HardwareType::TokenRing,
                IFT_FDDI => HardwareType::Fddi,
                IFT_PPP => HardwareType::Ppp,
                IFT_LOOP => HardwareType::Loopback,
                IFT_SLIP => HardwareType::Slip,
                IFT_ATM => HardwareType::Atm,
                IFT_GIF | IFT_STF => HardwareType::Tunnel,
                _ => HardwareType::Unknown,
            }
        }
    } else {
        /// This platform reports no link-layer records; nothing to classify.
        pub fn classify(_raw: u16) -> HardwareType {
            HardwareType::Unknown
        }
    }
}
