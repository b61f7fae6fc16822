//! Normalized interface and address records.
//!
//! Two consumers share the raw enumeration source: [`Getifaddrs::visit`]
//! streams one derived record per configured address through per-family
//! sinks, and [`Getifaddrs::snapshot`] aggregates the same data into one
//! entry per interface plus a flat address table. Both walk the source to
//! completion or fail as a whole; a failed call makes no guarantee about
//! how many sink invocations happened first.

use std::ffi::CString;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::hwtype::{self, HardwareType};
use crate::ifaddrs::{Getifaddrs, RawAddress, RawNetmask, RawRecord};
use crate::net::if_::{self, InterfaceFlags};
use crate::Result;

/// Physical addresses are treated as at most 8 bytes, as the kernel does.
pub const HW_ADDR_MAX: usize = 8;

/// One configured IPv4 address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv4AddressInfo {
    pub interface_index: u32,
    pub address: Ipv4Addr,
    pub prefix_len: u8,
}

/// One configured IPv6 address. The scope id is only meaningful for
/// link-local addresses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv6AddressInfo {
    pub interface_index: u32,
    pub address: Ipv6Addr,
    pub prefix_len: u8,
    pub scope_id: u32,
}

/// Entry of the snapshot's address table.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IpAddressInfo {
    V4(Ipv4AddressInfo),
    V6(Ipv6AddressInfo),
}

impl IpAddressInfo {
    pub fn interface_index(&self) -> u32 {
        match self {
            IpAddressInfo::V4(info) => info.interface_index,
            IpAddressInfo::V6(info) => info.interface_index,
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            IpAddressInfo::V4(info) => info.prefix_len,
            IpAddressInfo::V6(info) => info.prefix_len,
        }
    }
}

/// An interface's link-layer (hardware) address.
///
/// Addresses longer than [`HW_ADDR_MAX`] bytes are truncated to their
/// first 8 bytes, never rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LinkLayerAddressInfo {
    pub interface_index: u32,
    pub bytes: [u8; HW_ADDR_MAX],
    pub len: u8,
    pub hardware_type: HardwareType,
}

impl LinkLayerAddressInfo {
    /// The valid bytes of the hardware address.
    pub fn address_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

/// Whether an interface can currently move packets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationalStatus {
    Up,
    Down,
}

/// One entry per distinct interface index in a [`InterfaceSnapshot`].
///
/// Snapshot values: the entry reflects the interface at enumeration time
/// and is never updated afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkInterfaceInfo {
    pub name: String,
    pub interface_index: u32,
    pub hardware_type: HardwareType,
    pub hw_addr: [u8; HW_ADDR_MAX],
    pub hw_addr_len: u8,
    pub operational_status: OperationalStatus,
    pub supports_multicast: bool,
    /// Maximum transmission unit, where the platform exposes a query.
    pub mtu: Option<i32>,
    /// Link speed in bits per second; `None` when the driver does not say.
    pub speed: Option<i64>,
}

impl NetworkInterfaceInfo {
    /// The valid bytes of the hardware address; empty when no link-layer
    /// record was seen for the interface.
    pub fn hardware_address(&self) -> &[u8] {
        &self.hw_addr[..usize::from(self.hw_addr_len)]
    }

    fn new(record: &RawRecord, index: u32) -> Self {
        // Transmitting needs both the administrative IFF_UP and the
        // carrier's IFF_RUNNING.
        let up = record
            .flags
            .contains(InterfaceFlags::IFF_UP | InterfaceFlags::IFF_RUNNING);
        NetworkInterfaceInfo {
            name: record.name.clone(),
            interface_index: index,
            hardware_type: HardwareType::Unknown,
            hw_addr: [0; HW_ADDR_MAX],
            hw_addr_len: 0,
            operational_status: if up {
                OperationalStatus::Up
            } else {
                OperationalStatus::Down
            },
            supports_multicast: record
                .flags
                .intersects(InterfaceFlags::IFF_MULTICAST | InterfaceFlags::IFF_ALLMULTI),
            mtu: None,
            speed: None,
        }
    }
}

/// The result of one batch aggregation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterfaceSnapshot {
    pub interfaces: Vec<NetworkInterfaceInfo>,
    pub addresses: Vec<IpAddressInfo>,
}

/// Per-family sinks for the streaming walk. Leave a sink `None` to skip
/// that family.
#[derive(Default)]
pub struct AddressVisitor<'a> {
    pub on_ipv4: Option<&'a mut dyn FnMut(&str, &Ipv4AddressInfo)>,
    pub on_ipv6: Option<&'a mut dyn FnMut(&str, &Ipv6AddressInfo)>,
    pub on_link: Option<&'a mut dyn FnMut(&str, &LinkLayerAddressInfo)>,
}

/// Convert a netmask to its prefix length, e.g. `255.255.255.0` -> 24.
///
/// Counts leading one-bits; the count stops at the first byte that is not
/// fully set. An all-zero IPv4 mask reports the full /32: some stacks hand
/// out zeroed masks for host-only addresses.
fn mask_to_prefix(mask: &[u8]) -> u8 {
    let mut len = 0u8;
    for &byte in mask {
        if byte == 0xff {
            len += 8;
        } else {
            len += byte.leading_ones() as u8;
            break;
        }
    }
    if len == 0 && mask.len() == 4 {
        return 32;
    }
    len
}

fn v4_prefix(netmask: &Option<RawNetmask>) -> u8 {
    match netmask {
        Some(RawNetmask::V4(mask)) => mask_to_prefix(mask),
        // No mask reported (point-to-point interfaces): host address.
        _ => 32,
    }
}

fn v6_prefix(netmask: &Option<RawNetmask>) -> u8 {
    match netmask {
        Some(RawNetmask::V6(mask)) => mask_to_prefix(mask),
        _ => 128,
    }
}

fn link_layer_info(
    index: u32,
    hardware_type: HardwareType,
    addr: &[u8],
) -> LinkLayerAddressInfo {
    let len = addr.len().min(HW_ADDR_MAX);
    let mut bytes = [0u8; HW_ADDR_MAX];
    bytes[..len].copy_from_slice(&addr[..len]);
    LinkLayerAddressInfo {
        interface_index: index,
        bytes,
        len: len as u8,
        hardware_type,
    }
}

/// A source of raw records. Every `walk` is a fresh enumeration; the
/// source is not rewindable.
pub(crate) trait RecordSource {
    fn walk(&self, f: &mut dyn FnMut(&RawRecord) -> Result<()>) -> Result<()>;
}

impl RecordSource for Getifaddrs {
    fn walk(&self, f: &mut dyn FnMut(&RawRecord) -> Result<()>) -> Result<()> {
        let list = self.enumerate()?;
        for record in list.iter() {
            f(&record)?;
        }
        Ok(())
    }
}

/// Interface name/index resolution.
pub(crate) trait NameResolver {
    /// `if_nametoindex` semantics: 0 when the name does not resolve.
    fn index_of(&self, name: &str) -> u32;
    /// `if_indextoname` semantics: the canonical device name behind an
    /// index.
    fn canonical_name(&self, index: u32) -> Result<String>;
}

pub(crate) struct SystemResolver;

impl NameResolver for SystemResolver {
    fn index_of(&self, name: &str) -> u32 {
        CString::new(name)
            .ok()
            .and_then(|name| if_::if_nametoindex(&name).ok())
            .unwrap_or(0)
    }

    fn canonical_name(&self, index: u32) -> Result<String> {
        if_::if_indextoname(index).map(|name| name.to_string_lossy().into_owned())
    }
}

pub(crate) fn stream_records<S, R>(
    source: &S,
    resolver: &R,
    mut visitor: AddressVisitor<'_>,
) -> Result<()>
where
    S: RecordSource + ?Sized,
    R: NameResolver + ?Sized,
{
    source.walk(&mut |record| {
        let Some(address) = &record.address else {
            return Ok(());
        };
        let index = resolver.index_of(&record.name);
        // The record may carry an alias name; map the index back to the
        // canonical device name. Failure here aborts the whole walk.
        let name = resolver.canonical_name(index)?;

        match address {
            RawAddress::V4(ip) => {
                if let Some(sink) = visitor.on_ipv4.as_mut() {
                    let info = Ipv4AddressInfo {
                        interface_index: index,
                        address: *ip,
                        prefix_len: v4_prefix(&record.netmask),
                    };
                    sink(&name, &info);
                }
            }
            RawAddress::V6 { octets, scope_id } => {
                if let Some(sink) = visitor.on_ipv6.as_mut() {
                    let info = Ipv6AddressInfo {
                        interface_index: index,
                        address: Ipv6Addr::from(*octets),
                        prefix_len: v6_prefix(&record.netmask),
                        scope_id: *scope_id,
                    };
                    sink(&name, &info);
                }
            }
            RawAddress::Link { raw_type, bytes, len } => {
                if let Some(sink) = visitor.on_link.as_mut() {
                    let hw = hwtype::classify(*raw_type);
                    // Wired and wireless Ethernet share a type code here;
                    // the live media query tells them apart.
                    #[cfg(bsd)]
                    let hw = if hw == HardwareType::Ethernet
                        && crate::sys::ioctl::media_is_ieee80211(&name)
                    {
                        HardwareType::Wireless80211
                    } else {
                        hw
                    };
                    let info = link_layer_info(index, hw, &bytes[..usize::from(*len)]);
                    sink(&name, &info);
                }
            }
            RawAddress::Other => {}
        }
        Ok(())
    })
}

pub(crate) fn aggregate_records<S, R>(source: &S, resolver: &R) -> Result<InterfaceSnapshot>
where
    S: RecordSource + ?Sized,
    R: NameResolver + ?Sized,
{
    // First pass sizes the output tables so the second never reallocates.
    let mut record_count = 0usize;
    let mut ip_count = 0usize;
    source.walk(&mut |record| {
        record_count += 1;
        if matches!(
            record.address,
            Some(RawAddress::V4(_)) | Some(RawAddress::V6 { .. })
        ) {
            ip_count += 1;
        }
        Ok(())
    })?;

    let mut interfaces: Vec<NetworkInterfaceInfo> = Vec::with_capacity(record_count);
    let mut addresses: Vec<IpAddressInfo> = Vec::with_capacity(ip_count);
    #[cfg(linux_android)]
    let mut probe = crate::sys::ioctl::LinkProbe::default();

    source.walk(&mut |record| {
        let index = resolver.index_of(&record.name);
        // Interface lists are small; a linear scan beats a map here.
        let slot = match interfaces
            .iter()
            .position(|iface| iface.interface_index == index)
        {
            Some(slot) => slot,
            None => {
                interfaces.push(NetworkInterfaceInfo::new(record, index));
                interfaces.len() - 1
            }
        };

        match &record.address {
            // PPP- and tunnel-style interfaces may carry no address at
            // all; the entry pushed above still counts.
            None | Some(RawAddress::Other) => {}
            Some(RawAddress::V4(ip)) => {
                addresses.push(IpAddressInfo::V4(Ipv4AddressInfo {
                    interface_index: index,
                    address: *ip,
                    prefix_len: v4_prefix(&record.netmask),
                }));
            }
            Some(RawAddress::V6 { octets, scope_id }) => {
                addresses.push(IpAddressInfo::V6(Ipv6AddressInfo {
                    interface_index: index,
                    address: Ipv6Addr::from(*octets),
                    prefix_len: v6_prefix(&record.netmask),
                    scope_id: *scope_id,
                }));
            }
            Some(RawAddress::Link { raw_type, bytes, len }) => {
                let entry = &mut interfaces[slot];
                let copy = usize::from(*len).min(HW_ADDR_MAX);
                entry.hardware_type = hwtype::classify(*raw_type);
                entry.hw_addr = [0; HW_ADDR_MAX];
                entry.hw_addr[..copy].copy_from_slice(&bytes[..copy]);
                entry.hw_addr_len = copy as u8;
                #[cfg(linux_android)]
                probe.fill(entry);
            }
        }
        Ok(())
    })?;

    Ok(InterfaceSnapshot {
        interfaces,
        addresses,
    })
}

impl Getifaddrs {
    /// Stream every configured address through the visitor's sinks in a
    /// single enumeration.
    ///
    /// Sinks receive the canonical device name and may fire zero or many
    /// times per interface. On an error return, results delivered so far
    /// are best-effort and possibly incomplete.
    pub fn visit(&self, visitor: AddressVisitor<'_>) -> Result<()> {
        stream_records(self, &SystemResolver, visitor)
    }

    /// Aggregate a complete snapshot: one entry per interface, plus a flat
    /// table of every configured IPv4/IPv6 address.
    pub fn snapshot(&self) -> Result<InterfaceSnapshot> {
        aggregate_records(self, &SystemResolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ifaddrs::RAW_HW_ADDR_MAX;
    use crate::Errno;

    struct VecSource(Vec<RawRecord>);

    impl RecordSource for VecSource {
        fn walk(&self, f: &mut dyn FnMut(&RawRecord) -> Result<()>) -> Result<()> {
            for record in &self.0 {
                f(record)?;
            }
            Ok(())
        }
    }

    struct StaticResolver(Vec<(&'static str, u32)>);

    impl NameResolver for StaticResolver {
        fn index_of(&self, name: &str) -> u32 {
            self.0
                .iter()
                .find(|(known, _)| *known == name)
                .map_or(0, |(_, index)| *index)
        }

        fn canonical_name(&self, index: u32) -> Result<String> {
            self.0
                .iter()
                .find(|(_, known)| *known == index)
                .map(|(name, _)| (*name).to_string())
                .ok_or(Errno::ENXIO)
        }
    }

    fn resolver() -> StaticResolver {
        StaticResolver(vec![
            ("lo0", 1),
            ("lan0", 2),
            ("lan0:1", 2),
            ("ptp0", 7),
        ])
    }

    fn up() -> InterfaceFlags {
        InterfaceFlags::IFF_UP | InterfaceFlags::IFF_RUNNING
    }

    fn v4_record(
        name: &str,
        flags: InterfaceFlags,
        addr: [u8; 4],
        mask: Option<[u8; 4]>,
    ) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            flags,
            address: Some(RawAddress::V4(Ipv4Addr::from(addr))),
            netmask: mask.map(RawNetmask::V4),
        }
    }

    fn v6_record(
        name: &str,
        flags: InterfaceFlags,
        octets: [u8; 16],
        scope_id: u32,
        mask: Option<[u8; 16]>,
    ) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            flags,
            address: Some(RawAddress::V6 { octets, scope_id }),
            netmask: mask.map(RawNetmask::V6),
        }
    }

    fn link_record(name: &str, flags: InterfaceFlags, addr: &[u8]) -> RawRecord {
        let mut bytes = [0u8; RAW_HW_ADDR_MAX];
        bytes[..addr.len()].copy_from_slice(addr);
        RawRecord {
            name: name.to_string(),
            flags,
            address: Some(RawAddress::Link {
                raw_type: 0,
                bytes,
                len: addr.len() as u8,
            }),
            netmask: None,
        }
    }

    fn bare_record(name: &str, flags: InterfaceFlags) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            flags,
            address: None,
            netmask: None,
        }
    }

    fn ula(last: u8) -> [u8; 16] {
        let mut octets = [0u8; 16];
        octets[0] = 0xfd;
        octets[15] = last;
        octets
    }

    fn v6_mask(prefix_bytes: usize) -> [u8; 16] {
        let mut mask = [0u8; 16];
        mask[..prefix_bytes].fill(0xff);
        mask
    }

    #[test]
    fn full_masks_cover_every_bit() {
        assert_eq!(mask_to_prefix(&[0xff; 4]), 32);
        assert_eq!(mask_to_prefix(&[0xff; 16]), 128);
    }

    #[test]
    fn partial_masks_count_leading_ones() {
        assert_eq!(mask_to_prefix(&[0xff, 0xff, 0xff, 0x00]), 24);
        assert_eq!(mask_to_prefix(&[0xff, 0xff, 0xc0, 0x00]), 18);
        // The count stops at the first incomplete byte.
        assert_eq!(mask_to_prefix(&[0xff, 0x00, 0xff, 0x00]), 8);
    }

    #[test]
    fn zero_ipv4_mask_reports_a_host_prefix() {
        assert_eq!(mask_to_prefix(&[0; 4]), 32);
    }

    #[test]
    fn zero_ipv6_mask_reports_zero() {
        assert_eq!(mask_to_prefix(&[0; 16]), 0);
    }

    #[test]
    fn absent_masks_report_host_prefixes() {
        assert_eq!(v4_prefix(&None), 32);
        assert_eq!(v6_prefix(&None), 128);
    }

    #[test]
    fn snapshot_merges_records_by_interface() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [192, 168, 1, 10], Some([255, 255, 255, 0])),
            v6_record("lan0", up(), ula(0x10), 0, Some(v6_mask(8))),
            v4_record("lo0", up(), [127, 0, 0, 1], Some([255, 0, 0, 0])),
        ]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(snapshot.interfaces.len(), 2);
        assert_eq!(snapshot.addresses.len(), 3);

        let lan = snapshot
            .interfaces
            .iter()
            .find(|iface| iface.name == "lan0")
            .unwrap();
        assert_eq!(lan.interface_index, 2);

        for address in &snapshot.addresses {
            assert!(snapshot
                .interfaces
                .iter()
                .any(|iface| iface.interface_index == address.interface_index()));
        }

        let lan_addresses = snapshot
            .addresses
            .iter()
            .filter(|address| address.interface_index() == 2)
            .count();
        assert_eq!(lan_addresses, 2);

        match snapshot.addresses[0] {
            IpAddressInfo::V4(info) => {
                assert_eq!(info.address, Ipv4Addr::new(192, 168, 1, 10));
                assert_eq!(info.prefix_len, 24);
            }
            IpAddressInfo::V6(_) => panic!("first record was IPv4"),
        }
    }

    #[test]
    fn snapshot_is_idempotent_over_a_stable_source() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [10, 0, 0, 2], Some([255, 255, 0, 0])),
            v6_record("lan0", up(), ula(0x02), 0, Some(v6_mask(8))),
            link_record("lan0", up(), &[2, 0, 0, 0, 0, 1]),
        ]);

        let first = aggregate_records(&source, &resolver()).unwrap();
        let second = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn addressless_interface_keeps_its_entry() {
        let source = VecSource(vec![bare_record("ptp0", InterfaceFlags::IFF_UP)]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(snapshot.interfaces.len(), 1);
        assert!(snapshot.addresses.is_empty());
        assert_eq!(snapshot.interfaces[0].interface_index, 7);
        assert_eq!(snapshot.interfaces[0].hardware_type, HardwareType::Unknown);
    }

    #[test]
    fn link_record_fills_the_interface_entry_not_the_address_table() {
        let mac = [0x02, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e];
        let source = VecSource(vec![
            v4_record("lan0", up(), [10, 0, 0, 2], Some([255, 255, 255, 0])),
            link_record("lan0", up(), &mac),
        ]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(snapshot.interfaces.len(), 1);
        assert_eq!(snapshot.addresses.len(), 1);
        assert_eq!(snapshot.interfaces[0].hardware_address(), &mac);
    }

    #[test]
    fn oversized_hardware_addresses_are_truncated() {
        let long: Vec<u8> = (1..=20).collect();
        let source = VecSource(vec![link_record("lan0", up(), &long)]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        let iface = &snapshot.interfaces[0];
        assert_eq!(iface.hw_addr_len, 8);
        assert_eq!(iface.hardware_address(), &long[..8]);
    }

    #[test]
    fn operational_status_needs_both_up_and_running() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [10, 0, 0, 2], None),
            v4_record("lo0", InterfaceFlags::IFF_UP, [127, 0, 0, 1], None),
            bare_record("ptp0", InterfaceFlags::IFF_MULTICAST),
        ]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        let by_name = |name: &str| {
            snapshot
                .interfaces
                .iter()
                .find(|iface| iface.name == name)
                .unwrap()
        };

        assert_eq!(by_name("lan0").operational_status, OperationalStatus::Up);
        assert_eq!(by_name("lo0").operational_status, OperationalStatus::Down);
        assert_eq!(by_name("ptp0").operational_status, OperationalStatus::Down);
        assert!(by_name("ptp0").supports_multicast);
        assert!(!by_name("lo0").supports_multicast);
    }

    #[test]
    fn interface_state_comes_from_the_first_record_seen() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [10, 0, 0, 2], None),
            v6_record("lan0", InterfaceFlags::empty(), ula(0x02), 0, None),
        ]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(snapshot.interfaces.len(), 1);
        assert_eq!(
            snapshot.interfaces[0].operational_status,
            OperationalStatus::Up
        );
    }

    #[test]
    fn unresolvable_names_get_index_zero() {
        let source = VecSource(vec![bare_record("ghost0", up())]);

        let snapshot = aggregate_records(&source, &resolver()).unwrap();
        assert_eq!(snapshot.interfaces[0].interface_index, 0);
    }

    #[test]
    fn visit_routes_each_family_to_its_sink() {
        let mac = [0x02, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e];
        let source = VecSource(vec![
            v4_record("lan0", up(), [192, 168, 1, 10], Some([255, 255, 255, 0])),
            v6_record("lan0", up(), ula(0x10), 3, None),
            link_record("lan0", up(), &mac),
        ]);

        let mut v4_seen = Vec::new();
        let mut v6_seen = Vec::new();
        let mut link_seen = Vec::new();
        let mut on_ipv4 = |name: &str, info: &Ipv4AddressInfo| {
            v4_seen.push((name.to_string(), *info));
        };
        let mut on_ipv6 = |name: &str, info: &Ipv6AddressInfo| {
            v6_seen.push((name.to_string(), *info));
        };
        let mut on_link = |name: &str, info: &LinkLayerAddressInfo| {
            link_seen.push((name.to_string(), *info));
        };

        stream_records(
            &source,
            &resolver(),
            AddressVisitor {
                on_ipv4: Some(&mut on_ipv4),
                on_ipv6: Some(&mut on_ipv6),
                on_link: Some(&mut on_link),
            },
        )
        .unwrap();

        assert_eq!(v4_seen.len(), 1);
        assert_eq!(v6_seen.len(), 1);
        assert_eq!(link_seen.len(), 1);

        let (name, info) = &v4_seen[0];
        assert_eq!(name, "lan0");
        assert_eq!(info.interface_index, 2);
        assert_eq!(info.prefix_len, 24);

        let (_, info) = &v6_seen[0];
        assert_eq!(info.scope_id, 3);
        assert_eq!(info.prefix_len, 128);

        let (_, info) = &link_seen[0];
        assert_eq!(info.address_bytes(), &mac);
    }

    #[test]
    fn visit_reports_canonical_names_for_aliases() {
        let source = VecSource(vec![v4_record(
            "lan0:1",
            up(),
            [192, 168, 1, 11],
            Some([255, 255, 255, 0]),
        )]);

        let mut names = Vec::new();
        let mut on_ipv4 =
            |name: &str, _: &Ipv4AddressInfo| names.push(name.to_string());

        stream_records(
            &source,
            &resolver(),
            AddressVisitor {
                on_ipv4: Some(&mut on_ipv4),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(names, ["lan0"]);
    }

    #[test]
    fn visit_skips_families_without_a_sink() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [192, 168, 1, 10], None),
            v6_record("lan0", up(), ula(0x10), 0, None),
        ]);

        let mut count = 0;
        let mut on_ipv4 = |_: &str, _: &Ipv4AddressInfo| count += 1;

        stream_records(
            &source,
            &resolver(),
            AddressVisitor {
                on_ipv4: Some(&mut on_ipv4),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(count, 1);
    }

    #[test]
    fn visit_skips_records_without_an_address() {
        let source = VecSource(vec![bare_record("ghost0", up())]);

        let mut count = 0;
        let mut on_ipv4 = |_: &str, _: &Ipv4AddressInfo| count += 1;

        let result = stream_records(
            &source,
            &resolver(),
            AddressVisitor {
                on_ipv4: Some(&mut on_ipv4),
                ..Default::default()
            },
        );

        assert_eq!(result, Ok(()));
        assert_eq!(count, 0);
    }

    #[test]
    fn visit_aborts_when_reverse_resolution_fails() {
        let source = VecSource(vec![
            v4_record("lan0", up(), [192, 168, 1, 10], None),
            v4_record("ghost0", up(), [10, 9, 9, 9], None),
            v6_record("lan0", up(), ula(0x10), 0, None),
        ]);

        let mut v4_count = 0;
        let mut v6_count = 0;
        let mut on_ipv4 = |_: &str, _: &Ipv4AddressInfo| v4_count += 1;
        let mut on_ipv6 = |_: &str, _: &Ipv6AddressInfo| v6_count += 1;

        let result = stream_records(
            &source,
            &resolver(),
            AddressVisitor {
                on_ipv4: Some(&mut on_ipv4),
                on_ipv6: Some(&mut on_ipv6),
                ..Default::default()
            },
        );

        assert_eq!(result, Err(Errno::ENXIO));
        assert_eq!(v4_count, 1);
        assert_eq!(v6_count, 0);
    }

    #[test]
    fn unknown_families_still_resolve_the_interface() {
        let unresolvable = VecSource(vec![RawRecord {
            name: "ghost0".to_string(),
            flags: up(),
            address: Some(RawAddress::Other),
            netmask: None,
        }]);

        let result = stream_records(&unresolvable, &resolver(), AddressVisitor::default());
        assert_eq!(result, Err(Errno::ENXIO));
    }
}
