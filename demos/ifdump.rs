//! Print every interface, address and default gateway on the system, in a
//! format loosely similar to ifconfig(8).

use ifscan::ifaddrs::Getifaddrs;
use ifscan::interfaces::{
    AddressVisitor, Ipv4AddressInfo, Ipv6AddressInfo, LinkLayerAddressInfo,
};
use ifscan::route::visit_gateways;
use ifscan::Errno;

fn main() {
    let source = match Getifaddrs::resolve() {
        Ok(source) => source,
        Err(err) => {
            eprintln!("interface enumeration unavailable: {err}");
            return;
        }
    };

    let mut on_ipv4 = |name: &str, info: &Ipv4AddressInfo| {
        println!("{name}: inet {}/{}", info.address, info.prefix_len);
    };
    let mut on_ipv6 = |name: &str, info: &Ipv6AddressInfo| {
        println!(
            "{name}: inet6 {}/{} scope {}",
            info.address, info.prefix_len, info.scope_id
        );
    };
    let mut on_link = |name: &str, info: &LinkLayerAddressInfo| {
        let mac: Vec<String> = info
            .address_bytes()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        println!("{name}: link {} ({:?})", mac.join(":"), info.hardware_type);
    };

    source
        .visit(AddressVisitor {
            on_ipv4: Some(&mut on_ipv4),
            on_ipv6: Some(&mut on_ipv6),
            on_link: Some(&mut on_link),
        })
        .unwrap();

    println!();
    let snapshot = source.snapshot().unwrap();
    for iface in &snapshot.interfaces {
        println!(
            "{} idx={} {:?} {:?} multicast={} mtu={:?} speed={:?}",
            iface.name,
            iface.interface_index,
            iface.hardware_type,
            iface.operational_status,
            iface.supports_multicast,
            iface.mtu,
            iface.speed,
        );
    }

    println!();
    match visit_gateways(None, |gateway| {
        println!(
            "default via {} on interface {}",
            gateway.address, gateway.interface_index
        );
    }) {
        Ok(()) => {}
        Err(Errno::ENOTSUP) => println!("(no routing-dump support here)"),
        Err(err) => eprintln!("gateway scan failed: {err}"),
    }
}
