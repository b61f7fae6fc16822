use ifscan::route::visit_gateways;

#[cfg(any(apple_targets, target_os = "freebsd"))]
#[test]
fn scans_the_routing_table() {
    let mut seen = Vec::new();
    visit_gateways(None, |gateway| seen.push(*gateway)).unwrap();

    // An isolated host may legitimately have no default route.
    for gateway in &seen {
        assert!(gateway.interface_index > 0);
    }
}

#[cfg(not(any(apple_targets, target_os = "freebsd")))]
#[test]
fn the_gateway_scan_is_unsupported_here() {
    use ifscan::Errno;

    let mut fired = 0;
    let result = visit_gateways(None, |_| fired += 1);
    assert_eq!(result, Err(Errno::ENOTSUP));
    assert_eq!(fired, 0);
}
