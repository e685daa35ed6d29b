use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Derive a node id seed from the first private address of an interface that
/// is up and not a loopback.
///
/// IPv4 addresses use their last two octets, IPv6 addresses their last
/// segment. Returns `None` if no private address is found.
pub fn node_id_from_private_ip() -> Option<u16> {
    let ips: Vec<IpAddr> = pnet_datalink::interfaces()
        .iter()
        .filter(|iface| iface.is_up() && !iface.is_loopback())
        .flat_map(|iface| iface.ips.iter().map(|network| network.ip()))
        .collect();
    node_id_from_ips(&ips)
}

fn node_id_from_ips(ips: &[IpAddr]) -> Option<u16> {
    let v4 = ips.iter().find_map(|ip| match ip {
        IpAddr::V4(v4) if is_private_ipv4(v4) => Some(*v4),
        _ => None,
    });
    if let Some(v4) = v4 {
        let octets = v4.octets();
        return Some(u16::from_be_bytes([octets[2], octets[3]]));
    }

    ips.iter().find_map(|ip| match ip {
        IpAddr::V6(v6) if is_private_ipv6(v6) => Some(v6.segments()[7]),
        _ => None,
    })
}

fn is_private_ipv4(ip: &Ipv4Addr) -> bool {
    let octets = ip.octets();
    matches!(octets[0], 10)
        || (octets[0] == 172 && (16..=31).contains(&octets[1]))
        || (octets[0] == 192 && octets[1] == 168)
}

fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
    // fc00::/7 (unique local) and fe80::/10 (link local)
    (ip.segments()[0] & 0xfe00) == 0xfc00 || (ip.segments()[0] & 0xffc0) == 0xfe80
}
