//! Subnet Derivation Service
//!
//! Pure domain logic for computing the network enclosing a queried address
//! from the prefix length matched by the database.

use crate::domain::entities::Subnet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Bits an IPv4 address is shifted into the IPv6-mapped space.
const IPV4_MAPPED_OFFSET: u8 = 96;

/// Derives the enclosing subnet of a queried address.
///
/// Masking runs on the normalized IPv6-mapped 16-byte form so both address
/// families share one code path; the resulting network is reported back in
/// the queried family with the family-relative prefix length.
pub struct SubnetDeriver;

impl SubnetDeriver {
    /// Clear all host bits of `address` under `prefix_len` and attach the
    /// prefix length.
    ///
    /// A prefix outside the family range indicates a defect in the database
    /// reader, not a recoverable condition.
    ///
    /// # Panics
    /// If `prefix_len` exceeds 32 for an IPv4 address or 128 for IPv6.
    pub fn derive(address: IpAddr, prefix_len: u8) -> Subnet {
        let full_prefix = match address {
            IpAddr::V4(_) => {
                assert!(prefix_len <= 32, "IPv4 prefix length out of range: {prefix_len}");
                prefix_len + IPV4_MAPPED_OFFSET
            }
            IpAddr::V6(_) => {
                assert!(prefix_len <= 128, "IPv6 prefix length out of range: {prefix_len}");
                prefix_len
            }
        };

        let mapped = match address {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };

        let mask: u128 = if full_prefix == 0 {
            0
        } else {
            u128::MAX << (128 - u32::from(full_prefix))
        };
        let network_bits = u128::from(mapped) & mask;

        let network = match address {
            IpAddr::V4(_) => {
                IpAddr::V4(Ipv4Addr::from((network_bits & 0xffff_ffff) as u32))
            }
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(network_bits)),
        };

        Subnet::new(network, prefix_len)
    }
}
