/// `0x` followed by exactly 40 hex digits, either case.
pub fn is_valid_eth_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// `?limit=` values that are missing, non-numeric or zero fall back to `default`.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_eth_addresses() {
        assert!(is_valid_eth_address("0x6B175474E89094C44Da98b954EedeAC495271d0F"));
        assert!(is_valid_eth_address("0x0000000000000000000000000000000000000000"));
        assert!(!is_valid_eth_address("0X6B175474E89094C44Da98b954EedeAC495271d0F"));
        assert!(!is_valid_eth_address("6B175474E89094C44Da98b954EedeAC495271d0F00"));
        assert!(!is_valid_eth_address("0x6B175474E89094C44Da98b954EedeAC495271d0"));
        assert!(!is_valid_eth_address("0x6B175474E89094C44Da98b954EedeAC495271d0FF"));
        assert!(!is_valid_eth_address("0xZZ175474E89094C44Da98b954EedeAC495271d0F"));
        assert!(!is_valid_eth_address(""));
    }

    #[test]
    fn limit_falls_back_to_default() {
        assert_eq!(parse_limit(None, 10), 10);
        assert_eq!(parse_limit(Some("3"), 10), 3);
        assert_eq!(parse_limit(Some("0"), 10), 10);
        assert_eq!(parse_limit(Some("abc"), 10), 10);
        assert_eq!(parse_limit(Some("-2"), 10), 10);
    }
}
