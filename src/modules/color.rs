use crate::modules::capability::ColorTag;

/// Tag carried by nodes that join every sub-network.
pub const WILDCARD: ColorTag = -1;

pub const fn is_wildcard(tag: ColorTag) -> bool {
    tag < 0
}

/// Whether a native transfer from `origin` to `neighbor` may happen.
pub const fn compatible(origin: ColorTag, neighbor: ColorTag) -> bool {
    is_wildcard(origin) || is_wildcard(neighbor) || origin == neighbor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_pass_either_way() {
        assert!(compatible(WILDCARD, 3));
        assert!(compatible(3, WILDCARD));
        assert!(compatible(WILDCARD, WILDCARD));
        assert!(compatible(-7, 0));
    }

    #[test]
    fn colored_nodes_only_match_their_own_segment() {
        assert!(compatible(2, 2));
        assert!(compatible(0, 0));
        assert!(!compatible(2, 5));
        assert!(!compatible(0, 15));
    }
}
