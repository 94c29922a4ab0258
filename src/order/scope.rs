//! Direction masks for single-anchor ordering.

use std::fmt;
use std::str::FromStr;

/// Which parts of an anchor's neighbourhood an ordering covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderScope {
    /// Keep the anchor itself in the result
    pub include_anchor: bool,
    /// Walk consumers (projects depending on the anchor)
    pub include_ancestors: bool,
    /// Walk dependencies (projects the anchor depends on)
    pub include_descendants: bool,
}

impl OrderScope {
    /// The anchor and everything reachable in either direction.
    pub const ALL: Self = Self {
        include_anchor: true,
        include_ancestors: true,
        include_descendants: true,
    };

    /// Creates a scope from the three flags.
    pub const fn new(include_anchor: bool, include_ancestors: bool, include_descendants: bool) -> Self {
        Self {
            include_anchor,
            include_ancestors,
            include_descendants,
        }
    }
}

impl Default for OrderScope {
    fn default() -> Self {
        Self::ALL
    }
}

/// Named scopes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// The anchor and everything it depends on
    To,
    /// The anchor and everything depending on it
    From,
    /// Everything depending on the anchor, without the anchor
    Above,
    /// Everything the anchor depends on, without the anchor
    Below,
    /// The anchor plus both directions
    All,
}

impl Modifier {
    /// Every modifier, in help-text order.
    pub const VALUES: [Modifier; 5] = [
        Modifier::To,
        Modifier::From,
        Modifier::Above,
        Modifier::Below,
        Modifier::All,
    ];

    /// The direction mask this modifier stands for.
    pub fn scope(self) -> OrderScope {
        match self {
            Modifier::To => OrderScope::new(true, false, true),
            Modifier::From => OrderScope::new(true, true, false),
            Modifier::Above => OrderScope::new(false, true, false),
            Modifier::Below => OrderScope::new(false, false, true),
            Modifier::All => OrderScope::ALL,
        }
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to" => Ok(Modifier::To),
            "from" => Ok(Modifier::From),
            "above" => Ok(Modifier::Above),
            "below" => Ok(Modifier::Below),
            "all" => Ok(Modifier::All),
            _ => Err(format!(
                "Unknown modifier: '{}'. Valid modifiers: to, from, above, below, all",
                s
            )),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::To => write!(f, "to"),
            Modifier::From => write!(f, "from"),
            Modifier::Above => write!(f, "above"),
            Modifier::Below => write!(f, "below"),
            Modifier::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_scopes() {
        assert_eq!(Modifier::To.scope(), OrderScope::new(true, false, true));
        assert_eq!(Modifier::From.scope(), OrderScope::new(true, true, false));
        assert_eq!(Modifier::Above.scope(), OrderScope::new(false, true, false));
        assert_eq!(Modifier::Below.scope(), OrderScope::new(false, false, true));
        assert_eq!(Modifier::All.scope(), OrderScope::ALL);
    }

    #[test]
    fn test_modifier_from_str() {
        for modifier in Modifier::VALUES {
            assert_eq!(modifier.to_string().parse::<Modifier>().unwrap(), modifier);
        }
        assert!("TO".parse::<Modifier>().is_err());
        assert!("client".parse::<Modifier>().is_err());
    }

    #[test]
    fn test_default_scope_is_all() {
        assert_eq!(OrderScope::default(), OrderScope::ALL);
    }
}
