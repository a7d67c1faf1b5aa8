use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplaces a content item can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    Xsoar,
    #[serde(rename = "marketplacev2")]
    MarketplaceV2,
    Xpanse,
    XsoarSaas,
    XsoarOnPrem,
}

impl Marketplace {
    pub const ALL: &'static [Marketplace] = &[
        Marketplace::Xsoar,
        Marketplace::MarketplaceV2,
        Marketplace::Xpanse,
        Marketplace::XsoarSaas,
        Marketplace::XsoarOnPrem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marketplace::Xsoar => "xsoar",
            Marketplace::MarketplaceV2 => "marketplacev2",
            Marketplace::Xpanse => "xpanse",
            Marketplace::XsoarSaas => "xsoar_saas",
            Marketplace::XsoarOnPrem => "xsoar_on_prem",
        }
    }

    /// Parse a marketplace tag as it appears in content files.
    pub fn parse(value: &str) -> Option<Marketplace> {
        Marketplace::ALL
            .iter()
            .copied()
            .find(|marketplace| marketplace.as_str() == value.trim())
    }

    /// The marketplaces assumed when a content file omits the field.
    pub fn default_set() -> Vec<Marketplace> {
        vec![Marketplace::Xsoar]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!(Marketplace::parse("xsoar"), Some(Marketplace::Xsoar));
        assert_eq!(
            Marketplace::parse("marketplacev2"),
            Some(Marketplace::MarketplaceV2)
        );
        assert_eq!(Marketplace::parse("unknown"), None);
    }
}
