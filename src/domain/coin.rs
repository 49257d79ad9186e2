use serde::{Deserialize, Serialize};

/// An entry from the market-cap ordered coin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Feed identifier, e.g. "bitcoin"
    pub id: String,
    pub name: String,
    /// Ticker, e.g. "btc"
    pub symbol: String,
}

impl Coin {
    /// "Bitcoin (BTC)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }

    /// Placeholder used before the coin list arrives (or when it fails to).
    pub fn from_id(id: &str) -> Self {
        let mut chars = id.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        Self {
            id: id.to_string(),
            name,
            symbol: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uppercases_symbol() {
        let coin = Coin {
            id: "bitcoin".into(),
            name: "Bitcoin".into(),
            symbol: "btc".into(),
        };
        assert_eq!(coin.label(), "Bitcoin (BTC)");
    }

    #[test]
    fn test_from_id_capitalises_name() {
        let coin = Coin::from_id("ethereum");
        assert_eq!(coin.name, "Ethereum");
        assert_eq!(coin.id, "ethereum");
    }
}
