// curve-cli/src/config.rs
use curve_core::{Address, Amount};
use serde::{Deserialize, Serialize};
use share_ledger::ShareToken;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    /// Hex-encoded reserve sink address
    pub reserve: String,
    pub base_price: u64,
    pub slope: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Demo Share".into(),
            symbol: "SHR".into(),
            reserve: Address::new([0xAAu8; 20]).to_hex(),
            base_price: 100,
            slope: 10,
        }
    }
}

impl TokenConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn build_token(&self) -> anyhow::Result<ShareToken> {
        let reserve = Address::from_hex(&self.reserve)?;
        let token = ShareToken::new(
            self.name.clone(),
            self.symbol.clone(),
            reserve,
            Amount::from_u64(self.base_price),
            Amount::from_u64(self.slope),
        )?;
        Ok(token)
    }
}
