use super::coincap::CoinCapProvider;
use super::coingecko::CoinGeckoProvider;
use super::traits::PriceProvider;

/// Ordered list of available price providers.
///
/// Registration order is fallback priority: if the first provider fails
/// for a symbol (down, rate-limited, unknown id), the next one is tried.
/// New providers can be added without modifying existing code.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn PriceProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers: CoinGecko first,
    /// CoinCap as fallback. Neither needs an API key.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CoinGeckoProvider::new()));
        registry.register(Box::new(CoinCapProvider::new()));
        registry
    }

    /// Register a price provider at the end of the fallback chain.
    pub fn register(&mut self, provider: Box<dyn PriceProvider>) {
        self.providers.push(provider);
    }

    /// All providers in fallback order.
    #[must_use]
    pub fn providers(&self) -> &[Box<dyn PriceProvider>] {
        &self.providers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of registered providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
