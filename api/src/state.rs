use shared::{Config, PriceService};

#[derive(Clone)]
pub struct AppState {
    pub price_service: PriceService,
    pub symbols: Vec<String>,
}

impl AppState {
    pub fn new(config: &Config, price_service: PriceService) -> Self {
        Self {
            price_service,
            symbols: config.symbols.clone(),
        }
    }

    pub fn is_tracked(&self, ticker: &str) -> bool {
        self.symbols.iter().any(|s| s == ticker)
    }
}
