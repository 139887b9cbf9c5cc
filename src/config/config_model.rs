use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub chaos: ChaosConfig,
    pub provider: Provider,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Knobs for the fault-injection repository decorator. Probabilities are
/// clamped to [0, 1] at load time.
#[derive(Debug, Clone)]
pub struct ChaosConfig {
    pub enabled: bool,
    pub error_probability: f64,
    pub delay_probability: f64,
    pub max_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Provider {
    pub failure_probability: f64,
}
