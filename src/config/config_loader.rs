use std::time::Duration;

use anyhow::{Ok, Result};

use super::config_model::{ChaosConfig, Database, DotEnvyConfig, Provider, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: env_or("SERVER_PORT", "8080").parse()?,
        body_limit: env_or("SERVER_BODY_LIMIT", "10").parse()?,
        timeout: env_or("SERVER_TIMEOUT", "30").parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let chaos = ChaosConfig {
        enabled: env_or("CHAOS_ENABLED", "true").parse()?,
        error_probability: probability(env_or("CHAOS_ERROR_PROBABILITY", "0.2").parse()?),
        delay_probability: probability(env_or("CHAOS_DELAY_PROBABILITY", "0.3").parse()?),
        max_delay: Duration::from_millis(env_or("CHAOS_MAX_DELAY_MS", "700").parse()?),
    };

    let provider = Provider {
        failure_probability: probability(env_or("PROVIDER_FAILURE_PROBABILITY", "0.15").parse()?),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        chaos,
        provider,
    })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn probability(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_are_clamped() {
        assert_eq!(probability(1.7), 1.0);
        assert_eq!(probability(-0.3), 0.0);
        assert_eq!(probability(0.15), 0.15);
    }
}
