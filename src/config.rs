use crate::game::constants::net::MAX_LINE_BYTES;

/// Bot configuration
///
/// Every field has a default that reproduces the plain stdin/stdout
/// protocol, so the bot runs with no environment at all.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Fixed seed for the evasion RNG (None = seed from entropy)
    pub seed: Option<u64>,
    /// Stop on the first malformed record (false = warn and skip it)
    pub strict_input: bool,
    /// Upper bound on one input line in bytes
    pub max_line_bytes: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            seed: None,
            strict_input: true,
            max_line_bytes: MAX_LINE_BYTES,
        }
    }
}

impl BotConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup, falling back per field on bad values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = lookup("BOT_SEED") {
            if let Ok(parsed) = seed.trim().parse::<u64>() {
                config.seed = Some(parsed);
            } else {
                tracing::warn!("Invalid BOT_SEED '{}', seeding from entropy", seed);
            }
        }

        if let Some(strict) = lookup("BOT_STRICT_INPUT") {
            match strict.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.strict_input = true,
                "0" | "false" | "no" | "off" => config.strict_input = false,
                _ => tracing::warn!("Invalid BOT_STRICT_INPUT '{}', using default", strict),
            }
        }

        if let Some(max_line) = lookup("BOT_MAX_LINE_BYTES") {
            if let Ok(parsed) = max_line.trim().parse::<usize>() {
                if parsed > 0 {
                    config.max_line_bytes = parsed;
                } else {
                    tracing::warn!("BOT_MAX_LINE_BYTES must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid BOT_MAX_LINE_BYTES '{}', using default", max_line);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.max_line_bytes == 0 {
            return Err("max_line_bytes must be at least 1".to_string());
        }
        Ok(())
    }
}
