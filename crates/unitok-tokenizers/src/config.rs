//! Loader options.

/// Checkpoint name prefixes of model families that always expect a BOS token,
/// whatever their `tokenizer_config.json` says.
pub const DEFAULT_BOS_FAMILIES: &[&str] = &["Meta-Llama-3", "Llama-3"];

/// Environment variable that disables JSON repair when set to `1`.
pub const STRICT_JSON_ENV: &str = "UNITOK_STRICT_JSON";

/// Options controlling how a checkpoint is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Attempt to repair a malformed `generation_config.json`.
    pub repair_json: bool,
    /// Name prefixes that force `use_bos`.
    pub bos_family_prefixes: Vec<String>,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            repair_json: true,
            bos_family_prefixes: DEFAULT_BOS_FAMILIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TokenizerOptions {
    /// Defaults, adjusted by `UNITOK_STRICT_JSON`.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if std::env::var(STRICT_JSON_ENV).as_deref() == Ok("1") {
            tracing::debug!("{STRICT_JSON_ENV}=1, JSON repair disabled");
            options.repair_json = false;
        }
        options
    }

    pub fn with_repair_json(mut self, enabled: bool) -> Self {
        self.repair_json = enabled;
        self
    }

    pub fn with_bos_family(mut self, prefix: impl Into<String>) -> Self {
        self.bos_family_prefixes.push(prefix.into());
        self
    }

    /// Whether `name` belongs to one of the BOS-requiring families.
    pub fn is_bos_family(&self, name: &str) -> bool {
        self.bos_family_prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[allow(dead_code)]
    mod env_guard {
        include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/support/env_guard.rs"));
    }
    use env_guard::EnvGuard;

    #[test]
    fn default_families_match_llama3_names() {
        let options = TokenizerOptions::default();
        assert!(options.is_bos_family("Llama-3-8B"));
        assert!(options.is_bos_family("Meta-Llama-3.1-70B-Instruct"));
        assert!(!options.is_bos_family("Llama-2-7b-hf"));
        assert!(!options.is_bos_family("my-Llama-3"));
    }

    #[test]
    fn extra_family_is_recognized() {
        let options = TokenizerOptions::default().with_bos_family("Mistral-");
        assert!(options.is_bos_family("Mistral-7B-v0.1"));
    }

    #[test]
    #[serial(unitok_env)]
    fn strict_env_disables_repair() {
        let guard = EnvGuard::set(STRICT_JSON_ENV, "1");
        assert!(!TokenizerOptions::from_env().repair_json);
        guard.remove();
        assert!(TokenizerOptions::from_env().repair_json);
    }

    #[test]
    #[serial(unitok_env)]
    fn strict_env_other_values_keep_repair() {
        let _guard = EnvGuard::set(STRICT_JSON_ENV, "0");
        assert!(TokenizerOptions::from_env().repair_json);
    }
}
