//! Environment feature flags

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw, default),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

/// Reset extra policies during bootstrap. Off unless explicitly enabled.
pub fn feature_policy_cleanup() -> bool {
    env_flag("FEATURE_POLICY_CLEANUP", false)
}

/// Optional `CONSENT_TEST_MODE` override for the configuration file's value
pub fn test_mode_override() -> Option<bool> {
    std::env::var("CONSENT_TEST_MODE")
        .ok()
        .map(|raw| parse_flag(&raw, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_values() {
        assert!(parse_flag("TRUE", false));
        assert!(parse_flag(" on ", false));
        assert!(!parse_flag("0", true));
        assert!(!parse_flag("off", true));
        assert!(parse_flag("maybe", true));
        assert!(!parse_flag("maybe", false));
    }
}
