/// Environment variable consulted when `--password` is omitted.
pub const PASSWORD_ENV: &str = "GAUGE_PASSWORD";

/// Resolve the password from the flag, then `GAUGE_PASSWORD`.
pub fn resolve_password(flag: Option<&str>) -> anyhow::Result<String> {
    resolve_from(flag, std::env::var(PASSWORD_ENV).ok())
}

fn resolve_from(flag: Option<&str>, env: Option<String>) -> anyhow::Result<String> {
    flag.map(str::to_string)
        .or(env)
        .ok_or_else(|| anyhow::anyhow!("password required: pass --password or set {PASSWORD_ENV}"))
}

#[cfg(test)]
mod tests {
    use super::resolve_from;

    #[test]
    fn flag_wins_over_env() {
        let password = resolve_from(Some("flag"), Some("env".into())).unwrap();
        assert_eq!(password, "flag");
    }

    #[test]
    fn env_used_when_flag_missing() {
        assert_eq!(resolve_from(None, Some("env".into())).unwrap(), "env");
    }

    #[test]
    fn missing_password_is_an_error() {
        let err = resolve_from(None, None).unwrap_err();
        assert!(err.to_string().contains("GAUGE_PASSWORD"));
    }
}
