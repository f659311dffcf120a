#[cfg(test)]
mod tests {
    use clap::Parser;
    use winloss_types::LogLevel;

    use crate::config::{resolve_token, Args};
    use crate::env::InMemoryEnv;

    // ── resolve_token ─────────────────────────────────────────────────────────

    #[test]
    fn test_token_prefers_discord_token() {
        let env = InMemoryEnv::new(&[("DISCORD_TOKEN", "primary"), ("DISCORD_BOT_TOKEN", "fallback")]);
        assert_eq!(resolve_token(&env).unwrap(), "primary");
    }

    #[test]
    fn test_token_falls_back_to_bot_token() {
        let env = InMemoryEnv::new(&[("DISCORD_BOT_TOKEN", "fallback")]);
        assert_eq!(resolve_token(&env).unwrap(), "fallback");
    }

    #[test]
    fn test_empty_token_is_skipped() {
        let env = InMemoryEnv::new(&[("DISCORD_TOKEN", "  "), ("DISCORD_BOT_TOKEN", "fallback")]);
        assert_eq!(resolve_token(&env).unwrap(), "fallback");
    }

    #[test]
    fn test_missing_token_is_error() {
        let env = InMemoryEnv::new(&[]);
        let err = resolve_token(&env).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    // ── Args ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "winloss-bot",
            "--config",
            "/etc/winloss.json",
            "--log-file",
            "/var/log/winloss.log",
            "--log-level",
            "DEBUG",
            "--health-port",
            "3001",
            "--guild-id",
            "42",
        ])
        .unwrap();
        assert_eq!(args.config.to_str(), Some("/etc/winloss.json"));
        assert_eq!(args.log_file.to_str(), Some("/var/log/winloss.log"));
        assert_eq!(args.log_level, LogLevel::Debug);
        assert_eq!(args.health_port, Some(3001));
        assert_eq!(args.guild_id, Some(42));
    }

    #[test]
    fn test_args_reject_unknown_level() {
        let err = Args::try_parse_from(["winloss-bot", "--log-level", "loud"]);
        assert!(err.is_err());
    }
}
