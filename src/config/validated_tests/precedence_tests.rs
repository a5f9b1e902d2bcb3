//! Tests for CLI > TOML > default precedence.

use std::time::Duration;

use super::*;
use crate::config::defaults;

mod timeout {
    use super::*;

    #[test]
    fn default_timeout() {
        let config = ValidatedConfig::from_raw(&cli(&["--dry-run"]), None).unwrap();
        assert_eq!(config.client.timeout, defaults::timeout());
    }

    #[test]
    fn toml_overrides_default() {
        let toml = toml("[webhook]\ntimeout = 20\n");
        let config = ValidatedConfig::from_raw(&cli(&["--dry-run"]), Some(&toml)).unwrap();

        assert_eq!(config.client.timeout, Duration::from_secs(20));
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = toml("[webhook]\ntimeout = 20\n");
        let config =
            ValidatedConfig::from_raw(&cli(&["--dry-run", "--timeout", "3"]), Some(&toml)).unwrap();

        assert_eq!(config.client.timeout, Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--dry-run", "--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }
}

mod retry {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ValidatedConfig::from_raw(&cli(&["--dry-run"]), None).unwrap();
        let policy = &config.client.retry_policy;

        assert_eq!(policy.max_attempts, defaults::RETRY_MAX_ATTEMPTS);
        assert_eq!(policy.initial_delay, defaults::retry_initial_delay());
        assert_eq!(policy.max_delay, defaults::retry_max_delay());
        assert!(policy.schedule.is_empty());
    }

    #[test]
    fn cli_overrides_toml_attempts_and_delay() {
        let toml = toml("[retry]\nmax_attempts = 7\ninitial_delay = 9\n");
        let cli = cli(&["--dry-run", "--retry-max", "2", "--retry-delay", "1"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();
        let policy = &config.client.retry_policy;

        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
    }

    #[test]
    fn toml_only_settings_are_applied() {
        let toml = toml("[retry]\nmax_delay = 90\nmultiplier = 3.0\nschedule = [1, 4]\n");

        let config = ValidatedConfig::from_raw(&cli(&["--dry-run"]), Some(&toml)).unwrap();
        let policy = &config.client.retry_policy;

        assert_eq!(policy.max_delay, Duration::from_secs(90));
        assert!((policy.multiplier - 3.0).abs() < f64::EPSILON);
        assert_eq!(
            policy.schedule,
            vec![Duration::from_secs(1), Duration::from_secs(4)]
        );
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--dry-run", "--retry-max", "0"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn zero_initial_delay_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--dry-run", "--retry-delay", "0"]), None);
        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let toml = toml("[retry]\nmultiplier = -1.0\n");
        let result = ValidatedConfig::from_raw(&cli(&["--dry-run"]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRetry(_))));
    }

    #[test]
    fn max_delay_below_initial_is_rejected() {
        let toml = toml("[retry]\ninitial_delay = 10\nmax_delay = 5\n");
        let result = ValidatedConfig::from_raw(&cli(&["--dry-run"]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidRetry(msg)) if msg.contains("max_delay")));
    }
}

mod message_defaults {
    use super::*;

    #[test]
    fn toml_message_defaults_fill_gaps() {
        let toml = toml("[message]\ntitle = \"Nightly\"\nsummary = \"Nightly build\"\ntheme_color = \"00FF00\"\n");

        let config = ValidatedConfig::from_raw(&cli(&["--dry-run"]), Some(&toml)).unwrap();

        assert_eq!(config.message.title.as_deref(), Some("Nightly"));
        assert_eq!(config.message.summary.as_deref(), Some("Nightly build"));
        assert_eq!(config.message.theme_color.as_deref(), Some("00FF00"));
    }

    #[test]
    fn cli_message_values_win() {
        let toml = toml("[message]\ntitle = \"Nightly\"\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--dry-run", "--title", "Hotfix"]), Some(&toml)).unwrap();

        assert_eq!(config.message.title.as_deref(), Some("Hotfix"));
    }
}
