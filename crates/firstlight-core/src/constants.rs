/// Zone used when no timezone is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

/// Local hour (exclusive) before which an occurrence counts as early.
pub const EARLY_CUTOFF_HOUR: u32 = 9;

/// Seconds to wait for the calendar host before giving up on a fetch.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// `User-Agent` header sent with feed requests.
pub const USER_AGENT: &str = const_str::concat!("firstlight/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_crate_version() {
        assert_eq!(
            USER_AGENT,
            format!("firstlight/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn default_timezone_is_known() {
        assert!(DEFAULT_TIMEZONE.parse::<chrono_tz::Tz>().is_ok());
        assert!(DEFAULT_FETCH_TIMEOUT_SECS > 0);
    }
}
