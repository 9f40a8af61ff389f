//! Property-test run profile read from the environment.
//!
//! Suites pass their own default case count; CI scales every suite at once
//! through `PROGTEST_CASES` and switches on forking through
//! `ECOGEN_PBT_FORK`.

use std::env;

/// Overrides the number of cases per property.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Runs each property case in a forked subprocess when truthy.
pub const ECOGEN_PBT_FORK_ENV_KEY: &str = "ECOGEN_PBT_FORK";

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the profile, falling back to the given defaults for missing or
    /// malformed variables. Malformed values are logged at `warn`.
    ///
    /// # Examples
    /// ```
    /// use ecogen_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(ECOGEN_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Result<T, String>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, reason = %reason, "ignoring malformed override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("not a boolean flag: {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use rstest::rstest;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears a variable and restores the previous value on drop.
    struct ScopedVar {
        key: &'static str,
        previous: Option<String>,
    }

    impl ScopedVar {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let previous = env::var(key).ok();
            apply(key, value);
            Self { key, previous }
        }
    }

    impl Drop for ScopedVar {
        fn drop(&mut self) {
            apply(self.key, self.previous.as_deref());
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        // SAFETY: every test touching the environment holds ENV_LOCK.
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = ScopedVar::new(PROGTEST_CASES_ENV_KEY, cases);
        let _fork = ScopedVar::new(ECOGEN_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(48, false)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        assert_eq!(
            load_with(None, None),
            ProptestRunProfile {
                cases: 48,
                fork: false
            }
        );
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 512 ", 512)]
    #[case("10000", 10_000)]
    fn case_overrides_are_honoured(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("many")]
    fn malformed_case_counts_fall_back(#[case] raw: &str) {
        assert_eq!(load_with(Some(raw), None).cases(), 48);
    }

    #[rstest]
    #[case("true", true)]
    #[case("ON", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("off", false)]
    #[case("maybe", false)]
    #[case("", false)]
    fn fork_flag_parses_common_spellings(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(load_with(None, Some(raw)).fork(), expected);
    }
}
