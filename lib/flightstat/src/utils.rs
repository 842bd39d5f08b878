use std::str::FromStr;

pub fn env_var_truthy(name: &str) -> bool {
    match std::env::var(name) {
        Ok(v) => {
            let v = v.to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes" || v == "on"
        }
        Err(_) => false,
    }
}

/// Parsed value of `name`, or `None` when unset or unparsable.
pub fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

pub fn available_parallelism() -> usize {
    num_cpus::get().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vars_are_falsy_and_unparsed() {
        assert!(!env_var_truthy("FLIGHTSTAT_TEST_SURELY_UNSET"));
        assert_eq!(env_parse::<usize>("FLIGHTSTAT_TEST_SURELY_UNSET"), None);
    }

    #[test]
    fn parallelism_is_at_least_one() {
        assert!(available_parallelism() >= 1);
    }
}
