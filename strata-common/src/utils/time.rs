use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current UNIX timestamp in milliseconds.
///
/// Block identifiers embed their creation time with the same resolution,
/// so ages are computed by plain subtraction.
///
/// # Panics
///
/// Panics if the system clock is set before the UNIX epoch.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before UNIX EPOCH")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_time_non_zero() {
        assert!(current_time_millis() > 0, "Timestamp should be greater than zero");
    }

    #[test]
    fn test_current_time_monotonic() {
        let t1 = current_time_millis();
        let t2 = current_time_millis();
        assert!(t2 >= t1, "Second timestamp should be greater than or equal to the first");
    }
}
