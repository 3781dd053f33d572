use std::time::Duration;

/// Conversions between `Duration` and the signed microsecond counts MPRIS puts on the wire.
pub(crate) trait DurationExtensions {
    // Negative counts clamp to zero.
    fn from_micros_signed(_: i64) -> Duration;
    fn as_micros_signed(&self) -> i64;
}

impl DurationExtensions for Duration {
    fn from_micros_signed(micros: i64) -> Duration {
        Duration::from_micros(u64::try_from(micros).unwrap_or(0))
    }

    fn as_micros_signed(&self) -> i64 {
        i64::try_from(self.as_micros()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_constructs_durations_from_micros() {
        let expected = Duration::new(5, 543_210_000);
        let actual = Duration::from_micros_signed(5_543_210);
        assert_eq!(actual, expected);
    }

    #[test]
    fn it_clamps_negative_micros_to_zero() {
        assert_eq!(Duration::from_micros_signed(-1), Duration::ZERO);
    }

    #[test]
    fn it_calculates_whole_micros_from_durations() {
        let duration = Duration::new(5, 543_210_999);
        assert_eq!(duration.as_micros_signed(), 5_543_210);
    }

    #[test]
    fn it_saturates_huge_durations() {
        assert_eq!(Duration::MAX.as_micros_signed(), i64::MAX);
    }
}
