/// Returns the next scan interval based on the latest pending deposit activity.
///
/// Freshly created deposits tighten the polling loop so the user sees the
/// confirmation quickly; an idle ledger backs off to spare the indexer quota.
pub fn scan_freq(
    last_pending: time::PrimitiveDateTime,
    now: time::PrimitiveDateTime,
) -> time::Duration {
    let last_waited = now - last_pending;
    match last_waited {
        d if d < time::Duration::minutes(2) => time::Duration::seconds(2),
        d if d < time::Duration::minutes(5) => time::Duration::seconds(10),
        d if d < time::Duration::minutes(15) => time::Duration::seconds(30),
        _ => time::Duration::seconds(60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_scan_freq_backs_off() {
        let base = datetime!(2026-01-01 12:00:00);
        assert_eq!(
            scan_freq(base, base + time::Duration::seconds(30)),
            time::Duration::seconds(2)
        );
        assert_eq!(
            scan_freq(base, base + time::Duration::minutes(3)),
            time::Duration::seconds(10)
        );
        assert_eq!(
            scan_freq(base, base + time::Duration::minutes(10)),
            time::Duration::seconds(30)
        );
        assert_eq!(
            scan_freq(base, base + time::Duration::hours(2)),
            time::Duration::seconds(60)
        );
    }
}
