use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses an ISO-8601 timestamp. Offset-carrying strings are converted to
/// UTC; naive strings are assumed to already be UTC.
pub fn parse_iso_utc(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_utc_suffix() {
        let dt = parse_iso_utc("2025-06-01T15:12:00.000Z").unwrap();
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 12);
    }

    #[test]
    fn parses_offset_and_normalizes() {
        let dt = parse_iso_utc("2025-06-01T17:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn naive_is_treated_as_utc() {
        let dt = parse_iso_utc("2025-06-01T15:12:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-06-01T15:12:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso_utc("next tuesday").is_err());
    }
}
