use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's calendar date in `canonical_timezone`, e.g. "America/Sao_Paulo".
pub fn local_today(canonical_timezone: &str) -> Option<Date> {
    get_local_offset(canonical_timezone)
        .map(|offset| OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{get_local_offset, local_today};

    #[test]
    fn resolves_canonical_timezone() {
        assert!(get_local_offset("America/Sao_Paulo").is_some());
        assert!(get_local_offset("Not/AZone").is_none());
    }

    #[test]
    fn today_in_utc_matches_now() {
        assert_eq!(
            local_today("Etc/UTC"),
            Some(OffsetDateTime::now_utc().date())
        );
    }
}
