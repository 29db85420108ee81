use chrono::{DateTime, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Registration dates are calendar days in UTC.
pub fn today() -> NaiveDate {
    now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_as_iso_days() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 5).unwrap();
        assert_eq!(format_date(date), "2023-08-05");
        assert_eq!(today(), now().date_naive());
    }
}
