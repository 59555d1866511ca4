use chrono::{DateTime, FixedOffset, Utc};

/// Parses offsets like `+05:30`, `-0800`, `+02` or `UTC`.
pub fn parse_fixed_offset(offset: &str) -> Option<FixedOffset> {
    let value = offset.trim();
    if value.eq_ignore_ascii_case("utc") || value == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match value.chars().next()? {
        '+' => (1, &value[1..]),
        '-' => (-1, &value[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[0..2].parse::<i32>().ok()?, digits[2..4].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

pub fn format_timestamp_at(time: DateTime<Utc>, offset: FixedOffset, format: &str) -> String {
    time.with_timezone(&offset).format(format).to_string()
}

pub fn format_timestamp(offset: FixedOffset, format: &str) -> String {
    format_timestamp_at(Utc::now(), offset, format)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use crate::utils::time_utils::{format_timestamp_at, parse_fixed_offset};

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_fixed_offset("+05:30").map(|o| o.local_minus_utc()), Some(19_800));
        assert_eq!(parse_fixed_offset("-0800").map(|o| o.local_minus_utc()), Some(-28_800));
        assert_eq!(parse_fixed_offset("+02").map(|o| o.local_minus_utc()), Some(7_200));
        assert_eq!(parse_fixed_offset("UTC").map(|o| o.local_minus_utc()), Some(0));
        assert!(parse_fixed_offset("Asia/Kolkata").is_none());
        assert!(parse_fixed_offset("+25:00").is_none());
        assert!(parse_fixed_offset("").is_none());
    }

    #[test]
    fn test_format_timestamp() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
        let offset = parse_fixed_offset("+05:30").unwrap();
        assert_eq!(format_timestamp_at(time, offset, "%Y-%m-%d %H:%M:%S %z"), "2024-03-02 01:30:00 +0530");
    }
}
