use std::cmp::Ordering;

/// Parses a `h:mm AM/PM` slot label into minutes from midnight.
///
/// Returns `None` for anything that does not look like a 12-hour clock
/// label, so callers can fall back to lexical ordering.
pub fn minutes_from_midnight(time: &str) -> Option<u32> {
    let upper = time.trim().to_ascii_uppercase();
    let (clock, pm) = if let Some(rest) = upper.strip_suffix("PM") {
        (rest, true)
    } else if let Some(rest) = upper.strip_suffix("AM") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = clock.trim().split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some(hour * 60 + minute)
}

/// Time-of-day ordering for slot labels. "10:00 AM" sorts before "2:00 PM"
/// even though the strings compare the other way round. Labels that fail to
/// parse sort after all parseable ones, lexically among themselves.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (minutes_from_midnight(a), minutes_from_midnight(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
