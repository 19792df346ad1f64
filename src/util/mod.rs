/// Local calendar position of an instant, down to the hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CalendarHour {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl CalendarHour {
    pub fn same_day(&self, other: &CalendarHour) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }

    /// Reads the browser's local timezone.
    pub fn from_date(d: &js_sys::Date) -> Self {
        Self {
            year: d.get_full_year() as i32,
            month: d.get_month() + 1,
            day: d.get_date(),
            hour: d.get_hours(),
        }
    }
}

/// Relative label for comments posted today, calendar date otherwise.
///
/// "Today" counts whole clock hours (`now.hour - item.hour`), so a comment
/// from 59 minutes ago may read "0 hour ago" and clock changes can yield a
/// negative count. Counts of one or less use the singular.
pub(crate) fn relative_time_label(
    item: CalendarHour,
    now: CalendarHour,
    date_label: &str,
) -> String {
    if !item.same_day(&now) {
        return date_label.to_string();
    }

    let hours = now.hour as i64 - item.hour as i64;
    if hours <= 1 {
        format!("{} hour ago", hours)
    } else {
        format!("{} hours ago", hours)
    }
}

pub(crate) fn format_timestamp(timestamp_ms: i64) -> String {
    let item = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_ms as f64));
    let now = js_sys::Date::new_0();
    let date_label: String = item
        .to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED)
        .into();

    relative_time_label(
        CalendarHour::from_date(&item),
        CalendarHour::from_date(&now),
        &date_label,
    )
}

/// Uniform index in `0..len` from the browser CSPRNG. `None` for empty input
/// or when no entropy source is available.
pub(crate) fn random_index(len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).ok()?;
    Some(index_from_bytes(buf, len))
}

pub(crate) fn index_from_bytes(buf: [u8; 8], len: usize) -> usize {
    (u64::from_le_bytes(buf) % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> CalendarHour {
        CalendarHour {
            year: 2020,
            month: 6,
            day,
            hour,
        }
    }

    #[test]
    fn posted_now_reads_zero_hour_ago() {
        assert_eq!(relative_time_label(at(15, 10), at(15, 10), "6/15/2020"), "0 hour ago");
    }

    #[test]
    fn one_hour_is_singular_and_more_is_plural() {
        assert_eq!(relative_time_label(at(15, 9), at(15, 10), "x"), "1 hour ago");
        assert_eq!(relative_time_label(at(15, 7), at(15, 10), "x"), "3 hours ago");
    }

    #[test]
    fn counts_clock_hours_not_elapsed_time() {
        // 10:59 -> 11:01 is two minutes but one clock hour; same hour is zero.
        assert_eq!(relative_time_label(at(15, 10), at(15, 11), "x"), "1 hour ago");
        assert_eq!(relative_time_label(at(15, 11), at(15, 11), "x"), "0 hour ago");
    }

    #[test]
    fn negative_difference_is_not_clamped() {
        assert_eq!(relative_time_label(at(15, 3), at(15, 2), "x"), "-1 hour ago");
    }

    #[test]
    fn other_days_use_the_date_label() {
        assert_eq!(relative_time_label(at(14, 23), at(15, 0), "6/14/2020"), "6/14/2020");
        let last_year = CalendarHour { year: 2019, ..at(15, 10) };
        assert_eq!(relative_time_label(last_year, at(15, 10), "6/15/2019"), "6/15/2019");
    }

    #[test]
    fn random_index_of_empty_list_is_none() {
        assert_eq!(random_index(0), None);
    }

    #[test]
    fn index_from_bytes_stays_in_range() {
        for len in 1..10 {
            for b in [0u8, 1, 7, 128, 255] {
                assert!(index_from_bytes([b; 8], len) < len);
            }
        }
        assert_eq!(index_from_bytes([3, 0, 0, 0, 0, 0, 0, 0], 5), 3);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn format_timestamp_now_is_zero_hour_ago() {
        assert_eq!(format_timestamp(js_sys::Date::now() as i64), "0 hour ago");
    }

    #[wasm_bindgen_test]
    fn random_index_uses_browser_entropy() {
        let i = random_index(3).expect("crypto.getRandomValues should be available");
        assert!(i < 3);
    }
}
