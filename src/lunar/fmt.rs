//! Vietnamese labels for lunar dates.

use super::{LunarDate, Month};
use crate::error::Result;

/// Month names after "tháng", `1..=12`; month 1 is "Giêng", month 12 "Chạp".
pub const MONTH_NAMES: &[&str] = &[
    "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "Mười Một", "Chạp",
];

/// Heavenly stems; index 0 is the tenth stem so that `num % 10` works for
/// sexagenary numbers starting at 1.
const CAN: &[&str] = &[
    "Quý", "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm",
];
/// Earthly branches, shifted the same way as [`CAN`].
const CHI: &[&str] = &[
    "Hợi", "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất",
];

/// Sexagenary (Can-Chi) number to text.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Giáp Thìn", lunar::fmt::sexagenary(41));
/// assert_eq!("Ất Tỵ", lunar::fmt::sexagenary(lunar::sexagenary_for_year(2025)));
/// ```
pub fn sexagenary(num: u32) -> String {
    format!("{} {}", CAN[(num % 10) as usize], CHI[(num % 12) as usize])
}

/// Month name with "tháng", and "nhuận" after a leap month.
///
/// # Example
///
/// ```
/// use amlich::lunar::{self, Month::*};
///
/// assert_eq!("tháng Giêng", lunar::fmt::month(Common(1)));
/// assert_eq!("tháng Sáu nhuận", lunar::fmt::month(Leap(6)));
/// ```
///
/// # Panics
///
/// If the month number is not in `1..=12`.
pub fn month(m: Month) -> String {
    let num = m.num();
    let name = match num {
        1..=12 => MONTH_NAMES[num as usize - 1],
        _ => panic!("month {} not in 1..=12", num),
    };
    if m.is_leap() {
        format!("tháng {name} nhuận")
    } else {
        format!("tháng {name}")
    }
}

/// Day name: "Mùng 1" to "Mùng 10", "Rằm" for the full-moon day, plain
/// numbers otherwise.
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Mùng 1", lunar::fmt::day(1));
/// assert_eq!("Rằm", lunar::fmt::day(15));
/// assert_eq!("29", lunar::fmt::day(29));
/// ```
///
/// # Panics
///
/// If the day number is not in `1..=30`.
pub fn day(d: u32) -> String {
    match d {
        1..=10 => format!("Mùng {d}"),
        15 => "Rằm".to_owned(),
        11..=30 => d.to_string(),
        _ => panic!("day {} not in 1..=30", d),
    }
}

/// Short label printed in a calendar cell: `day/month` on the first day of a
/// month (with "N" for a leap month), the bare day otherwise.
///
/// # Example
///
/// ```
/// use amlich::lunar::{self, LunarDate};
///
/// let d = LunarDate { day: 1, month: 6, is_leap_month: true, year: 2025 };
/// assert_eq!("1/6N", lunar::fmt::cell_label(&d));
/// ```
pub fn cell_label(date: &LunarDate) -> String {
    match (date.day, date.is_leap_month) {
        (1, false) => format!("1/{}", date.month),
        (1, true) => format!("1/{}N", date.month),
        (d, _) => d.to_string(),
    }
}

/// [`cell_label`] for a conversion result, or an empty label when the date
/// could not be converted, so one bad cell never breaks a month grid.
pub fn cell_label_or_blank(result: &Result<LunarDate>) -> String {
    match result {
        Ok(date) => cell_label(date),
        Err(e) => {
            tracing::debug!("no lunar label: {e}");
            String::new()
        }
    }
}

/// Full Vietnamese text of a lunar date, e.g. "Rằm tháng Tám năm Ất Tỵ".
pub fn long(date: &LunarDate) -> String {
    format!(
        "{} {} năm {}",
        day(date.day),
        month(date.month_name()),
        sexagenary(super::sexagenary_for_year(date.year))
    )
}

/// Solar term number to name; `0..24` starting from Xuân phân (0°).
///
/// # Example
///
/// ```
/// use amlich::lunar;
///
/// assert_eq!("Lập xuân", lunar::fmt::solar_term(21));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "Xuân phân", "Thanh minh", "Cốc vũ", "Lập hạ", "Tiểu mãn", "Mang chủng", "Hạ chí",
        "Tiểu thử", "Đại thử", "Lập thu", "Xử thử", "Bạch lộ", "Thu phân", "Hàn lộ",
        "Sương giáng", "Lập đông", "Tiểu tuyết", "Đại tuyết", "Đông chí", "Tiểu hàn", "Đại hàn",
        "Lập xuân", "Vũ thủy", "Kinh trập",
    ];
    NAMES[(term % 24) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::error::Error;

    fn lunar(day: u32, month: u32, is_leap_month: bool, year: i32) -> LunarDate {
        LunarDate {
            day,
            month,
            is_leap_month,
            year,
        }
    }

    #[test]
    fn test_sexagenary() {
        for (std, num) in [("Giáp Tý", 1), ("Canh Dần", 27), ("Quý Hợi", 60), ("Canh Thìn", 17)] {
            assert_eq!(std, sexagenary(num));
        }
        let date = Date::from_gregorian(2000, 1, 1).unwrap();
        assert_eq!("Mậu Ngọ", sexagenary(date.sexagenary() as u32));
    }

    #[test]
    fn test_month() {
        assert_eq!("tháng Mười Một", month(Month::Common(11)));
        assert_eq!("tháng Chạp", month(Month::Common(12)));
        assert_eq!("tháng Hai nhuận", month(Month::Leap(2)));
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("Mùng 1", 1),
            ("Mùng 10", 10),
            ("11", 11),
            ("Rằm", 15),
            ("30", 30),
        ] {
            assert_eq!(std, day(d));
        }
    }

    #[test]
    fn labels() {
        assert_eq!("1/9", cell_label(&lunar(1, 9, false, 2025)));
        assert_eq!("15", cell_label(&lunar(15, 8, false, 2025)));
        assert_eq!("1/6N", cell_label(&lunar(1, 6, true, 2025)));
        assert_eq!("", cell_label_or_blank(&Err(Error::OutOfRange { year: 1000 })));
        assert_eq!("2", cell_label_or_blank(&Ok(lunar(2, 1, false, 2024))));
    }

    #[test]
    fn long_form() {
        assert_eq!(
            "Rằm tháng Tám năm Ất Tỵ",
            long(&lunar(15, 8, false, 2025))
        );
        assert_eq!(
            "Mùng 1 tháng Giêng năm Giáp Thìn",
            long(&lunar(1, 1, false, 2024))
        );
    }

    #[test]
    fn solar_term_names() {
        assert_eq!("Xuân phân", solar_term(0));
        assert_eq!("Đông chí", solar_term(18));
        assert_eq!("Xuân phân", solar_term(24));
    }
}
