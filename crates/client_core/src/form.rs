use chrono::NaiveDate;

use crate::error::BookingError;

/// Date picker state: an optional selection that may not precede `min`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateField {
    min: Option<NaiveDate>,
    value: Option<NaiveDate>,
}

impl DateField {
    pub fn reset_to(&mut self, today: NaiveDate) {
        self.min = Some(today);
        self.value = Some(today);
    }

    pub fn select(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        if let Some(min) = self.min {
            if date < min {
                return Err(BookingError::DateBeforeMinimum { date, min });
            }
        }
        self.value = Some(date);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("date")
    }

    #[test]
    fn rejects_dates_before_minimum() {
        let mut field = DateField::default();
        field.reset_to(day(19));

        let err = field.select(day(18)).expect_err("past date");
        assert!(matches!(err, BookingError::DateBeforeMinimum { .. }));
        assert_eq!(field.value(), Some(day(19)));

        field.select(day(25)).expect("future date");
        assert_eq!(field.value(), Some(day(25)));
    }

    #[test]
    fn clear_keeps_minimum() {
        let mut field = DateField::default();
        field.reset_to(day(19));
        field.clear();
        assert_eq!(field.value(), None);
        assert_eq!(field.min(), Some(day(19)));
    }
}
