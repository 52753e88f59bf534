//! Presentation seam between the booking flow and whatever draws it.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    domain::BookingId,
    protocol::{BookingConfirmation, PriceQuote},
};

/// Comfort temperature the backend prices weather surcharges against.
pub const REFERENCE_TEMP_C: i64 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Login,
    Summary,
}

pub trait BookingView {
    fn set_date_bounds(&mut self, min: NaiveDate, value: NaiveDate);
    fn show_warning(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    fn render_quote(&mut self, quote: &QuoteView);
    fn set_modal_visible(&mut self, visible: bool);
    /// Called when a control goes busy and again when it is restored.
    fn set_control_state(&mut self, control: &Control);
    fn show_confirmation(&mut self, notice: &ConfirmationNotice);
    fn navigate(&mut self, surface: Surface);
}

/// A button-like control the flow marks busy while a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    label: String,
    enabled: bool,
}

impl Control {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Relabels and disables the control until the returned guard drops.
    pub fn busy(&mut self, busy_label: &str) -> BusyGuard<'_> {
        let label = std::mem::replace(&mut self.label, busy_label.to_string());
        let enabled = std::mem::replace(&mut self.enabled, false);
        BusyGuard {
            control: self,
            label,
            enabled,
        }
    }
}

pub struct BusyGuard<'a> {
    control: &'a mut Control,
    label: String,
    enabled: bool,
}

impl BusyGuard<'_> {
    pub fn control(&self) -> &Control {
        self.control
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.label = std::mem::take(&mut self.label);
        self.control.enabled = self.enabled;
    }
}

/// Display strings for the preview modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    pub heading: String,
    pub date: String,
    pub base_price: String,
    pub surcharge: String,
    pub total: String,
    pub weather: Option<String>,
}

impl QuoteView {
    pub fn new(room_name: &str, city: &str, date: NaiveDate, quote: &PriceQuote) -> Self {
        Self {
            heading: format!("{room_name}, {city}"),
            date: date.format("%Y-%m-%d").to_string(),
            base_price: format_money(quote.base_price),
            surcharge: format!("+{}", format_money(quote.surcharge)),
            total: format_money(quote.total_price),
            weather: quote.weather_temp.map(format_weather),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationNotice {
    pub reference: BookingId,
    pub total: String,
}

impl From<&BookingConfirmation> for ConfirmationNotice {
    fn from(value: &BookingConfirmation) -> Self {
        Self {
            reference: value.id,
            total: format_money(value.total_price),
        }
    }
}

impl fmt::Display for ConfirmationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BOOKING CONFIRMED!\nReference: #{}\nTotal: {}",
            self.reference, self.total
        )
    }
}

pub fn format_money(amount: Decimal) -> String {
    format!("£{:.2}", amount.round_dp(2))
}

pub fn format_weather(temp_c: Decimal) -> String {
    let delta = (temp_c - Decimal::from(REFERENCE_TEMP_C)).round_dp(1);
    let sign = if delta < Decimal::ZERO { '-' } else { '+' };
    format!(
        "{:.1}°C ({sign}{:.1}° vs {REFERENCE_TEMP_C}°)",
        temp_c.round_dp(1),
        delta.abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(weather_temp: Option<Decimal>) -> PriceQuote {
        PriceQuote {
            base_price: Decimal::new(10000, 2),
            surcharge: Decimal::new(1550, 2),
            total_price: Decimal::new(11550, 2),
            weather_temp,
        }
    }

    #[test]
    fn quote_view_formats_pounds_with_two_decimals() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 3).expect("date");
        let view = QuoteView::new("Harbour Room", "Lisbon", date, &quote(None));

        assert_eq!(view.heading, "Harbour Room, Lisbon");
        assert_eq!(view.date, "2026-11-03");
        assert_eq!(view.base_price, "£100.00");
        assert_eq!(view.surcharge, "+£15.50");
        assert_eq!(view.total, "£115.50");
        assert_eq!(view.weather, None);
    }

    #[test]
    fn weather_delta_is_signed_against_reference() {
        assert_eq!(format_weather(Decimal::from(26)), "26.0°C (+5.0° vs 21°)");
        assert_eq!(
            format_weather(Decimal::new(125, 1)),
            "12.5°C (-8.5° vs 21°)"
        );
        assert_eq!(format_weather(Decimal::from(21)), "21.0°C (+0.0° vs 21°)");
    }

    #[test]
    fn weather_delta_that_rounds_to_zero_has_no_minus_sign() {
        assert_eq!(
            format_weather(Decimal::new(2096, 2)),
            "21.0°C (+0.0° vs 21°)"
        );
    }

    #[test]
    fn money_rounds_to_pence() {
        assert_eq!(format_money(Decimal::new(115499, 3)), "£115.50");
        assert_eq!(format_money(Decimal::from(7)), "£7.00");
    }

    #[test]
    fn busy_guard_restores_label_and_enabled_state() {
        let mut control = Control::new("Book Now");
        {
            let guard = control.busy("Calculating...");
            assert_eq!(guard.control().label(), "Calculating...");
            assert!(!guard.control().is_enabled());
        }
        assert_eq!(control, Control::new("Book Now"));
    }

    #[test]
    fn confirmation_notice_lists_reference_and_total() {
        let notice = ConfirmationNotice::from(&BookingConfirmation {
            id: BookingId(42),
            total_price: Decimal::new(1155, 1),
        });
        let text = notice.to_string();
        assert!(text.contains("#42"));
        assert!(text.contains("£115.50"));
    }
}
