//! Terminal rendition of the booking view: notices go to stdout, problems to
//! stderr, and the modal is a boxed quote block.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use client_core::{BookingView, ConfirmationNotice, Control, QuoteView, Surface};

#[derive(Default)]
pub struct TerminalView {
    quote: Option<QuoteView>,
    navigated: Option<Surface>,
}

impl TerminalView {
    pub fn navigated(&self) -> Option<Surface> {
        self.navigated
    }

    fn print_quote(quote: &QuoteView) {
        println!("┌ {}", quote.heading);
        println!("│ Date:      {}", quote.date);
        println!("│ Base:      {}", quote.base_price);
        println!("│ Surcharge: {}", quote.surcharge);
        if let Some(weather) = &quote.weather {
            println!("│ Weather:   {weather}");
        }
        println!("└ Total:     {}", quote.total);
    }
}

impl BookingView for TerminalView {
    fn set_date_bounds(&mut self, min: NaiveDate, value: NaiveDate) {
        tracing::debug!(%min, %value, "date field bounds set");
    }

    fn show_warning(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn render_quote(&mut self, quote: &QuoteView) {
        self.quote = Some(quote.clone());
    }

    fn set_modal_visible(&mut self, visible: bool) {
        if !visible {
            return;
        }
        if let Some(quote) = &self.quote {
            Self::print_quote(quote);
        }
    }

    fn set_control_state(&mut self, control: &Control) {
        if !control.is_enabled() {
            eprintln!("{}", control.label());
        }
    }

    fn show_confirmation(&mut self, notice: &ConfirmationNotice) {
        println!("{notice}");
    }

    fn navigate(&mut self, surface: Surface) {
        self.navigated = Some(surface);
    }
}

pub fn prompt_yes_no(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
