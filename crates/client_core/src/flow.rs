//! Two-phase booking flow: price a draft, show the quote, commit on confirm.
//!
//! One `BookingFlowController` holds one booking attempt's state. Operations
//! take `&mut self`, so a flow never has two requests in flight.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{
    domain::{RoomId, UserId},
    protocol::{BookingConfirmation, BookingDraft, PriceQuote},
};
use tracing::{debug, info, warn};

use crate::{
    error::{BookingError, ErrorKind},
    form::DateField,
    pricing::PricingService,
    session::{session_user, SessionStore},
    view::{BookingView, ConfirmationNotice, Control, QuoteView, Surface},
};

pub const PREVIEW_BUSY_LABEL: &str = "Calculating...";
pub const CONFIRM_BUSY_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSelection {
    pub room_id: RoomId,
    pub room_name: String,
    /// Listed price, shown to the user only. The quote is authoritative.
    pub base_price: Decimal,
    pub city: String,
}

/// Commit-ready draft plus what was shown when it was priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    draft: BookingDraft,
    quote: PriceQuote,
    city: String,
}

impl PendingBooking {
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn quote(&self) -> &PriceQuote {
        &self.quote
    }

    pub fn quote_view(&self) -> QuoteView {
        QuoteView::new(&self.draft.room_name, &self.city, self.draft.date, &self.quote)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    PreviewRequested,
    PreviewShown,
    PreviewFailed,
    ConfirmRequested,
    ConfirmFailed,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Ready(UserId),
    RedirectedToLogin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Shown(QuoteView),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed(BookingConfirmation),
    Skipped,
}

pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub struct BookingFlowController<V: BookingView> {
    pricing: Arc<dyn PricingService>,
    session: Arc<dyn SessionStore>,
    view: V,
    today: fn() -> NaiveDate,
    date: DateField,
    user_id: Option<UserId>,
    phase: FlowPhase,
    pending: Option<PendingBooking>,
}

impl<V: BookingView> BookingFlowController<V> {
    pub fn new(pricing: Arc<dyn PricingService>, session: Arc<dyn SessionStore>, view: V) -> Self {
        Self {
            pricing,
            session,
            view,
            today: local_today,
            date: DateField::default(),
            user_id: None,
            phase: FlowPhase::Idle,
            pending: None,
        }
    }

    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn initialize(&mut self) -> SessionStatus {
        let user_id = match session_user(self.session.as_ref()) {
            Ok(user_id) => user_id,
            Err(err) => {
                warn!(error = %err, "failed to read session; treating as logged out");
                None
            }
        };

        let Some(user_id) = user_id else {
            info!("no session user; redirecting to login");
            self.view.navigate(Surface::Login);
            return SessionStatus::RedirectedToLogin;
        };

        let today = (self.today)();
        self.date.reset_to(today);
        self.view.set_date_bounds(today, today);
        self.user_id = Some(user_id.clone());
        debug!(user_id = %user_id, %today, "booking flow initialized");
        SessionStatus::Ready(user_id)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.date.select(date).inspect_err(|err| {
            self.view.show_warning(&err.to_string());
        })
    }

    pub fn clear_date(&mut self) {
        self.date.clear();
    }

    pub async fn request_preview(
        &mut self,
        room: &RoomSelection,
        trigger: &mut Control,
    ) -> Result<PreviewOutcome, BookingError> {
        if self.phase == FlowPhase::Confirmed {
            debug!("booking already confirmed; ignoring preview request");
            return Ok(PreviewOutcome::Skipped);
        }
        let Some(user_id) = self.user_id.clone() else {
            warn!("preview requested before a session was established");
            return Ok(PreviewOutcome::Skipped);
        };
        if !trigger.is_enabled() {
            debug!(room_id = room.room_id.0, "preview control busy; ignoring");
            return Ok(PreviewOutcome::Skipped);
        }
        let Some(date) = self.date.value() else {
            let err = BookingError::MissingDate;
            self.view.show_warning(&err.to_string());
            return Err(err);
        };

        let draft = BookingDraft::preview(user_id, room.room_id, room.room_name.clone(), date);
        self.phase = FlowPhase::PreviewRequested;
        debug!(room_id = room.room_id.0, %date, "requesting price preview");

        let result = {
            let busy = trigger.busy(PREVIEW_BUSY_LABEL);
            self.view.set_control_state(busy.control());
            self.pricing.preview(&draft).await
        };
        self.view.set_control_state(trigger);

        match result {
            Ok(quote) => {
                if quote.base_price != room.base_price {
                    debug!(
                        listed = %room.base_price,
                        quoted = %quote.base_price,
                        "quoted base price differs from listing"
                    );
                }
                let pending = PendingBooking {
                    draft: draft.to_commit(),
                    quote,
                    city: room.city.clone(),
                };
                let quote_view = pending.quote_view();
                self.view.render_quote(&quote_view);
                self.view.set_modal_visible(true);
                self.pending = Some(pending);
                self.phase = FlowPhase::PreviewShown;
                Ok(PreviewOutcome::Shown(quote_view))
            }
            Err(err) => {
                warn!(room_id = room.room_id.0, error = %err, "price preview failed");
                self.pending = None;
                self.phase = FlowPhase::PreviewFailed;
                self.view.set_modal_visible(false);
                self.view.show_error(&preview_failure_message(&err));
                Err(err)
            }
        }
    }

    /// Hides the modal. The pending draft survives and can still be confirmed.
    pub fn close_preview(&mut self) {
        self.view.set_modal_visible(false);
    }

    pub fn reopen_preview(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let quote_view = pending.quote_view();
        self.view.render_quote(&quote_view);
        self.view.set_modal_visible(true);
        true
    }

    pub async fn confirm_booking(
        &mut self,
        confirm: &mut Control,
    ) -> Result<ConfirmOutcome, BookingError> {
        if self.phase == FlowPhase::Confirmed {
            return Ok(ConfirmOutcome::Skipped);
        }
        let Some(pending) = &self.pending else {
            return Ok(ConfirmOutcome::Skipped);
        };
        if !confirm.is_enabled() {
            debug!("confirm control busy; ignoring");
            return Ok(ConfirmOutcome::Skipped);
        }

        let draft = pending.draft.clone();
        self.phase = FlowPhase::ConfirmRequested;
        debug!(room_id = draft.room_id.0, date = %draft.date, "committing booking");

        let result = {
            let busy = confirm.busy(CONFIRM_BUSY_LABEL);
            self.view.set_control_state(busy.control());
            self.pricing.commit(&draft).await
        };
        self.view.set_control_state(confirm);

        match result {
            Ok(confirmation) => {
                info!(
                    booking_id = confirmation.id.0,
                    total = %confirmation.total_price,
                    "booking confirmed"
                );
                self.view.show_confirmation(&ConfirmationNotice::from(&confirmation));
                self.pending = None;
                self.phase = FlowPhase::Confirmed;
                self.view.set_modal_visible(false);
                self.view.navigate(Surface::Summary);
                Ok(ConfirmOutcome::Confirmed(confirmation))
            }
            Err(err) => {
                warn!(room_id = draft.room_id.0, error = %err, "booking commit failed");
                self.phase = FlowPhase::ConfirmFailed;
                self.view.show_error(&confirm_failure_message(&err));
                Err(err)
            }
        }
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<&PendingBooking> {
        self.pending.as_ref()
    }

    pub fn date(&self) -> &DateField {
        &self.date
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

fn preview_failure_message(err: &BookingError) -> String {
    match err.kind() {
        ErrorKind::Transport => "Could not connect to Backend.".to_string(),
        _ => format!("Error: {err}"),
    }
}

fn confirm_failure_message(err: &BookingError) -> String {
    match err.kind() {
        ErrorKind::Transport => "Network Error.".to_string(),
        _ => format!("Booking Failed: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod tests;
