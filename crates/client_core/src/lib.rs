//! Client side of the room booking API: session lookup, the preview/confirm
//! booking flow, and the HTTP pricing client it talks to.

pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod pricing;
pub mod session;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::{BookingError, ErrorKind};
pub use flow::{
    BookingFlowController, ConfirmOutcome, FlowPhase, PendingBooking, PreviewOutcome,
    RoomSelection, SessionStatus,
};
pub use pricing::{HttpPricingService, PricingService};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, SESSION_USER_KEY};
pub use view::{BookingView, ConfirmationNotice, Control, QuoteView, Surface};
