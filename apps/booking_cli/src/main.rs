use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{
    load_settings, session::session_user, BookingFlowController, ClientSettings, ConfirmOutcome,
    Control, FileSessionStore, HttpPricingService, PreviewOutcome, PricingService, RoomSelection,
    SessionStatus, SessionStore, Surface, SESSION_USER_KEY,
};
use rust_decimal::Decimal;
use shared::domain::{RoomId, UserId};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::{prompt_yes_no, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "roombook", about = "Price and book rooms against the booking API")]
struct Args {
    /// Booking API base URL; overrides booking.toml and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    session_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview the price for a room and date, then confirm the booking.
    Book(BookArgs),
    /// List bookings made by the session user.
    Bookings,
    Health,
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(ClapArgs, Debug)]
struct BookArgs {
    #[arg(long)]
    room_id: i64,
    #[arg(long)]
    room_name: String,
    #[arg(long)]
    base_price: Decimal,
    #[arg(long)]
    city: String,
    /// Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Confirm without prompting.
    #[arg(long)]
    yes: bool,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    Set { user_id: String },
    Clear,
    Show,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings = settings.with_api_url(api_url);
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = Some(session_path);
    }

    match args.command {
        Command::Session(cmd) => {
            let session = open_session_store(&settings)?;
            run_session(&session, cmd)
        }
        Command::Health => {
            let pricing = HttpPricingService::new(&settings.api_url)?;
            let health = pricing.health().await?;
            match health.service {
                Some(service) => println!("{service}: {}", health.status),
                None => println!("{}", health.status),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Bookings => {
            let session = open_session_store(&settings)?;
            let pricing = HttpPricingService::new(&settings.api_url)?;
            let Some(user_id) = session_user(&session)? else {
                eprintln!("not logged in; run `roombook session set <user-id>` first");
                return Ok(ExitCode::FAILURE);
            };
            print_bookings(&pricing, &user_id).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Book(book) => {
            let session: Arc<dyn SessionStore> = Arc::new(open_session_store(&settings)?);
            let pricing = Arc::new(HttpPricingService::new(&settings.api_url)?);
            run_book(pricing, session, book).await
        }
    }
}

fn open_session_store(settings: &ClientSettings) -> Result<FileSessionStore> {
    match &settings.session_path {
        Some(path) => Ok(FileSessionStore::new(path)),
        None => FileSessionStore::open_default(),
    }
}

fn run_session(session: &dyn SessionStore, cmd: SessionCommand) -> Result<ExitCode> {
    match cmd {
        SessionCommand::Set { user_id } => {
            session
                .set(SESSION_USER_KEY, user_id.trim())
                .context("failed to store session user")?;
            println!("Logged in as user_id={}", user_id.trim());
        }
        SessionCommand::Clear => {
            session
                .remove(SESSION_USER_KEY)
                .context("failed to clear session user")?;
            println!("Logged out");
        }
        SessionCommand::Show => match session_user(session)? {
            Some(user_id) => println!("user_id={user_id}"),
            None => println!("not logged in"),
        },
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_book(
    pricing: Arc<HttpPricingService>,
    session: Arc<dyn SessionStore>,
    book: BookArgs,
) -> Result<ExitCode> {
    let mut flow = BookingFlowController::new(pricing.clone(), session, TerminalView::default());

    let user_id = match flow.initialize() {
        SessionStatus::Ready(user_id) => user_id,
        SessionStatus::RedirectedToLogin => {
            eprintln!("not logged in; run `roombook session set <user-id>` first");
            return Ok(ExitCode::FAILURE);
        }
    };
    if let Some(date) = book.date {
        if flow.select_date(date).is_err() {
            return Ok(ExitCode::FAILURE);
        }
    }

    let room = RoomSelection {
        room_id: RoomId(book.room_id),
        room_name: book.room_name,
        base_price: book.base_price,
        city: book.city,
    };
    let mut book_now = Control::new("Book Now");
    match flow.request_preview(&room, &mut book_now).await {
        Ok(PreviewOutcome::Shown(_)) => {}
        Ok(PreviewOutcome::Skipped) | Err(_) => return Ok(ExitCode::FAILURE),
    }

    if !book.yes && !prompt_yes_no("Confirm & Book?")? {
        flow.close_preview();
        println!("Booking not confirmed.");
        return Ok(ExitCode::SUCCESS);
    }

    let mut confirm = Control::new("Confirm & Book →");
    loop {
        match flow.confirm_booking(&mut confirm).await {
            Ok(ConfirmOutcome::Confirmed(_)) => break,
            Ok(ConfirmOutcome::Skipped) => return Ok(ExitCode::FAILURE),
            Err(_) => {
                if book.yes || !prompt_yes_no("Retry booking?")? {
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    if flow.view().navigated() == Some(Surface::Summary) {
        print_bookings(pricing.as_ref(), &user_id).await?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn print_bookings(pricing: &dyn PricingService, user_id: &UserId) -> Result<()> {
    let bookings = pricing
        .user_bookings(user_id)
        .await
        .context("failed to load bookings")?;
    if bookings.is_empty() {
        println!("No bookings yet.");
        return Ok(());
    }
    println!("Your bookings:");
    for booking in bookings {
        println!(
            "  #{:<6} {:<28} {:<32} {}",
            booking.id.0,
            booking.room_name,
            booking.date,
            client_core::view::format_money(booking.total_price)
        );
    }
    Ok(())
}
