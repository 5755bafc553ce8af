//! `lightbnb reservations` - a guest's bookings

use std::io::{self, Write};

use anyhow::{Context as _, Result};
use clap::Parser;
use lightbnb_db::BookingStore;

use super::Context;
use crate::output::write_reservations;

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest (user) id
    pub guest_id: i32,

    /// Maximum rows to return (0-100)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

pub async fn run_reservations(args: ReservationsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.connect().await?;
    execute(&store, args, ctx, &mut io::stdout()).await
}

pub async fn execute<S: BookingStore + ?Sized>(
    store: &S,
    args: ReservationsArgs,
    ctx: &Context,
    out: &mut impl Write,
) -> Result<()> {
    let limit = ctx.config.limit(args.limit);
    let listings = store
        .get_all_reservations(args.guest_id, limit)
        .await
        .with_context(|| format!("Failed to load reservations for guest {}", args.guest_id))?;
    write_reservations(out, &listings, ctx.format)
}
