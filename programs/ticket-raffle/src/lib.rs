use anchor_lang::prelude::*;
use instructions::*;

mod constants;
mod error;
mod instructions;
mod state;

declare_id!("7q382rmDeMDAguhj44oY5UpwV9DsnLhjeQ7q4wuBouuR");

#[program]
pub mod ticket_raffle {
    use super::*;

    /// Creates the operator's Config and fixes the treasury PDA where
    /// raffle creation fees accumulate.
    pub fn initialize(ctx: Context<Initialize>, creation_fee: u64) -> Result<()> {
        process_initialize(ctx, creation_fee)
    }

    /// Opens a new raffle: charges the creation fee into the treasury and
    /// creates the raffle state plus its empty vault.
    pub fn create_raffle(
        ctx: Context<CreateRaffle>,
        raffle_id: u64,
        name: String,
        uri: String,
        ticket_price: u64,
        fee_rate_bps: u16,
        interval: u64,
        max_tickets: u64,
    ) -> Result<()> {
        process_create_raffle(
            ctx,
            raffle_id,
            name,
            uri,
            ticket_price,
            fee_rate_bps,
            interval,
            max_tickets,
        )
    }

    /// Sells one ticket: pays the maker fee, escrows the net price in the
    /// vault and records the ticket at the next sequence index.
    pub fn buy_ticket(ctx: Context<BuyTicket>, name: String, uri: String) -> Result<()> {
        process_buy_ticket(ctx, name, uri)
    }

    /// Resolves the raffle from a maker signature over the canonical
    /// message, fixing the winning sequence index.
    pub fn solve_raffle(ctx: Context<SolveRaffle>, signature: Vec<u8>) -> Result<()> {
        process_solve_raffle(ctx, signature)
    }

    /// Checks a ticket against the winning index and, on a match, drains
    /// the vault to the ticket owner exactly once.
    pub fn scratch_ticket(ctx: Context<ScratchTicket>) -> Result<()> {
        process_scratch_ticket(ctx)
    }
}
