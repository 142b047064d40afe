use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{RAFFLE_SEED, TICKET_SEED, VAULT_SEED};
use crate::error::RaffleError;
use crate::state::{PrizeClaimed, RaffleConfig, Ticket};

/// Accounts required to scratch a ticket against a resolved raffle.
#[derive(Accounts)]
pub struct ScratchTicket<'info> {
    /// The ticket owner; receives the vault balance on a winning scratch.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// CHECK: Only used to re-derive the raffle PDA.
    pub operator: UncheckedAccount<'info>,

    #[account(
        seeds = [
            RAFFLE_SEED,
            operator.key().as_ref(),
            raffle_config.raffle_id.to_le_bytes().as_ref(),
        ],
        bump = raffle_config.bump,
    )]
    pub raffle_config: Account<'info, RaffleConfig>,

    /// Escrow holding the raffle's net proceeds.
    #[account(
        mut,
        seeds = [VAULT_SEED, raffle_config.key().as_ref()],
        bump = raffle_config.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    /// The ticket being scratched. The seeds bind it to this raffle and
    /// its recorded sequence index.
    #[account(
        mut,
        seeds = [
            TICKET_SEED,
            raffle_config.key().as_ref(),
            ticket.sequence_index.to_le_bytes().as_ref(),
        ],
        bump = ticket.bump,
        constraint = ticket.owner == buyer.key() @ RaffleError::Unauthorized,
    )]
    pub ticket: Account<'info, Ticket>,

    /// System program to move lamports out of the vault.
    pub system_program: Program<'info, System>,
}

/// Settles a ticket: a winning scratch drains the vault to the owner and
/// marks the ticket claimed, exactly once; a losing scratch aborts with
/// `NotAWinner` and moves nothing.
pub fn process_scratch_ticket(ctx: Context<ScratchTicket>) -> Result<()> {
    let raffle_config = &ctx.accounts.raffle_config;
    let ticket = &ctx.accounts.ticket;

    require!(raffle_config.resolved, RaffleError::RaffleNotResolved);
    let winning_index = raffle_config
        .winning_index
        .ok_or(RaffleError::RaffleNotResolved)?;

    require!(!ticket.claimed, RaffleError::AlreadyClaimed);
    require!(ticket.is_winner(winning_index), RaffleError::NotAWinner);

    let amount = ctx.accounts.vault.lamports();
    let raffle_key = raffle_config.key();
    let vault_seeds: &[&[u8]] = &[
        VAULT_SEED,
        raffle_key.as_ref(),
        &[raffle_config.vault_bump],
    ];

    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.buyer.to_account_info(),
            },
            &[vault_seeds],
        ),
        amount,
    )?;

    ctx.accounts.ticket.claimed = true;

    msg!(
        "Ticket {} won raffle {}: {} lamports paid out",
        winning_index,
        raffle_config.raffle_id,
        amount
    );

    emit!(PrizeClaimed {
        raffle: raffle_key,
        ticket: ctx.accounts.ticket.key(),
        winner: ctx.accounts.buyer.key(),
        amount,
    });

    Ok(())
}
