use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{
    CONFIG_SEED, MAX_FEE_RATE_BPS, MAX_NAME_LEN, MAX_URI_LEN, RAFFLE_SEED, TREASURY_SEED,
    VAULT_SEED,
};
use crate::error::RaffleError;
use crate::state::{Config, RaffleConfig};

/// Accounts required to open a new raffle.
///
/// The raffle PDA is seeded by (operator, raffle_id) so one maker can run
/// any number of raffles; the vault PDA is seeded by the raffle, giving
/// each raffle its own escrow.
#[derive(Accounts)]
#[instruction(raffle_id: u64)]
pub struct CreateRaffle<'info> {
    /// The maker opening the raffle; pays the creation fee and rent.
    #[account(mut)]
    pub maker: Signer<'info>,

    /// CHECK: Only used to derive the treasury and raffle PDAs.
    pub operator: UncheckedAccount<'info>,

    /// Receives the creation fee.
    #[account(
        mut,
        seeds = [TREASURY_SEED, operator.key().as_ref()],
        bump = config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(
        seeds = [CONFIG_SEED, treasury.key().as_ref()],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: Opaque reference to the external collectible collection; the
    /// core only records its key.
    pub collection: UncheckedAccount<'info>,

    #[account(
        init,
        payer = maker,
        space = 8 + RaffleConfig::INIT_SPACE,
        seeds = [
            RAFFLE_SEED,
            operator.key().as_ref(),
            raffle_id.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub raffle_config: Account<'info, RaffleConfig>,

    /// Escrow for this raffle's net ticket proceeds.
    #[account(
        seeds = [VAULT_SEED, raffle_config.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    /// System program to create accounts and move lamports.
    pub system_program: Program<'info, System>,
}

/// Opens a raffle: validates parameters, moves the creation fee from the
/// maker into the treasury and writes the initial raffle state.
pub fn process_create_raffle(
    ctx: Context<CreateRaffle>,
    raffle_id: u64,
    name: String,
    uri: String,
    ticket_price: u64,
    fee_rate_bps: u16,
    interval: u64,
    max_tickets: u64,
) -> Result<()> {
    require!(ticket_price > 0, RaffleError::InvalidParameter);
    require!(fee_rate_bps <= MAX_FEE_RATE_BPS, RaffleError::InvalidParameter);
    require!(name.len() <= MAX_NAME_LEN, RaffleError::InvalidParameter);
    require!(uri.len() <= MAX_URI_LEN, RaffleError::InvalidParameter);

    let creation_fee = ctx.accounts.config.creation_fee;
    require!(
        ctx.accounts.maker.lamports() >= creation_fee,
        RaffleError::InsufficientFunds
    );

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.maker.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
            },
        ),
        creation_fee,
    )?;

    let clock = Clock::get()?;

    ctx.accounts.raffle_config.set_inner(RaffleConfig {
        authority: ctx.accounts.maker.key(),
        collection: ctx.accounts.collection.key(),
        raffle_id,
        creation_slot: clock.slot,
        ticket_price,
        fee_rate_bps,
        interval,
        max_tickets,
        tickets_sold: 0,
        resolved: false,
        winning_index: None,
        bump: ctx.bumps.raffle_config,
        vault_bump: ctx.bumps.vault,
    });

    msg!(
        "Raffle {} ({}) created: price {} lamports, fee {} bps",
        raffle_id,
        name,
        ticket_price,
        fee_rate_bps
    );

    Ok(())
}
