use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, TREASURY_SEED};
use crate::error::RaffleError;
use crate::state::Config;

/// Accounts required to bootstrap an operator's Config and treasury.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The operator initializing the protocol; pays for account creation.
    #[account(mut)]
    pub operator: Signer<'info>,

    /// Operator-wide fee treasury. A plain system account at a derived
    /// address; it only ever holds lamports.
    #[account(
        seeds = [TREASURY_SEED, operator.key().as_ref()],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    /// The Config singleton for this operator.
    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + Config::INIT_SPACE,
        seeds = [CONFIG_SEED, treasury.key().as_ref()],
        bump
    )]
    pub config: Account<'info, Config>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Initializes the operator's Config with the raffle creation fee and
/// records both PDA bumps. The treasury starts at zero balance and is
/// only ever credited by `create_raffle`.
pub fn process_initialize(ctx: Context<Initialize>, creation_fee: u64) -> Result<()> {
    let config = &mut ctx.accounts.config;

    // init_if_needed lets a second call reach here; a populated authority
    // means the singleton already exists.
    require!(
        config.authority == Pubkey::default(),
        RaffleError::AlreadyInitialized
    );

    config.authority = ctx.accounts.operator.key();
    config.creation_fee = creation_fee;
    config.bump = ctx.bumps.config;
    config.treasury_bump = ctx.bumps.treasury;

    msg!(
        "Config initialized: operator {}, creation fee {} lamports",
        config.authority,
        creation_fee
    );

    Ok(())
}
