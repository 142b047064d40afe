use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{
    BASIS_POINT_DENOMINATOR, MAX_NAME_LEN, MAX_URI_LEN, RAFFLE_SEED, TICKET_SEED, VAULT_SEED,
};
use crate::error::RaffleError;
use crate::state::{RaffleConfig, Ticket};

/// Accounts required to buy one ticket.
///
/// The ticket PDA is seeded by the pre-increment `tickets_sold`, so each
/// sale claims exactly the next sequence index; concurrent purchases
/// against the same raffle serialize on the writable `raffle_config`.
#[derive(Accounts)]
pub struct BuyTicket<'info> {
    /// The buyer; pays the ticket price and rent for the ticket record.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// CHECK: Only used to re-derive the raffle PDA.
    pub operator: UncheckedAccount<'info>,

    /// The raffle's maker; receives the fee leg of the ticket price.
    #[account(mut, address = raffle_config.authority)]
    pub maker: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [
            RAFFLE_SEED,
            operator.key().as_ref(),
            raffle_config.raffle_id.to_le_bytes().as_ref(),
        ],
        bump = raffle_config.bump,
    )]
    pub raffle_config: Account<'info, RaffleConfig>,

    /// Receives the net leg of the ticket price.
    #[account(
        mut,
        seeds = [VAULT_SEED, raffle_config.key().as_ref()],
        bump = raffle_config.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    /// Permanent receipt for this sale.
    #[account(
        init,
        payer = buyer,
        space = 8 + Ticket::INIT_SPACE,
        seeds = [
            TICKET_SEED,
            raffle_config.key().as_ref(),
            raffle_config.tickets_sold.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub ticket: Account<'info, Ticket>,

    /// System program to create accounts and move lamports.
    pub system_program: Program<'info, System>,
}

/// Splits a ticket price into (maker fee, vault net) using basis points.
pub fn compute_fee_split(ticket_price: u64, fee_rate_bps: u16) -> Result<(u64, u64)> {
    let fee = ticket_price
        .checked_mul(fee_rate_bps as u64)
        .ok_or(RaffleError::NumericalOverflow)?
        / BASIS_POINT_DENOMINATOR;
    let net = ticket_price
        .checked_sub(fee)
        .ok_or(RaffleError::NumericalOverflow)?;
    Ok((fee, net))
}

/// Sells one ticket: transfers the fee leg to the maker and the net leg to
/// the vault, then records the ticket at the next sequence index. Account
/// creation and both transfers live in one transaction, so a failed leg
/// rolls the whole sale back.
pub fn process_buy_ticket(ctx: Context<BuyTicket>, name: String, uri: String) -> Result<()> {
    require!(name.len() <= MAX_NAME_LEN, RaffleError::InvalidParameter);
    require!(uri.len() <= MAX_URI_LEN, RaffleError::InvalidParameter);

    let raffle_config = &ctx.accounts.raffle_config;
    require!(!raffle_config.resolved, RaffleError::RaffleAlreadyResolved);
    require!(
        !raffle_config.is_sold_out(),
        RaffleError::MaximumTicketsReached
    );

    let ticket_price = raffle_config.ticket_price;
    require!(
        ctx.accounts.buyer.lamports() >= ticket_price,
        RaffleError::InsufficientFunds
    );

    let (fee, net) = compute_fee_split(ticket_price, raffle_config.fee_rate_bps)?;

    if fee > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.buyer.to_account_info(),
                    to: ctx.accounts.maker.to_account_info(),
                },
            ),
            fee,
        )?;
    }

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.buyer.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        net,
    )?;

    let sequence_index = ctx.accounts.raffle_config.tickets_sold;

    ctx.accounts.ticket.set_inner(Ticket {
        owner: ctx.accounts.buyer.key(),
        raffle: ctx.accounts.raffle_config.key(),
        sequence_index,
        claimed: false,
        name,
        uri,
        bump: ctx.bumps.ticket,
    });

    ctx.accounts.raffle_config.tickets_sold = sequence_index
        .checked_add(1)
        .ok_or(RaffleError::NumericalOverflow)?;

    msg!(
        "Ticket {} sold: {} lamports to vault, {} lamports to maker",
        sequence_index,
        net,
        fee
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAMPORTS_PER_UNIT: u64 = 1_000_000_000;

    #[test]
    fn fee_split_basic() {
        // 1 unit at 100 bps: 1% fee, 99% to the vault.
        let (fee, net) = compute_fee_split(LAMPORTS_PER_UNIT, 100).unwrap();
        assert_eq!(fee, LAMPORTS_PER_UNIT / 100);
        assert_eq!(net, LAMPORTS_PER_UNIT - LAMPORTS_PER_UNIT / 100);
        assert_eq!(fee + net, LAMPORTS_PER_UNIT);
    }

    #[test]
    fn fee_split_six_ticket_pool() {
        // Six 1-unit tickets at 100 bps escrow 5.94 units in total.
        let (_, net) = compute_fee_split(LAMPORTS_PER_UNIT, 100).unwrap();
        assert_eq!(6 * net, 5_940_000_000);
    }

    #[test]
    fn fee_split_bounds() {
        let (fee, net) = compute_fee_split(1_000, 0).unwrap();
        assert_eq!((fee, net), (0, 1_000));

        let (fee, net) = compute_fee_split(1_000, 10_000).unwrap();
        assert_eq!((fee, net), (1_000, 0));
    }

    #[test]
    fn fee_split_rounds_fee_down() {
        // 999 * 100 / 10_000 = 9.99 -> fee 9, net 990.
        let (fee, net) = compute_fee_split(999, 100).unwrap();
        assert_eq!((fee, net), (9, 990));
        assert_eq!(fee + net, 999);
    }

    #[test]
    fn fee_split_overflow() {
        assert!(compute_fee_split(u64::MAX, 10_000).is_err());
    }
}
