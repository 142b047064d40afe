use anchor_lang::prelude::*;

use crate::constants::{MAX_NAME_LEN, MAX_URI_LEN};

/// Per-operator protocol configuration, created once by `initialize`.
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// The operator who initialized the protocol and may withdraw treasury fees.
    pub authority: Pubkey,

    /// Flat fee (in lamports) charged into the treasury for every raffle created.
    pub creation_fee: u64,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The bump seed of the operator's treasury PDA.
    pub treasury_bump: u8,
}

/// State of a single raffle: sale counters, resolution status and the
/// immutable parameters the resolution signature commits to.
#[account]
#[derive(InitSpace)]
pub struct RaffleConfig {
    /// The maker who created the raffle and is the only key allowed to resolve it.
    pub authority: Pubkey,

    /// Opaque reference to the external collectible collection backing the tickets.
    pub collection: Pubkey,

    /// Maker-chosen identifier; part of this account's PDA seeds.
    pub raffle_id: u64,

    /// Slot at which the raffle was created.
    pub creation_slot: u64,

    /// Price (in lamports) of one ticket.
    pub ticket_price: u64,

    /// Share of each ticket price paid to the maker, in basis points.
    pub fee_rate_bps: u16,

    /// Minimum number of slots after `creation_slot` before resolution is
    /// permitted. `0` disables the gate.
    pub interval: u64,

    /// Maximum number of tickets that may be sold. `0` leaves the raffle
    /// uncapped.
    pub max_tickets: u64,

    /// Number of tickets sold so far. The next ticket takes this value as
    /// its sequence index.
    pub tickets_sold: u64,

    /// `true` once a winner has been drawn; gates further sales and re-resolution.
    pub resolved: bool,

    /// The winning sequence index. `None` until `resolved` is set.
    pub winning_index: Option<u64>,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The bump seed of this raffle's vault PDA.
    pub vault_bump: u8,
}

impl RaffleConfig {
    /// Whether the capacity cap (if any) has been reached.
    pub fn is_sold_out(&self) -> bool {
        self.max_tickets > 0 && self.tickets_sold >= self.max_tickets
    }

    /// Canonical message the maker must sign to resolve the raffle.
    ///
    /// Fixed-order concatenation of the immutable fields only, so the
    /// message is fully determined before the first ticket is sold and
    /// cannot be chosen adaptively.
    pub fn randomness_message(&self) -> Vec<u8> {
        let mut msg = self.authority.to_bytes().to_vec();
        msg.extend_from_slice(&self.collection.to_bytes());
        msg.extend_from_slice(&self.creation_slot.to_le_bytes());
        msg.extend_from_slice(&self.ticket_price.to_le_bytes());
        msg.extend_from_slice(&self.fee_rate_bps.to_le_bytes());
        msg.push(self.bump);
        msg.push(self.vault_bump);
        msg
    }
}

/// Permanent receipt for one sold ticket. Never closed, so a raffle's
/// full entry history stays auditable after settlement.
#[account]
#[derive(InitSpace)]
pub struct Ticket {
    /// The buyer; the only key allowed to scratch this ticket.
    pub owner: Pubkey,

    /// The `RaffleConfig` this ticket belongs to.
    pub raffle: Pubkey,

    /// Zero-based purchase order within the raffle; the resolution target space.
    pub sequence_index: u64,

    /// Set once the winning ticket has been scratched and paid out.
    pub claimed: bool,

    /// Display name recorded at purchase time.
    #[max_len(MAX_NAME_LEN)]
    pub name: String,

    /// Metadata URI recorded at purchase time.
    #[max_len(MAX_URI_LEN)]
    pub uri: String,

    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,
}

impl Ticket {
    pub fn is_winner(&self, winning_index: u64) -> bool {
        self.sequence_index == winning_index
    }
}

/// Emitted when a raffle is resolved, for off-chain observers.
/// Delivery is observational only; settlement does not depend on it.
#[event]
pub struct RaffleResolved {
    pub raffle: Pubkey,
    pub raffle_id: u64,
    pub winning_index: u64,
}

/// Emitted when the winning ticket drains the vault.
#[event]
pub struct PrizeClaimed {
    pub raffle: Pubkey,
    pub ticket: Pubkey,
    pub winner: Pubkey,
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raffle() -> RaffleConfig {
        RaffleConfig {
            authority: Pubkey::new_from_array([7u8; 32]),
            collection: Pubkey::new_from_array([9u8; 32]),
            raffle_id: 42,
            creation_slot: 1_000,
            ticket_price: 1_000_000_000,
            fee_rate_bps: 100,
            interval: 0,
            max_tickets: 0,
            tickets_sold: 0,
            resolved: false,
            winning_index: None,
            bump: 254,
            vault_bump: 253,
        }
    }

    #[test]
    fn randomness_message_layout() {
        let raffle = sample_raffle();
        let msg = raffle.randomness_message();

        // authority(32) || collection(32) || slot(8) || price(8) || bps(2) || bumps(2)
        assert_eq!(msg.len(), 84);
        assert_eq!(&msg[0..32], raffle.authority.to_bytes().as_ref());
        assert_eq!(&msg[32..64], raffle.collection.to_bytes().as_ref());
        assert_eq!(&msg[64..72], &1_000u64.to_le_bytes());
        assert_eq!(&msg[72..80], &1_000_000_000u64.to_le_bytes());
        assert_eq!(&msg[80..82], &100u16.to_le_bytes());
        assert_eq!(msg[82], 254);
        assert_eq!(msg[83], 253);
    }

    #[test]
    fn randomness_message_ignores_mutable_state() {
        let mut raffle = sample_raffle();
        let before = raffle.randomness_message();

        raffle.tickets_sold = 17;
        raffle.resolved = true;
        raffle.winning_index = Some(3);

        // Sales and resolution must not shift the signed message.
        assert_eq!(raffle.randomness_message(), before);
    }

    #[test]
    fn account_space_constants() {
        assert_eq!(Config::INIT_SPACE, 32 + 8 + 1 + 1);
        assert_eq!(
            RaffleConfig::INIT_SPACE,
            32 + 32 + 8 + 8 + 8 + 2 + 8 + 8 + 8 + 1 + (1 + 8) + 1 + 1
        );
        assert_eq!(
            Ticket::INIT_SPACE,
            32 + 32 + 8 + 1 + (4 + MAX_NAME_LEN) + (4 + MAX_URI_LEN) + 1
        );
    }

    #[test]
    fn sold_out_respects_capacity() {
        let mut raffle = sample_raffle();

        // Uncapped raffles never sell out.
        raffle.tickets_sold = 1_000_000;
        assert!(!raffle.is_sold_out());

        raffle.max_tickets = 6;
        raffle.tickets_sold = 5;
        assert!(!raffle.is_sold_out());
        raffle.tickets_sold = 6;
        assert!(raffle.is_sold_out());
    }

    #[test]
    fn ticket_winner_check() {
        let ticket = Ticket {
            owner: Pubkey::default(),
            raffle: Pubkey::default(),
            sequence_index: 3,
            claimed: false,
            name: "Ticket 3".to_string(),
            uri: "https://example.com/3.json".to_string(),
            bump: 255,
        };

        assert!(ticket.is_winner(3));
        assert!(!ticket.is_winner(2));
        assert!(!ticket.is_winner(4));
    }
}
