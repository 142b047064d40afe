/// PDA seed for the per-operator [`crate::state::Config`] account.
pub const CONFIG_SEED: &[u8] = b"config";

/// PDA seed for the operator-wide fee treasury.
pub const TREASURY_SEED: &[u8] = b"treasury";

/// PDA seed for a [`crate::state::RaffleConfig`] account.
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// PDA seed for a raffle's escrow vault.
pub const VAULT_SEED: &[u8] = b"vault";

/// PDA seed for a [`crate::state::Ticket`] account.
pub const TICKET_SEED: &[u8] = b"ticket";

/// Fee rates are expressed in basis points of the ticket price.
pub const BASIS_POINT_DENOMINATOR: u64 = 10_000;

/// Upper bound on `fee_rate_bps` (100% of the ticket price).
pub const MAX_FEE_RATE_BPS: u16 = 10_000;

/// Maximum length of a ticket or raffle display name.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum length of a ticket metadata URI.
pub const MAX_URI_LEN: usize = 200;

/// An ed25519 signature is always 64 bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;
