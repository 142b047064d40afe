use anchor_lang::prelude::*;
use solana_program::{ed25519_program, sysvar::instructions::load_instruction_at_checked};

use crate::constants::{ED25519_SIGNATURE_LEN, RAFFLE_SEED};
use crate::error::RaffleError;
use crate::state::{RaffleConfig, RaffleResolved};

/// Accounts required to resolve a raffle.
#[derive(Accounts)]
pub struct SolveRaffle<'info> {
    /// The raffle's maker; the only key allowed to resolve.
    #[account(address = raffle_config.authority @ RaffleError::Unauthorized)]
    pub maker: Signer<'info>,

    /// CHECK: Only used to re-derive the raffle PDA.
    pub operator: UncheckedAccount<'info>,

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

    /// CHECK: Instructions sysvar, used to introspect the ed25519 verify
    /// instruction. Address enforced.
    #[account(address = solana_program::sysvar::instructions::ID)]
    pub instruction_sysvar: UncheckedAccount<'info>,
}

/// A single inline ed25519 verification recovered from the ed25519
/// program's instruction data.
pub struct Ed25519Verification {
    pub public_key: [u8; 32],
    pub signature: [u8; 64],
    pub message: Vec<u8>,
}

/// Parses ed25519-program instruction data carrying exactly one signature
/// whose key, signature and message are all inline in the same instruction.
///
/// Layout: count(1) || padding(1) || offsets(14) || payload, where the
/// offsets struct holds seven little-endian u16s and an instruction index
/// of `u16::MAX` marks inline data.
pub fn parse_ed25519_instruction_data(data: &[u8]) -> Result<Ed25519Verification> {
    const HEADER_LEN: usize = 2;
    const OFFSETS_LEN: usize = 14;

    require!(
        data.len() >= HEADER_LEN + OFFSETS_LEN,
        RaffleError::InvalidSignature
    );
    require!(data[0] == 1, RaffleError::InvalidSignature);
    // The SDK constructor always writes a zero padding byte.
    require!(data[1] == 0, RaffleError::InvalidSignature);

    let read_u16 = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]);

    let signature_offset = read_u16(2) as usize;
    let signature_instruction_index = read_u16(4);
    let public_key_offset = read_u16(6) as usize;
    let public_key_instruction_index = read_u16(8);
    let message_data_offset = read_u16(10) as usize;
    let message_data_size = read_u16(12) as usize;
    let message_instruction_index = read_u16(14);

    // Reject references into other instructions of the transaction.
    require!(
        signature_instruction_index == u16::MAX
            && public_key_instruction_index == u16::MAX
            && message_instruction_index == u16::MAX,
        RaffleError::InvalidSignature
    );

    let signature_end = signature_offset
        .checked_add(ED25519_SIGNATURE_LEN)
        .ok_or(RaffleError::InvalidSignature)?;
    let public_key_end = public_key_offset
        .checked_add(32)
        .ok_or(RaffleError::InvalidSignature)?;
    let message_end = message_data_offset
        .checked_add(message_data_size)
        .ok_or(RaffleError::InvalidSignature)?;
    require!(
        signature_end <= data.len() && public_key_end <= data.len() && message_end <= data.len(),
        RaffleError::InvalidSignature
    );

    let mut public_key = [0u8; 32];
    public_key.copy_from_slice(&data[public_key_offset..public_key_end]);
    let mut signature = [0u8; 64];
    signature.copy_from_slice(&data[signature_offset..signature_end]);

    Ok(Ed25519Verification {
        public_key,
        signature,
        message: data[message_data_offset..message_end].to_vec(),
    })
}

/// Reduces a verified signature to a winning sequence index: the first
/// 8 bytes as a little-endian u64, modulo the number of tickets sold.
/// Anyone can recompute this from the public signature after resolution.
pub fn derive_winning_index(signature: &[u8; 64], tickets_sold: u64) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&signature[0..8]);
    u64::from_le_bytes(head) % tickets_sold
}

/// Resolves the raffle. The transaction must carry, as its first
/// instruction, an ed25519-program verification of the maker's signature
/// over the raffle's canonical message; the runtime has already executed
/// it, so a transaction that reaches this handler carries a
/// cryptographically valid signature. This handler pins that verification
/// to this raffle: same key as `authority`, same message, same signature
/// bytes as the argument.
pub fn process_solve_raffle(ctx: Context<SolveRaffle>, signature: Vec<u8>) -> Result<()> {
    let raffle_config = &ctx.accounts.raffle_config;

    require!(!raffle_config.resolved, RaffleError::RaffleAlreadyResolved);
    require!(raffle_config.tickets_sold > 0, RaffleError::NoTicketsSold);

    if raffle_config.interval > 0 {
        let clock = Clock::get()?;
        let open_until = raffle_config
            .creation_slot
            .checked_add(raffle_config.interval)
            .ok_or(RaffleError::NumericalOverflow)?;
        require!(clock.slot >= open_until, RaffleError::RaffleStillOpen);
    }

    require!(
        signature.len() == ED25519_SIGNATURE_LEN,
        RaffleError::InvalidSignature
    );

    let ix = load_instruction_at_checked(0, &ctx.accounts.instruction_sysvar.to_account_info())?;
    require_keys_eq!(ix.program_id, ed25519_program::ID, RaffleError::InvalidSignature);
    require!(ix.accounts.is_empty(), RaffleError::InvalidSignature);

    let verification = parse_ed25519_instruction_data(&ix.data)?;
    require!(
        verification.public_key == raffle_config.authority.to_bytes(),
        RaffleError::InvalidSignature
    );
    require!(
        verification.signature.as_ref() == signature.as_slice(),
        RaffleError::InvalidSignature
    );
    require!(
        verification.message == raffle_config.randomness_message(),
        RaffleError::InvalidSignature
    );

    let winning_index = derive_winning_index(&verification.signature, raffle_config.tickets_sold);

    msg!(
        "Raffle {} resolved: winning index {} of {} tickets",
        raffle_config.raffle_id,
        winning_index,
        raffle_config.tickets_sold
    );

    let raffle_config = &mut ctx.accounts.raffle_config;
    raffle_config.resolved = true;
    raffle_config.winning_index = Some(winning_index);

    emit!(RaffleResolved {
        raffle: raffle_config.key(),
        raffle_id: raffle_config.raffle_id,
        winning_index,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds ed25519-program instruction data in the layout produced by
    /// the SDK's single-signature constructor: header, offsets, then
    /// pubkey || signature || message.
    fn build_ix_data(public_key: &[u8; 32], signature: &[u8; 64], message: &[u8]) -> Vec<u8> {
        let public_key_offset: u16 = 16;
        let signature_offset: u16 = public_key_offset + 32;
        let message_data_offset: u16 = signature_offset + 64;

        let mut data = vec![1u8, 0u8];
        data.extend_from_slice(&signature_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(&public_key_offset.to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(&message_data_offset.to_le_bytes());
        data.extend_from_slice(&(message.len() as u16).to_le_bytes());
        data.extend_from_slice(&u16::MAX.to_le_bytes());
        data.extend_from_slice(public_key);
        data.extend_from_slice(signature);
        data.extend_from_slice(message);
        data
    }

    #[test]
    fn parse_roundtrip() {
        let public_key = [5u8; 32];
        let signature = [6u8; 64];
        let message = b"canonical raffle message".to_vec();

        let data = build_ix_data(&public_key, &signature, &message);
        let parsed = parse_ed25519_instruction_data(&data).unwrap();

        assert_eq!(parsed.public_key, public_key);
        assert_eq!(parsed.signature, signature);
        assert_eq!(parsed.message, message);
    }

    #[test]
    fn parse_rejects_multiple_signatures() {
        let mut data = build_ix_data(&[5u8; 32], &[6u8; 64], b"msg");
        data[0] = 2;
        assert!(parse_ed25519_instruction_data(&data).is_err());
    }

    #[test]
    fn parse_rejects_nonzero_padding() {
        let mut data = build_ix_data(&[5u8; 32], &[6u8; 64], b"msg");
        data[1] = 1;
        assert!(parse_ed25519_instruction_data(&data).is_err());
    }

    #[test]
    fn parse_rejects_cross_instruction_references() {
        let mut data = build_ix_data(&[5u8; 32], &[6u8; 64], b"msg");
        // Point the message at instruction 0 instead of inline.
        data[14] = 0;
        data[15] = 0;
        assert!(parse_ed25519_instruction_data(&data).is_err());
    }

    #[test]
    fn parse_rejects_truncated_data() {
        let data = build_ix_data(&[5u8; 32], &[6u8; 64], b"msg");
        assert!(parse_ed25519_instruction_data(&data[..data.len() - 1]).is_err());
        assert!(parse_ed25519_instruction_data(&data[..10]).is_err());
    }

    #[test]
    fn winning_index_reduction() {
        // First 8 bytes little-endian = 9; 9 % 6 = 3.
        let mut signature = [0u8; 64];
        signature[0] = 9;
        assert_eq!(derive_winning_index(&signature, 6), 3);

        // A single ticket always wins.
        assert_eq!(derive_winning_index(&signature, 1), 0);
    }

    #[test]
    fn winning_index_in_range() {
        let mut signature = [0xFFu8; 64];
        for tickets in 1..20u64 {
            signature[3] = tickets as u8;
            let index = derive_winning_index(&signature, tickets);
            assert!(index < tickets);
        }
    }
}
