use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Config already initialized for this operator")]
    AlreadyInitialized,

    #[msg("Signer is not authorized for this action")]
    Unauthorized,

    #[msg("Insufficient funds to cover the transfer")]
    InsufficientFunds,

    #[msg("Invalid parameter: fee rate, ticket price or metadata out of range")]
    InvalidParameter,

    #[msg("Raffle has already been resolved")]
    RaffleAlreadyResolved,

    #[msg("Raffle has not been resolved yet")]
    RaffleNotResolved,

    #[msg("Raffle is still open for ticket sales")]
    RaffleStillOpen,

    #[msg("Cannot resolve a raffle with no tickets sold")]
    NoTicketsSold,

    #[msg("Maximum number of tickets reached")]
    MaximumTicketsReached,

    #[msg("Ed25519 signature verification failed")]
    InvalidSignature,

    #[msg("Ticket has already been claimed")]
    AlreadyClaimed,

    #[msg("Ticket did not win this raffle")]
    NotAWinner,

    #[msg("Numerical overflow")]
    NumericalOverflow,
}
