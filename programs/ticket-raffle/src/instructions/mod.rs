pub mod buy_ticket;
pub mod create_raffle;
pub mod initialize;
pub mod scratch_ticket;
pub mod solve_raffle;

pub use buy_ticket::*;
pub use create_raffle::*;
pub use initialize::*;
pub use scratch_ticket::*;
pub use solve_raffle::*;
