pub mod balance;
pub mod endpoint;
pub mod transaction;

pub use balance::{Amount, Balance, ATOMIC_UNITS_PER_COIN};
pub use endpoint::Endpoint;
pub use transaction::{
    FusionTransaction, StandardTransaction, TransactionKind, Transfer,
};
