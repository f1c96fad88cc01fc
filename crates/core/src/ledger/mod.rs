pub mod ledger_errors;
pub mod ledger_model;
pub mod ledger_service;
pub mod ledger_traits;

pub use ledger_errors::LedgerError;
pub use ledger_model::{
    Position, TradeConfirmation, TradeOrder, TradeSide, Transaction, TransactionDraft,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
