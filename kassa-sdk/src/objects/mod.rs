pub mod admin;
pub mod balance;
pub mod deposit;

pub use admin::{
    ConfirmDepositRequest, ListDepositsQuery, ListUnattributedQuery, RejectDepositRequest,
    ScanStateResponse, TransferStatus, UnattributedTransferResponse, clamp_pagination,
};
pub use balance::BalanceResponse;
pub use deposit::{CancelDepositRequest, CreateDepositRequest, DepositResponse, DepositStatus};
