mod chat;
mod payment;
mod user;

pub use chat::{AttachmentRecord, ChatSession, Message};
pub use payment::{
    LedgerStats, PaymentRequest, PaymentResponse, PaymentStatus, Transaction, TransactionKind,
    TransactionStatus,
};
pub use user::{UserRecord, UserRole};
