//! Mobile-money collections and the ledger they feed.

pub mod flow;
pub mod gateway;
pub mod ledger;
pub mod methods;
pub mod phone;

pub use flow::{settle, PaymentFlow, PaymentState};
pub use gateway::{CollectionGateway, NkwaGateway};
pub use ledger::{compute_stats, Ledger};
pub use methods::{
    PaymentMethod, PaymentMethodDraft, PaymentMethodKind, PaymentMethods, ValidationErrors,
    CARD_PROVIDERS, MOBILE_PROVIDERS,
};
pub use phone::{compose_phone_number, format_xaf, is_plausible_phone, CountryCode};
