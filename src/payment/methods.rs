use crate::payment::phone::{compose_phone_number, CountryCode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const MOBILE_PROVIDERS: [&str; 3] = ["MTN MOMO Cameroon", "Orange Money", "Express Union"];
pub const CARD_PROVIDERS: [&str; 3] = ["Visa", "MasterCard", "American Express"];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    Mobile,
    Card,
    Paypal,
}

impl PaymentMethodKind {
    /// Providers offered for this kind; PayPal has none.
    pub fn providers(&self) -> &'static [&'static str] {
        match self {
            PaymentMethodKind::Mobile => &MOBILE_PROVIDERS,
            PaymentMethodKind::Card => &CARD_PROVIDERS,
            PaymentMethodKind::Paypal => &[],
        }
    }
}

/// What the user typed into the "add payment method" form.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodDraft {
    pub kind: PaymentMethodKind,
    pub provider: String,
    pub account_details: String,
}

/// A saved method. Card numbers keep only their last four digits.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: u32,
    pub kind: PaymentMethodKind,
    pub provider: String,
    pub details: String,
}

impl PaymentMethod {
    pub fn display_name(&self) -> String {
        match self.kind {
            PaymentMethodKind::Mobile | PaymentMethodKind::Card => {
                format!("{} •••• {}", self.provider, last_four(&self.details))
            }
            PaymentMethodKind::Paypal => self.details.clone(),
        }
    }

    /// Number to collect from, for mobile methods.
    pub fn collection_phone(&self) -> Option<String> {
        match self.kind {
            PaymentMethodKind::Mobile => Some(compose_phone_number(CountryCode::Cameroon, &self.details)),
            _ => None,
        }
    }
}

/// Field name → message, for every field that failed.
pub type ValidationErrors = BTreeMap<&'static str, String>;

fn cameroon_mobile() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^6\d{8}$").expect("valid mobile pattern"))
}

fn card_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{16}$").expect("valid card pattern"))
}

fn email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

fn last_four(details: &str) -> &str {
    let start = details
        .char_indices()
        .rev()
        .nth(3)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &details[start..]
}

impl PaymentMethodDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let details = self.account_details.trim();

        let provider = self.provider.trim();
        if self.kind != PaymentMethodKind::Paypal {
            if provider.is_empty() {
                errors.insert("provider", "Provider is required".to_string());
            } else if !self.kind.providers().contains(&provider) {
                errors.insert("provider", format!("Unknown provider: {}", provider));
            }
        }

        if details.is_empty() {
            errors.insert("accountDetails", "Account details are required".to_string());
        } else {
            match self.kind {
                PaymentMethodKind::Mobile if !cameroon_mobile().is_match(details) => {
                    errors.insert(
                        "accountDetails",
                        "Invalid Cameroon mobile number (6xxxxxxxx)".to_string(),
                    );
                }
                PaymentMethodKind::Card if !card_number().is_match(details) => {
                    errors.insert("accountDetails", "Invalid card number (16 digits)".to_string());
                }
                PaymentMethodKind::Paypal if !email().is_match(details) => {
                    errors.insert("accountDetails", "Invalid email address".to_string());
                }
                _ => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// The user's saved payment methods.
#[derive(Debug, Default, Clone)]
pub struct PaymentMethods {
    methods: Vec<PaymentMethod>,
}

impl PaymentMethods {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, draft: PaymentMethodDraft) -> Result<&PaymentMethod, ValidationErrors> {
        draft.validate()?;

        let details = draft.account_details.trim();
        let details = match draft.kind {
            PaymentMethodKind::Card => last_four(details).to_string(),
            _ => details.to_string(),
        };

        let id = self.methods.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        self.methods.push(PaymentMethod {
            id,
            kind: draft.kind,
            provider: draft.provider.trim().to_string(),
            details,
        });
        Ok(&self.methods[self.methods.len() - 1])
    }

    pub fn remove(&mut self, id: u32) -> Option<PaymentMethod> {
        let index = self.methods.iter().position(|m| m.id == id)?;
        Some(self.methods.remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&PaymentMethod> {
        self.methods.iter().find(|m| m.id == id)
    }

    pub fn list(&self) -> &[PaymentMethod] {
        &self.methods
    }
}
