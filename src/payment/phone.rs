use regex::Regex;
use std::sync::OnceLock;

/// Calling codes offered on the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryCode {
    Cameroon,
    Nigeria,
    IvoryCoast,
}

impl CountryCode {
    pub const ALL: [CountryCode; 3] = [
        CountryCode::Cameroon,
        CountryCode::Nigeria,
        CountryCode::IvoryCoast,
    ];

    pub fn dial_code(&self) -> &'static str {
        match self {
            CountryCode::Cameroon => "237",
            CountryCode::Nigeria => "234",
            CountryCode::IvoryCoast => "225",
        }
    }

    pub fn iso(&self) -> &'static str {
        match self {
            CountryCode::Cameroon => "CM",
            CountryCode::Nigeria => "NG",
            CountryCode::IvoryCoast => "CI",
        }
    }

    pub fn from_dial_code(code: &str) -> Option<Self> {
        let code = code.trim().trim_start_matches('+');
        Self::ALL.into_iter().find(|c| c.dial_code() == code)
    }
}

/// Full number as the gateway expects it: calling code then local digits.
pub fn compose_phone_number(country: CountryCode, local: &str) -> String {
    let digits: String = local.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{}{}", country.dial_code(), digits)
}

/// Shape check only; the gateway has the final word.
pub fn is_plausible_phone(phone: &str) -> bool {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE
        .get_or_init(|| Regex::new(r"^[0-9]{9,15}$").expect("valid phone pattern"))
        .is_match(phone)
}

/// Render an amount like `XAF 15,999`.
pub fn format_xaf(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("XAF {}{}", sign, grouped)
}
