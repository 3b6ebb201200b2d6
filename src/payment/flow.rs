use crate::auth::AuthContext;
use crate::error::Result;
use crate::models::{PaymentRequest, PaymentResponse, PaymentStatus};
use crate::payment::gateway::CollectionGateway;
use crate::payment::ledger::Ledger;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentState {
    Idle,
    Submitting(PaymentRequest),
    Success(PaymentResponse),
    Pending(PaymentResponse),
    Cancelled {
        reason: String,
        response: Option<PaymentResponse>,
    },
}

impl PaymentState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentState::Success(_) | PaymentState::Pending(_) | PaymentState::Cancelled { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentState::Idle => "idle",
            PaymentState::Submitting(_) => "submitting",
            PaymentState::Success(_) => "success",
            PaymentState::Pending(_) => "pending",
            PaymentState::Cancelled { .. } => "cancelled",
        }
    }

    pub fn response(&self) -> Option<&PaymentResponse> {
        match self {
            PaymentState::Success(r) | PaymentState::Pending(r) => Some(r),
            PaymentState::Cancelled { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    fn cancelled(reason: impl Into<String>, response: Option<PaymentResponse>) -> Self {
        PaymentState::Cancelled {
            reason: reason.into(),
            response,
        }
    }
}

/// Terminal state for a gateway answer to `request`.
pub fn settle(request: &PaymentRequest, outcome: Result<PaymentResponse>) -> PaymentState {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return PaymentState::cancelled(e.user_message(), None),
    };

    if response.amount != request.amount {
        let reason = format!(
            "Gateway reported {} XAF for a request of {} XAF",
            response.amount, request.amount
        );
        return PaymentState::cancelled(reason, Some(response));
    }

    match &response.status {
        PaymentStatus::Success => PaymentState::Success(response),
        PaymentStatus::Pending => PaymentState::Pending(response),
        PaymentStatus::Cancelled => PaymentState::cancelled("Payment was cancelled", Some(response)),
        PaymentStatus::Failed => PaymentState::cancelled("Payment failed", Some(response)),
        PaymentStatus::Unknown(raw) => {
            let reason = format!("Unknown payment status: {}", raw);
            PaymentState::cancelled(reason, Some(response))
        }
    }
}

/// Drives one payment form: `idle -> submitting -> success | pending | cancelled`.
pub struct PaymentFlow {
    gateway: Arc<dyn CollectionGateway>,
    ledger: Arc<Ledger>,
    auth: Arc<AuthContext>,
    state: PaymentState,
}

impl PaymentFlow {
    pub fn new(
        gateway: Arc<dyn CollectionGateway>,
        ledger: Arc<Ledger>,
        auth: Arc<AuthContext>,
    ) -> Self {
        Self {
            gateway,
            ledger,
            auth,
            state: PaymentState::Idle,
        }
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Start over for a new attempt.
    pub fn reset(&mut self) {
        self.state = PaymentState::Idle;
    }

    /// Submit one collection and wait for its terminal state.
    ///
    /// Never fails: transport errors, gateway rejections and unexpected
    /// statuses all end in `Cancelled`. A `Success` also lands in the ledger.
    pub async fn submit_payment(
        &mut self,
        amount: u64,
        phone_number: &str,
        description: Option<String>,
    ) -> &PaymentState {
        let request = PaymentRequest {
            amount,
            phone_number: phone_number.to_string(),
            description,
        };

        self.state = PaymentState::Submitting(request.clone());
        tracing::info!(amount, phone = %request.phone_number, "payment submitted");

        let outcome = self.gateway.collect(&request).await;
        let state = settle(&request, outcome);

        if let PaymentState::Success(response) = &state {
            let user_id = self.auth.current_user_id().await;
            self.ledger.record_collection(response, user_id).await;
        }

        match &state {
            PaymentState::Cancelled { reason, .. } => {
                tracing::warn!(amount, %reason, "payment cancelled")
            }
            other => tracing::info!(amount, state = other.label(), "payment settled"),
        }

        self.state = state;
        &self.state
    }
}
