//! Test doubles shared by the payment handler tests.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, PaymentReference, UserId,
};
use crate::adapters::memory::InMemoryPaymentRepository;
use crate::domain::payment::{
    InitializeTransactionData, InitializeTransactionResponse, Payment, PaymentStatus,
    VerifyTransactionData,
    VerifyTransactionResponse, WebhookEvent, WebhookEventData,
};
use crate::ports::{
    EntitlementService, GatewayError, InitializeTransactionRequest, PaymentGateway,
    PaymentRepository,
};

pub fn pending_payment(reference: &str) -> Payment {
    Payment::pending(
        UserId::new(),
        Amount::new(dec!(500.00)).unwrap(),
        PaymentReference::new(reference).unwrap(),
    )
}

pub fn verify_response(reference: &str, charge_status: &str) -> VerifyTransactionResponse {
    VerifyTransactionResponse {
        status: true,
        message: "Verification successful".to_string(),
        data: Some(VerifyTransactionData {
            reference: reference.to_string(),
            status: charge_status.to_string(),
            amount: Amount::new(dec!(500.00)).unwrap(),
            gateway_response: Some("Approved".to_string()),
        }),
    }
}

pub fn init_response(reference: &str) -> InitializeTransactionResponse {
    InitializeTransactionResponse {
        status: true,
        message: "Authorization URL created".to_string(),
        data: Some(InitializeTransactionData {
            authorization_url: format!("https://checkout.paystack.com/{}", reference),
            access_code: "access".to_string(),
            reference: reference.to_string(),
        }),
    }
}

/// Gateway returning canned answers and recording requests.
pub struct MockGateway {
    init: Mutex<Result<InitializeTransactionResponse, GatewayError>>,
    verify: Mutex<Result<VerifyTransactionResponse, GatewayError>>,
    init_requests: Mutex<Vec<InitializeTransactionRequest>>,
    verify_calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            init: Mutex::new(Ok(init_response("REF123"))),
            verify: Mutex::new(Ok(verify_response("REF123", "success"))),
            init_requests: Mutex::new(Vec::new()),
            verify_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_init(self, result: Result<InitializeTransactionResponse, GatewayError>) -> Self {
        *self.init.lock().unwrap() = result;
        self
    }

    pub fn with_verify(self, result: Result<VerifyTransactionResponse, GatewayError>) -> Self {
        *self.verify.lock().unwrap() = result;
        self
    }

    pub fn init_requests(&self) -> Vec<InitializeTransactionRequest> {
        self.init_requests.lock().unwrap().clone()
    }

    pub fn verify_calls(&self) -> Vec<String> {
        self.verify_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransactionRequest,
    ) -> Result<InitializeTransactionResponse, GatewayError> {
        self.init_requests.lock().unwrap().push(request);
        self.init.lock().unwrap().clone()
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<VerifyTransactionResponse, GatewayError> {
        self.verify_calls.lock().unwrap().push(reference.to_string());
        self.verify.lock().unwrap().clone()
    }

    fn verify_webhook_signature(&self, _payload: &[u8], signature: &str) -> bool {
        signature == "valid"
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<WebhookEvent, GatewayError> {
        let value: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| GatewayError::invalid_webhook(e.to_string()))?;
        let event = value["event"]
            .as_str()
            .ok_or_else(|| GatewayError::invalid_webhook("missing event"))?;
        let data = value["data"]["reference"].as_str().map(|reference| WebhookEventData {
            reference: reference.to_string(),
            status: value["data"]["status"].as_str().map(str::to_string),
            amount: None,
            gateway_response: None,
            customer_email: None,
        });
        Ok(WebhookEvent {
            event: event.to_string(),
            data,
        })
    }
}

/// Entitlement service that records every grant.
pub struct RecordingEntitlements {
    grants: Mutex<Vec<(UserId, i64)>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingEntitlements {
    pub fn new() -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            fail: false,
            delay: None,
        }
    }

    /// Takes `delay` before recording each grant.
    pub fn slow(delay: Duration) -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            fail: false,
            delay: Some(delay),
        }
    }

    pub fn failing() -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            fail: true,
            delay: None,
        }
    }

    pub fn grants(&self) -> Vec<(UserId, i64)> {
        self.grants.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntitlementService for RecordingEntitlements {
    async fn is_premium(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.grants.lock().unwrap().iter().any(|(id, _)| id == user_id))
    }

    async fn grant_premium(&self, user_id: &UserId, duration_days: i64) -> Result<(), DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated grant failure"));
        }
        self.grants.lock().unwrap().push((*user_id, duration_days));
        Ok(())
    }
}

/// In-memory payment store that counts every call made through it.
pub struct CountingPaymentRepository {
    inner: InMemoryPaymentRepository,
    calls: AtomicUsize,
}

impl CountingPaymentRepository {
    pub fn new(inner: InMemoryPaymentRepository) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentRepository for CountingPaymentRepository {
    async fn find_by_reference(
        &self,
        reference: &PaymentReference,
    ) -> Result<Option<Payment>, DomainError> {
        self.count();
        self.inner.find_by_reference(reference).await
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Payment>, DomainError> {
        self.count();
        self.inner.find_by_user(user_id).await
    }

    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        self.count();
        self.inner.create(payment).await
    }

    async fn try_transition_status(
        &self,
        reference: &PaymentReference,
        new_status: PaymentStatus,
    ) -> Result<bool, DomainError> {
        self.count();
        self.inner.try_transition_status(reference, new_status).await
    }
}
