use crate::transport::HttpMethod;
use crate::{
    ActivateSubscriptionRequest, ActivationReceipt, BankDetailsRequest, Confirmation,
    GatewayOrder, InitiateSubscriptionRequest, LoginRequest, ManualPayoutRequest, Payment, Payout,
    PayoutBalance, Plan, RegisterRequest, Subscription, User,
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// Characters escaped when a value is spliced into a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or path template when `path` is overridden).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the session bearer token is attached.
    const AUTHENTICATED: bool = true;

    /// Concrete path for this request, with path parameters filled in.
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::PATH)
    }

    /// Decodes a 2xx body. An empty body (204 No Content) decodes as JSON `null`.
    fn decode(body: &str) -> serde_json::Result<Self::Response> {
        let body = body.trim();
        serde_json::from_str(if body.is_empty() { "null" } else { body })
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = User;
    const PATH: &'static str = "/api/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

impl ApiRequest for RegisterRequest {
    type Response = User;
    const PATH: &'static str = "/api/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Plans
// =========================================================

/// List public billing plans
#[derive(Debug, Serialize)]
pub struct ListPlansRequest;

impl ApiRequest for ListPlansRequest {
    type Response = Vec<Plan>;
    const PATH: &'static str = "/api/plans";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Subscriptions & Payments
// =========================================================

impl ApiRequest for InitiateSubscriptionRequest {
    type Response = GatewayOrder;
    const PATH: &'static str = "/api/subscriptions/initiate";
    const METHOD: HttpMethod = HttpMethod::Post;
}

impl ApiRequest for ActivateSubscriptionRequest {
    type Response = ActivationReceipt;
    const PATH: &'static str = "/api/subscriptions/activate";
    const METHOD: HttpMethod = HttpMethod::Post;

    /// The activation endpoint may answer with plain text rather than JSON.
    fn decode(body: &str) -> serde_json::Result<Self::Response> {
        let trimmed = body.trim();
        match serde_json::from_str(trimmed) {
            Ok(receipt) => Ok(receipt),
            Err(_) if !trimmed.is_empty() => Ok(ActivationReceipt::Message(trimmed.to_string())),
            Err(e) => Err(e),
        }
    }
}

/// Current subscription of the session user; `None` when the backend answers 204.
#[derive(Debug, Serialize)]
pub struct CurrentSubscriptionRequest;

impl ApiRequest for CurrentSubscriptionRequest {
    type Response = Option<Subscription>;
    const PATH: &'static str = "/api/subscriptions/current";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize)]
pub struct PaymentHistoryRequest;

impl ApiRequest for PaymentHistoryRequest {
    type Response = Vec<Payment>;
    const PATH: &'static str = "/api/payments/me";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Payouts (admin)
// =========================================================

impl ApiRequest for BankDetailsRequest {
    type Response = Confirmation;
    const PATH: &'static str = "/api/admin/payouts/update-bank-details";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Payout history of one user
#[derive(Debug, Serialize)]
pub struct PayoutHistoryRequest {
    #[serde(skip)]
    pub email: String,
}

impl ApiRequest for PayoutHistoryRequest {
    type Response = Vec<Payout>;
    const PATH: &'static str = "/api/admin/payouts/history/{email}";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'_, str> {
        let email = utf8_percent_encode(&self.email, PATH_SEGMENT).to_string();
        Cow::Owned(Self::PATH.replace("{email}", &email))
    }
}

#[derive(Debug, Serialize)]
pub struct AllPayoutsRequest;

impl ApiRequest for AllPayoutsRequest {
    type Response = Vec<Payout>;
    const PATH: &'static str = "/api/admin/payouts/all";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize)]
pub struct PayoutBalanceRequest;

impl ApiRequest for PayoutBalanceRequest {
    type Response = PayoutBalance;
    const PATH: &'static str = "/api/admin/payouts/balance";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/api/admin/users";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for ManualPayoutRequest {
    type Response = Payout;
    const PATH: &'static str = "/api/admin/payouts/initiate-manual";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_path_fills_email() {
        let req = PayoutHistoryRequest {
            email: "a@b.co".into(),
        };
        assert_eq!(req.path(), "/api/admin/payouts/history/a@b.co");
    }

    #[test]
    fn history_path_escapes_reserved_characters() {
        let req = PayoutHistoryRequest {
            email: "ops#1?x/y z@b.co".into(),
        };
        assert_eq!(
            req.path(),
            "/api/admin/payouts/history/ops%231%3Fx%2Fy%20z@b.co"
        );
    }

    #[test]
    fn empty_body_decodes_as_none() {
        assert_eq!(CurrentSubscriptionRequest::decode("").unwrap(), None);
        assert_eq!(CurrentSubscriptionRequest::decode("  null ").unwrap(), None);
    }

    #[test]
    fn activation_accepts_plain_text() {
        let receipt = ActivateSubscriptionRequest::decode("Subscription activated successfully").unwrap();
        assert_eq!(
            receipt,
            ActivationReceipt::Message("Subscription activated successfully".into())
        );
        assert!(ActivateSubscriptionRequest::decode("").is_err());
    }

    #[test]
    fn public_endpoints_are_unauthenticated() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert!(!ListPlansRequest::AUTHENTICATED);
        assert!(CurrentSubscriptionRequest::AUTHENTICATED);
        assert!(ManualPayoutRequest::AUTHENTICATED);
    }
}
