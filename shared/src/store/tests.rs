use super::testing::LocalStore;
use super::*;
use crate::cache::StalenessPolicy;
use crate::transport::HttpMethod;
use crate::transport::mock::MockHttpClient;
use crate::{
    BankDetailsRequest, LoginRequest, ManualPayoutRequest, Payout, PaymentGateway, Plan, Timestamp,
};
use serde_json::json;

const BASE: &str = "http://api.test";

fn api() -> BillingApi<MockHttpClient> {
    BillingApi::new(BASE, MockHttpClient::new())
}

fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

// =========================================================
// auth
// =========================================================

#[tokio::test]
async fn login_stores_user_and_token_is_attached_afterwards() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Post,
        &url("/api/auth/login"),
        200,
        json!({"accessToken": "tok-1", "email": "a@b.c", "name": "Asha Rao", "role": "USER"}),
    );
    api.client()
        .mock_text(HttpMethod::Get, &url("/api/subscriptions/current"), 204, "");
    api.client()
        .mock_json(HttpMethod::Get, &url("/api/payments/me"), 200, json!([]));

    let user = auth::login(
        &api,
        &store,
        LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(user.token(), Some("tok-1"));
    assert!(store.snapshot().is_authenticated());

    // 登录请求本身不带令牌
    let login_req = api.client().requests.borrow()[0].clone();
    assert_eq!(login_req.header("Authorization"), None);

    subscription::fetch_current(&api, &store).await.unwrap();
    subscription::fetch_payment_history(&api, &store).await.unwrap();
    for req in api.client().requests.borrow().iter().skip(1) {
        assert_eq!(req.header("Authorization"), Some("Bearer tok-1"));
    }

    assert_eq!(
        store.kinds()[..2],
        ["auth/login/pending", "auth/login/fulfilled"]
    );
}

#[tokio::test]
async fn login_failure_stores_backend_message() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Post,
        &url("/api/auth/login"),
        401,
        json!({"message": "Invalid email or password"}),
    );

    let err = auth::login(
        &api,
        &store,
        LoginRequest {
            email: "a@b.c".into(),
            password: "bad".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.message(), "Invalid email or password");

    let state = store.snapshot();
    assert!(state.auth.user.is_none());
    assert!(!state.auth.flags.is_loading);
    assert_eq!(
        state.auth.flags.error_message(),
        Some("Invalid email or password")
    );
}

#[tokio::test]
async fn dismissing_auth_error_clears_banner_only() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Post,
        &url("/api/auth/register"),
        409,
        json!({"message": "Email already registered"}),
    );

    auth::register(
        &api,
        &store,
        crate::RegisterRequest {
            name: "Asha".into(),
            email: "a@b.c".into(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        store.snapshot().auth.flags.error_message(),
        Some("Email already registered")
    );

    auth::reset(&store);
    let state = store.snapshot();
    assert_eq!(state.auth.flags.error_message(), None);
    assert!(!state.auth.flags.is_error);
    assert!(state.auth.user.is_none());
    assert_eq!(store.kinds().last().map(String::as_str), Some("auth/reset"));
}

#[test]
fn logout_clears_session() {
    let store = LocalStore::logged_in("tok");
    assert!(store.snapshot().is_authenticated());
    auth::logout(&store);
    let state = store.snapshot();
    assert!(state.auth.user.is_none());
    assert!(!state.is_authenticated());
}

// =========================================================
// plans
// =========================================================

#[tokio::test]
async fn plans_reset_restores_initial_state() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/plans"),
        200,
        json!([{"id": 1, "name": "Basic", "price": 99, "billingCycle": "MONTHLY", "features": []}]),
    );
    plans::fetch_plans(&api, &store).await.unwrap();
    assert_eq!(store.snapshot().plans.plans.len(), 1);
    assert!(store.snapshot().plans.loaded_at.is_some());

    plans::reset(&store);
    assert_eq!(store.snapshot().plans, PlanState::default());
}

#[tokio::test]
async fn ensure_plans_if_empty_uses_cache() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/plans"),
        200,
        json!([{"id": "2", "name": "Pro", "price": 499, "billingCycle": "monthly", "features": ["A", "B"]}]),
    );

    assert!(plans::ensure_plans(&api, &store, StalenessPolicy::IfEmpty).await.unwrap());
    assert!(!plans::ensure_plans(&api, &store, StalenessPolicy::IfEmpty).await.unwrap());
    assert_eq!(api.client().request_count(), 1);

    assert!(plans::ensure_plans(&api, &store, StalenessPolicy::Always).await.unwrap());
    assert_eq!(api.client().request_count(), 2);
}

#[tokio::test]
async fn duplicate_fetches_both_complete_and_last_resolved_wins() {
    let api = api();
    let store = LocalStore::new(AppState::default());
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/plans"),
        200,
        json!([{"id": 1, "name": "Basic", "price": 99}]),
    );
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/plans"),
        200,
        json!([{"id": 2, "name": "Pro", "price": 499}, {"id": 3, "name": "Team", "price": 999}]),
    );

    let (first, second) = tokio::join!(
        plans::fetch_plans(&api, &store),
        plans::fetch_plans(&api, &store)
    );
    assert_eq!(first.unwrap().len(), 1);
    assert_eq!(second.unwrap().len(), 2);
    assert_eq!(api.client().request_count(), 2);

    // 第二个请求最后返回，状态反映它的结果
    let state = store.snapshot();
    assert_eq!(state.plans.plans.len(), 2);
    assert!(!state.plans.flags.is_loading);
}

#[test]
fn out_of_order_resolution_keeps_last_fulfilled() {
    let mut state = AppState::default();
    let plan = |id: &str| Plan {
        id: id.into(),
        name: id.into(),
        ..Default::default()
    };
    state.reduce(PlanAction::FetchAll(AsyncPhase::Pending).into());
    state.reduce(PlanAction::FetchAll(AsyncPhase::Pending).into());
    // 后发出的请求先返回
    state.reduce(
        PlanAction::FetchAll(AsyncPhase::Fulfilled(Fetched {
            data: vec![plan("late-request")],
            at: Timestamp::from_millis(2),
        }))
        .into(),
    );
    state.reduce(
        PlanAction::FetchAll(AsyncPhase::Fulfilled(Fetched {
            data: vec![plan("early-request")],
            at: Timestamp::from_millis(3),
        }))
        .into(),
    );
    assert_eq!(state.plans.plans[0].id, "early-request");
    assert_eq!(state.plans.loaded_at, Some(Timestamp::from_millis(3)));
}

// =========================================================
// subscription
// =========================================================

#[tokio::test]
async fn activation_plain_text_becomes_success_message() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    api.client().mock_text(
        HttpMethod::Post,
        &url("/api/subscriptions/activate"),
        200,
        "Subscription activated successfully",
    );

    subscription::activate(
        &api,
        &store,
        crate::GatewayCallback {
            order_id: "order_1".into(),
            payment_id: "pay_1".into(),
            signature: "sig".into(),
        },
    )
    .await
    .unwrap();

    let sent = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"orderId": "order_1", "paymentId": "pay_1", "signature": "sig"})
    );

    let flags = store.snapshot().subscription.flags;
    assert!(flags.is_success);
    assert_eq!(flags.message, "Subscription activated successfully");
}

#[tokio::test]
async fn subscription_reset_keeps_data() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/subscriptions/current"),
        200,
        json!({"id": 4, "status": "ACTIVE", "endDate": "2024-06-01T00:00:00", "payments": []}),
    );
    subscription::fetch_current(&api, &store).await.unwrap();
    store.dispatch(SubscriptionAction::Initiate(AsyncPhase::Rejected("boom".into())).into());

    subscription::reset(&store);
    let state = store.snapshot().subscription;
    assert_eq!(state.flags, RequestFlags::default());
    assert_eq!(state.current.map(|s| s.id), Some("4".to_string()));
}

#[tokio::test]
async fn list_fetch_rejection_sets_error_flag() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    api.client()
        .mock_failure(HttpMethod::Get, &url("/api/payments/me"), "Network Error");

    assert!(subscription::fetch_payment_history(&api, &store).await.is_err());
    let flags = store.snapshot().subscription.flags;
    assert!(flags.is_error);
    assert_eq!(flags.message, "Network Error");
    assert_eq!(
        store.kinds(),
        [
            "subscription/getPaymentHistory/pending",
            "subscription/getPaymentHistory/rejected"
        ]
    );
}

// =========================================================
// payout
// =========================================================

#[tokio::test]
async fn bank_details_fill_session_email_and_default_message() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    api.client().mock_json(
        HttpMethod::Post,
        &url("/api/admin/payouts/update-bank-details"),
        200,
        json!({}),
    );

    payout::update_bank_details(
        &api,
        &store,
        BankDetailsRequest {
            beneficiary_name: "Asha Rao".into(),
            account_no: "1234567890".into(),
            ifsc: "HDFC0001234".into(),
            bank_name: "HDFC".into(),
            email: String::new(),
        },
    )
    .await
    .unwrap();

    let sent = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["accountNo"], "1234567890");

    assert_eq!(
        store.snapshot().payout.flags.success_message(),
        Some("Bank details updated successfully")
    );
}

#[tokio::test]
async fn history_path_uses_session_email() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/admin/payouts/history/asha@example.com"),
        200,
        json!([{"id": 1, "amount": 50, "status": "SUCCESS"}]),
    );
    let payouts = payout::fetch_history(&api, &store).await.unwrap();
    assert_eq!(payouts.len(), 1);
    assert_eq!(store.snapshot().payout.payouts.len(), 1);
}

#[tokio::test]
async fn manual_payout_is_prepended() {
    let api = api();
    let store = LocalStore::logged_in("admin-tok");
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/admin/payouts/all"),
        200,
        json!([{"id": 1, "payoutRef": "PAY_1", "amount": 10, "status": "SUCCESS"}]),
    );
    api.client().mock_json(
        HttpMethod::Post,
        &url("/api/admin/payouts/initiate-manual"),
        200,
        json!({"id": 2, "payoutRef": "MAN_2", "amount": 25, "gateway": "PAYNPRO", "status": "PENDING"}),
    );

    payout::fetch_all(&api, &store).await.unwrap();
    payout::initiate_manual(
        &api,
        &store,
        ManualPayoutRequest {
            email: "u@x.io".into(),
            amount: 25.0,
            purpose: "Admin Manual Transfer".into(),
            gateway: PaymentGateway::Paynpro,
        },
    )
    .await
    .unwrap();

    let state = store.snapshot().payout;
    let ids: Vec<&str> = state.payouts.iter().map(|p: &Payout| p.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(state.flags.message, "Manual payout initiated successfully");

    payout::reset(&store);
    let state = store.snapshot().payout;
    assert_eq!(state.payouts.len(), 2);
    assert!(!state.flags.is_success);
}

#[tokio::test]
async fn balance_and_users_are_cached_with_timestamps() {
    let api = api();
    let store = LocalStore::logged_in("admin-tok");
    store.clock.set(42);
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/admin/payouts/balance"),
        200,
        json!({"paynpro": {"error": "Gateway timeout"}, "razorpay": {"balance": 123456}}),
    );
    api.client().mock_json(
        HttpMethod::Get,
        &url("/api/admin/users"),
        200,
        json!([{"id": 7, "name": "Ravi", "email": "ravi@x.io", "role": "USER"}]),
    );

    payout::fetch_balance(&api, &store).await.unwrap();
    payout::fetch_users(&api, &store).await.unwrap();

    let state = store.snapshot().payout;
    let balance = state.balance.unwrap();
    assert_eq!(
        balance.paynpro.and_then(|b| b.error).as_deref(),
        Some("Gateway timeout")
    );
    assert_eq!(balance.razorpay.and_then(|b| b.balance), Some(123456.0));
    assert_eq!(state.users[0].id.as_deref(), Some("7"));
    assert_eq!(state.balance_loaded_at, Some(Timestamp::from_millis(42)));
    assert_eq!(state.users_loaded_at, Some(Timestamp::from_millis(42)));
}

#[test]
fn action_kinds_and_rejections() {
    let action: Action = PayoutAction::InitiateManual(AsyncPhase::Rejected("Insufficient balance".into())).into();
    assert_eq!(action.kind(), "payout/initiateManual/rejected");
    assert_eq!(action.rejection(), Some("Insufficient balance"));

    let action: Action = AuthAction::Logout.into();
    assert_eq!(action.kind(), "auth/logout");
    assert_eq!(action.rejection(), None);
}
