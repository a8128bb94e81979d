use super::*;
use crate::store::testing::LocalStore;
use crate::transport::HttpMethod;
use crate::transport::mock::MockHttpClient;
use serde_json::json;
use std::cell::RefCell;

const BASE: &str = "http://api.test";

/// 预设结果的假支付控件，记录收到的订单
struct FakeWidget {
    result: Result<GatewayCallback, WidgetError>,
    opened: RefCell<Vec<(GatewayOrder, Prefill)>>,
}

impl FakeWidget {
    fn paying() -> Self {
        Self::with(Ok(GatewayCallback {
            order_id: "order_9".into(),
            payment_id: "pay_9".into(),
            signature: "sig_9".into(),
        }))
    }

    fn with(result: Result<GatewayCallback, WidgetError>) -> Self {
        Self {
            result,
            opened: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl PaymentWidget for FakeWidget {
    async fn collect(
        &self,
        order: &GatewayOrder,
        prefill: &Prefill,
    ) -> Result<GatewayCallback, WidgetError> {
        self.opened
            .borrow_mut()
            .push((order.clone(), prefill.clone()));
        self.result.clone()
    }
}

fn api() -> BillingApi<MockHttpClient> {
    BillingApi::new(BASE, MockHttpClient::new())
}

fn mock_order(api: &BillingApi<MockHttpClient>) {
    api.client().mock_json(
        HttpMethod::Post,
        &format!("{BASE}/api/subscriptions/initiate"),
        200,
        json!({
            "orderId": "order_9",
            "amount": 49900,
            "currency": "INR",
            "key": "rzp_test_key",
            "name": "PayDesk",
            "description": "Pro plan"
        }),
    );
}

fn request(gateway: PaymentGateway) -> CheckoutRequest<'static> {
    CheckoutRequest {
        plan_id: "2",
        gateway,
        prefill: Prefill {
            name: "Asha Rao".into(),
            email: "asha@example.com".into(),
        },
    }
}

#[test]
fn transitions() {
    use CheckoutEvent as E;
    use CheckoutPhase as P;

    let happy = [E::Submit, E::OrderCreated, E::CallbackReceived, E::Activated]
        .into_iter()
        .fold(P::SelectingGateway, P::next);
    assert_eq!(happy, P::Done);

    assert_eq!(P::Initiating.next(E::InitiationFailed), P::SelectingGateway);
    assert_eq!(P::AwaitingGatewayCallback.next(E::WidgetClosed), P::SelectingGateway);
    assert_eq!(P::Activating.next(E::ActivationFailed), P::Failed);
    assert_eq!(P::Failed.next(E::Submit), P::Initiating);

    // 非法事件不改变状态
    assert_eq!(P::SelectingGateway.next(E::Activated), P::SelectingGateway);
    assert_eq!(P::Done.next(E::Submit), P::Done);
    assert_eq!(P::Activating.next(E::CallbackReceived), P::Activating);

    assert!(P::AwaitingGatewayCallback.is_busy());
    assert!(!P::Failed.is_busy());
    assert_eq!(P::AwaitingGatewayCallback.to_string(), "AWAITING_GATEWAY_CALLBACK");
}

#[tokio::test]
async fn successful_checkout_activates_and_completes() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::paying();
    mock_order(&api);
    api.client().mock_json(
        HttpMethod::Post,
        &format!("{BASE}/api/subscriptions/activate"),
        200,
        json!({"id": 11, "status": "ACTIVE", "payments": []}),
    );

    let mut phases = Vec::new();
    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Razorpay), |p| {
        phases.push(p)
    })
    .await;

    assert_eq!(outcome, CheckoutOutcome::Completed);
    assert!(outcome.navigates_to_dashboard());
    assert_eq!(
        phases,
        [
            CheckoutPhase::Initiating,
            CheckoutPhase::AwaitingGatewayCallback,
            CheckoutPhase::Activating,
            CheckoutPhase::Done
        ]
    );

    let opened = widget.opened.borrow();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].0.order_id, "order_9");
    assert_eq!(opened[0].0.amount, 49900.0);
    assert_eq!(opened[0].1.email, "asha@example.com");

    // 回调凭据原样转发给激活接口
    let activation = api.client().last_request().unwrap();
    let body: serde_json::Value = serde_json::from_str(activation.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"orderId": "order_9", "paymentId": "pay_9", "signature": "sig_9"})
    );

    let state = store.snapshot().subscription;
    assert!(state.flags.is_success);
    assert_eq!(state.current.map(|s| s.id), Some("11".to_string()));
}

#[tokio::test]
async fn paynpro_reports_coming_soon_without_requests() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::paying();

    let mut phases = Vec::new();
    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Paynpro), |p| {
        phases.push(p)
    })
    .await;

    assert_eq!(
        outcome,
        CheckoutOutcome::GatewayUnavailable("Paynpro integration coming soon!".into())
    );
    assert!(phases.is_empty());
    assert_eq!(api.client().request_count(), 0);
    assert!(store.kinds().is_empty());
}

#[tokio::test]
async fn initiation_failure_returns_to_gateway_selection() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::paying();
    api.client().mock_json(
        HttpMethod::Post,
        &format!("{BASE}/api/subscriptions/initiate"),
        404,
        json!({"message": "Plan not found"}),
    );

    let mut phases = Vec::new();
    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Razorpay), |p| {
        phases.push(p)
    })
    .await;

    assert_eq!(
        outcome,
        CheckoutOutcome::InitiationFailed("Plan not found".into())
    );
    assert_eq!(
        phases,
        [CheckoutPhase::Initiating, CheckoutPhase::SelectingGateway]
    );
    assert!(widget.opened.borrow().is_empty());
    assert_eq!(
        store.snapshot().subscription.flags.error_message(),
        Some("Plan not found")
    );
}

#[tokio::test]
async fn activation_failure_stays_on_checkout_with_backend_message() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::paying();
    mock_order(&api);
    api.client().mock_json(
        HttpMethod::Post,
        &format!("{BASE}/api/subscriptions/activate"),
        400,
        json!({"message": "Invalid payment signature"}),
    );

    let mut last = CheckoutPhase::default();
    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Razorpay), |p| {
        last = p
    })
    .await;

    assert_eq!(
        outcome,
        CheckoutOutcome::ActivationFailed("Invalid payment signature".into())
    );
    assert!(!outcome.navigates_to_dashboard());
    assert_eq!(outcome.message(), Some("Invalid payment signature"));
    assert_eq!(last, CheckoutPhase::Failed);
    assert_eq!(
        store.snapshot().subscription.flags.message,
        "Invalid payment signature"
    );
}

#[tokio::test]
async fn dismissed_widget_skips_activation() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::with(Err(WidgetError::Dismissed));
    mock_order(&api);

    let mut last = CheckoutPhase::default();
    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Razorpay), |p| {
        last = p
    })
    .await;

    assert_eq!(outcome, CheckoutOutcome::Dismissed);
    assert_eq!(last, CheckoutPhase::SelectingGateway);
    // 只发出了发起订单的请求
    assert_eq!(api.client().request_count(), 1);
}

#[tokio::test]
async fn unavailable_widget_is_reported() {
    let api = api();
    let store = LocalStore::logged_in("tok");
    let widget = FakeWidget::with(Err(WidgetError::Unavailable("script not loaded".into())));
    mock_order(&api);

    let outcome = run_checkout(&api, &store, &widget, request(PaymentGateway::Razorpay), |_| {}).await;
    assert_eq!(
        outcome,
        CheckoutOutcome::WidgetFailed("Payment gateway unavailable: script not loaded".into())
    );
}
