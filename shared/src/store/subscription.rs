use super::{AsyncPhase, Fetched, RequestFlags, StoreHandle, kind_of, perform, rejection_of};
use crate::client::BillingApi;
use crate::error::ApiResult;
use crate::protocol::{CurrentSubscriptionRequest, PaymentHistoryRequest};
use crate::transport::HttpClient;
use crate::{
    ActivateSubscriptionRequest, ActivationReceipt, GatewayCallback, GatewayOrder,
    InitiateSubscriptionRequest, Payment, PaymentGateway, Subscription, Timestamp,
};

pub const ACTIVATED_MESSAGE: &str = "Subscription activated successfully";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubscriptionState {
    pub current: Option<Subscription>,
    pub current_loaded_at: Option<Timestamp>,
    pub payment_history: Vec<Payment>,
    pub history_loaded_at: Option<Timestamp>,
    pub flags: RequestFlags,
}

impl SubscriptionState {
    pub fn reduce(&mut self, action: SubscriptionAction) {
        match action {
            SubscriptionAction::Initiate(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                // 订单只交给支付控件，不进入状态
                AsyncPhase::Fulfilled(_) => self.flags.settle(),
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            SubscriptionAction::Activate(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(receipt) => match receipt {
                    ActivationReceipt::Subscription(sub) => {
                        self.flags.succeed(ACTIVATED_MESSAGE);
                        self.current = Some(sub);
                    }
                    ActivationReceipt::Message(msg) => self.flags.succeed(msg),
                },
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            SubscriptionAction::FetchCurrent(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.settle();
                    self.current = data;
                    self.current_loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            SubscriptionAction::FetchPaymentHistory(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.settle();
                    self.payment_history = data;
                    self.history_loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            SubscriptionAction::Reset => self.flags.clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionAction {
    Initiate(AsyncPhase<GatewayOrder>),
    Activate(AsyncPhase<ActivationReceipt>),
    FetchCurrent(AsyncPhase<Fetched<Option<Subscription>>>),
    FetchPaymentHistory(AsyncPhase<Fetched<Vec<Payment>>>),
    Reset,
}

impl SubscriptionAction {
    pub fn kind(&self) -> String {
        match self {
            SubscriptionAction::Initiate(p) => kind_of("subscription", "initiate", p),
            SubscriptionAction::Activate(p) => kind_of("subscription", "activate", p),
            SubscriptionAction::FetchCurrent(p) => kind_of("subscription", "getCurrent", p),
            SubscriptionAction::FetchPaymentHistory(p) => {
                kind_of("subscription", "getPaymentHistory", p)
            }
            SubscriptionAction::Reset => "subscription/reset".to_string(),
        }
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            SubscriptionAction::Initiate(p) => rejection_of(p),
            SubscriptionAction::Activate(p) => rejection_of(p),
            SubscriptionAction::FetchCurrent(p) => rejection_of(p),
            SubscriptionAction::FetchPaymentHistory(p) => rejection_of(p),
            SubscriptionAction::Reset => None,
        }
    }
}

// =========================================================
// 异步动作
// =========================================================

pub async fn initiate<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    plan_id: &str,
    gateway: PaymentGateway,
) -> ApiResult<GatewayOrder> {
    use SubscriptionAction::Initiate;

    store.dispatch(Initiate(AsyncPhase::Pending).into());
    let req = InitiateSubscriptionRequest {
        plan_id: plan_id.to_string(),
        gateway,
    };
    match perform(api, store, "subscription.initiate", &req).await {
        Ok(order) => {
            store.dispatch(Initiate(AsyncPhase::Fulfilled(order.clone())).into());
            Ok(order)
        }
        Err(e) => {
            store.dispatch(Initiate(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn activate<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    callback: GatewayCallback,
) -> ApiResult<ActivationReceipt> {
    use SubscriptionAction::Activate;

    store.dispatch(Activate(AsyncPhase::Pending).into());
    let req = ActivateSubscriptionRequest(callback);
    match perform(api, store, "subscription.activate", &req).await {
        Ok(receipt) => {
            store.dispatch(Activate(AsyncPhase::Fulfilled(receipt.clone())).into());
            Ok(receipt)
        }
        Err(e) => {
            store.dispatch(Activate(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn fetch_current<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Option<Subscription>> {
    use SubscriptionAction::FetchCurrent;

    store.dispatch(FetchCurrent(AsyncPhase::Pending).into());
    match perform(api, store, "subscription.getCurrent", &CurrentSubscriptionRequest).await {
        Ok(current) => {
            let fetched = Fetched {
                data: current.clone(),
                at: store.now(),
            };
            store.dispatch(FetchCurrent(AsyncPhase::Fulfilled(fetched)).into());
            Ok(current)
        }
        Err(e) => {
            store.dispatch(FetchCurrent(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn fetch_payment_history<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Vec<Payment>> {
    use SubscriptionAction::FetchPaymentHistory;

    store.dispatch(FetchPaymentHistory(AsyncPhase::Pending).into());
    match perform(api, store, "subscription.getPaymentHistory", &PaymentHistoryRequest).await {
        Ok(payments) => {
            let fetched = Fetched {
                data: payments.clone(),
                at: store.now(),
            };
            store.dispatch(FetchPaymentHistory(AsyncPhase::Fulfilled(fetched)).into());
            Ok(payments)
        }
        Err(e) => {
            store.dispatch(
                FetchPaymentHistory(AsyncPhase::Rejected(e.message().to_string())).into(),
            );
            Err(e)
        }
    }
}

pub fn reset<S: StoreHandle>(store: &S) {
    store.dispatch(SubscriptionAction::Reset.into());
}
