//! 结账流程
//!
//! ```text
//! SELECTING_GATEWAY → INITIATING → AWAITING_GATEWAY_CALLBACK → ACTIVATING → DONE | FAILED
//! ```
//!
//! 第三方支付控件通过 `PaymentWidget` 注入，浏览器里是 Razorpay，测试里是假实现。
//! 等待回调时不设超时：控件一直不回调，流程就一直停在
//! `AwaitingGatewayCallback`。激活请求不带幂等键，重复回调的去重由后端负责。

use serde::Serialize;
use std::fmt;

use crate::client::BillingApi;
use crate::store::{StoreHandle, subscription};
use crate::transport::HttpClient;
use crate::{GatewayCallback, GatewayOrder, PaymentGateway};

#[cfg(test)]
mod tests;

pub const PAYNPRO_COMING_SOON: &str = "Paynpro integration coming soon!";

// =========================================================
// 状态机
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    #[default]
    SelectingGateway,
    Initiating,
    AwaitingGatewayCallback,
    Activating,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// 用户点击支付（已选择可用网关）
    Submit,
    OrderCreated,
    InitiationFailed,
    CallbackReceived,
    /// 控件被关闭或无法打开
    WidgetClosed,
    Activated,
    ActivationFailed,
}

impl CheckoutPhase {
    /// 纯函数式状态转移；不合法的事件保持原状态
    pub fn next(self, event: CheckoutEvent) -> Self {
        use CheckoutEvent as E;
        use CheckoutPhase as P;

        match (self, event) {
            // 激活失败后只能重新发起支付
            (P::SelectingGateway | P::Failed, E::Submit) => P::Initiating,
            (P::Initiating, E::OrderCreated) => P::AwaitingGatewayCallback,
            (P::Initiating, E::InitiationFailed) => P::SelectingGateway,
            (P::AwaitingGatewayCallback, E::CallbackReceived) => P::Activating,
            (P::AwaitingGatewayCallback, E::WidgetClosed) => P::SelectingGateway,
            (P::Activating, E::Activated) => P::Done,
            (P::Activating, E::ActivationFailed) => P::Failed,
            (phase, _) => phase,
        }
    }

    /// 有请求或控件在途，支付按钮应禁用
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            CheckoutPhase::Initiating
                | CheckoutPhase::AwaitingGatewayCallback
                | CheckoutPhase::Activating
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::SelectingGateway => "SELECTING_GATEWAY",
            CheckoutPhase::Initiating => "INITIATING",
            CheckoutPhase::AwaitingGatewayCallback => "AWAITING_GATEWAY_CALLBACK",
            CheckoutPhase::Activating => "ACTIVATING",
            CheckoutPhase::Done => "DONE",
            CheckoutPhase::Failed => "FAILED",
        }
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 支付控件能力
// =========================================================

/// 控件预填的付款人信息
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetError {
    /// 用户关闭了控件
    Dismissed,
    /// 控件脚本未加载或打开失败
    Unavailable(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::Dismissed => write!(f, "Payment window closed"),
            WidgetError::Unavailable(msg) => write!(f, "Payment gateway unavailable: {}", msg),
        }
    }
}

/// 第三方支付控件：打开订单并等待回调
#[async_trait::async_trait(?Send)]
pub trait PaymentWidget {
    async fn collect(
        &self,
        order: &GatewayOrder,
        prefill: &Prefill,
    ) -> Result<GatewayCallback, WidgetError>;
}

// =========================================================
// 流程驱动
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// 激活成功，页面应跳转到 `/dashboard`
    Completed,
    /// 网关尚未接入，没有发出任何请求
    GatewayUnavailable(String),
    InitiationFailed(String),
    Dismissed,
    WidgetFailed(String),
    ActivationFailed(String),
}

impl CheckoutOutcome {
    pub fn navigates_to_dashboard(&self) -> bool {
        matches!(self, CheckoutOutcome::Completed)
    }

    /// 需要展示给用户的消息（后端消息原样透出）
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckoutOutcome::GatewayUnavailable(m)
            | CheckoutOutcome::InitiationFailed(m)
            | CheckoutOutcome::WidgetFailed(m)
            | CheckoutOutcome::ActivationFailed(m) => Some(m),
            CheckoutOutcome::Completed | CheckoutOutcome::Dismissed => None,
        }
    }
}

pub struct CheckoutRequest<'a> {
    pub plan_id: &'a str,
    pub gateway: PaymentGateway,
    pub prefill: Prefill,
}

/// 驱动一次完整的结账：发起订单 → 支付控件 → 激活
///
/// 每次状态转移都会回调 `observe`，页面据此更新按钮状态。
pub async fn run_checkout<C, S, W>(
    api: &BillingApi<C>,
    store: &S,
    widget: &W,
    req: CheckoutRequest<'_>,
    mut observe: impl FnMut(CheckoutPhase),
) -> CheckoutOutcome
where
    C: HttpClient,
    S: StoreHandle,
    W: PaymentWidget + ?Sized,
{
    if req.gateway != PaymentGateway::Razorpay {
        return CheckoutOutcome::GatewayUnavailable(PAYNPRO_COMING_SOON.to_string());
    }

    let mut phase = CheckoutPhase::SelectingGateway;
    let mut step = |phase: &mut CheckoutPhase, event: CheckoutEvent| {
        *phase = phase.next(event);
        observe(*phase);
    };

    // 1. 发起订单
    step(&mut phase, CheckoutEvent::Submit);
    let order = match subscription::initiate(api, store, req.plan_id, req.gateway).await {
        Ok(order) => order,
        Err(e) => {
            step(&mut phase, CheckoutEvent::InitiationFailed);
            return CheckoutOutcome::InitiationFailed(e.message().to_string());
        }
    };

    // 2. 交给支付控件，等待回调
    step(&mut phase, CheckoutEvent::OrderCreated);
    let callback = match widget.collect(&order, &req.prefill).await {
        Ok(callback) => callback,
        Err(WidgetError::Dismissed) => {
            step(&mut phase, CheckoutEvent::WidgetClosed);
            return CheckoutOutcome::Dismissed;
        }
        Err(e @ WidgetError::Unavailable(_)) => {
            step(&mut phase, CheckoutEvent::WidgetClosed);
            return CheckoutOutcome::WidgetFailed(e.to_string());
        }
    };

    // 3. 激活
    step(&mut phase, CheckoutEvent::CallbackReceived);
    match subscription::activate(api, store, callback).await {
        Ok(_) => {
            step(&mut phase, CheckoutEvent::Activated);
            CheckoutOutcome::Completed
        }
        Err(e) => {
            step(&mut phase, CheckoutEvent::ActivationFailed);
            CheckoutOutcome::ActivationFailed(e.message().to_string())
        }
    }
}
