//! 全局状态仓库
//!
//! 四个相互独立的切片（auth / plans / subscription / payout），每个切片是一个
//! 请求-响应缓存，带有 loading / error / success 标志。
//!
//! - `Action`: 按切片划分的带标签联合体
//! - `AppState::reduce`: 纯函数式的 reducer
//! - `StoreHandle`: 异步动作运行所需的最小能力（dispatch + 读取状态），
//!   浏览器里由 Leptos 信号实现，测试里由 `LocalStore` 实现
//!
//! 同一个动作的重复派发不做去重或取消：两个请求都会完成，
//! 切片最终反映最后一个返回的响应。

pub mod auth;
pub mod payout;
pub mod plans;
pub mod subscription;

#[cfg(test)]
mod tests;

pub use auth::{AuthAction, AuthState};
pub use payout::{PayoutAction, PayoutState};
pub use plans::{PlanAction, PlanState};
pub use subscription::{SubscriptionAction, SubscriptionState};

use crate::client::BillingApi;
use crate::error::ApiResult;
use crate::protocol::ApiRequest;
use crate::transport::HttpClient;
use crate::{Timestamp, User};

// =========================================================
// 异步动作的三个阶段
// =========================================================

/// 一次异步请求的生命周期：开始 → 成功 | 失败
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncPhase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> AsyncPhase<T> {
    pub fn label(&self) -> &'static str {
        match self {
            AsyncPhase::Pending => "pending",
            AsyncPhase::Fulfilled(_) => "fulfilled",
            AsyncPhase::Rejected(_) => "rejected",
        }
    }
}

/// 带获取时间的响应数据，供过期策略判断
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    pub at: Timestamp,
}

// =========================================================
// 请求标志
// =========================================================

/// 每个切片共有的请求标志
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestFlags {
    pub is_loading: bool,
    pub is_error: bool,
    pub is_success: bool,
    pub message: String,
}

impl RequestFlags {
    pub fn start(&mut self) {
        self.is_loading = true;
    }

    /// 读取类请求完成：只清除 loading，不触发 success 提示
    pub fn settle(&mut self) {
        self.is_loading = false;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.is_success = true;
        self.message = message.into();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.is_error = true;
        self.is_success = false;
        self.message = message.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 当前需要展示的错误消息
    pub fn error_message(&self) -> Option<&str> {
        self.is_error.then_some(self.message.as_str())
    }

    /// 当前需要展示的成功消息
    pub fn success_message(&self) -> Option<&str> {
        (self.is_success && !self.message.is_empty()).then_some(self.message.as_str())
    }
}

// =========================================================
// 根状态与动作
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub plans: PlanState,
    pub subscription: SubscriptionState,
    pub payout: PayoutState,
}

impl AppState {
    /// 以持久化的会话用户初始化
    pub fn with_session(user: Option<User>) -> Self {
        Self {
            auth: AuthState::with_user(user),
            ..Default::default()
        }
    }

    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Auth(a) => self.auth.reduce(a),
            Action::Plans(a) => self.plans.reduce(a),
            Action::Subscription(a) => self.subscription.reduce(a),
            Action::Payout(a) => self.payout.reduce(a),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.user.as_ref().and_then(User::token)
    }

    /// 路由守卫使用：存在会话令牌即视为已认证
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Plans(PlanAction),
    Subscription(SubscriptionAction),
    Payout(PayoutAction),
}

impl Action {
    /// `slice/operation/phase` 形式的动作名，用于日志
    pub fn kind(&self) -> String {
        match self {
            Action::Auth(a) => a.kind(),
            Action::Plans(a) => a.kind(),
            Action::Subscription(a) => a.kind(),
            Action::Payout(a) => a.kind(),
        }
    }

    /// 失败动作携带的消息
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Action::Auth(a) => a.rejection(),
            Action::Plans(a) => a.rejection(),
            Action::Subscription(a) => a.rejection(),
            Action::Payout(a) => a.rejection(),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(a: AuthAction) -> Self {
        Action::Auth(a)
    }
}

impl From<PlanAction> for Action {
    fn from(a: PlanAction) -> Self {
        Action::Plans(a)
    }
}

impl From<SubscriptionAction> for Action {
    fn from(a: SubscriptionAction) -> Self {
        Action::Subscription(a)
    }
}

impl From<PayoutAction> for Action {
    fn from(a: PayoutAction) -> Self {
        Action::Payout(a)
    }
}

fn kind_of<T>(slice: &str, operation: &str, phase: &AsyncPhase<T>) -> String {
    format!("{}/{}/{}", slice, operation, phase.label())
}

fn rejection_of<T>(phase: &AsyncPhase<T>) -> Option<&str> {
    match phase {
        AsyncPhase::Rejected(msg) => Some(msg),
        _ => None,
    }
}

// =========================================================
// StoreHandle: 异步动作与仓库之间的接缝
// =========================================================

pub trait StoreHandle {
    fn dispatch(&self, action: Action);

    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;

    /// 当前时间（记录响应的获取时间）
    fn now(&self) -> Timestamp;

    fn token(&self) -> Option<String> {
        self.with_state(|s| s.token().map(str::to_string))
    }

    fn session_email(&self) -> Option<String> {
        self.with_state(|s| s.user().map(|u| u.email.clone()))
    }
}

/// 以当前会话令牌发送请求，并在错误上追加动作名
async fn perform<C, S, R>(
    api: &BillingApi<C>,
    store: &S,
    operation: &'static str,
    req: &R,
) -> ApiResult<R::Response>
where
    C: HttpClient,
    S: StoreHandle,
    R: ApiRequest,
{
    let token = store.token();
    api.send(req, token.as_deref())
        .await
        .map_err(|e| e.in_op(operation))
}

// =========================================================
// 测试工具: LocalStore
// =========================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// 单线程内存仓库，记录所有派发过的动作名
    pub struct LocalStore {
        pub state: RefCell<AppState>,
        pub dispatched: RefCell<Vec<String>>,
        pub clock: Cell<i64>,
    }

    impl LocalStore {
        pub fn new(state: AppState) -> Self {
            Self {
                state: RefCell::new(state),
                dispatched: RefCell::new(Vec::new()),
                clock: Cell::new(1_700_000_000_000),
            }
        }

        pub fn logged_in(token: &str) -> Self {
            Self::new(AppState::with_session(Some(User {
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                role: Some("USER".into()),
                access_token: Some(token.into()),
                ..Default::default()
            })))
        }

        pub fn snapshot(&self) -> AppState {
            self.state.borrow().clone()
        }

        pub fn kinds(&self) -> Vec<String> {
            self.dispatched.borrow().clone()
        }
    }

    impl StoreHandle for LocalStore {
        fn dispatch(&self, action: Action) {
            self.dispatched.borrow_mut().push(action.kind());
            self.state.borrow_mut().reduce(action);
        }

        fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
            f(&self.state.borrow())
        }

        fn now(&self) -> Timestamp {
            Timestamp::from_millis(self.clock.get())
        }
    }
}
