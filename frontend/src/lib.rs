//! PayDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `config` / `api`: 运行时配置与后端客户端
//! - `store`: 基于 Signal 的全局仓库，承载共享库中的四个切片
//! - `auth`: 会话持久化与认证信号
//! - `web::router`: 路由服务（核心引擎）
//! - `components`: UI 组件层

// =========================================================
// 日志宏 (wasm32 写入浏览器控制台，原生目标写入标准输出)
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod auth;
mod config;
mod serde_helper;
mod store;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod razorpay;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
}

mod components {
    pub mod admin_payouts;
    pub mod banner;
    pub mod billing_history;
    pub mod checkout;
    pub mod dashboard;
    pub mod landing;
    pub mod login;
    pub mod navbar;
    pub mod payout_settings;
    pub mod pricing;
    pub mod signup;
}

use crate::components::admin_payouts::AdminPayoutsPage;
use crate::components::banner::{Toasts, provide_toasts};
use crate::components::billing_history::BillingHistoryPage;
use crate::components::checkout::CheckoutPage;
use crate::components::dashboard::DashboardPage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::payout_settings::PayoutSettingsPage;
use crate::components::pricing::PricingPage;
use crate::components::signup::SignupPage;

use leptos::prelude::*;
use paydesk_shared::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Pricing => view! { <PricingPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Checkout { plan_id } => view! { <CheckoutPage plan_id=plan_id /> }.into_any(),
        AppRoute::BillingHistory => view! { <BillingHistoryPage /> }.into_any(),
        AppRoute::Payouts => view! { <PayoutSettingsPage /> }.into_any(),
        AppRoute::AdminPayouts => view! { <AdminPayoutsPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to="/" class="btn btn-primary mt-6">"Back to home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 运行时配置与后端客户端
    let config = config::provide_config();
    api::provide_api(&config);

    // 2. 以持久化的会话初始化仓库
    let store = store::provide_store(auth::restore_session());
    auth::persist_session(store);
    provide_toasts();

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth::is_authenticated_signal(store);

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toasts />
    }
}
