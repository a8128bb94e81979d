//! 手动出款表单状态
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 映射到共享库的 `ManualPayoutForm`，校验与请求构造都在那里完成

use leptos::prelude::*;
use paydesk_shared::PaymentGateway;
use paydesk_shared::forms::ManualPayoutForm;

/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub email: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub purpose: RwSignal<String>,
    pub gateway: RwSignal<PaymentGateway>,
    /// 收款人搜索词，不参与提交
    pub search: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        let defaults = ManualPayoutForm::default();
        Self {
            email: RwSignal::new(defaults.email),
            amount: RwSignal::new(defaults.amount),
            purpose: RwSignal::new(defaults.purpose),
            gateway: RwSignal::new(defaults.gateway),
            search: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        let defaults = ManualPayoutForm::default();
        self.email.set(defaults.email);
        self.amount.set(defaults.amount);
        self.purpose.set(defaults.purpose);
        self.gateway.set(defaults.gateway);
        self.search.set(String::new());
    }

    /// 当前输入的快照（在响应式上下文中调用会被追踪）
    pub fn snapshot(&self) -> ManualPayoutForm {
        ManualPayoutForm {
            email: self.email.get(),
            amount: self.amount.get(),
            purpose: self.purpose.get(),
            gateway: self.gateway.get(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
