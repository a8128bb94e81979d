use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cache;
pub mod checkout;
pub mod client;
pub mod config;
pub mod date;
pub mod display;
pub mod error;
pub mod forms;
pub mod notice;
pub mod protocol;
pub mod route;
pub mod serde_helper;
pub mod store;
pub mod transport;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const ROLE_ADMIN: &str = "ADMIN";

// =========================================================
// 枚举 (Gateways & Statuses)
// =========================================================

/// 第三方支付网关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentGateway {
    #[default]
    #[serde(alias = "razorpay")]
    Razorpay,
    #[serde(alias = "paynpro")]
    Paynpro,
    #[serde(other)]
    Unknown,
}

impl PaymentGateway {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentGateway::Razorpay => "RAZORPAY",
            PaymentGateway::Paynpro => "PAYNPRO",
            PaymentGateway::Unknown => "UNKNOWN",
        }
    }

    /// 表单 `<select>` / radio 的值
    pub fn from_form_value(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "RAZORPAY" => PaymentGateway::Razorpay,
            "PAYNPRO" => PaymentGateway::Paynpro,
            _ => PaymentGateway::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentGateway::Razorpay => "Razorpay",
            PaymentGateway::Paynpro => "Paynpro",
            PaymentGateway::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "PENDING",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Cancelled => "CANCELLED",
            SubscriptionStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Success,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "PENDING",
            PayoutStatus::Processing => "PROCESSING",
            PayoutStatus::Success => "SUCCESS",
            PayoutStatus::Failed => "FAILED",
            PayoutStatus::Unknown => "UNKNOWN",
        }
    }

    /// 仍在途中（统计卡片的 "Processing" 数量）
    pub fn is_in_flight(&self) -> bool {
        matches!(self, PayoutStatus::Pending | PayoutStatus::Processing)
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户。登录/注册响应与管理员用户列表共用此结构。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        deserialize_with = "serde_helper::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    // 收款银行信息（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_beneficiary_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_account_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_ifsc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_bank_name: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| r.trim_start_matches("ROLE_").eq_ignore_ascii_case(ROLE_ADMIN))
            .unwrap_or(false)
    }

    /// 欢迎语中使用的名字
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }

    /// 非空的访问令牌
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "serde_helper::amount")]
    pub price: f64,
    #[serde(default)]
    pub billing_cycle: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Plan {
    /// 名称包含 "pro" 的计划在定价页被高亮为 Popular
    pub fn is_popular(&self) -> bool {
        self.name.to_lowercase().contains("pro")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: String,
    #[serde(default, alias = "transactionId")]
    pub txn_id: String,
    #[serde(deserialize_with = "serde_helper::amount")]
    pub amount: f64,
    #[serde(default)]
    pub gateway: PaymentGateway,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: String,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

/// 出款记录上附带的用户摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PayoutUser {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(deserialize_with = "serde_helper::id")]
    pub id: String,
    #[serde(default)]
    pub payout_ref: Option<String>,
    #[serde(deserialize_with = "serde_helper::amount")]
    pub amount: f64,
    #[serde(default)]
    pub gateway: PaymentGateway,
    #[serde(default)]
    pub status: PayoutStatus,
    #[serde(default)]
    pub beneficiary_name: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub user: Option<PayoutUser>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Payout {
    /// 管理员手动发起的出款以 `MAN_` 为引用前缀
    pub fn is_manual(&self) -> bool {
        self.payout_ref
            .as_deref()
            .map(|r| r.starts_with(MANUAL_PAYOUT_REF_PREFIX))
            .unwrap_or(false)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

pub const MANUAL_PAYOUT_REF_PREFIX: &str = "MAN_";

/// 单个网关的余额；查询失败时后端在 `error` 中给出原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GatewayBalance {
    #[serde(default, deserialize_with = "serde_helper::optional_amount")]
    pub balance: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PayoutBalance {
    #[serde(default)]
    pub paynpro: Option<GatewayBalance>,
    #[serde(default)]
    pub razorpay: Option<GatewayBalance>,
}

// =========================================================
// 网关交接 (Gateway Handoff)
// =========================================================

/// 发起订阅后后端返回的网关订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayOrder {
    #[serde(default)]
    pub order_id: String,
    /// 最小货币单位（paise）
    #[serde(default, deserialize_with = "serde_helper::amount")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_no: Option<String>,
}

/// 支付控件回调携带的凭据，原样转发给激活接口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GatewayCallback {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// 激活接口的响应：新版后端返回订阅对象，旧版返回一句纯文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivationReceipt {
    Subscription(Subscription),
    Message(String),
}

/// 银行信息更新的确认消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Confirmation {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateSubscriptionRequest {
    pub plan_id: String,
    pub gateway: PaymentGateway,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivateSubscriptionRequest(pub GatewayCallback);

/// 银行信息；`email` 由当前会话补齐
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BankDetailsRequest {
    pub beneficiary_name: String,
    pub account_no: String,
    pub ifsc: String,
    pub bank_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualPayoutRequest {
    pub email: String,
    pub amount: f64,
    pub purpose: String,
    pub gateway: PaymentGateway,
}
