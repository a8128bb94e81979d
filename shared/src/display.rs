//! 视图辅助函数：金额、余额、状态徽章与列表筛选

use crate::store::SubscriptionState;
use crate::{Payment, PaymentStatus, Payout, PayoutBalance, PayoutStatus, Plan, User};

pub const RUPEE: &str = "₹";
/// 结账页只展示前几项功能
pub const CHECKOUT_FEATURE_PREVIEW: usize = 4;
/// 手动出款预览的条数
pub const MANUAL_PREVIEW_LIMIT: usize = 3;
const MISSING_BALANCE: &str = "0.00";

// =========================================================
// 金额
// =========================================================

/// 整数金额不带小数位：`499.0` → `499`，`10.5` → `10.5`
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

pub fn format_inr(amount: f64) -> String {
    format!("{}{}", RUPEE, format_amount(amount))
}

/// PaynPro 余额按原值显示
pub fn paynpro_balance(balance: Option<&PayoutBalance>) -> String {
    balance
        .and_then(|b| b.paynpro.as_ref())
        .and_then(|g| g.balance)
        .filter(|b| *b != 0.0)
        .map(format_amount)
        .unwrap_or_else(|| MISSING_BALANCE.to_string())
}

/// RazorpayX 余额以 paise 返回，显示为两位小数的卢比
pub fn razorpay_balance(balance: Option<&PayoutBalance>) -> String {
    balance
        .and_then(|b| b.razorpay.as_ref())
        .and_then(|g| g.balance)
        .map(|paise| format!("{:.2}", paise / 100.0))
        .unwrap_or_else(|| MISSING_BALANCE.to_string())
}

/// 任一网关查询失败时的原因
pub fn balance_errors(balance: Option<&PayoutBalance>) -> Vec<String> {
    let Some(balance) = balance else {
        return Vec::new();
    };
    [("PaynPro", &balance.paynpro), ("RazorpayX", &balance.razorpay)]
        .into_iter()
        .filter_map(|(label, g)| {
            g.as_ref()
                .and_then(|g| g.error.as_deref())
                .map(|e| format!("{}: {}", label, e))
        })
        .collect()
}

// =========================================================
// 状态徽章
// =========================================================

pub fn payout_status_class(status: PayoutStatus) -> &'static str {
    match status {
        PayoutStatus::Success => "bg-green-100 text-green-700",
        PayoutStatus::Processing => "bg-blue-100 text-blue-700",
        PayoutStatus::Failed => "bg-red-100 text-red-700",
        _ => "bg-gray-100 text-gray-700",
    }
}

pub fn payment_status_class(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Success => "bg-green-100 text-green-700",
        _ => "bg-yellow-100 text-yellow-700",
    }
}

// =========================================================
// 计划
// =========================================================

/// 定价页的周期后缀：`/monthly`
pub fn pricing_cycle(plan: &Plan) -> String {
    format!("/{}", plan.billing_cycle.to_lowercase())
}

/// 结账页的周期说明：`per monthly`
pub fn checkout_cycle(plan: &Plan) -> String {
    format!("per {}", plan.billing_cycle)
}

pub fn checkout_features(plan: &Plan) -> &[String] {
    let n = plan.features.len().min(CHECKOUT_FEATURE_PREVIEW);
    &plan.features[..n]
}

// =========================================================
// 列表
// =========================================================

/// 按邮箱或姓名的不区分大小写子串筛选用户
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            term.is_empty()
                || u.email.to_lowercase().contains(&term)
                || u.name.to_lowercase().contains(&term)
        })
        .collect()
}

/// 用户下拉选项文本：`Name (email)`
pub fn user_option_label(user: &User) -> String {
    format!("{} ({})", user.name, user.email)
}

/// 仍在途中的出款数量（PENDING + PROCESSING）
pub fn pending_count(payouts: &[Payout]) -> usize {
    payouts.iter().filter(|p| p.status.is_in_flight()).count()
}

/// 最近的手动出款（列表已按时间倒序）
pub fn recent_manual_payouts(payouts: &[Payout]) -> Vec<&Payout> {
    payouts
        .iter()
        .filter(|p| p.is_manual())
        .take(MANUAL_PREVIEW_LIMIT)
        .collect()
}

/// 账单历史：优先使用支付记录接口，否则回退到当前订阅内嵌的支付记录
pub fn billing_rows(state: &SubscriptionState) -> &[Payment] {
    if !state.payment_history.is_empty() {
        return &state.payment_history;
    }
    state
        .current
        .as_ref()
        .map(|s| s.payments.as_slice())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GatewayBalance, PayoutUser, Subscription};

    #[test]
    fn amounts() {
        assert_eq!(format_inr(499.0), "₹499");
        assert_eq!(format_inr(10.5), "₹10.5");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn balances() {
        assert_eq!(paynpro_balance(None), "0.00");
        assert_eq!(razorpay_balance(None), "0.00");

        let balance = PayoutBalance {
            paynpro: Some(GatewayBalance {
                balance: Some(1520.0),
                error: None,
            }),
            razorpay: Some(GatewayBalance {
                balance: Some(123456.0),
                error: None,
            }),
        };
        assert_eq!(paynpro_balance(Some(&balance)), "1520");
        assert_eq!(razorpay_balance(Some(&balance)), "1234.56");
        assert!(balance_errors(Some(&balance)).is_empty());

        let failing = PayoutBalance {
            paynpro: Some(GatewayBalance {
                balance: None,
                error: Some("Gateway timeout".into()),
            }),
            razorpay: None,
        };
        assert_eq!(paynpro_balance(Some(&failing)), "0.00");
        assert_eq!(balance_errors(Some(&failing)), ["PaynPro: Gateway timeout"]);
    }

    #[test]
    fn plan_presentation() {
        let plan = Plan {
            id: "2".into(),
            name: "Pro".into(),
            price: 499.0,
            billing_cycle: "monthly".into(),
            features: vec!["A".into(), "B".into()],
            ..Default::default()
        };
        assert_eq!(format_inr(plan.price), "₹499");
        assert_eq!(checkout_cycle(&plan), "per monthly");
        assert_eq!(checkout_features(&plan), ["A", "B"]);

        let plan = Plan {
            billing_cycle: "YEARLY".into(),
            features: (1..=6).map(|i| format!("F{i}")).collect(),
            ..plan
        };
        assert_eq!(pricing_cycle(&plan), "/yearly");
        assert_eq!(checkout_features(&plan), ["F1", "F2", "F3", "F4"]);
    }

    #[test]
    fn user_search_is_case_insensitive() {
        let users = vec![
            User {
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                ..Default::default()
            },
            User {
                name: "Ravi".into(),
                email: "RAVI@corp.io".into(),
                ..Default::default()
            },
        ];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "ravi")[0].name, "Ravi");
        assert_eq!(filter_users(&users, "ASHA")[0].email, "asha@example.com");
        assert_eq!(filter_users(&users, "corp.IO").len(), 1);
        assert!(filter_users(&users, "zed").is_empty());
        assert_eq!(user_option_label(&users[1]), "Ravi (RAVI@corp.io)");
    }

    fn payout(id: &str, reference: &str, status: PayoutStatus) -> Payout {
        Payout {
            id: id.into(),
            payout_ref: Some(reference.into()),
            status,
            user: Some(PayoutUser {
                email: format!("{id}@x.io"),
                name: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn payout_summaries() {
        let payouts = vec![
            payout("1", "MAN_1", PayoutStatus::Pending),
            payout("2", "AUTO_2", PayoutStatus::Processing),
            payout("3", "MAN_3", PayoutStatus::Success),
            payout("4", "MAN_4", PayoutStatus::Failed),
            payout("5", "MAN_5", PayoutStatus::Unknown),
        ];
        assert_eq!(pending_count(&payouts), 2);

        let recent: Vec<&str> = recent_manual_payouts(&payouts)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(recent, ["1", "3", "4"]);

        assert_eq!(
            payout_status_class(PayoutStatus::Processing),
            "bg-blue-100 text-blue-700"
        );
        assert_eq!(
            payout_status_class(PayoutStatus::Pending),
            "bg-gray-100 text-gray-700"
        );
    }

    #[test]
    fn billing_rows_fall_back_to_subscription() {
        let mut state = SubscriptionState::default();
        assert!(billing_rows(&state).is_empty());

        state.current = Some(Subscription {
            id: "1".into(),
            payments: vec![Payment {
                id: "p1".into(),
                ..Default::default()
            }],
            ..Default::default()
        });
        assert_eq!(billing_rows(&state)[0].id, "p1");

        state.payment_history = vec![Payment {
            id: "p2".into(),
            ..Default::default()
        }];
        assert_eq!(billing_rows(&state)[0].id, "p2");
    }
}
