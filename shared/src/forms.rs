//! 表单状态与提交校验
//!
//! 页面组件只负责把输入框绑定到这些结构上，是否可以提交、提交什么由这里决定。

use crate::{BankDetailsRequest, LoginRequest, ManualPayoutRequest, PaymentGateway, RegisterRequest, User};

pub const MIN_MANUAL_PAYOUT: f64 = 1.0;
pub const DEFAULT_MANUAL_AMOUNT: &str = "1";
pub const DEFAULT_MANUAL_PURPOSE: &str = "Admin Manual Transfer";
/// 金额输入框旁的快捷金额
pub const QUICK_AMOUNTS: [&str; 3] = ["1", "10", "100"];

pub const IFSC_LENGTH: usize = 11;
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

// =========================================================
// 管理员手动出款
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ManualPayoutForm {
    /// 收款用户邮箱，空字符串表示未选择
    pub email: String,
    /// 原始输入，提交前才解析
    pub amount: String,
    pub purpose: String,
    pub gateway: PaymentGateway,
}

impl Default for ManualPayoutForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            amount: DEFAULT_MANUAL_AMOUNT.to_string(),
            purpose: DEFAULT_MANUAL_PURPOSE.to_string(),
            gateway: PaymentGateway::Paynpro,
        }
    }
}

impl ManualPayoutForm {
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
    }

    /// 提交按钮是否可用：已选收款人、金额不低于下限、没有在途请求
    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && self.to_request().is_some()
    }

    pub fn to_request(&self) -> Option<ManualPayoutRequest> {
        if self.email.trim().is_empty() {
            return None;
        }
        let amount = self.parsed_amount().filter(|a| *a >= MIN_MANUAL_PAYOUT)?;
        Some(ManualPayoutRequest {
            email: self.email.trim().to_string(),
            amount,
            purpose: self.purpose.clone(),
            gateway: self.gateway,
        })
    }

    /// 提交按钮文案
    pub fn submit_label(&self, is_loading: bool) -> String {
        if is_loading {
            "PROCESSING...".to_string()
        } else {
            format!("TRANSFER ₹{} NOW", self.amount.trim())
        }
    }
}

// =========================================================
// 收款银行信息
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BankDetailsForm {
    pub beneficiary_name: String,
    pub account_no: String,
    pub ifsc: String,
    pub bank_name: String,
}

impl BankDetailsForm {
    /// 以会话用户已保存的银行信息预填
    pub fn from_user(user: Option<&User>) -> Self {
        let Some(user) = user else {
            return Self::default();
        };
        Self {
            beneficiary_name: user.payout_beneficiary_name.clone().unwrap_or_default(),
            account_no: user.payout_account_no.clone().unwrap_or_default(),
            ifsc: user.payout_ifsc.clone().unwrap_or_default(),
            bank_name: user.payout_bank_name.clone().unwrap_or_default(),
        }
    }

    /// IFSC 长度提示；只提示不阻止提交
    pub fn ifsc_hint(&self) -> Option<String> {
        let len = self.ifsc.trim().chars().count();
        (len > 0 && len != IFSC_LENGTH)
            .then(|| format!("IFSC code should be {} characters", IFSC_LENGTH))
    }

    /// `email` 由异步动作从会话补齐
    pub fn to_request(&self) -> BankDetailsRequest {
        BankDetailsRequest {
            beneficiary_name: self.beneficiary_name.trim().to_string(),
            account_no: self.account_no.trim().to_string(),
            ifsc: self.ifsc.trim().to_uppercase(),
            bank_name: self.bank_name.trim().to_string(),
            email: String::new(),
        }
    }
}

// =========================================================
// 登录 / 注册
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// 确认密码已填写且与密码不同（用于输入框标红）
    pub fn password_mismatch(&self) -> bool {
        !self.confirm_password.is_empty() && self.password != self.confirm_password
    }

    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.password_mismatch()
    }

    /// 两次密码不一致时拒绝提交
    pub fn to_request(&self) -> Result<RegisterRequest, &'static str> {
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH);
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_for(email: &str, amount: &str) -> ManualPayoutForm {
        ManualPayoutForm {
            email: email.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    #[test]
    fn manual_defaults() {
        let form = ManualPayoutForm::default();
        assert_eq!(form.amount, "1");
        assert_eq!(form.purpose, "Admin Manual Transfer");
        assert_eq!(form.gateway, PaymentGateway::Paynpro);
        // 没有收款人时不可提交
        assert!(!form.can_submit(false));
    }

    #[test]
    fn amount_floor_disables_submit() {
        for amount in ["0", "-5", "0.99", "", "abc", "NaN", "inf"] {
            assert!(
                !form_for("u@x.io", amount).can_submit(false),
                "amount {amount:?} should be rejected"
            );
        }
        assert!(form_for("u@x.io", "1").can_submit(false));
        assert!(form_for("u@x.io", " 250.5 ").can_submit(false));
    }

    #[test]
    fn in_flight_request_disables_submit() {
        let form = form_for("u@x.io", "10");
        assert!(form.can_submit(false));
        assert!(!form.can_submit(true));
        assert_eq!(form.submit_label(true), "PROCESSING...");
        assert_eq!(form.submit_label(false), "TRANSFER ₹10 NOW");
    }

    #[test]
    fn manual_request_body() {
        let mut form = form_for("u@x.io", "100");
        form.gateway = PaymentGateway::Razorpay;
        let req = form.to_request().unwrap();
        assert_eq!(req.amount, 100.0);
        assert_eq!(req.gateway, PaymentGateway::Razorpay);
        assert_eq!(req.purpose, "Admin Manual Transfer");
    }

    #[test]
    fn bank_form_prefills_from_user() {
        let user = User {
            payout_beneficiary_name: Some("Asha Rao".into()),
            payout_ifsc: Some("HDFC0001234".into()),
            ..Default::default()
        };
        let form = BankDetailsForm::from_user(Some(&user));
        assert_eq!(form.beneficiary_name, "Asha Rao");
        assert_eq!(form.account_no, "");
        assert_eq!(form.ifsc_hint(), None);

        assert_eq!(BankDetailsForm::from_user(None), BankDetailsForm::default());
    }

    #[test]
    fn ifsc_hint_on_wrong_length() {
        let form = BankDetailsForm {
            ifsc: "sbin00".into(),
            ..Default::default()
        };
        assert_eq!(
            form.ifsc_hint().as_deref(),
            Some("IFSC code should be 11 characters")
        );
        assert_eq!(form.to_request().ifsc, "SBIN00");
    }

    #[test]
    fn signup_requires_matching_passwords() {
        let mut form = SignupForm {
            name: "Asha".into(),
            email: "a@b.c".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        assert_eq!(form.to_request().unwrap_err(), PASSWORD_MISMATCH);
        assert!(form.password_mismatch());
        assert!(!form.can_submit(false));

        form.confirm_password.clear();
        assert!(!form.password_mismatch());

        form.confirm_password = "secret1".into();
        assert!(form.can_submit(false));
        assert_eq!(form.to_request().unwrap().email, "a@b.c");
    }
}
