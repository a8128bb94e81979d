//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其认证属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页 (默认路由)
    #[default]
    Landing,
    Login,
    Signup,
    Pricing,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 指定计划的结账页 (需要认证)
    Checkout { plan_id: String },
    BillingHistory,
    /// 收款银行设置 (需要认证)
    Payouts,
    /// 管理员出款控制台 (需要认证)
    AdminPayouts,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举；忽略结尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };

        match path {
            "/" => Self::Landing,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/pricing" => Self::Pricing,
            "/dashboard" => Self::Dashboard,
            "/billing-history" => Self::BillingHistory,
            "/payouts" => Self::Payouts,
            "/admin/payouts" => Self::AdminPayouts,
            _ => match path.strip_prefix("/checkout/") {
                Some(plan_id) if !plan_id.is_empty() && !plan_id.contains('/') => Self::Checkout {
                    plan_id: plan_id.to_string(),
                },
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Pricing => "/pricing".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Checkout { plan_id } => format!("/checkout/{}", plan_id),
            Self::BillingHistory => "/billing-history".to_string(),
            Self::Payouts => "/payouts".to_string(),
            Self::AdminPayouts => "/admin/payouts".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Checkout { .. }
                | Self::BillingHistory
                | Self::Payouts
                | Self::AdminPayouts
        )
    }

    /// 定义已认证用户是否应该离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 对目标路由应用认证守卫，返回实际应进入的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        let cases = [
            ("/", AppRoute::Landing),
            ("/login", AppRoute::Login),
            ("/signup/", AppRoute::Signup),
            ("/pricing", AppRoute::Pricing),
            ("/dashboard", AppRoute::Dashboard),
            ("/billing-history", AppRoute::BillingHistory),
            ("/payouts", AppRoute::Payouts),
            ("/admin/payouts", AppRoute::AdminPayouts),
            (
                "/checkout/2",
                AppRoute::Checkout {
                    plan_id: "2".into(),
                },
            ),
        ];
        for (path, route) in cases {
            assert_eq!(AppRoute::from_path(path), route, "path {path}");
        }
    }

    #[test]
    fn malformed_checkout_is_not_found() {
        assert_eq!(AppRoute::from_path("/checkout"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/checkout/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/checkout/2/extra"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        let route = AppRoute::Checkout {
            plan_id: "abc".into(),
        };
        assert_eq!(route.to_path(), "/checkout/abc");
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
        assert_eq!(AppRoute::AdminPayouts.to_string(), "/admin/payouts");
    }

    #[test]
    fn guard_redirects() {
        assert_eq!(AppRoute::Dashboard.guard(false), AppRoute::Login);
        assert_eq!(
            AppRoute::Checkout {
                plan_id: "1".into()
            }
            .guard(false),
            AppRoute::Login
        );
        assert_eq!(AppRoute::Login.guard(true), AppRoute::Dashboard);
        assert_eq!(AppRoute::Signup.guard(true), AppRoute::Dashboard);
        assert_eq!(AppRoute::Pricing.guard(false), AppRoute::Pricing);
        assert_eq!(AppRoute::Landing.guard(true), AppRoute::Landing);
        assert_eq!(AppRoute::AdminPayouts.guard(true), AppRoute::AdminPayouts);
    }
}
