use super::{AsyncPhase, RequestFlags, StoreHandle, kind_of, perform, rejection_of};
use crate::client::BillingApi;
use crate::error::ApiResult;
use crate::transport::HttpClient;
use crate::{LoginRequest, RegisterRequest, User};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    /// 当前会话用户（包含访问令牌）
    pub user: Option<User>,
    pub flags: RequestFlags,
}

impl AuthState {
    pub fn with_user(user: Option<User>) -> Self {
        Self {
            user,
            flags: RequestFlags::default(),
        }
    }

    pub fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::Login(phase) | AuthAction::Register(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(user) => {
                    self.flags.succeed("");
                    self.user = Some(user);
                }
                AsyncPhase::Rejected(msg) => {
                    self.flags.fail(msg);
                    self.user = None;
                }
            },
            AuthAction::Logout => {
                self.user = None;
                self.flags.clear();
            }
            AuthAction::Reset => self.flags.clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Login(AsyncPhase<User>),
    Register(AsyncPhase<User>),
    Logout,
    Reset,
}

impl AuthAction {
    pub fn kind(&self) -> String {
        match self {
            AuthAction::Login(p) => kind_of("auth", "login", p),
            AuthAction::Register(p) => kind_of("auth", "register", p),
            AuthAction::Logout => "auth/logout".to_string(),
            AuthAction::Reset => "auth/reset".to_string(),
        }
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            AuthAction::Login(p) | AuthAction::Register(p) => rejection_of(p),
            _ => None,
        }
    }
}

// =========================================================
// 异步动作
// =========================================================

pub async fn login<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    req: LoginRequest,
) -> ApiResult<User> {
    store.dispatch(AuthAction::Login(AsyncPhase::Pending).into());
    match perform(api, store, "auth.login", &req).await {
        Ok(user) => {
            store.dispatch(AuthAction::Login(AsyncPhase::Fulfilled(user.clone())).into());
            Ok(user)
        }
        Err(e) => {
            store.dispatch(AuthAction::Login(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn register<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    req: RegisterRequest,
) -> ApiResult<User> {
    store.dispatch(AuthAction::Register(AsyncPhase::Pending).into());
    match perform(api, store, "auth.register", &req).await {
        Ok(user) => {
            store.dispatch(AuthAction::Register(AsyncPhase::Fulfilled(user.clone())).into());
            Ok(user)
        }
        Err(e) => {
            store.dispatch(
                AuthAction::Register(AsyncPhase::Rejected(e.message().to_string())).into(),
            );
            Err(e)
        }
    }
}

/// 退出登录只清除本地会话，后端没有对应接口
pub fn logout<S: StoreHandle>(store: &S) {
    store.dispatch(AuthAction::Logout.into());
}

pub fn reset<S: StoreHandle>(store: &S) {
    store.dispatch(AuthAction::Reset.into());
}
