//! 认证模块
//!
//! 管理会话的持久化，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use leptos::prelude::*;
use paydesk_shared::User;
use paydesk_shared::store::auth as auth_actions;

use crate::store::AppStore;
use crate::web::LocalStorage;

const SESSION_STORAGE_KEY: &str = "paydesk_user";

/// 读取上次保存的会话；没有令牌的记录视为无效
pub fn restore_session() -> Option<User> {
    let user = LocalStorage::get_json::<User>(SESSION_STORAGE_KEY)?;
    if user.token().is_none() {
        LocalStorage::delete(SESSION_STORAGE_KEY);
        return None;
    }
    log_info!("[Auth] Restored session for {}", user.email);
    Some(user)
}

/// 会话用户变化时同步到 LocalStorage
pub fn persist_session(store: AppStore) {
    let session = Memo::new(move |_| store.with(|s| s.auth.user.clone()));

    Effect::new(move |_| match session.get() {
        Some(user) if user.token().is_some() => {
            if !LocalStorage::set_json(SESSION_STORAGE_KEY, &user) {
                log_error!("[Auth] Failed to persist session");
            }
        }
        _ => {
            LocalStorage::delete(SESSION_STORAGE_KEY);
        }
    });
}

/// 获取认证状态信号（用于路由服务注入）
pub fn is_authenticated_signal(store: AppStore) -> Signal<bool> {
    Signal::derive(move || store.with(|s| s.is_authenticated()))
}

/// 注销并清除会话
///
/// 导航由路由服务的认证状态监听处理：停留在受保护页面时会被带回登录页。
pub fn logout(store: &AppStore) {
    auth_actions::logout(store);
    auth_actions::reset(store);
    LocalStorage::delete(SESSION_STORAGE_KEY);
}
