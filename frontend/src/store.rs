//! 全局仓库
//!
//! 把共享库的 `AppState` 放进一个 `RwSignal`，实现 `StoreHandle`，
//! 让共享库中的异步动作可以直接驱动界面。

use leptos::prelude::*;
use paydesk_shared::store::{Action, AppState, StoreHandle};
use paydesk_shared::{Timestamp, User};

#[derive(Clone, Copy)]
pub struct AppStore(RwSignal<AppState>);

impl AppStore {
    pub fn new(session: Option<User>) -> Self {
        Self(RwSignal::new(AppState::with_session(session)))
    }

    /// 在响应式上下文中读取状态（会被追踪）
    pub fn with<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.0.with(f)
    }
}

impl StoreHandle for AppStore {
    fn dispatch(&self, action: Action) {
        match action.rejection() {
            Some(message) => log_warn!("[Store] {} ({})", action.kind(), message),
            None => log_info!("[Store] {}", action.kind()),
        }
        self.0.update(|state| state.reduce(action));
    }

    fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_millis(js_sys::Date::now() as i64)
    }
}

pub fn provide_store(session: Option<User>) -> AppStore {
    let store = AppStore::new(session);
    provide_context(store);
    store
}

pub fn use_store() -> AppStore {
    use_context::<AppStore>().expect("AppStore should be provided")
}
