//! 通用提示组件：状态横幅、加载指示与右上角通知

use std::time::Duration;

use leptos::prelude::*;
use paydesk_shared::notice::NoticeTimer;

/// 通知停留时间
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// 全局通知：消息内容, 是否出错
#[derive(Clone, Copy)]
pub struct ToastService(RwSignal<Option<(String, bool)>>);

impl ToastService {
    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    fn show(&self, message: String, is_error: bool) {
        let slot = self.0;
        slot.set(Some((message.clone(), is_error)));
        // 只清除自己这条，避免吞掉之后的新通知
        set_timeout(
            move || {
                if slot.with_untracked(|t| t.as_ref().map(|(m, _)| m) == Some(&message)) {
                    slot.set(None);
                }
            },
            TOAST_DURATION,
        );
    }
}

pub fn provide_toasts() {
    provide_context(ToastService(RwSignal::new(None)));
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService should be provided")
}

#[component]
pub fn Toasts() -> impl IntoView {
    let ToastService(current) = use_toasts();

    move || {
        current.get().map(|(message, is_error)| {
            let class = if is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{message}</span>
                    </div>
                </div>
            }
        })
    }
}

/// `active` 变为 true 后延时执行 `on_expire`
///
/// 重新计时、条件失效或组件卸载时取消尚未触发的计时。
pub fn use_auto_clear(active: Memo<bool>, delay: Duration, on_expire: impl Fn() + Clone + 'static) {
    let timer = StoredValue::new(NoticeTimer::new());
    let handle = StoredValue::new(Option::<TimeoutHandle>::None);

    let cancel = move || {
        if let Some(pending) = handle.try_update_value(Option::take).flatten() {
            pending.clear();
        }
        timer.try_update_value(NoticeTimer::cancel);
    };

    Effect::new(move |_| {
        cancel();
        if !active.get() {
            return;
        }
        let Some(ticket) = timer.try_update_value(NoticeTimer::schedule) else {
            return;
        };
        let on_expire = on_expire.clone();
        let scheduled = set_timeout_with_handle(
            move || {
                if timer.try_update_value(|t| t.expire(ticket)).unwrap_or(false) {
                    handle.try_set_value(None);
                    on_expire();
                }
            },
            delay,
        );
        match scheduled {
            Ok(pending) => {
                handle.try_set_value(Some(pending));
            }
            Err(_) => log_warn!("[Notice] Failed to schedule auto-clear"),
        }
    });

    on_cleanup(cancel);
}

/// 页面内的错误 / 成功横幅；消息为空时不渲染
///
/// 传入 `on_dismiss` 时显示关闭按钮。
#[component]
pub fn StatusBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] success: bool,
    #[prop(optional, into)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let class = if success {
        "alert alert-success text-sm py-3"
    } else {
        "alert alert-error text-sm py-3"
    };

    move || {
        message.get().map(|text| {
            view! {
                <div role="alert" class=class>
                    <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-5 w-5" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                    <span>{text}</span>
                    {on_dismiss.map(|dismiss| view! {
                        <button
                            type="button"
                            class="btn btn-ghost btn-xs btn-circle"
                            aria-label="Dismiss"
                            on:click=move |_| dismiss.run(())
                        >
                            "✕"
                        </button>
                    })}
                </div>
            }
        })
    }
}

/// 全屏加载指示
#[component]
pub fn PageSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
