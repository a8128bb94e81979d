mod form_state;
mod transfer_form;

use std::time::Duration;

use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::date::format_optional_date;
use paydesk_shared::display::{
    RUPEE, balance_errors, format_inr, paynpro_balance, payout_status_class, pending_count,
    razorpay_balance, recent_manual_payouts,
};
use paydesk_shared::store::payout as payout_actions;
use paydesk_shared::{ManualPayoutRequest, PaymentGateway, Payout};
use transfer_form::ManualTransferForm;

use crate::api::use_api;
use crate::components::banner::{StatusBanner, use_auto_clear};
use crate::components::navbar::Navbar;
use crate::store::use_store;

/// 成功 / 失败提示的停留时间
const NOTICE_RESET_DELAY: Duration = Duration::from_secs(5);

#[component]
pub fn AdminPayoutsPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let form = FormState::new();

    // 初始加载：出款列表、网关余额、用户列表
    Effect::new({
        let api = api.clone();
        move |_| {
            let api_all = api.clone();
            spawn_local(async move {
                let _ = payout_actions::fetch_all(&api_all, &store).await;
            });
            let api_balance = api.clone();
            spawn_local(async move {
                let _ = payout_actions::fetch_balance(&api_balance, &store).await;
            });
            let api_users = api.clone();
            spawn_local(async move {
                let _ = payout_actions::fetch_users(&api_users, &store).await;
            });
        }
    });

    let settled = Memo::new(move |_| {
        store.with(|s| s.payout.flags.is_success || s.payout.flags.is_error)
    });
    use_auto_clear(settled, NOTICE_RESET_DELAY, move || payout_actions::reset(&store));

    on_cleanup(move || payout_actions::reset(&store));

    let on_transfer = Callback::new(move |request: ManualPayoutRequest| {
        let api = api.clone();
        spawn_local(async move {
            if payout_actions::initiate_manual(&api, &store, request).await.is_ok() {
                form.reset();
            }
        });
    });

    let error_msg = Signal::derive(move || {
        store.with(|s| s.payout.flags.error_message().map(str::to_string))
    });
    let success_msg = Signal::derive(move || {
        store.with(|s| s.payout.flags.success_message().map(str::to_string))
    });
    let balance_warning = Signal::derive(move || {
        let errors = store.with(|s| balance_errors(s.payout.balance.as_ref()));
        (!errors.is_empty()).then(|| errors.join(" · "))
    });

    let paynpro = move || {
        let amount = store.with(|s| paynpro_balance(s.payout.balance.as_ref()));
        format!("{}{}", RUPEE, amount)
    };
    let razorpay = move || {
        let amount = store.with(|s| razorpay_balance(s.payout.balance.as_ref()));
        format!("{}{}", RUPEE, amount)
    };
    let total = move || store.with(|s| s.payout.payouts.len());
    let processing = move || store.with(|s| pending_count(&s.payout.payouts));
    let manual = move || {
        store.with(|s| {
            recent_manual_payouts(&s.payout.payouts)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };
    let payouts = move || store.with(|s| s.payout.payouts.clone());

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
                <div>
                    <p class="text-xs font-black uppercase tracking-widest text-primary">"Admin Central"</p>
                    <h1 class="text-3xl font-black">"Payout Management"</h1>
                    <p class="text-base-content/60 mt-2">"Global monitoring for all system disbursements."</p>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"PaynPro Balance"</div>
                        <div class="stat-value text-primary text-2xl">{paynpro}</div>
                        <div class="stat-desc">"Real-time Sync"</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"RazorpayX Balance"</div>
                        <div class="stat-value text-secondary text-2xl">{razorpay}</div>
                        <div class="stat-desc">"Enterprise Bank"</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Total Payouts"</div>
                        <div class="stat-value text-2xl">{total}</div>
                        <div class="stat-desc">"Global history"</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Processing"</div>
                        <div class="stat-value text-warning text-2xl">{processing}</div>
                        <div class="stat-desc">"Sync required"</div>
                    </div>
                </div>

                <StatusBanner message=balance_warning />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                    <div class="space-y-6">
                        <ManualTransferForm form=form on_submit=on_transfer />
                        <StatusBanner message=success_msg success=true />
                        <StatusBanner message=error_msg />

                        <div class="alert alert-warning text-sm">
                            <div>
                                <p class="font-bold">"Safety Check"</p>
                                <p>"Manual transfers are direct and non-reversible. Please verify the beneficiary bank account details before initiating."</p>
                            </div>
                        </div>

                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <h3 class="card-title text-base">"Manual History"</h3>
                                <Show
                                    when=move || !manual().is_empty()
                                    fallback=|| view! { <p class="text-sm text-base-content/50">"No manual transfers yet."</p> }
                                >
                                    <ul class="space-y-3">
                                        <For
                                            each=manual
                                            key=|p| p.id.clone()
                                            children=|p| view! {
                                                <li class="flex justify-between items-center text-sm">
                                                    <div>
                                                        <p class="font-bold">{p.beneficiary_name.clone().unwrap_or_else(|| p.user_email().unwrap_or_default().to_string())}</p>
                                                        <p class="text-xs text-base-content/50">{format_optional_date(p.created_at)}</p>
                                                    </div>
                                                    <span class="font-bold">{format_inr(p.amount)}</span>
                                                </li>
                                            }
                                        />
                                    </ul>
                                </Show>
                            </div>
                        </div>
                    </div>

                    <div class="lg:col-span-2 card bg-base-100 shadow-xl">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"Recent Transactions"</h3>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Payout Ref"</th>
                                            <th>"User / Beneficiary"</th>
                                            <th>"Amount"</th>
                                            <th>"Status"</th>
                                            <th>"Date"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=payouts
                                            key=|p| p.id.clone()
                                            children=|p| view! { <PayoutRow payout=p /> }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>
                </div>
            </main>
        </div>
    }
}

#[component]
fn PayoutRow(payout: Payout) -> impl IntoView {
    let dot = if payout.gateway == PaymentGateway::Razorpay {
        "w-2 h-2 rounded-full bg-blue-500"
    } else {
        "w-2 h-2 rounded-full bg-indigo-500"
    };
    let badge = format!(
        "px-3 py-1 rounded-full text-xs font-bold {}",
        payout_status_class(payout.status)
    );
    let reference = payout.payout_ref.clone().unwrap_or_else(|| payout.id.clone());
    let who = payout.beneficiary_name.clone().unwrap_or_default();
    let email = payout.user_email().unwrap_or_default().to_string();

    view! {
        <tr>
            <td>
                <div class="flex items-center gap-2">
                    <span class=dot></span>
                    <span class="font-mono text-xs">{reference}</span>
                </div>
            </td>
            <td>
                <p class="font-bold">{who}</p>
                <p class="text-xs text-base-content/50">{email}</p>
            </td>
            <td class="font-bold">{format_inr(payout.amount)}</td>
            <td><span class=badge>{payout.status.as_str()}</span></td>
            <td>{format_optional_date(payout.created_at)}</td>
        </tr>
    }
}
