use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::Payment;
use paydesk_shared::date::MISSING_DATE;
use paydesk_shared::display::{billing_rows, format_inr, payment_status_class};
use paydesk_shared::store::subscription as subscription_actions;

use crate::api::use_api;
use crate::components::banner::StatusBanner;
use crate::components::navbar::Navbar;
use crate::store::use_store;
use crate::web::router::Link;

#[component]
pub fn BillingHistoryPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();

    // 支付记录接口为空时回退到当前订阅内嵌的记录，所以两者都取
    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            let _ = subscription_actions::fetch_payment_history(&api, &store).await;
            let _ = subscription_actions::fetch_current(&api, &store).await;
        });
    });

    let rows = move || store.with(|s| billing_rows(&s.subscription).to_vec());
    let is_empty = move || store.with(|s| billing_rows(&s.subscription).is_empty());
    let is_loading = move || store.with(|s| s.subscription.flags.is_loading);
    let error_msg = Signal::derive(move || {
        store.with(|s| s.subscription.flags.error_message().map(str::to_string))
    });

    view! {
        <div class="min-h-screen bg-base-200">
            <Navbar />
            <main class="max-w-6xl mx-auto p-4 md:p-8 space-y-6">
                <div>
                    <h1 class="text-3xl font-black">"Billing History"</h1>
                    <p class="text-base-content/60 mt-2">"Manage and download your past invoices and payment receipts."</p>
                </div>

                <StatusBanner message=error_msg />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <Show
                            when=move || !is_empty()
                            fallback=move || view! {
                                <Show
                                    when=move || !is_loading()
                                    fallback=|| view! {
                                        <div class="flex justify-center py-16">
                                            <span class="loading loading-spinner loading-lg text-primary"></span>
                                        </div>
                                    }
                                >
                                    <div class="text-center py-16 px-4">
                                        <h3 class="text-xl font-bold">"No transactions yet"</h3>
                                        <p class="text-base-content/60 mt-2">"When you pay for a plan, it will appear here."</p>
                                        <Link to="/pricing" class="btn btn-primary mt-6">"View Plans"</Link>
                                    </div>
                                </Show>
                            }
                        >
                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Date & Time"</th>
                                            <th>"Transaction ID"</th>
                                            <th>"Amount"</th>
                                            <th>"Method"</th>
                                            <th>"Status"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=rows
                                            key=|payment| payment.id.clone()
                                            children=|payment| view! { <PaymentRow payment=payment /> }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </Show>
                    </div>
                </div>
            </main>
        </div>
    }
}

#[component]
fn PaymentRow(payment: Payment) -> impl IntoView {
    let when = payment
        .created_at
        .map(|ts| ts.format_date_time())
        .unwrap_or_else(|| MISSING_DATE.to_string());
    let badge = format!(
        "px-3 py-1 rounded-full text-xs font-bold {}",
        payment_status_class(payment.status)
    );

    view! {
        <tr>
            <td class="whitespace-nowrap">{when}</td>
            <td class="font-mono text-xs">{payment.txn_id.clone()}</td>
            <td class="font-bold">{format_inr(payment.amount)}</td>
            <td>{payment.gateway.label()}</td>
            <td><span class=badge>{payment.status.as_str()}</span></td>
        </tr>
    }
}
