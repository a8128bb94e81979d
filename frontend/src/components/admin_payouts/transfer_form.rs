use leptos::prelude::*;
use paydesk_shared::display::{filter_users, user_option_label};
use paydesk_shared::forms::QUICK_AMOUNTS;
use paydesk_shared::{ManualPayoutRequest, PaymentGateway};

use super::form_state::FormState;
use crate::store::use_store;

/// 出款商户按钮：(网关, 名称, 说明)
const MERCHANTS: [(PaymentGateway, &str, &str); 2] = [
    (PaymentGateway::Paynpro, "PaynPro", "Manual & Auto"),
    (PaymentGateway::Razorpay, "RazorpayX", "Enterprise Payout"),
];

#[component]
pub fn ManualTransferForm(
    form: FormState,
    #[prop(into)] on_submit: Callback<ManualPayoutRequest>,
) -> impl IntoView {
    let store = use_store();

    let is_loading = move || store.with(|s| s.payout.flags.is_loading);
    let can_submit = move || form.snapshot().can_submit(is_loading());
    let submit_label = move || form.snapshot().submit_label(is_loading());
    let options = move || {
        let term = form.search.get();
        store.with(|s| {
            filter_users(&s.payout.users, &term)
                .into_iter()
                .map(|u| (u.email.clone(), user_option_label(u)))
                .collect::<Vec<_>>()
        })
    };

    let handle_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        // 未选择收款人或金额低于下限时不提交
        if let Some(request) = form.snapshot().to_request() {
            on_submit.run(request);
        }
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=handle_submit>
            <div class="card-body space-y-4">
                <div>
                    <h3 class="card-title">"Manual Transfer"</h3>
                    <p class="text-sm text-base-content/60">"Initiate an arbitrary payout to any platform user."</p>
                </div>

                <div class="grid grid-cols-2 gap-3">
                    {MERCHANTS
                        .into_iter()
                        .map(|(gateway, name, hint)| view! {
                            <button
                                type="button"
                                class=move || if form.gateway.get() == gateway {
                                    "btn h-auto py-3 flex-col btn-primary"
                                } else {
                                    "btn h-auto py-3 flex-col btn-outline"
                                }
                                on:click=move |_| form.gateway.set(gateway)
                            >
                                <span class="font-bold">{name}</span>
                                <span class="text-xs opacity-70">{hint}</span>
                            </button>
                        })
                        .collect_view()}
                </div>

                <div class="form-control">
                    <label class="label"><span class="label-text font-bold">"Select Recipient"</span></label>
                    <input
                        type="text"
                        class="input input-bordered input-sm mb-2"
                        placeholder="Search by name or email..."
                        prop:value=form.search
                        on:input=move |ev| form.search.set(event_target_value(&ev))
                    />
                    <select
                        class="select select-bordered"
                        prop:value=form.email
                        on:change=move |ev| form.email.set(event_target_value(&ev))
                    >
                        <option value="">"Choose User..."</option>
                        <For
                            each=options
                            key=|(email, _)| email.clone()
                            children=|(email, label)| view! { <option value=email>{label}</option> }
                        />
                    </select>
                </div>

                <div class="form-control">
                    <label class="label"><span class="label-text font-bold">"Amount (INR)"</span></label>
                    <input
                        type="number"
                        min="1"
                        class="input input-bordered"
                        prop:value=form.amount
                        on:input=move |ev| form.amount.set(event_target_value(&ev))
                    />
                    <div class="flex gap-2 mt-2">
                        {QUICK_AMOUNTS
                            .into_iter()
                            .map(|amount| view! {
                                <button
                                    type="button"
                                    class="btn btn-xs btn-ghost"
                                    on:click=move |_| form.amount.set(amount.to_string())
                                >
                                    {format!("₹{}", amount)}
                                </button>
                            })
                            .collect_view()}
                    </div>
                </div>

                <div class="form-control">
                    <label class="label"><span class="label-text font-bold">"Purpose / Remark"</span></label>
                    <input
                        type="text"
                        class="input input-bordered"
                        placeholder="Reason for transfer"
                        prop:value=form.purpose
                        on:input=move |ev| form.purpose.set(event_target_value(&ev))
                    />
                </div>

                <button type="submit" class="btn btn-primary w-full" disabled=move || !can_submit()>
                    {submit_label}
                </button>
            </div>
        </form>
    }
}
