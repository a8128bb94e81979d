use leptos::prelude::*;
use leptos::task::spawn_local;
use paydesk_shared::forms::LoginForm;
use paydesk_shared::store::auth as auth_actions;

use crate::api::use_api;
use crate::components::banner::{StatusBanner, use_toasts};
use crate::store::use_store;
use crate::web::router::{Link, use_navigate};

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_store();
    let api = use_api();
    let toasts = use_toasts();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let is_loading = move || store.with(|s| s.auth.flags.is_loading);
    let error_msg = Signal::derive(move || {
        store.with(|s| s.auth.flags.error_message().map(str::to_string))
    });

    // 离开页面时清除残留的请求标志
    on_cleanup(move || auth_actions::reset(&store));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            match auth_actions::login(&api, &store, form.to_request()).await {
                Ok(_) => {
                    toasts.success("Logged in successfully!");
                    navigate("/dashboard");
                }
                Err(e) => {
                    let message = e.message();
                    toasts.error(if message.is_empty() { "Login failed" } else { message });
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                    <p class="text-base-content/70 mt-2">"Sign in to manage your subscription"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <StatusBanner message=error_msg on_dismiss=Callback::new(move |_: ()| auth_actions::reset(&store)) />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=is_loading>
                                {move || if is_loading() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>

                        <div class="divider"></div>
                        <p class="text-sm text-center text-base-content/70">
                            "Don't have an account? "
                            <Link to="/signup" class="link link-primary font-bold">"Sign up for free"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
