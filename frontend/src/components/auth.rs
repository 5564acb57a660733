use ems_shared::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::{AuthField, AuthForm, AuthMode, AuthOutcome, submit};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// 登录/注册页
///
/// 已有令牌时路由守卫会直接跳转到面板，此组件不会被渲染。
#[component]
pub fn AuthPage(initial_mode: Option<AuthMode>) -> impl IntoView {
    let session = use_session();
    let api = use_api();
    let router = use_router();

    let form = RwSignal::new(AuthForm::new(initial_mode.unwrap_or_default()));

    let mode = move || form.with(|f| f.mode);
    let submitting = move || form.with(|f| f.submitting);
    let bind = move |field: AuthField| move |ev: leptos::ev::Event| form.update(|f| f.input(field, event_target_value(&ev)));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if form.with_untracked(|f| f.submitting) {
            return;
        }
        form.update(|f| f.begin_submit());
        let snapshot = form.get_untracked();

        spawn_local(async move {
            let api = api.get_value();
            let store = session.store();
            let outcome = submit(&api, store.as_ref(), &snapshot).await;

            form.try_update(|f| f.finish(&outcome));
            if let AuthOutcome::LoggedIn(s) = outcome {
                session.mark_verified(s);
                router.navigate_to(AppRoute::auth_success_redirect());
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <Link to=AppRoute::Landing class="btn btn-ghost btn-sm mb-2">"← Back to Home"</Link>
                    <h1 class="text-3xl font-bold">{move || mode().title()}</h1>
                    <p class="text-base-content/70">{move || mode().subtitle()}</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || form.with(|f| f.error.is_some())>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || form.with(|f| f.error.clone())}</span>
                            </div>
                        </Show>
                        <Show when=move || form.with(|f| f.success.is_some())>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || form.with(|f| f.success.clone())}</span>
                            </div>
                        </Show>

                        <Show when=move || mode() == AuthMode::Register>
                            <div class="form-control">
                                <label class="label" for="name">
                                    <span class="label-text">"Full Name"</span>
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    placeholder="Enter your full name"
                                    class="input input-bordered"
                                    required
                                    prop:value=move || form.with(|f| f.name.clone())
                                    on:input=bind(AuthField::Name)
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Enter your email"
                                class="input input-bordered"
                                required
                                prop:value=move || form.with(|f| f.email.clone())
                                on:input=bind(AuthField::Email)
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Enter your password"
                                class="input input-bordered"
                                required
                                minlength="6"
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=bind(AuthField::Password)
                            />
                        </div>

                        <Show when=move || mode() == AuthMode::Register>
                            <div class="form-control">
                                <label class="label" for="role">
                                    <span class="label-text">"Role"</span>
                                </label>
                                <select
                                    id="role"
                                    class="select select-bordered"
                                    prop:value=move || form.with(|f| f.role.as_str())
                                    on:change=bind(AuthField::Role)
                                >
                                    <option value=Role::Employee.as_str()>"Employee"</option>
                                    <option value=Role::Manager.as_str()>"Manager"</option>
                                </select>
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=submitting>
                                {move || if submitting() {
                                    view! { <span class="loading loading-spinner"></span> {mode().busy_label()} }.into_any()
                                } else {
                                    mode().submit_label().into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            {move || mode().switch_prompt()} " "
                            <button
                                type="button"
                                class="link link-primary"
                                on:click=move |_| form.update(|f| f.toggle_mode())
                            >
                                {move || mode().switch_action()}
                            </button>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
