use leptos::ev::SubmitEvent;
use leptos::*;

use crate::context::AppContext;
use crate::session::{AuthTab, Registration};
use crate::ui::UiState;

/// Login and registration forms behind a two-tab switcher.
#[component]
pub fn LoginScreen() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();
    let tab = create_rw_signal(AuthTab::default());

    let (login_email, set_login_email) = create_signal(String::new());
    let (login_password, set_login_password) = create_signal(String::new());

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());

    let session = ctx.session.clone();
    let handle_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        ui.set_loading(true);
        spawn_local(async move {
            let outcome = session
                .sign_in(&login_email.get_untracked(), &login_password.get_untracked())
                .await;
            ui.set_loading(false);
            ui.apply(outcome);
        });
    };

    let session = ctx.session.clone();
    let handle_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let registration = Registration {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm: confirm.get_untracked(),
        };
        ui.set_loading(true);
        spawn_local(async move {
            let outcome = session.sign_up(&registration).await;
            ui.set_loading(false);
            if let Some(next_tab) = outcome.tab {
                tab.try_set(next_tab);
                set_password.try_set(String::new());
                set_confirm.try_set(String::new());
            }
            ui.apply(outcome);
        });
    };

    let tab_button = move |target: AuthTab, label: &'static str| {
        view! {
            <button
                class="tab-btn"
                class:active=move || tab.get() == target
                data-tab=target.as_str()
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div id="login-screen" class="login-screen">
            <div class="login-card">
                <h1 class="logo"><i class="fas fa-map-marker-alt"></i>" LocalRate"</h1>
                <p class="tagline">"Descubra e avalie os melhores locais"</p>
                <div class="tabs">
                    {tab_button(AuthTab::Login, "Entrar")}
                    {tab_button(AuthTab::Register, "Cadastrar")}
                </div>

                <Show when=move || tab.get() == AuthTab::Login>
                    <form id="login-form" class="auth-form" on:submit=handle_login.clone()>
                        <input
                            type="email"
                            placeholder="E-mail"
                            required
                            prop:value=login_email
                            on:input=move |e| set_login_email.set(event_target_value(&e))
                        />
                        <input
                            type="password"
                            placeholder="Senha"
                            required
                            prop:value=login_password
                            on:input=move |e| set_login_password.set(event_target_value(&e))
                        />
                        <button type="submit" class="btn btn-primary">"Entrar"</button>
                    </form>
                </Show>

                <Show when=move || tab.get() == AuthTab::Register>
                    <form id="register-form" class="auth-form" on:submit=handle_register.clone()>
                        <input
                            type="text"
                            placeholder="Nome completo"
                            required
                            prop:value=name
                            on:input=move |e| set_name.set(event_target_value(&e))
                        />
                        <input
                            type="email"
                            placeholder="E-mail"
                            required
                            prop:value=email
                            on:input=move |e| set_email.set(event_target_value(&e))
                        />
                        <input
                            type="password"
                            placeholder="Senha"
                            required
                            prop:value=password
                            on:input=move |e| set_password.set(event_target_value(&e))
                        />
                        <input
                            type="password"
                            placeholder="Confirmar senha"
                            required
                            prop:value=confirm
                            on:input=move |e| set_confirm.set(event_target_value(&e))
                        />
                        <button type="submit" class="btn btn-primary">"Cadastrar"</button>
                    </form>
                </Show>
            </div>
        </div>
    }
}
