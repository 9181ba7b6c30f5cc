/// Root of the LocalRate single-page application.
/// Provides the shared services, checks for a stored session and shows either
/// the login screen or the signed-in shell.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::{app_shell::AppShell, login_screen::LoginScreen, toast_container::ToastContainer};
use crate::config::BackendConfig;
use crate::context::AppContext;
use crate::session::SessionState;
use crate::ui::UiState;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppContext::new(BackendConfig::from_env()));
    provide_context(UiState::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/localrate.css"/>
        <Stylesheet href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css"/>
        <Title text="LocalRate"/>
        <Router>
            <Routes>
                <Route path="" view=Root/>
            </Routes>
        </Router>
    }
}

#[component]
fn Root() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();

    // Start-up session check; effects only run in the browser.
    create_effect(move |_| {
        let session = ctx.session.clone();
        spawn_local(async move {
            let state = session.restore().await;
            ui.session.try_set(Some(state));
        });
    });

    view! {
        {move || match ui.session.get() {
            None => view! {
                <div class="splash">
                    <div class="spinner"></div>
                </div>
            }
            .into_view(),
            Some(SessionState::LoggedOut) => view! { <LoginScreen/> }.into_view(),
            Some(SessionState::LoggedIn(_)) => view! { <AppShell/> }.into_view(),
        }}
        <ToastContainer/>
    }
}
