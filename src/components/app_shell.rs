use leptos::ev::MouseEvent;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen::JsCast;

use crate::components::page_content::PageContent;
use crate::context::AppContext;
use crate::router::Page;
use crate::session::SessionState;
use crate::ui::{Navigator, UiState};

/// Header, navigation and content region shown to signed-in users.
#[component]
pub fn AppShell() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();
    let navigator = Navigator::new(ctx.clone(), ui);
    provide_context(navigator);

    let menu_open = create_rw_signal(false);

    // Runs once in the browser when the shell mounts.
    let on_mount = ctx.clone();
    create_effect(move |_| {
        let ctx = on_mount.clone();
        if !ctx.router.start() {
            log!("[SESSION] Shell mounted again, showing home page");
        }
        navigator.go(Page::Home);
        if let Some(SessionState::LoggedIn(user)) = ui.session.get_untracked() {
            spawn_local(async move {
                let name = ctx.session.display_name(&user).await;
                ui.user_name.try_set(name);
            });
        }
    });

    let close_menu = window_event_listener(ev::click, move |_| menu_open.set(false));
    on_cleanup(move || close_menu.remove());

    let toggle_menu = move |ev: MouseEvent| {
        ev.stop_propagation();
        menu_open.update(|open| *open = !*open);
    };

    let session = ctx.session.clone();
    let logout = move |ev: MouseEvent| {
        ev.stop_propagation();
        menu_open.set(false);
        let session = session.clone();
        ui.set_loading(true);
        spawn_local(async move {
            let outcome = session.sign_out().await;
            ui.set_loading(false);
            ui.apply(outcome);
        });
    };

    view! {
        <div id="app-screen" class="app-screen">
            <header class="header">
                <div class="logo"><i class="fas fa-map-marker-alt"></i>" LocalRate"</div>
                <nav class="nav">
                    {Page::ALL
                        .into_iter()
                        .map(|page| {
                            view! {
                                <button
                                    class="nav-btn"
                                    class:active=move || ui.active.get() == page
                                    data-page=page.as_str()
                                    on:click=move |ev: MouseEvent| {
                                        if let Some(name) = data_page(&ev) {
                                            navigator.go_named(&name);
                                        }
                                    }
                                >
                                    <i class=page.icon()></i>
                                    " "
                                    {page.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <div class="user-menu">
                    <button class="user-btn" on:click=toggle_menu>
                        <i class="fas fa-user-circle"></i>
                        " "
                        <span id="user-name">{move || ui.user_name.get()}</span>
                    </button>
                    <div class="dropdown" class:show=move || menu_open.get()>
                        <button class="dropdown-item" on:click=logout>
                            <i class="fas fa-sign-out-alt"></i>
                            " Sair"
                        </button>
                    </div>
                </div>
            </header>
            <main id="main-content" class="main-content">
                <PageContent/>
            </main>
        </div>
    }
}

/// Page name on the clicked nav button.
fn data_page(ev: &MouseEvent) -> Option<String> {
    ev.current_target()?
        .dyn_into::<web_sys::Element>()
        .ok()?
        .get_attribute("data-page")
}
