#![cfg(target_arch = "wasm32")]

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::sleep;
use leptos::*;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use localrate::components::toast_container::ToastContainer;
use localrate::config::BackendConfig;
use localrate::context::AppContext;
use localrate::error::GatewayError;
use localrate::gateway::session_store::SessionStore;
use localrate::gateway::{Backend, SupabaseGateway};
use localrate::messages;
use localrate::models::user::{AuthSession, User};
use localrate::pages::PageView;
use localrate::router::Page;
use localrate::session::SessionState;
use localrate::toast::{Notification, ToastKind};
use localrate::ui::{navigate, navigate_named, UiState};

mod mocks;
use mocks::memory_backend::MemoryBackend;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_container(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

/// Mounts the toast container with a UI state and an app context over `backend`.
fn mount_app(id: &str, backend: Rc<MemoryBackend>) -> (AppContext, UiState) {
    let container = mount_container(id);
    let ctx = AppContext::with_backend(backend);
    let ui = create_rw_signal(None::<UiState>);

    let provided = ctx.clone();
    mount_to(container.unchecked_into(), move || {
        let state = UiState::new();
        provide_context(provided);
        provide_context(state);
        ui.set(Some(state));
        view! { <ToastContainer/> }
    });

    (ctx, ui.get_untracked().unwrap())
}

fn toasts_of(ui: UiState) -> Vec<(ToastKind, String)> {
    ui.toasts.with_untracked(|queue| {
        queue
            .toasts()
            .iter()
            .map(|toast| (toast.kind, toast.message.clone()))
            .collect()
    })
}

fn sample_session(email: &str) -> AuthSession {
    AuthSession {
        access_token: "token".into(),
        refresh_token: Some("refresh".into()),
        expires_at: Some(4_102_444_800),
        user: User {
            id: Uuid::new_v4(),
            email: Some(email.into()),
            email_confirmed_at: None,
        },
    }
}

#[wasm_bindgen_test]
async fn toasts_disappear_after_five_seconds() {
    let container = mount_container("toast-test");
    let ui = create_rw_signal(None::<UiState>);

    mount_to(container.clone().unchecked_into(), move || {
        let state = UiState::new();
        provide_context(state);
        ui.set(Some(state));
        view! { <ToastContainer/> }
    });

    let state = ui.get_untracked().unwrap();
    state.notify(Notification::success("Local adicionado com sucesso!"));
    sleep(Duration::from_millis(50)).await;

    let toast = container.query_selector(".toast.success").unwrap();
    assert!(toast.is_some(), "toast should be on screen");
    assert!(container.inner_html().contains("Local adicionado com sucesso!"));

    sleep(Duration::from_millis(5_200)).await;
    assert!(container.query_selector(".toast").unwrap().is_none(), "toast should be gone");
}

#[wasm_bindgen_test]
async fn loading_overlay_follows_the_signal() {
    let container = mount_container("loading-test");
    let ui = create_rw_signal(None::<UiState>);

    mount_to(container.clone().unchecked_into(), move || {
        let state = UiState::new();
        provide_context(state);
        ui.set(Some(state));
        view! { <ToastContainer/> }
    });

    let state = ui.get_untracked().unwrap();
    let overlay = container.query_selector("#loading").unwrap().unwrap();
    assert!(overlay.class_list().contains("hidden"));

    state.set_loading(true);
    sleep(Duration::from_millis(20)).await;
    assert!(!overlay.class_list().contains("hidden"));
}

#[wasm_bindgen_test]
fn stored_session_survives_and_corrupt_entries_are_dropped() {
    let store = SessionStore::with_key("localrate.test.session");
    let session = sample_session("ana@example.com");

    store.save(&session).unwrap();
    assert_eq!(store.load(), Some(session));

    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.set_item("localrate.test.session", "{not json").unwrap();
    assert_eq!(store.load(), None);
    assert_eq!(storage.get_item("localrate.test.session").unwrap(), None);

    store.clear();
}

#[wasm_bindgen_test]
fn gateway_reports_the_stored_session() {
    let store = SessionStore::default();
    store.clear();
    let config = BackendConfig::new("https://localrate.example", "anon-key");

    assert!(!SupabaseGateway::new(config.clone()).has_session());

    store.save(&sample_session("bia@example.com")).unwrap();
    assert!(SupabaseGateway::new(config).has_session());

    store.clear();
}

#[wasm_bindgen_test]
async fn successful_navigation_swaps_the_content_and_hides_the_overlay() {
    let backend = Rc::new(MemoryBackend::new());
    backend.add_location("Café Aurora", &[5, 4]);
    let (ctx, ui) = mount_app("navigate-ok-test", backend);

    navigate(&ctx, ui, Page::Ranking);
    assert!(ui.loading.get_untracked(), "overlay shows while the page loads");
    assert_eq!(ui.active.get_untracked(), Page::Ranking);

    sleep(Duration::from_millis(50)).await;
    assert!(!ui.loading.get_untracked());
    let Some(PageView::Ranking(view)) = ui.content.get_untracked() else {
        panic!("ranking page should be on screen");
    };
    assert_eq!(view.entries.len(), 1);
    assert!(toasts_of(ui).is_empty());
}

#[wasm_bindgen_test]
async fn failed_render_keeps_the_content_and_shows_a_toast() {
    let backend = Rc::new(MemoryBackend::new());
    backend.fail("get_locations", GatewayError::Decode("unexpected end of input".into()));
    let (ctx, ui) = mount_app("navigate-failed-test", backend);
    let before = PageView::Notice("página anterior".into());
    ui.content.set(Some(before.clone()));

    navigate(&ctx, ui, Page::Locations);
    assert!(ui.loading.get_untracked());
    assert_eq!(ui.active.get_untracked(), Page::Locations);

    sleep(Duration::from_millis(50)).await;
    assert!(!ui.loading.get_untracked());
    assert_eq!(ui.content.get_untracked(), Some(before));
    assert_eq!(
        toasts_of(ui),
        [(ToastKind::Error, messages::PAGE_LOAD_FAILED.to_string())]
    );
}

#[wasm_bindgen_test]
async fn stale_render_never_replaces_the_newer_page() {
    let backend = Rc::new(MemoryBackend::new());
    backend.add_location("Parque Central", &[3]);
    let user = backend.add_user("ana@example.com", "segredo1", "Ana");
    backend.sign_in_as(&user);
    let (ctx, ui) = mount_app("navigate-stale-test", backend);
    ui.session.set(Some(SessionState::LoggedIn(user)));

    // Home waits on the location list; the profile renders straight away
    // and wins, so the late home render is dropped.
    navigate(&ctx, ui, Page::Home);
    navigate(&ctx, ui, Page::Profile);
    assert_eq!(ui.active.get_untracked(), Page::Profile);

    sleep(Duration::from_millis(50)).await;
    assert!(matches!(ui.content.get_untracked(), Some(PageView::Profile(_))));
    assert_eq!(ui.active.get_untracked(), Page::Profile);
    assert!(!ui.loading.get_untracked());
    assert!(toasts_of(ui).is_empty());
}

#[wasm_bindgen_test]
async fn unknown_page_names_change_nothing() {
    let (ctx, ui) = mount_app("navigate-unknown-test", Rc::new(MemoryBackend::new()));
    ui.active.set(Page::Ranking);
    ui.content.set(Some(PageView::Notice("ranking".into())));

    navigate_named(&ctx, ui, "settings");

    sleep(Duration::from_millis(50)).await;
    assert_eq!(ui.active.get_untracked(), Page::Ranking);
    assert_eq!(ui.content.get_untracked(), Some(PageView::Notice("ranking".into())));
    assert!(!ui.loading.get_untracked());
    assert!(toasts_of(ui).is_empty());
}

#[wasm_bindgen_test]
async fn navigation_after_a_lost_session_returns_to_login() {
    let backend = Rc::new(MemoryBackend::new());
    let user = backend.add_user("ana@example.com", "segredo1", "Ana");
    backend.sign_in_as(&user);
    let (ctx, ui) = mount_app("navigate-signed-out-test", backend.clone());
    ui.session.set(Some(SessionState::LoggedIn(user)));
    ui.user_name.set("Ana".into());

    backend.drop_session();
    navigate(&ctx, ui, Page::Home);

    sleep(Duration::from_millis(50)).await;
    assert_eq!(ui.session.get_untracked(), Some(SessionState::LoggedOut));
    assert_eq!(ui.content.get_untracked(), None);
    assert_eq!(ui.user_name.get_untracked(), "");
    assert!(!ui.loading.get_untracked());
    assert_eq!(
        toasts_of(ui),
        [(ToastKind::Info, messages::SESSION_EXPIRED.to_string())]
    );
}
