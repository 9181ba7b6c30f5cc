use leptos::ev::SubmitEvent;
use leptos::*;

use crate::context::AppContext;
use crate::models::location::NewLocation;
use crate::pages::locations::add_location;
use crate::router::Page;
use crate::ui::{Navigator, UiState};

/// Add-location modal. Closes and reloads the list after a successful save.
#[component]
pub fn LocationForm(on_close: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();
    let navigator = expect_context::<Navigator>();

    let (name, set_name) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (address, set_address) = create_signal(String::new());
    let (image_url, set_image_url) = create_signal(String::new());

    let backend = ctx.backend.clone();
    let session = ctx.session.clone();
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let backend = backend.clone();
        let session = session.clone();
        let location = NewLocation {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked(),
            address: address.get_untracked(),
            image_url: image_url.get_untracked(),
        };
        ui.set_loading(true);
        spawn_local(async move {
            let notification = add_location(backend.as_ref(), location).await;
            ui.set_loading(false);
            let saved = notification.is_success();
            ui.notify(notification);
            if ui.observe_session(&session) {
                return;
            }
            if saved {
                on_close.call(());
                navigator.go(Page::Locations);
            }
        });
    };

    view! {
        <div class="modal show" id="add-location-modal">
            <div class="modal-content">
                <div class="modal-header">
                    <h3>"Adicionar local"</h3>
                    <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
                </div>
                <form id="add-location-form" on:submit=handle_submit>
                    <input
                        type="text"
                        placeholder="Nome do local"
                        required
                        on:input=move |e| set_name.set(event_target_value(&e))
                    />
                    <textarea
                        placeholder="Descrição"
                        on:input=move |e| set_description.set(event_target_value(&e))
                    ></textarea>
                    <input
                        type="text"
                        placeholder="Endereço"
                        on:input=move |e| set_address.set(event_target_value(&e))
                    />
                    <input
                        type="url"
                        placeholder="URL da imagem"
                        on:input=move |e| set_image_url.set(event_target_value(&e))
                    />
                    <button type="submit" class="btn btn-primary">"Salvar"</button>
                </form>
            </div>
        </div>
    }
}
