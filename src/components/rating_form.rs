use leptos::ev::SubmitEvent;
use leptos::*;
use uuid::Uuid;

use crate::components::ratings_list::RatingsList;
use crate::context::AppContext;
use crate::messages;
use crate::models::rating::{MAX_SCORE, MIN_SCORE};
use crate::pages::locations::{load_rating_panel, submit_rating, OwnRating};
use crate::router::Page;
use crate::ui::{Navigator, UiState};

/// Rating modal: existing ratings of one location plus the user's own form.
#[component]
pub fn RatingModal(location_id: Uuid, location_name: String, on_close: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let backend = ctx.backend.clone();
    let panel = create_local_resource(
        move || location_id,
        move |id| {
            let backend = backend.clone();
            async move { load_rating_panel(backend.as_ref(), id).await }
        },
    );

    view! {
        <div class="modal show" id="rating-modal">
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{format!("Avaliar {location_name}")}</h3>
                    <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
                </div>
                {move || match panel.get() {
                    None => view! { <p>"Carregando avaliações..."</p> }.into_view(),
                    Some(Err(_)) => view! { <p class="error">{messages::RATINGS_LOAD_FAILED}</p> }.into_view(),
                    Some(Ok(loaded)) => view! {
                        <RatingsList entries=loaded.entries/>
                        <RatingForm location_id=loaded.location_id own=loaded.own on_saved=on_close/>
                    }
                    .into_view(),
                }}
            </div>
        </div>
    }
}

/// Score and comment form. Pre-filled from `own` and saved as an update
/// when the user already rated the location.
#[component]
pub fn RatingForm(location_id: Uuid, own: Option<OwnRating>, on_saved: Callback<()>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();
    let navigator = expect_context::<Navigator>();

    let (score, set_score) = create_signal(own.as_ref().map_or(MAX_SCORE, |own| own.score));
    let (comment, set_comment) = create_signal(own.as_ref().map(|own| own.comment.clone()).unwrap_or_default());
    let existing = own.as_ref().map(|own| own.id);
    let heading = if existing.is_some() { "Editar sua avaliação" } else { "Sua avaliação" };

    let backend = ctx.backend.clone();
    let session = ctx.session.clone();
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let backend = backend.clone();
        let session = session.clone();
        let score = score.get_untracked();
        let comment = comment.get_untracked();
        ui.set_loading(true);
        spawn_local(async move {
            let notification = submit_rating(backend.as_ref(), location_id, existing, score, &comment).await;
            ui.set_loading(false);
            let saved = notification.is_success();
            ui.notify(notification);
            if ui.observe_session(&session) {
                return;
            }
            if saved {
                on_saved.call(());
                navigator.go(Page::Locations);
            }
        });
    };

    view! {
        <form id="rating-form" class="rating-form" on:submit=handle_submit>
            <h4>{heading}</h4>
            <label>"Nota (1-5)"</label>
            <input
                type="number"
                min=MIN_SCORE
                max=MAX_SCORE
                prop:value=move || score.get().to_string()
                on:input=move |e| set_score.set(event_target_value(&e).parse::<u8>().unwrap_or(0))
            />
            <textarea
                placeholder="Comentário (opcional)"
                prop:value=comment
                on:input=move |e| set_comment.set(event_target_value(&e))
            ></textarea>
            <button type="submit" class="btn btn-primary">"Salvar avaliação"</button>
        </form>
    }
}
