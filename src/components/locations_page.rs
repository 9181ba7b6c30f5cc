use leptos::*;

use crate::components::location_card::LocationCardView;
use crate::components::location_form::LocationForm;
use crate::components::rating_form::RatingModal;
use crate::pages::locations::LocationsView;
use crate::pages::LocationCard;

#[component]
pub fn LocationsPage(view: LocationsView) -> impl IntoView {
    let (search, set_search) = create_signal(String::new());
    let show_form = create_rw_signal(false);
    let rating_target = create_rw_signal(None::<LocationCard>);

    let locations = store_value(view);
    let cards = move || locations.with_value(|view| view.cards(&search.get()));
    let open_rating = Callback::new(move |card: LocationCard| rating_target.set(Some(card)));

    view! {
        <section class="page locations-page">
            <div class="page-header">
                <h2>"Locais"</h2>
                <button class="btn btn-primary" on:click=move |_| show_form.set(true)>
                    <i class="fas fa-plus"></i>
                    " Adicionar local"
                </button>
            </div>
            <input
                type="search"
                id="search-input"
                class="search-input"
                placeholder="Buscar por nome, descrição ou endereço..."
                prop:value=search
                on:input=move |e| set_search.set(event_target_value(&e))
            />
            {move || {
                let cards = cards();
                if cards.is_empty() {
                    view! { <p class="empty-state">"Nenhum local encontrado."</p> }.into_view()
                } else {
                    view! {
                        <div class="locations-grid">
                            {cards
                                .into_iter()
                                .map(|card| view! { <LocationCardView card=card on_rate=open_rating/> })
                                .collect_view()}
                        </div>
                    }
                    .into_view()
                }
            }}
            <Show when=move || show_form.get()>
                <LocationForm on_close=Callback::new(move |_| show_form.set(false))/>
            </Show>
            {move || {
                rating_target
                    .get()
                    .map(|card| {
                        view! {
                            <RatingModal
                                location_id=card.id
                                location_name=card.name
                                on_close=Callback::new(move |_| rating_target.set(None))
                            />
                        }
                    })
            }}
        </section>
    }
}
