use leptos::*;

use crate::pages::LocationCard;

/// One location card. `on_rate` adds the "Avaliar" button.
#[component]
pub fn LocationCardView(
    card: LocationCard,
    #[prop(optional, into)] on_click: Option<Callback<()>>,
    #[prop(optional, into)] on_rate: Option<Callback<LocationCard>>,
) -> impl IntoView {
    let rate_target = card.clone();
    view! {
        <div
            class="location-card"
            class:clickable=on_click.is_some()
            data-id=card.id.to_string()
            on:click=move |_| {
                if let Some(on_click) = on_click {
                    on_click.call(());
                }
            }
        >
            <img src=card.image_url.clone() alt=card.name.clone() class="location-image"/>
            <div class="location-info">
                <h3>{card.name.clone()}</h3>
                <p class="location-description">{card.description.clone()}</p>
                <p class="location-address">
                    <i class="fas fa-map-marker-alt"></i>
                    " "
                    {card.address.clone()}
                </p>
                <div class="location-rating">
                    <span class="stars">{card.rating_label.clone()}</span>
                    <span class="rating-count">{format!("{} avaliações", card.rating_count)}</span>
                </div>
                {on_rate.map(|on_rate| {
                    view! {
                        <button
                            class="btn btn-secondary rate-btn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_rate.call(rate_target.clone());
                            }
                        >
                            <i class="fas fa-star"></i>
                            " Avaliar"
                        </button>
                    }
                })}
            </div>
        </div>
    }
}
