use leptos::*;

use crate::components::location_card::LocationCardView;
use crate::messages;
use crate::pages::home::HomeView;
use crate::router::Page;
use crate::ui::Navigator;

#[component]
pub fn HomePage(view: HomeView) -> impl IntoView {
    let navigator = expect_context::<Navigator>();
    let open_locations = Callback::new(move |_: ()| navigator.go(Page::Locations));

    let featured = if view.featured.is_empty() {
        view! { <p class="empty-state">{messages::HOME_NO_LOCATIONS}</p> }.into_view()
    } else {
        view! {
            <div class="featured-grid">
                {view
                    .featured
                    .into_iter()
                    .map(|card| view! { <LocationCardView card=card on_click=open_locations/> })
                    .collect_view()}
            </div>
        }
        .into_view()
    };

    view! {
        <section class="page home-page">
            <div class="welcome card">
                <h2>{messages::HOME_WELCOME_TITLE}</h2>
                <p>{messages::HOME_WELCOME_TEXT}</p>
            </div>
            <h2>{messages::HOME_FEATURED_TITLE}</h2>
            {featured}
            <div class="stats-grid">
                <div class="stat-card">
                    <span class="stat-number">{view.location_count}</span>
                    <span class="stat-label">{messages::HOME_LOCATION_COUNT}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-number">{view.rating_count}</span>
                    <span class="stat-label">{messages::HOME_RATING_COUNT}</span>
                </div>
            </div>
        </section>
    }
}
