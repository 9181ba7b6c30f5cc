use leptos::*;

use crate::components::home_page::HomePage;
use crate::components::locations_page::LocationsPage;
use crate::components::profile_page::ProfilePage;
use crate::components::ranking_page::RankingPage;
use crate::pages::PageView;
use crate::ui::UiState;

/// Whatever the router last rendered.
#[component]
pub fn PageContent() -> impl IntoView {
    let ui = expect_context::<UiState>();

    move || match ui.content.get() {
        None => view! { <div class="card"><p>"Carregando..."</p></div> }.into_view(),
        Some(PageView::Home(view)) => view! { <HomePage view=view/> }.into_view(),
        Some(PageView::Locations(view)) => view! { <LocationsPage view=view/> }.into_view(),
        Some(PageView::Ranking(view)) => view! { <RankingPage view=view/> }.into_view(),
        Some(PageView::Profile(view)) => view! { <ProfilePage view=view/> }.into_view(),
        Some(PageView::Error(card)) => view! {
            <div class="card error-card">
                <h3>{card.title}</h3>
                <p>{card.description}</p>
            </div>
        }
        .into_view(),
        Some(PageView::Notice(message)) => view! { <div class="card"><p>{message}</p></div> }.into_view(),
    }
}
