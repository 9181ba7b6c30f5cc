use leptos::*;

use crate::messages;
use crate::pages::ranking::{RankedLocation, RankingView};

#[component]
pub fn RankingPage(view: RankingView) -> impl IntoView {
    let body = if view.entries.is_empty() {
        view! { <p class="empty-state">{messages::RANKING_EMPTY}</p> }.into_view()
    } else {
        view! {
            <ol class="ranking-list">
                {view.entries.into_iter().map(ranking_row).collect_view()}
            </ol>
        }
        .into_view()
    };

    view! {
        <section class="page ranking-page">
            <h2><i class="fas fa-trophy"></i>{messages::RANKING_TITLE}</h2>
            {body}
        </section>
    }
}

fn ranking_row(entry: RankedLocation) -> impl IntoView {
    let rating_label = entry.rating_label();
    let score_label = entry.score_label();
    view! {
        <li class="ranking-item" data-id=entry.id.to_string()>
            <span class="ranking-position">
                {entry.medal.map(|medal| view! { <i class=medal.class()></i> })}
                {entry.position}
            </span>
            <img src=entry.image_url alt=entry.name.clone() class="ranking-image"/>
            <div class="ranking-info">
                <h3>{entry.name}</h3>
                <span class="stars">{rating_label}</span>
                <span class="rating-count">{messages::rating_count(entry.rating_count)}</span>
            </div>
            <span class="ranking-score">{score_label}</span>
        </li>
    }
}
