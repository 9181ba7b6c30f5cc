use leptos::*;

use crate::pages::locations::RatingEntry;

#[component]
pub fn RatingsList(entries: Vec<RatingEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="empty-state">"Nenhuma avaliação ainda. Seja o primeiro!"</p> }.into_view();
    }
    view! {
        <ul class="ratings-list">
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <li class="rating-item">
                            <div class="rating-header">
                                <strong>{entry.author}</strong>
                                <span class="stars" title=entry.score.to_string()>{entry.stars}</span>
                                <span class="rating-date">{entry.date}</span>
                            </div>
                            {(!entry.comment.is_empty())
                                .then(|| view! { <p class="rating-comment">{entry.comment}</p> })}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}
