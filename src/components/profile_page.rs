use leptos::ev::SubmitEvent;
use leptos::*;

use crate::context::AppContext;
use crate::pages::profile::{load_stats, save_profile, ProfileStats, ProfileView};
use crate::ui::UiState;

#[component]
pub fn ProfilePage(view: ProfileView) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let ui = expect_context::<UiState>();

    let stats = create_rw_signal(ProfileStats::default());
    let user_id = view.user_id;
    let stats_backend = ctx.backend.clone();
    create_effect(move |_| {
        let backend = stats_backend.clone();
        spawn_local(async move {
            let loaded = load_stats(backend.as_ref(), user_id).await;
            stats.try_set(loaded);
        });
    });

    let (full_name, set_full_name) = create_signal(view.full_name.clone());
    let (avatar_url, set_avatar_url) = create_signal(view.avatar_url.clone());

    let backend = ctx.backend.clone();
    let session = ctx.session.clone();
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let backend = backend.clone();
        let session = session.clone();
        let name = full_name.get_untracked();
        let avatar = avatar_url.get_untracked();
        ui.set_loading(true);
        spawn_local(async move {
            let saved = save_profile(backend.as_ref(), &name, &avatar).await;
            ui.set_loading(false);
            if let Some(display_name) = saved.display_name {
                ui.user_name.try_set(display_name);
            }
            ui.notify(saved.notification);
            ui.observe_session(&session);
        });
    };

    view! {
        <section class="page profile-page">
            <div class="profile-header card">
                <img src=view.avatar_src alt="Avatar" class="profile-avatar"/>
                <div class="profile-info">
                    <h2>{view.display_name}</h2>
                    <p>{view.email}</p>
                    <p class="member-since">{format!("Membro desde {}", view.member_since)}</p>
                </div>
            </div>

            <div class="card">
                <h3>"Editar perfil"</h3>
                <form id="profile-form" on:submit=handle_submit>
                    <label for="profile-name">"Nome completo"</label>
                    <input
                        type="text"
                        id="profile-name"
                        prop:value=full_name
                        on:input=move |e| set_full_name.set(event_target_value(&e))
                    />
                    <label for="profile-avatar">"URL do avatar"</label>
                    <input
                        type="url"
                        id="profile-avatar"
                        prop:value=avatar_url
                        on:input=move |e| set_avatar_url.set(event_target_value(&e))
                    />
                    <button type="submit" class="btn btn-primary">"Salvar alterações"</button>
                </form>
            </div>

            <div class="card">
                <h3>"Minhas Estatísticas"</h3>
                <div class="stats-grid">
                    <div class="stat-card">
                        <span class="stat-number" id="user-ratings-count">{move || stats.get().ratings}</span>
                        <span class="stat-label">"Avaliações feitas"</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-number" id="user-locations-count">{move || stats.get().locations}</span>
                        <span class="stat-label">"Locais adicionados"</span>
                    </div>
                </div>
            </div>
        </section>
    }
}
