//! Loyalty Card Page
//!
//! Customer-facing stamp grid. Staff enter the shop code to add one stamp.

use leptos::prelude::*;
use menu_core::{CardState, StampError, StampTracker};

use crate::components::ConfirmButton;
use crate::config;
use crate::storage::LocalStore;

type Tracker = StampTracker<LocalStore>;

#[component]
pub fn LoyaltyApp() -> impl IntoView {
    let tracker: StoredValue<Tracker, LocalStorage> =
        StoredValue::new_local(StampTracker::new(LocalStore, &config::loyalty_config()));
    let max = tracker.with_value(|t| t.max());

    let (count, set_count) = signal(tracker.with_value(|t| t.count()));
    let (status, set_status) = signal(tracker.with_value(|t| t.status_message()));
    let (message, set_message) = signal::<Option<(bool, String)>>(None);
    let (pin, set_pin) = signal(String::new());

    let refresh = move || {
        set_count.set(tracker.with_value(|t| t.count()));
        set_status.set(tracker.with_value(|t| t.status_message()));
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let entered = pin.get_untracked();
        set_pin.set(String::new());

        let result = tracker
            .try_update_value(|t| t.authorize(&entered).and_then(|_| t.award()))
            .unwrap_or(Err(StampError::Storage("tracker unavailable".to_string())));

        match result {
            Ok(CardState::Complete) => set_message.set(Some((false, "Carte complète !".to_string()))),
            Ok(CardState::Collecting) => set_message.set(Some((false, "Tampon ajouté.".to_string()))),
            Err(StampError::WrongPin) => set_message.set(Some((true, "Code incorrect".to_string()))),
            Err(StampError::CardFull) => set_message.set(Some((
                true,
                "La carte est complète. Réinitialisez-la après la boisson offerte.".to_string(),
            ))),
            Err(e) => {
                log::error!("stamp not saved: {}", e);
                set_message.set(Some((true, "Impossible d'enregistrer le tampon.".to_string())));
            }
        }
        refresh();
    };

    let reset = Callback::new(move |_: ()| {
        let result = tracker
            .try_update_value(|t| {
                let request = t.request_reset();
                t.confirm_reset(request)
            })
            .unwrap_or(Err(StampError::Storage("tracker unavailable".to_string())));
        match result {
            Ok(()) => set_message.set(Some((false, "Carte réinitialisée.".to_string()))),
            Err(e) => {
                log::error!("reset failed: {}", e);
                set_message.set(Some((true, "Impossible de réinitialiser la carte.".to_string())));
            }
        }
        refresh();
    });

    view! {
        <div class="loyalty-card">
            <h1>"Carte de fidélité"</h1>

            <div class="stamp-grid">
                {(0..max).map(|i| view! {
                    <div class="stamp" class:filled=move || i < count.get()>
                        {move || if i < count.get() { "☕" } else { "" }}
                    </div>
                }).collect_view()}
            </div>

            <p class="stamp-status" class:complete=move || { count.get() >= max }>
                {move || status.get()}
            </p>

            <form class="pin-form" on:submit=submit>
                <input
                    type="password"
                    inputmode="numeric"
                    autocomplete="off"
                    placeholder="Code du personnel"
                    prop:value=move || pin.get()
                    on:input=move |ev| set_pin.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || count.get() >= max>
                    "Ajouter un tampon"
                </button>
            </form>

            {move || message.get().map(|(is_error, text)| view! {
                <p class=if is_error { "pin-message error" } else { "pin-message" }>{text}</p>
            })}

            <ConfirmButton
                button_class="reset-btn"
                label="Réinitialiser la carte"
                question="Effacer tous les tampons ?"
                on_confirm=reset
            />
        </div>
    }
}
