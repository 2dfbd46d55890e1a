/// Application shell for the review outcome pages.
/// The submission flow itself is served by the handlers in `api`.
use crate::components::pages::{AlreadyRated, ThankYou};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

pub const THANK_YOU_PATH: &str = "/reviews/thank-you";
pub const ALREADY_RATED_PATH: &str = "/reviews/already-rated";

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Reviews" />
        <Router>
            <main>
                <Routes>
                    // Outcome pages the submission flow redirects to
                    <Route path=THANK_YOU_PATH view=ThankYou />
                    <Route path=ALREADY_RATED_PATH view=AlreadyRated />
                </Routes>
            </main>
        </Router>
    }
}
