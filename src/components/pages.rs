use leptos::*;

#[component]
pub fn ThankYou() -> impl IntoView {
    view! {
        <div class="reviews-thank-you">
            <h2>{ "Thank you" }</h2>
            <p>{ "Your review has been saved." }</p>
        </div>
    }
}

#[component]
pub fn AlreadyRated() -> impl IntoView {
    view! {
        <div class="reviews-already-rated">
            <h2>{ "Already rated" }</h2>
            <p>{ "You have already rated this object." }</p>
        </div>
    }
}
