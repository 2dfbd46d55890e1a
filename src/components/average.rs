use crate::models::review::ReviewAverage;
use leptos::*;

#[component]
pub fn AverageForInstance(average: ReviewAverage) -> impl IntoView {
    match average.average {
        Some(score) => view! {
            <div class="reviews-average">
                <span class="average-score">{ format!("{:.1}", score) }</span>
                <span class="average-count">{ format!("({} reviews)", average.count) }</span>
            </div>
        }
        .into_view(),
        None => view! {
            <div class="reviews-average">{ "Not rated yet" }</div>
        }
        .into_view(),
    }
}
