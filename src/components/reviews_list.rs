use crate::components::average::AverageForInstance;
use crate::models::review::{Review, ReviewsForInstance};
use leptos::*;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! { <p class="reviews-empty">{ "There are no reviews yet." }</p> }.into_view();
    }

    view! {
        <ul class="reviews">
            {
                reviews.into_iter().map(|review| {
                    view! {
                        <li class="review">
                            <span class="review-score">{ format!("{}", review.score) }</span>
                            <span class="review-author">{ review.user_name }</span>
                            <span class="review-date">{ review.created_at.format("%Y-%m-%d").to_string() }</span>
                            <p class="review-comment">{ review.comment }</p>
                        </li>
                    }
                }).collect::<Vec<_>>()
            }
        </ul>
    }
    .into_view()
}

/// Embeddable unit: average, list, and a link to the form unless the
/// current reviewer has already rated the object.
#[component]
pub fn ReviewsForInstanceView(unit: ReviewsForInstance) -> impl IntoView {
    let add_url = format!("/reviews/add/{}/{}", unit.content_type_id, unit.content_id);

    view! {
        <div class="reviews-for-instance">
            <h3>{ "Reviews" }</h3>
            <AverageForInstance average=unit.average />
            <ReviewsList reviews=unit.reviews />
            {
                if unit.has_rated {
                    view! { <p class="reviews-rated">{ "You have already rated this." }</p> }.into_view()
                } else {
                    view! { <a class="reviews-add" href=add_url>{ "Write a review" }</a> }.into_view()
                }
            }
        </div>
    }
}
