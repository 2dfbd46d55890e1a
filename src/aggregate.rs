use crate::db::Database;
use crate::error::ReviewError;
use crate::identity::has_rated;
use crate::models::requester::Requester;
use crate::models::review::{Review, ReviewAverage, ReviewsForInstance};
use crate::models::target::TargetRef;

/// Active reviews for a target, in storage order.
pub async fn get_reviews_for_instance(
    db: &Database,
    target: &TargetRef,
) -> Result<Vec<Review>, ReviewError> {
    Ok(db.get_active_reviews(target).await?)
}

/// Mean score and count over active reviews only.
pub async fn get_average_for_instance(
    db: &Database,
    target: &TargetRef,
) -> Result<ReviewAverage, ReviewError> {
    Ok(db.get_average(target).await?)
}

pub async fn reviews_for_instance(
    db: &Database,
    requester: &Requester,
    target: &TargetRef,
) -> Result<ReviewsForInstance, ReviewError> {
    Ok(ReviewsForInstance {
        reviews: get_reviews_for_instance(db, target).await?,
        has_rated: has_rated(db, requester, target).await?,
        content_type_id: target.content_type_id,
        content_id: target.content_id,
        average: get_average_for_instance(db, target).await?,
    })
}
