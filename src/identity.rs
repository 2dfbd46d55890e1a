use crate::db::Database;
use crate::error::ReviewError;
use crate::models::requester::Requester;
use crate::models::target::TargetRef;
use leptos::logging::log;

/// Returns true if the requester already reviewed the target. Reviews count
/// whether or not they are active, so a moderated-out review still blocks a
/// second one. An anonymous visitor without a session has not rated anything.
pub async fn has_rated(
    db: &Database,
    requester: &Requester,
    target: &TargetRef,
) -> Result<bool, ReviewError> {
    let identity = match requester.identity() {
        Some(identity) => identity,
        None => return Ok(false),
    };
    let found = db.find_review(target, &identity).await?;
    if let Some(review_id) = found {
        log!(
            "[REVIEWS] {:?} already rated {}/{} (review {})",
            identity,
            target.content_type_id,
            target.content_id,
            review_id
        );
    }
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requester::Account;
    use crate::models::review::{NewReview, ReviewerIdentity};

    async fn db_with_review(target: TargetRef, reviewer: ReviewerIdentity, active: bool) -> Database {
        let db = Database::new(":memory:").unwrap();
        db.create_schema().await.unwrap();
        db.insert_review(
            &NewReview {
                target,
                reviewer,
                user_name: "Alice".into(),
                user_email: String::new(),
                comment: String::new(),
                score: 3.0,
                ip_address: None,
            },
            active,
        )
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_has_rated_by_session() {
        let target = TargetRef::new(1, 1);
        let db = db_with_review(target, ReviewerIdentity::Session("s1".into()), true).await;

        assert!(has_rated(&db, &Requester::anonymous("s1"), &target).await.unwrap());
        assert!(!has_rated(&db, &Requester::anonymous("s2"), &target).await.unwrap());
        assert!(!has_rated(&db, &Requester::anonymous("s1"), &TargetRef::new(1, 2))
            .await
            .unwrap());
        assert!(!has_rated(&db, &Requester::Anonymous { session_key: None }, &target)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_has_rated_by_account() {
        let target = TargetRef::new(5, 9);
        let db = db_with_review(target, ReviewerIdentity::User(12), true).await;
        let account = |id| {
            Requester::Authenticated(Account {
                id,
                full_name: "Bob".into(),
                email: "bob@example.com".into(),
            })
        };

        assert!(has_rated(&db, &account(12), &target).await.unwrap());
        assert!(!has_rated(&db, &account(13), &target).await.unwrap());
        // The session key namespace is separate from account ids
        assert!(!has_rated(&db, &Requester::anonymous("12"), &target).await.unwrap());
    }

    #[tokio::test]
    async fn test_inactive_review_still_counts() {
        let target = TargetRef::new(1, 1);
        let db = db_with_review(target, ReviewerIdentity::Session("s1".into()), false).await;
        assert!(has_rated(&db, &Requester::anonymous("s1"), &target).await.unwrap());
    }
}
