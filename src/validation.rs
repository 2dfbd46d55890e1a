use crate::models::form::{FormErrors, ReviewSubmission, REQUIRED_MSG};
use crate::models::requester::Requester;
use crate::models::score::{match_score, ScoreChoice};

/// Cleaned values of a submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedReview {
    pub score: f64,
    pub comment: String,
    pub user_name: String,
    pub user_email: String,
}

/// Validates a submission for the given requester. The name is only required
/// from anonymous reviewers; authenticated reviewers are described by their
/// account, so their posted name and email are discarded.
pub fn validate_submission(
    submission: &ReviewSubmission,
    requester: &Requester,
    choices: &[ScoreChoice],
) -> Result<CleanedReview, FormErrors> {
    let mut errors = FormErrors::default();

    let score = if submission.score.trim().is_empty() {
        errors.add("score", REQUIRED_MSG);
        None
    } else {
        let score = match_score(choices, &submission.score);
        if score.is_none() {
            errors.add(
                "score",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    submission.score.trim()
                ),
            );
        }
        score
    };

    let user_name = submission.user_name.trim();
    let user_email = submission.user_email.trim();
    if !requester.is_authenticated() {
        if user_name.is_empty() {
            errors.add("user_name", REQUIRED_MSG);
        }
        if !user_email.is_empty() && !looks_like_email(user_email) {
            errors.add("user_email", "Enter a valid e-mail address.");
        }
    }

    match score {
        Some(score) if errors.is_empty() => {
            let (user_name, user_email) = requester.display_contact(user_name, user_email);
            Ok(CleanedReview {
                score,
                comment: submission.comment.trim().to_string(),
                user_name,
                user_email,
            })
        }
        _ => Err(errors),
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
