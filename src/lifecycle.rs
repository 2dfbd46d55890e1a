use crate::db::{is_unique_violation, Database};
use crate::error::ReviewError;
use crate::identity::has_rated;
use crate::models::form::{FormErrors, FormView, PreviewView, ReviewSubmission};
use crate::models::requester::Requester;
use crate::models::review::{NewReview, ReviewerIdentity};
use crate::models::score::{score_options, ScoreChoice};
use crate::models::target::{ContentObject, TargetRef};
use crate::registry::ContentRegistry;
use crate::validation::validate_submission;
use leptos::logging::log;
use std::sync::Arc;

/// Where a finished step sends the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    ThankYou,
    AlreadyRated,
}

/// Result of one step of the submission flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Form(FormView),
    Preview(PreviewView),
    Redirect(Destination),
}

/// Drives add -> preview -> edit/confirm -> thank you. Nothing is kept
/// between steps; each one receives the submission posted by the previous
/// page.
#[derive(Clone)]
pub struct ReviewService {
    db: Database,
    registry: Arc<dyn ContentRegistry>,
    choices: Vec<ScoreChoice>,
}

impl ReviewService {
    pub fn new(db: Database, registry: Arc<dyn ContentRegistry>, choices: Vec<ScoreChoice>) -> Self {
        Self {
            db,
            registry,
            choices,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn score_choices(&self) -> &[ScoreChoice] {
        &self.choices
    }

    pub fn resolve(&self, target: &TargetRef) -> Result<ContentObject, ReviewError> {
        self.registry.resolve(target).ok_or(ReviewError::NotFound {
            content_type_id: target.content_type_id,
            content_id: target.content_id,
        })
    }

    /// Entry point of the flow. Without a submission the empty form is shown;
    /// with one, a valid submission moves on to the preview.
    pub async fn add_form(
        &self,
        target: TargetRef,
        requester: &Requester,
        submission: Option<ReviewSubmission>,
    ) -> Result<Outcome, ReviewError> {
        let object = self.resolve(&target)?;
        if has_rated(&self.db, requester, &target).await? {
            return Ok(Outcome::Redirect(Destination::AlreadyRated));
        }

        let mut submission = match submission {
            Some(submission) => submission,
            None => {
                return Ok(Outcome::Form(self.form_view(
                    object,
                    requester,
                    empty_submission(target),
                    FormErrors::default(),
                    false,
                )))
            }
        };
        submission.content_type_id = target.content_type_id;
        submission.content_id = target.content_id;

        match validate_submission(&submission, requester, &self.choices) {
            Ok(_) => Ok(Outcome::Preview(self.preview_view(object, requester, submission))),
            Err(errors) => Ok(Outcome::Form(self.form_view(
                object, requester, submission, errors, false,
            ))),
        }
    }

    /// Shows the pending review for confirmation. Nothing is stored.
    pub fn preview(
        &self,
        requester: &Requester,
        submission: ReviewSubmission,
    ) -> Result<Outcome, ReviewError> {
        let object = self.resolve(&submission.target())?;
        Ok(Outcome::Preview(self.preview_view(object, requester, submission)))
    }

    /// Back from the preview to the form, keeping what was entered.
    pub async fn reedit(
        &self,
        requester: &Requester,
        submission: ReviewSubmission,
    ) -> Result<Outcome, ReviewError> {
        let target = submission.target();
        let object = self.resolve(&target)?;
        if has_rated(&self.db, requester, &target).await? {
            return Ok(Outcome::Redirect(Destination::AlreadyRated));
        }
        let mut submission = submission;
        submission.edit.clear();
        Ok(Outcome::Form(self.form_view(
            object,
            requester,
            submission,
            FormErrors::default(),
            true,
        )))
    }

    /// Handles the preview page: either goes back to editing or stores the
    /// review. The duplicate check is not repeated here; the unique index
    /// catches a second active review.
    pub async fn reedit_or_save(
        &self,
        requester: &Requester,
        submission: ReviewSubmission,
        ip_address: Option<String>,
    ) -> Result<Outcome, ReviewError> {
        if submission.wants_edit() {
            return self.reedit(requester, submission).await;
        }

        let target = submission.target();
        let object = self.resolve(&target)?;
        let cleaned = match validate_submission(&submission, requester, &self.choices) {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                log!(
                    "[REVIEWS] Confirmed review for {}/{} failed validation",
                    target.content_type_id,
                    target.content_id
                );
                return Ok(Outcome::Form(self.form_view(
                    object, requester, submission, errors, true,
                )));
            }
        };

        let reviewer = requester.identity().unwrap_or_else(|| {
            ReviewerIdentity::Session(uuid::Uuid::new_v4().to_string())
        });
        let review = NewReview {
            target,
            reviewer,
            user_name: cleaned.user_name,
            user_email: cleaned.user_email,
            comment: cleaned.comment,
            score: cleaned.score,
            ip_address,
        };

        match self.db.insert_review(&review, true).await {
            Ok(id) => {
                log!(
                    "[REVIEWS] Saved review {} for {}/{}",
                    id,
                    target.content_type_id,
                    target.content_id
                );
                Ok(Outcome::Redirect(Destination::ThankYou))
            }
            Err(e) if is_unique_violation(&e) => {
                log!("[REVIEWS] Concurrent duplicate review rejected: {:?}", review.reviewer);
                Ok(Outcome::Redirect(Destination::AlreadyRated))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn form_view(
        &self,
        object: ContentObject,
        requester: &Requester,
        submission: ReviewSubmission,
        errors: FormErrors,
        highlight_score: bool,
    ) -> FormView {
        let current = highlight_score.then_some(submission.score.as_str());
        FormView {
            scores: score_options(&self.choices, current),
            object,
            errors,
            ask_contact: !requester.is_authenticated(),
            submission,
        }
    }

    fn preview_view(
        &self,
        object: ContentObject,
        requester: &Requester,
        submission: ReviewSubmission,
    ) -> PreviewView {
        let (name, email) = requester.display_contact(&submission.user_name, &submission.user_email);
        PreviewView {
            score: submission
                .score
                .trim()
                .parse()
                .ok()
                .filter(|s: &f64| s.is_finite())
                .unwrap_or(0.0),
            object,
            name,
            email,
            submission,
        }
    }
}

fn empty_submission(target: TargetRef) -> ReviewSubmission {
    ReviewSubmission {
        content_type_id: target.content_type_id,
        content_id: target.content_id,
        ..Default::default()
    }
}
