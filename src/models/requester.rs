use crate::models::review::ReviewerIdentity;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

/// The party making the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requester {
    Authenticated(Account),
    Anonymous { session_key: Option<String> },
}

impl Requester {
    pub fn anonymous(session_key: impl Into<String>) -> Self {
        Requester::Anonymous {
            session_key: Some(session_key.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Requester::Authenticated(_))
    }

    /// Key used for the duplicate check. An anonymous visitor without a
    /// session has no identity yet.
    pub fn identity(&self) -> Option<ReviewerIdentity> {
        match self {
            Requester::Authenticated(account) => Some(ReviewerIdentity::User(account.id)),
            Requester::Anonymous { session_key } => {
                session_key.clone().map(ReviewerIdentity::Session)
            }
        }
    }

    /// Name and email shown for a review: account values win over whatever
    /// was submitted in the form.
    pub fn display_contact(&self, user_name: &str, user_email: &str) -> (String, String) {
        match self {
            Requester::Authenticated(account) => (account.full_name.clone(), account.email.clone()),
            Requester::Anonymous { .. } => (user_name.to_string(), user_email.to_string()),
        }
    }
}
