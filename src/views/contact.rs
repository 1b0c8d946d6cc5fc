//! Contact form.

use serde::Serialize;
use thiserror::Error;

use crate::db::{models::NewContactMessage, Collection, DataClient, DataError};

const SEND_FAILED: &str = "Failed to send message. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(&'static str),

    #[error(transparent)]
    Store(#[from] DataError),
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub fields: NewContactMessage,
    pub submitting: bool,
    pub submitted: bool,
    pub error: Option<String>,
}

impl ContactForm {
    pub fn new(fields: NewContactMessage) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), SubmitError> {
        let f = &self.fields;
        if [&f.name, &f.email, &f.subject, &f.message]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(SubmitError::Invalid("All fields are required."));
        }
        if !f.email.contains('@') {
            return Err(SubmitError::Invalid("Please enter a valid email address."));
        }
        Ok(())
    }

    /// Stores the message. On success the fields are cleared; on failure they
    /// are kept and `error` holds a message for the user.
    pub async fn submit(&mut self, client: &DataClient) -> Result<(), SubmitError> {
        self.error = None;
        self.submitted = false;
        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.submitting = true;
        let result = client.insert(Collection::ContactMessages, &self.fields).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                tracing::info!("contact message stored");
                self.fields = NewContactMessage::default();
                self.submitted = true;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error submitting contact message");
                self.error = Some(e.user_message(SEND_FAILED));
                Err(e.into())
            }
        }
    }
}
