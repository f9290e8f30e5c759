use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::form_value::FormValue;

/// Raw compose form submission.
/// Every key is optional; `null` and a missing key are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComposeFormData {
    pub subject: Option<FormValue>,
    pub message_editor: Option<MessageEditor>,

    /// Comma-joined recipient user ids, usually with a trailing comma.
    pub mailto_ids: Option<FormValue>,
    /// Comma-joined external addresses typed by the sender.
    pub additional_emails: Option<FormValue>,

    pub signature_id: Option<FormValue>,
    pub message_type: Option<FormValue>,
    pub receipt: Option<FormValue>,

    /// Alternate sender address id; `-1` selects "no reply".
    pub from_email_id: Option<FormValue>,
    /// Unix timestamp to schedule the send at.
    pub to_send_at: Option<FormValue>,
    /// Draft item id of the attachments file area.
    pub attachments: Option<FormValue>,

    // Action markers.
    pub save: Option<FormValue>,
    pub delete_signature_flag: Option<FormValue>,
}

/// Rich-text editor payload. Only `text` is used; `format`/`itemid` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageEditor {
    pub text: Option<FormValue>,
}

/// Which action a submission represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeIntent {
    Send,
    Save,
    Delete,
}

impl ComposeFormData {
    /// Builds the form from flat urlencoded pairs.
    /// `message_editor[text]` is routed into the nested editor; the last duplicate wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = ComposeFormData::default();

        for (key, value) in pairs {
            let value = Some(FormValue::from(value));
            match key.as_str() {
                "subject" => form.subject = value,
                "message_editor[text]" => {
                    form.message_editor.get_or_insert_with(MessageEditor::default).text = value;
                }
                "mailto_ids" => form.mailto_ids = value,
                "additional_emails" => form.additional_emails = value,
                "signature_id" => form.signature_id = value,
                "message_type" => form.message_type = value,
                "receipt" => form.receipt = value,
                "from_email_id" => form.from_email_id = value,
                "to_send_at" => form.to_send_at = value,
                "attachments" => form.attachments = value,
                "save" => form.save = value,
                "delete_signature_flag" => form.delete_signature_flag = value,
                _ => {}
            }
        }

        form
    }

    /// True when the form was submitted through the "save" button.
    pub fn to_save_signature(&self) -> bool {
        self.save.is_some()
    }

    /// True when `delete_signature_flag` is `1`.
    pub fn to_delete_signature(&self) -> bool {
        self.delete_signature_flag
            .as_ref()
            .is_some_and(|flag| flag.loosely_equals(1))
    }

    /// Delete takes precedence over save; anything else is a send.
    pub fn intent(&self) -> ComposeIntent {
        if self.to_delete_signature() {
            ComposeIntent::Delete
        } else if self.to_save_signature() {
            ComposeIntent::Save
        } else {
            ComposeIntent::Send
        }
    }
}

/// Canonical compose payload handed to the message composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedMessageRequest {
    pub subject: String,
    pub message: String,
    pub mailto_ids: Vec<String>,
    pub additional_emails: BTreeSet<String>,
    pub signature_id: i64,
    pub message_type: String,
    pub receipt: bool,
    pub alternate_email_id: i64,
    pub to_send_at: i64,
    pub attachments_draftitem_id: i64,
    pub no_reply: bool,
}

impl TransformedMessageRequest {
    /// The scheduled send time, if one was given and is representable.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        if self.to_send_at <= 0 {
            return None;
        }
        DateTime::from_timestamp(self.to_send_at, 0)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled_at().is_some()
    }

    pub fn has_recipients(&self) -> bool {
        !self.mailto_ids.is_empty() || !self.additional_emails.is_empty()
    }
}
