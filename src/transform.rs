// src/transform.rs

use std::collections::BTreeSet;

use crate::{
    config::Config,
    models::compose::{ComposeFormData, TransformedMessageRequest},
    utils::form_value::{FormValue, is_absent_or_zero, to_bool, to_int, to_int_or_zero, to_text},
};

/// Shapes a raw compose submission into the canonical message request.
///
/// Total over every input: missing or malformed optional fields fall back
/// to their defaults. The only outside read is `config.default_message_type`.
pub fn transform_post_data(form: &ComposeFormData, config: &Config) -> TransformedMessageRequest {
    TransformedMessageRequest {
        subject: to_text(form.subject.as_ref()),
        message: message_body(form),
        mailto_ids: mailto_ids(form.mailto_ids.as_ref()),
        additional_emails: additional_emails(form.additional_emails.as_ref()),
        signature_id: to_int_or_zero(form.signature_id.as_ref()),
        message_type: message_type(form.message_type.as_ref(), &config.default_message_type),
        receipt: to_bool(form.receipt.as_ref()),
        alternate_email_id: alternate_email_id(form.from_email_id.as_ref()),
        to_send_at: to_int_or_zero(form.to_send_at.as_ref()),
        attachments_draftitem_id: to_int_or_zero(form.attachments.as_ref()),
        no_reply: no_reply(form.from_email_id.as_ref()),
    }
}

fn message_body(form: &ComposeFormData) -> String {
    let text = form
        .message_editor
        .as_ref()
        .and_then(|editor| editor.text.as_ref());
    to_text(text)
}

/// `"3,7,9,"` -> `["3", "7", "9"]`. Every trailing comma is stripped first,
/// so a field of only commas still yields one empty id.
fn mailto_ids(value: Option<&FormValue>) -> Vec<String> {
    if is_absent_or_zero(value) {
        return Vec::new();
    }

    to_text(value)
        .trim_end_matches(',')
        .split(',')
        .map(str::to_string)
        .collect()
}

fn additional_emails(value: Option<&FormValue>) -> BTreeSet<String> {
    if is_absent_or_zero(value) {
        return BTreeSet::new();
    }

    to_text(value)
        .split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

fn message_type(value: Option<&FormValue>, default_message_type: &str) -> String {
    if is_absent_or_zero(value) {
        default_message_type.to_string()
    } else {
        to_text(value)
    }
}

/// Positive ids are kept; zero, negatives and garbage collapse to 0.
fn alternate_email_id(value: Option<&FormValue>) -> i64 {
    to_int(value).max(0)
}

/// Only an exact `-1` selects no-reply, not any negative id.
fn no_reply(value: Option<&FormValue>) -> bool {
    value.is_some_and(|id| id.loosely_equals(-1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::compose::MessageEditor;

    fn config() -> Config {
        Config {
            default_message_type: "message".to_string(),
            ..Config::default()
        }
    }

    fn text(s: &str) -> Option<FormValue> {
        Some(FormValue::from(s))
    }

    fn emails(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_form_is_fully_defaulted() {
        let result = transform_post_data(&ComposeFormData::default(), &config());

        assert_eq!(
            result,
            TransformedMessageRequest {
                subject: String::new(),
                message: String::new(),
                mailto_ids: vec![],
                additional_emails: BTreeSet::new(),
                signature_id: 0,
                message_type: "message".to_string(),
                receipt: false,
                alternate_email_id: 0,
                to_send_at: 0,
                attachments_draftitem_id: 0,
                no_reply: false,
            }
        );
    }

    #[test]
    fn test_full_form() {
        let form = ComposeFormData {
            subject: text("Week 3 reading"),
            message_editor: Some(MessageEditor { text: text("<p>Chapters 4-5</p>") }),
            mailto_ids: text("3,7,9,"),
            additional_emails: text("ta@example.com"),
            signature_id: text("5"),
            message_type: text("email"),
            receipt: text("1"),
            from_email_id: text("4"),
            to_send_at: text("1700000000"),
            attachments: text("912"),
            ..Default::default()
        };

        let result = transform_post_data(&form, &config());

        assert_eq!(result.subject, "Week 3 reading");
        assert_eq!(result.message, "<p>Chapters 4-5</p>");
        assert_eq!(result.mailto_ids, vec!["3", "7", "9"]);
        assert_eq!(result.additional_emails, emails(&["ta@example.com"]));
        assert_eq!(result.signature_id, 5);
        assert_eq!(result.message_type, "email");
        assert!(result.receipt);
        assert_eq!(result.alternate_email_id, 4);
        assert!(!result.no_reply);
        assert_eq!(result.to_send_at, 1_700_000_000);
        assert_eq!(result.attachments_draftitem_id, 912);
    }

    #[test]
    fn test_mailto_ids() {
        assert!(mailto_ids(None).is_empty());
        assert!(mailto_ids(text("").as_ref()).is_empty());
        assert_eq!(mailto_ids(text(",").as_ref()), vec![String::new()]);
        assert_eq!(mailto_ids(text(",,").as_ref()), vec![""]);
        assert_eq!(mailto_ids(text("3,7,9,,,").as_ref()), vec!["3", "7", "9"]);
        assert_eq!(mailto_ids(text("3,,7").as_ref()), vec!["3", "", "7"]);
        assert_eq!(mailto_ids(Some(FormValue::Int(12)).as_ref()), vec!["12"]);
    }

    #[test]
    fn test_additional_emails_dedup_trim_and_blank_drop() {
        let result = additional_emails(text("a@x.com, a@x.com ,  ,b@y.com").as_ref());
        assert_eq!(result, emails(&["a@x.com", "b@y.com"]));

        assert!(additional_emails(None).is_empty());
        assert!(additional_emails(text(" , ").as_ref()).is_empty());
    }

    #[test]
    fn test_signature_id() {
        let cfg = config();
        let mut form = ComposeFormData::default();
        assert_eq!(transform_post_data(&form, &cfg).signature_id, 0);

        form.signature_id = text("0");
        assert_eq!(transform_post_data(&form, &cfg).signature_id, 0);

        form.signature_id = text("5");
        assert_eq!(transform_post_data(&form, &cfg).signature_id, 5);

        form.signature_id = text("12abc");
        assert_eq!(transform_post_data(&form, &cfg).signature_id, 12);

        form.signature_id = text("abc");
        assert_eq!(transform_post_data(&form, &cfg).signature_id, 0);
    }

    #[test]
    fn test_message_type_falls_back_to_configured_default() {
        assert_eq!(message_type(None, "message"), "message");
        assert_eq!(message_type(text("").as_ref(), "message"), "message");
        assert_eq!(message_type(text("0").as_ref(), "message"), "message");
        assert_eq!(message_type(Some(FormValue::Int(0)).as_ref(), "message"), "message");
        assert_eq!(message_type(text("announcement").as_ref(), "message"), "announcement");
    }

    #[test]
    fn test_receipt_truthiness() {
        let cfg = config();
        let mut form = ComposeFormData::default();

        form.receipt = text("0");
        assert!(!transform_post_data(&form, &cfg).receipt);

        form.receipt = Some(FormValue::Bool(true));
        assert!(transform_post_data(&form, &cfg).receipt);

        form.receipt = text("yes");
        assert!(transform_post_data(&form, &cfg).receipt);
    }

    #[test]
    fn test_from_email_id_and_no_reply() {
        let cfg = config();
        let mut form = ComposeFormData {
            from_email_id: Some(FormValue::Int(-1)),
            ..Default::default()
        };
        let result = transform_post_data(&form, &cfg);
        assert!(result.no_reply);
        assert_eq!(result.alternate_email_id, 0);

        form.from_email_id = text("-1");
        assert!(transform_post_data(&form, &cfg).no_reply);

        // A JSON `true` is not the no-reply marker.
        form.from_email_id = Some(FormValue::Bool(true));
        let result = transform_post_data(&form, &cfg);
        assert!(!result.no_reply);
        assert_eq!(result.alternate_email_id, 1);

        form.from_email_id = Some(FormValue::Int(-2));
        let result = transform_post_data(&form, &cfg);
        assert!(!result.no_reply);
        assert_eq!(result.alternate_email_id, 0);

        form.from_email_id = Some(FormValue::Int(4));
        let result = transform_post_data(&form, &cfg);
        assert!(!result.no_reply);
        assert_eq!(result.alternate_email_id, 4);

        form.from_email_id = text("-1abc");
        let result = transform_post_data(&form, &cfg);
        assert!(!result.no_reply);
        assert_eq!(result.alternate_email_id, 0);

        form.from_email_id = text("junk");
        assert_eq!(transform_post_data(&form, &cfg).alternate_email_id, 0);
    }

    #[test]
    fn test_to_send_at_and_attachments() {
        let cfg = config();
        let mut form = ComposeFormData {
            to_send_at: text("0"),
            attachments: text(""),
            ..Default::default()
        };
        let result = transform_post_data(&form, &cfg);
        assert_eq!(result.to_send_at, 0);
        assert_eq!(result.attachments_draftitem_id, 0);
        assert!(!result.is_scheduled());

        form.to_send_at = Some(FormValue::Int(1_700_000_000));
        form.attachments = Some(FormValue::Int(77));
        let result = transform_post_data(&form, &cfg);
        assert_eq!(result.attachments_draftitem_id, 77);
        assert_eq!(
            result.scheduled_at().map(|at| at.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_has_recipients() {
        let cfg = config();
        let mut form = ComposeFormData::default();
        assert!(!transform_post_data(&form, &cfg).has_recipients());

        form.additional_emails = text("guest@example.com");
        assert!(transform_post_data(&form, &cfg).has_recipients());
    }

    #[test]
    fn test_transform_is_idempotent() {
        let cfg = config();
        let form = ComposeFormData {
            subject: text("Hi"),
            mailto_ids: text("1,2,"),
            additional_emails: text("b@y.com,a@x.com,b@y.com"),
            from_email_id: text("-1"),
            ..Default::default()
        };

        assert_eq!(transform_post_data(&form, &cfg), transform_post_data(&form, &cfg));
    }
}
