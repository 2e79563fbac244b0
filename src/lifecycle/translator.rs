//! Maps storage constraint failures onto the relation they point at.

use crate::core::LifecycleError;
use crate::messages::Messages;
use crate::store::StoreError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{Level, event};

lazy_static! {
    static ref REFERENCING_TABLE: Regex =
        Regex::new(r#"(?i)table\s+"(?:dbo\.)?(\w+)""#).expect("referencing table pattern");
}

/// Kind of data still pointing at a row that could not be hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationCategory {
    Order,
    Invoice,
    User,
    Other,
}

/// Classifies constraint text by the first recognized keyword, checked in
/// order `Order`, `Invoice`, `User`, ignoring case.
pub fn translate(text: &str) -> RelationCategory {
    let text = text.to_lowercase();
    if text.contains("order") {
        RelationCategory::Order
    } else if text.contains("invoice") {
        RelationCategory::Invoice
    } else if text.contains("user") {
        RelationCategory::User
    } else {
        RelationCategory::Other
    }
}

/// True when the text describes a row still referenced by a foreign key.
pub fn is_reference_violation(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("reference constraint") || text.contains("foreign key constraint")
}

/// Name of the referencing table, when the backend message carries one.
pub fn referencing_table(text: &str) -> Option<String> {
    REFERENCING_TABLE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Converts a failed physical delete into the caller-facing error.
///
/// Only the translated relation reaches the message; the raw text is logged.
pub(crate) fn translate_delete_failure(
    entity: &'static str,
    err: StoreError,
    messages: &Messages,
) -> LifecycleError {
    match err {
        StoreError::ConstraintViolation(text) if is_reference_violation(&text) => {
            let relation = translate(&text);
            event!(
                Level::WARN,
                entity,
                relation = ?relation,
                raw = %text,
                "hard delete restricted by a referencing row"
            );
            LifecycleError::ConstraintConflict {
                entity,
                relation,
                referencing_table: referencing_table(&text),
                message: messages.still_referenced(entity, relation),
            }
        }
        other => {
            event!(Level::ERROR, entity, error = %other, "hard delete failed");
            LifecycleError::from_store(other, messages.delete_failed(entity))
        }
    }
}
