use serde_json::Value;
use time::OffsetDateTime;

use super::{rules, Outcome, ValidationError};
use crate::transactions::repo_types::{TransactionKind, TransactionPatch};

const AMOUNT_NOT_NUMBER: &str = "Amount must be a number";
const TYPE_INVALID: &str = "Type must be either \"Income\" or \"Expense\"";
const CATEGORY_EMPTY: &str = "Category cannot be empty";
const DESCRIPTION_TOO_LONG: &str = "Description cannot be longer than 250 characters";
const TAG_EMPTY: &str = "Tags cannot be empty";
const TAG_TOO_LONG: &str = "Each tag cannot be longer than 30 characters";
const TOO_MANY_TAGS: &str = "You can add a maximum of 10 tags";
const DATE_INVALID: &str = "Date must be a valid date format";

const MAX_DESCRIPTION: usize = 250;
const MAX_TAG: usize = 30;
const MAX_TAGS: usize = 10;

/// Fields a caller may set on a transaction. `user` is deliberately absent.
const FIELDS: [&str; 6] = ["amount", "type", "category", "description", "tags", "date"];

/// A create payload that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub date: Option<OffsetDateTime>,
}

pub fn create(payload: &Value) -> Outcome<TransactionInput> {
    let obj = rules::object(payload)?;

    let amount = rules::required(obj, "amount", "Amount is required")?;
    let amount = rules::number(amount, AMOUNT_NOT_NUMBER)?;

    let kind = rules::required(obj, "type", "Type is required")?;
    let kind = rules::one_of::<TransactionKind>(kind, TYPE_INVALID)?;

    let category = rules::required(obj, "category", "Category is required")?;
    let category = category_value(category)?;

    let description = obj.get("description").map(description_value).transpose()?;
    let tags = obj.get("tags").map(tags_value).transpose()?;
    let date = obj
        .get("date")
        .map(|v| rules::date(v, DATE_INVALID))
        .transpose()?;

    Ok(TransactionInput {
        amount,
        kind,
        category,
        description: description.unwrap_or_default(),
        tags: tags.unwrap_or_default(),
        date,
    })
}

pub fn update(payload: &Value) -> Outcome<TransactionPatch> {
    let obj = rules::object(payload)?;
    if !FIELDS.iter().any(|f| obj.contains_key(*f)) {
        return Err(ValidationError::new(
            "At least one field must be provided for update",
        ));
    }

    Ok(TransactionPatch {
        amount: obj
            .get("amount")
            .map(|v| rules::number(v, AMOUNT_NOT_NUMBER))
            .transpose()?,
        kind: obj
            .get("type")
            .map(|v| rules::one_of::<TransactionKind>(v, TYPE_INVALID))
            .transpose()?,
        category: obj.get("category").map(category_value).transpose()?,
        description: obj.get("description").map(description_value).transpose()?,
        tags: obj.get("tags").map(tags_value).transpose()?,
        date: obj
            .get("date")
            .map(|v| rules::date(v, DATE_INVALID))
            .transpose()?,
    })
}

fn category_value(value: &Value) -> Outcome<String> {
    Ok(rules::non_blank("category", value, CATEGORY_EMPTY)?
        .trim()
        .to_string())
}

fn description_value(value: &Value) -> Outcome<String> {
    let description = rules::string("description", value)?.trim();
    rules::max_chars(description, MAX_DESCRIPTION, DESCRIPTION_TOO_LONG)?;
    Ok(description.to_string())
}

fn tags_value(value: &Value) -> Outcome<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::new("\"tags\" must be an array"))?;

    let mut tags = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let tag = rules::string(&format!("tags[{i}]"), item)?;
        rules::min_chars(tag, 1, TAG_EMPTY)?;
        rules::max_chars(tag, MAX_TAG, TAG_TOO_LONG)?;
        tags.push(tag.to_string());
    }
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::new(TOO_MANY_TAGS));
    }
    Ok(tags)
}
