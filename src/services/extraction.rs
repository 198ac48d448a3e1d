//! Receipt extraction validation
//!
//! A vision model turns a receipt photo into a JSON array of line items.
//! Its output is untrusted: this module strips markdown fences, parses the
//! array, and keeps only items that form valid expenses.

use serde_json::Value;

use crate::error::{SpendError, SpendResult};
use crate::models::{ExpenseCategory, ExpenseDraft, Money, MAX_AMOUNT, MAX_DESCRIPTION_LEN};

use super::expense::Rejection;

/// At most this many items are taken from one receipt
pub const MAX_EXTRACTED_ITEMS: usize = 20;

/// Description used when the model gives none
pub const DEFAULT_DESCRIPTION: &str = "Item";

/// Instructions to send alongside the receipt image
pub const EXTRACTION_INSTRUCTIONS: &str = "Extract all items and prices from this receipt/bill image. \
Return ONLY valid JSON array. Each object must have: \"description\" (string), \"amount\" (number), \
\"category\" (one of: Food, Transportation, Utilities, Entertainment, Healthcare, Other). \
Example: [{\"description\":\"Coffee\",\"amount\":5.50,\"category\":\"Food\"}]";

const SNIPPET_LEN: usize = 100;

/// Validated result of one extraction response
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Valid items, in response order, capped at [`MAX_EXTRACTED_ITEMS`]
    pub accepted: Vec<ExpenseDraft>,
    pub rejected: Vec<Rejection>,
}

/// Parse and validate a model's raw text response
///
/// Unparseable or non-array responses fail the whole upload, as does a
/// response with no usable items.
pub fn parse_extraction_response(response: &str) -> SpendResult<ExtractionOutcome> {
    let cleaned = response.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
        SpendError::Extraction(format!(
            "Model did not return valid JSON ({}). Response received: {}...",
            e,
            snippet(response)
        ))
    })?;

    let Value::Array(items) = parsed else {
        return Err(SpendError::Extraction(
            "Model response is not a list, expected an array".into(),
        ));
    };

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match validate_item(item) {
            Ok(draft) => accepted.push(draft),
            Err(reason) => rejected.push(Rejection { index, reason }),
        }
    }

    if accepted.len() > MAX_EXTRACTED_ITEMS {
        tracing::debug!(
            dropped = accepted.len() - MAX_EXTRACTED_ITEMS,
            "truncating extracted items"
        );
        accepted.truncate(MAX_EXTRACTED_ITEMS);
    }

    if accepted.is_empty() {
        return Err(SpendError::Extraction(
            "No valid expenses found in the response".into(),
        ));
    }

    tracing::info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "validated extraction response"
    );
    Ok(ExtractionOutcome { accepted, rejected })
}

fn validate_item(item: &Value) -> Result<ExpenseDraft, String> {
    let Value::Object(fields) = item else {
        return Err("item is not an object".into());
    };

    let amount = match fields.get("amount") {
        Some(Value::Number(n)) => n.as_f64().ok_or("amount is not a finite number")?,
        Some(_) => return Err("amount is not a number".into()),
        None => return Err("amount is missing".into()),
    };
    if amount <= 0.0 || amount >= MAX_AMOUNT.as_f64() {
        return Err(format!("amount {} is out of range", amount));
    }
    let amount = Money::from_f64(amount).ok_or("amount is not a finite number")?;

    let category = fields
        .get("category")
        .and_then(Value::as_str)
        .and_then(ExpenseCategory::from_name)
        .unwrap_or_default();

    let description = match fields.get("description").and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.chars().take(MAX_DESCRIPTION_LEN).collect(),
        _ => DEFAULT_DESCRIPTION.to_string(),
    };

    let draft = ExpenseDraft::new(amount, category, description);
    draft.validate().map_err(|e| e.to_string())?;
    Ok(draft)
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_fenced_response() {
        let response = "```json\n[{\"description\":\"Coffee\",\"amount\":5.50,\"category\":\"Food\"}]\n```";
        let outcome = parse_extraction_response(response).unwrap();

        assert_eq!(outcome.accepted.len(), 1);
        let item = &outcome.accepted[0];
        assert_eq!(item.amount.cents(), 550);
        assert_eq!(item.category, ExpenseCategory::Food);
        assert_eq!(item.description, "Coffee");
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn test_invalid_items_are_rejected_individually() {
        let response = r#"[
            {"description": "Bus", "amount": 2.75, "category": "Transportation"},
            {"description": "Free sample", "amount": 0},
            {"description": "Car", "amount": 25000},
            {"description": "Text", "amount": "12.00"},
            {"description": "Nothing"},
            "just a string",
            {"description": "Aspirin", "amount": 8, "category": "Healthcare"}
        ]"#;

        let outcome = parse_extraction_response(response).unwrap();
        assert_eq!(outcome.accepted.len(), 2);
        let rejected: Vec<usize> = outcome.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unknown_category_falls_back_to_other() {
        let outcome =
            parse_extraction_response(r#"[{"description":"Gift","amount":20,"category":"Gifts"}]"#)
                .unwrap();
        assert_eq!(outcome.accepted[0].category, ExpenseCategory::Other);

        let outcome = parse_extraction_response(r#"[{"amount":20}]"#).unwrap();
        assert_eq!(outcome.accepted[0].category, ExpenseCategory::Other);
    }

    #[test]
    fn test_description_default_and_truncation() {
        let long = "x".repeat(80);
        let response = format!(
            r#"[{{"amount": 1, "description": ""}}, {{"amount": 2, "description": "{}"}}]"#,
            long
        );
        let outcome = parse_extraction_response(&response).unwrap();

        assert_eq!(outcome.accepted[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(outcome.accepted[1].description.chars().count(), MAX_DESCRIPTION_LEN);
    }

    #[test]
    fn test_caps_at_twenty_items() {
        let items: Vec<String> = (1..=30)
            .map(|i| format!(r#"{{"description":"item {}","amount":{}}}"#, i, i))
            .collect();
        let response = format!("[{}]", items.join(","));

        let outcome = parse_extraction_response(&response).unwrap();
        assert_eq!(outcome.accepted.len(), MAX_EXTRACTED_ITEMS);
        assert_eq!(outcome.accepted[19].description, "item 20");
    }

    #[test]
    fn test_unparseable_response_fails_with_snippet() {
        let err = parse_extraction_response("Sorry, I can't read that receipt.").unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("Sorry, I can't read that receipt."));
    }

    #[test]
    fn test_object_response_fails() {
        let err = parse_extraction_response(r#"{"amount": 5}"#).unwrap_err();
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_no_valid_items_fails() {
        let err = parse_extraction_response(r#"[{"amount": -3}]"#).unwrap_err();
        assert!(err.to_string().contains("No valid expenses"));
    }
}
