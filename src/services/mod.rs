//! Service layer for SpendCast
//!
//! Business logic on top of the ledger: validating new expenses, checking
//! receipt extraction output, and generating saving tips.

pub mod expense;
pub mod extraction;
pub mod suggestion;

pub use expense::{BatchOutcome, ExpenseFilter, ExpenseService, Rejection};
pub use extraction::{parse_extraction_response, ExtractionOutcome, EXTRACTION_INSTRUCTIONS};
pub use suggestion::{
    build_tip_requests, generate_suggestions, CommandTipProvider, Suggestion, TipOrigin,
    TipProvider, TipRequest,
};
