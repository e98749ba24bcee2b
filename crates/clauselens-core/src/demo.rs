//! Built-in sample tenancy agreement packed with one-sided clauses.

use clauselens_memory::document::{Document, SourceKind};

pub const DEMO_FILE_NAME: &str = "judge_demo_spicy.txt";
pub const DEMO_SIGNATURE: &str = "judge-demo";

pub const DEMO_CONTRACT: &str = "Rent must be paid on the 1st of each month. If late, a penalty of ₹1,000 per day applies.
Tenant is responsible for ALL repairs, including structural issues.
Landlord may terminate the agreement at any time for any reason with 3 days\u{2019} notice.
Security deposit is non-refundable at landlord\u{2019}s sole discretion.
Any disputes will be resolved only by arbitration in a city chosen by the landlord.";

#[must_use]
pub fn demo_document() -> Document {
    Document::new(
        DEMO_CONTRACT.to_owned(),
        DEMO_SIGNATURE.to_owned(),
        DEMO_FILE_NAME.to_owned(),
        SourceKind::Txt,
    )
}
