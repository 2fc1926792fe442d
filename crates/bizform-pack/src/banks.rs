//! # Bank Catalog
//!
//! Business checking products shown by the banking comparison. The catalog
//! is national; it is not filtered by location.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// One business checking product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankOption {
    /// Product name.
    pub name: String,
    /// Bank home page.
    pub website: String,
    /// Page where the account can be opened.
    pub application_link: String,
    /// Opening deposit, as displayed.
    pub min_deposit: String,
    /// Monthly maintenance fee, as displayed.
    pub monthly_fee: String,
    /// Headline features.
    pub features: Vec<String>,
    /// Customer rating out of five.
    pub rating: f32,
    /// How to avoid fees, or what stands out.
    pub benefits: String,
}

#[allow(clippy::too_many_arguments)]
fn bank(
    name: &str,
    website: &str,
    application_link: &str,
    min_deposit: &str,
    monthly_fee: &str,
    features: &[&str],
    rating: f32,
    benefits: &str,
) -> BankOption {
    BankOption {
        name: name.to_string(),
        website: website.to_string(),
        application_link: application_link.to_string(),
        min_deposit: min_deposit.to_string(),
        monthly_fee: monthly_fee.to_string(),
        features: features.iter().map(|s| s.to_string()).collect(),
        rating,
        benefits: benefits.to_string(),
    }
}

fn build() -> Vec<BankOption> {
    vec![
        bank(
            "Chase Business Complete Banking",
            "https://www.chase.com",
            "https://www.chase.com/business/checking/business-complete-checking",
            "$0",
            "$15 (waivable)",
            &["No minimum balance", "100 free transactions", "Mobile banking", "Bill pay"],
            4.2,
            "Waive monthly fee with $2,000 average balance or $15,000 in qualifying deposits",
        ),
        bank(
            "Bank of America Business Advantage",
            "https://www.bankofamerica.com",
            "https://www.bankofamerica.com/smallbusiness/deposits/business-checking-account/",
            "$25",
            "$16 (waivable)",
            &[
                "200 free transactions",
                "Online banking",
                "Mobile check deposit",
                "Overdraft protection",
            ],
            4.0,
            "Waive monthly fee with $5,000 minimum daily balance",
        ),
        bank(
            "Wells Fargo Simple Business Checking",
            "https://www.wellsfargo.com",
            "https://www.wellsfargo.com/biz/checking/simple-business-checking/",
            "$25",
            "$10",
            &["100 free transactions", "Mobile banking", "Business debit card", "Online bill pay"],
            3.8,
            "Low monthly fee with basic business banking features",
        ),
        bank(
            "Capital One Spark Classic",
            "https://www.capitalone.com",
            "https://www.capitalone.com/small-business-bank/checking-accounts/",
            "$0",
            "$0",
            &["No monthly fee", "No minimum balance", "Unlimited transactions", "Mobile banking"],
            4.5,
            "Completely free business checking with no hidden fees",
        ),
        bank(
            "PNC Business Checking",
            "https://www.pnc.com",
            "https://www.pnc.com/en/small-business/banking/checking.html",
            "$100",
            "$15 (waivable)",
            &[
                "150 free transactions",
                "Mobile banking",
                "Business credit line access",
                "Cash management",
            ],
            4.1,
            "Waive monthly fee with $500 average balance",
        ),
        bank(
            "TD Bank Simple Business",
            "https://www.td.com",
            "https://www.td.com/us/en/business-banking/accounts",
            "$0",
            "$15 (waivable)",
            &[
                "150 free transactions",
                "Mobile banking",
                "Business debit card",
                "Overdraft protection",
            ],
            4.0,
            "Waive monthly fee with $2,500 minimum daily balance",
        ),
        bank(
            "Regions Business Checking",
            "https://www.regions.com",
            "https://www.regions.com/business-banking/business-checking",
            "$50",
            "$14 (waivable)",
            &["200 free transactions", "Online banking", "Mobile check deposit", "Business tools"],
            3.9,
            "Waive monthly fee with $1,500 average balance",
        ),
        bank(
            "US Bank Business Checking",
            "https://www.usbank.com",
            "https://www.usbank.com/business-banking/business-checking-account.html",
            "$25",
            "$15 (waivable)",
            &[
                "125 free transactions",
                "Mobile banking",
                "Business credit card integration",
                "Cash management",
            ],
            4.0,
            "Waive monthly fee with $1,500 minimum daily balance",
        ),
        bank(
            "Huntington Business Checking",
            "https://www.huntington.com",
            "https://www.huntington.com/small-business/deposits/business-checking",
            "$0",
            "$9",
            &[
                "200 free transactions",
                "Mobile banking",
                "Overdraft protection",
                "Business toolkit",
            ],
            4.2,
            "Low monthly fee with extensive transaction allowance",
        ),
        bank(
            "Fifth Third Business Checking",
            "https://www.53.com",
            "https://www.53.com/business/bank/checking",
            "$100",
            "$11",
            &["100 free transactions", "Mobile banking", "Business debit card", "Online bill pay"],
            3.8,
            "Competitive monthly fee with good transaction allowance",
        ),
    ]
}

/// The full catalog, in presentation order.
pub fn bank_catalog() -> &'static [BankOption] {
    static CATALOG: OnceLock<Vec<BankOption>> = OnceLock::new();
    CATALOG.get_or_init(build)
}
