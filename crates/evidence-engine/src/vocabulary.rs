//! Domain vocabulary for offer-document compliance
//!
//! Each [`Category`] groups synonyms for one disclosure topic. When any synonym
//! appears in a requirement, every synonym of that category becomes a keyword.
//! The table is built and validated once when the engine is constructed.

use crate::config::KeywordConfig;
use crate::error::ConfigError;
use crate::patterns::{IMPORTANT_TERMS, STOP_WORDS};
use serde::{Deserialize, Serialize};
use shared_types::{Importance, Keyword};
use std::collections::HashSet;

/// Disclosure topics, in keyword priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(rename = "r&d")]
    RnD,
    Revenue,
    Facilities,
    Subsidiaries,
    Directors,
    Employees,
    Customers,
    Suppliers,
    Export,
    Product,
    Risk,
    FinancialMetrics,
    RelatedParty,
    IntellectualProperty,
    ComplianceLegal,
    Litigation,
    Promoters,
    ObjectsOfIssue,
    ShareCapital,
    Dividends,
    CorporateGovernance,
    MaterialContracts,
    Insurance,
    QualityCertifications,
    ExpansionPlans,
    Competition,
    RegulatoryApprovals,
    Taxation,
}

impl Category {
    pub const ALL: [Category; 28] = [
        Category::RnD,
        Category::Revenue,
        Category::Facilities,
        Category::Subsidiaries,
        Category::Directors,
        Category::Employees,
        Category::Customers,
        Category::Suppliers,
        Category::Export,
        Category::Product,
        Category::Risk,
        Category::FinancialMetrics,
        Category::RelatedParty,
        Category::IntellectualProperty,
        Category::ComplianceLegal,
        Category::Litigation,
        Category::Promoters,
        Category::ObjectsOfIssue,
        Category::ShareCapital,
        Category::Dividends,
        Category::CorporateGovernance,
        Category::MaterialContracts,
        Category::Insurance,
        Category::QualityCertifications,
        Category::ExpansionPlans,
        Category::Competition,
        Category::RegulatoryApprovals,
        Category::Taxation,
    ];

    /// Configuration key for this category
    pub fn key(&self) -> &'static str {
        match self {
            Category::RnD => "r&d",
            Category::Revenue => "revenue",
            Category::Facilities => "facilities",
            Category::Subsidiaries => "subsidiaries",
            Category::Directors => "directors",
            Category::Employees => "employees",
            Category::Customers => "customers",
            Category::Suppliers => "suppliers",
            Category::Export => "export",
            Category::Product => "product",
            Category::Risk => "risk",
            Category::FinancialMetrics => "financial_metrics",
            Category::RelatedParty => "related_party",
            Category::IntellectualProperty => "intellectual_property",
            Category::ComplianceLegal => "compliance_legal",
            Category::Litigation => "litigation",
            Category::Promoters => "promoters",
            Category::ObjectsOfIssue => "objects_of_issue",
            Category::ShareCapital => "share_capital",
            Category::Dividends => "dividends",
            Category::CorporateGovernance => "corporate_governance",
            Category::MaterialContracts => "material_contracts",
            Category::Insurance => "insurance",
            Category::QualityCertifications => "quality_certifications",
            Category::ExpansionPlans => "expansion_plans",
            Category::Competition => "competition",
            Category::RegulatoryApprovals => "regulatory_approvals",
            Category::Taxation => "taxation",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// Built-in synonyms, all lowercase
    pub fn default_terms(&self) -> &'static [&'static str] {
        match self {
            Category::RnD => &[
                "research",
                "development",
                "r&d",
                "r & d",
                "r and d",
                "innovation",
                "technical center",
                "research center",
                "development facility",
                "r&d expenditure",
                "r&d spend",
                "r&d investment",
            ],
            Category::Revenue => &[
                "revenue",
                "sales",
                "turnover",
                "income",
                "topline",
                "top line",
                "gross income",
                "operating revenue",
                "net sales",
                "total revenue",
                "revenue from operations",
                "sale of goods",
                "sale of services",
            ],
            Category::Facilities => &[
                "facility",
                "facilities",
                "plant",
                "manufacturing unit",
                "factory",
                "location",
                "premises",
                "establishment",
                "site",
                "registered office",
                "corporate office",
                "branch office",
                "production facility",
            ],
            Category::Subsidiaries => &[
                "subsidiary",
                "subsidiaries",
                "group company",
                "associate",
                "joint venture",
                "jv",
                "wholly owned",
                "step down subsidiary",
                "material subsidiary",
                "foreign subsidiary",
                "unlisted subsidiary",
            ],
            Category::Directors => &[
                "director",
                "board",
                "board of directors",
                "management",
                "key managerial",
                "kmp",
                "key managerial personnel",
                "board member",
                "independent director",
                "executive director",
                "non-executive director",
                "woman director",
                "nominee director",
            ],
            Category::Employees => &[
                "employee",
                "workforce",
                "personnel",
                "headcount",
                "staff",
                "manpower",
                "human resources",
                "team size",
                "attrition",
                "employee strength",
                "permanent employee",
                "contract employee",
            ],
            Category::Customers => &[
                "customer",
                "client",
                "buyer",
                "purchaser",
                "end user",
                "consumer",
                "clientele",
                "customer concentration",
                "top customer",
                "single customer",
                "customer base",
            ],
            Category::Suppliers => &[
                "supplier",
                "vendor",
                "procure",
                "procurement",
                "purchase",
                "raw material",
                "sourcing",
                "supplier concentration",
                "single supplier",
                "vendor base",
                "material supplier",
            ],
            Category::Export => &[
                "export",
                "overseas",
                "foreign",
                "international",
                "abroad",
                "cross border",
                "global",
                "export revenue",
                "export sales",
                "overseas market",
                "international market",
            ],
            Category::Product => &[
                "product",
                "sku",
                "offering",
                "portfolio",
                "product line",
                "product range",
                "product mix",
                "product category",
                "product segment",
                "goods",
                "merchandise",
            ],
            Category::Risk => &[
                "risk",
                "risk factor",
                "threat",
                "concern",
                "challenge",
                "uncertainty",
                "exposure",
                "vulnerability",
                "contingent liability",
                "material risk",
                "business risk",
                "operational risk",
            ],
            Category::FinancialMetrics => &[
                "ebitda",
                "ebit",
                "profit",
                "pat",
                "pbt",
                "margin",
                "gross margin",
                "net margin",
                "operating margin",
                "debt",
                "equity",
                "roce",
                "roe",
                "roa",
                "roic",
                "net worth",
                "assets",
                "liabilities",
                "working capital",
                "current ratio",
                "debt equity ratio",
                "eps",
                "nav",
            ],
            Category::RelatedParty => &[
                "related party",
                "rpt",
                "related party transaction",
                "arm's length",
                "promoter group",
                "promoter",
                "related party disclosure",
                "material rpt",
            ],
            Category::IntellectualProperty => &[
                "trademark",
                "patent",
                "copyright",
                "ip",
                "intellectual property",
                "brand",
                "proprietary",
                "trade secret",
                "design registration",
                "patent application",
                "trademark registration",
            ],
            Category::ComplianceLegal => &[
                "compliance",
                "regulation",
                "sebi",
                "icdr",
                "companies act",
                "statutory",
                "regulatory",
                "filing",
                "disclosure",
                "prospectus",
                "drhp",
                "roc",
                "registrar of companies",
            ],
            Category::Litigation => &[
                "litigation",
                "lawsuit",
                "legal proceeding",
                "dispute",
                "arbitration",
                "tribunal",
                "court case",
                "legal notice",
                "material litigation",
                "pending litigation",
                "threatened litigation",
            ],
            Category::Promoters => &[
                "promoter",
                "promoter group",
                "promoter holding",
                "promoter contribution",
                "promoter shareholding",
                "key promoter",
                "individual promoter",
                "corporate promoter",
            ],
            Category::ObjectsOfIssue => &[
                "object of issue",
                "use of proceeds",
                "fund utilization",
                "capital expenditure",
                "capex",
                "debt repayment",
                "working capital",
                "general corporate purpose",
                "issue proceeds",
                "net proceeds",
            ],
            Category::ShareCapital => &[
                "share capital",
                "equity share",
                "authorized capital",
                "issued capital",
                "subscribed capital",
                "paid up capital",
                "face value",
                "par value",
                "share premium",
                "preference share",
                "equity dilution",
            ],
            Category::Dividends => &[
                "dividend",
                "dividend policy",
                "dividend payout",
                "dividend distribution",
                "interim dividend",
                "final dividend",
                "dividend per share",
                "payout ratio",
            ],
            Category::CorporateGovernance => &[
                "corporate governance",
                "audit committee",
                "nomination committee",
                "remuneration committee",
                "stakeholder committee",
                "code of conduct",
                "vigil mechanism",
                "whistle blower",
            ],
            Category::MaterialContracts => &[
                "material contract",
                "agreement",
                "mou",
                "memorandum",
                "collaboration agreement",
                "licensing agreement",
                "supply agreement",
                "customer agreement",
            ],
            Category::Insurance => &[
                "insurance",
                "insurance policy",
                "insurance coverage",
                "insured",
                "insurable interest",
                "key man insurance",
                "property insurance",
                "marine insurance",
            ],
            Category::QualityCertifications => &[
                "iso",
                "certificate",
                "certification",
                "accreditation",
                "quality standard",
                "iso certified",
                "quality control",
                "quality assurance",
                "qa",
                "qc",
            ],
            Category::ExpansionPlans => &[
                "expansion",
                "expansion plan",
                "growth plan",
                "capex plan",
                "new facility",
                "capacity expansion",
                "geographical expansion",
                "new market",
                "diversification",
            ],
            Category::Competition => &[
                "competitor",
                "competition",
                "competitive landscape",
                "market share",
                "competitive advantage",
                "peer",
                "industry player",
                "market position",
            ],
            Category::RegulatoryApprovals => &[
                "approval",
                "license",
                "permit",
                "registration",
                "regulatory approval",
                "statutory approval",
                "government approval",
                "clearance",
                "consent",
            ],
            Category::Taxation => &[
                "tax",
                "income tax",
                "gst",
                "indirect tax",
                "direct tax",
                "tax assessment",
                "tax dispute",
                "tax benefit",
                "tax holiday",
                "withholding tax",
                "advance tax",
            ],
        }
    }
}

/// Immutable keyword tables shared by every check an engine performs
#[derive(Debug, Clone)]
pub struct Vocabulary {
    categories: Vec<(Category, Vec<String>)>,
    important_terms: Vec<String>,
    stop_words: HashSet<String>,
}

impl Vocabulary {
    /// Build the vocabulary from the built-in tables plus configured overrides
    pub fn from_config(config: &KeywordConfig) -> Result<Self, ConfigError> {
        for key in config.categories.keys() {
            if Category::from_key(key).is_none() {
                return Err(ConfigError::UnknownCategory(key.clone()));
            }
        }

        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let terms = match config.categories.get(category.key()) {
                Some(terms) => {
                    let terms = normalize_terms(terms, category.key())?;
                    if terms.is_empty() {
                        return Err(ConfigError::EmptyCategory(category.key().to_string()));
                    }
                    terms
                }
                None => category
                    .default_terms()
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            };
            categories.push((category, terms));
        }

        let mut important_terms: Vec<String> =
            IMPORTANT_TERMS.iter().map(|t| t.to_string()).collect();
        for term in normalize_terms(&config.extra_important_terms, "important_terms")? {
            if !important_terms.contains(&term) {
                important_terms.push(term);
            }
        }

        let mut stop_words: HashSet<String> = STOP_WORDS.iter().map(|w| w.to_string()).collect();
        stop_words.extend(normalize_terms(&config.extra_stop_words, "stop_words")?);

        Ok(Self {
            categories,
            important_terms,
            stop_words,
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.categories.iter().map(|(c, terms)| (*c, terms.as_slice()))
    }

    pub fn terms(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, terms)| terms.as_slice())
            .unwrap_or(&[])
    }

    /// Categories with at least one synonym contained in the lowercased text
    pub fn matching_categories(&self, text_lower: &str) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|(_, terms)| terms.iter().any(|t| text_lower.contains(t.as_str())))
            .map(|(c, _)| *c)
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn importance_of(&self, term: &str) -> Importance {
        let lower = term.to_lowercase();
        if self
            .important_terms
            .iter()
            .any(|imp| lower.contains(imp.as_str()))
        {
            Importance::Important
        } else {
            Importance::Ordinary
        }
    }

    pub fn keyword(&self, term: impl Into<String>) -> Keyword {
        let term = term.into();
        let importance = self.importance_of(&term);
        Keyword::new(term, importance)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let categories = Category::ALL
            .iter()
            .map(|c| (*c, c.default_terms().iter().map(|t| t.to_string()).collect()))
            .collect();
        Self {
            categories,
            important_terms: IMPORTANT_TERMS.iter().map(|t| t.to_string()).collect(),
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

fn normalize_terms(terms: &[String], owner: &str) -> Result<Vec<String>, ConfigError> {
    let mut normalized: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Err(ConfigError::EmptyTerm(owner.to_string()));
        }
        if !normalized.contains(&term) {
            normalized.push(term);
        }
    }
    Ok(normalized)
}
