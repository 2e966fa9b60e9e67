//! Business records as they arrive from the ERP API
//!
//! All fields are defaulted and loosely typed (see [`crate::de`]), so
//! composers can read any field without presence checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de;

/// Which composer a record is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    Report,
    Project,
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invoice" => Ok(DocumentKind::Invoice),
            "report" | "business-report" => Ok(DocumentKind::Report),
            "project" | "project-progress" => Ok(DocumentKind::Project),
            other => Err(format!("Unknown document kind: {other}")),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Report => "report",
            DocumentKind::Project => "project",
        })
    }
}

/// Direction of an invoice relative to the tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    #[default]
    Sales,
    Purchase,
}

impl<'de> Deserialize<'de> for Flow {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = de::value_to_string(&Value::deserialize(d)?);
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "purchase" | "purchases" => Flow::Purchase,
            _ => Flow::Sales,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "de::string")]
    pub city: String,
    #[serde(deserialize_with = "de::string")]
    pub district: String,
    #[serde(deserialize_with = "de::string")]
    pub street: String,
}

impl Address {
    /// `city, district` with empty parts left out
    pub fn summary(&self) -> String {
        [self.city.trim(), self.district.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub vat_number: Option<String>,
    #[serde(deserialize_with = "de::object")]
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    #[serde(deserialize_with = "de::string")]
    pub description: String,
    #[serde(deserialize_with = "de::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::number")]
    pub unit_price: f64,
    /// Percent, e.g. `15` for 15 %
    #[serde(deserialize_with = "de::number")]
    pub tax_rate: f64,
    #[serde(deserialize_with = "de::opt_number")]
    pub line_total: Option<f64>,
    #[serde(deserialize_with = "de::opt_number")]
    pub tax_amount: Option<f64>,
    #[serde(deserialize_with = "de::opt_number")]
    pub line_total_with_tax: Option<f64>,
}

impl LineItem {
    pub fn computed_line_total(&self) -> f64 {
        self.line_total
            .unwrap_or(self.quantity * self.unit_price)
    }

    pub fn computed_tax_amount(&self) -> f64 {
        self.tax_amount
            .unwrap_or_else(|| self.computed_line_total() * self.tax_rate / 100.0)
    }

    pub fn computed_total_with_tax(&self) -> f64 {
        self.line_total_with_tax
            .unwrap_or_else(|| self.computed_line_total() + self.computed_tax_amount())
    }
}

/// Saudi e-invoicing (ZATCA) metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Zatca {
    /// Image data URI or the base64 TLV payload to encode
    #[serde(deserialize_with = "de::opt_string")]
    pub qr_code: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub uuid: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub invoice_hash: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceRecord {
    #[serde(deserialize_with = "de::string")]
    pub invoice_number: String,
    #[serde(deserialize_with = "de::string")]
    pub issue_date: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "de::object", alias = "supplier")]
    pub seller: Party,
    #[serde(deserialize_with = "de::object", alias = "customer")]
    pub buyer: Party,
    #[serde(deserialize_with = "de::list", alias = "items")]
    pub line_items: Vec<LineItem>,
    #[serde(deserialize_with = "de::string")]
    pub currency: String,
    #[serde(deserialize_with = "de::opt_number")]
    pub taxable_amount: Option<f64>,
    #[serde(deserialize_with = "de::opt_number")]
    pub total_tax: Option<f64>,
    #[serde(deserialize_with = "de::opt_number")]
    pub grand_total: Option<f64>,
    #[serde(deserialize_with = "de::opt_object")]
    pub zatca: Option<Zatca>,
    pub flow: Flow,
    #[serde(deserialize_with = "de::opt_string")]
    pub invoice_type: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub notes: Option<String>,
}

/// Subtotal, tax and grand total of an invoice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub taxable: f64,
    pub tax: f64,
    pub grand: f64,
}

impl InvoiceRecord {
    /// Record totals where present, otherwise sums of the computed row values
    pub fn totals(&self) -> InvoiceTotals {
        let sum = |f: fn(&LineItem) -> f64| self.line_items.iter().map(f).sum::<f64>();
        InvoiceTotals {
            taxable: self
                .taxable_amount
                .unwrap_or_else(|| sum(LineItem::computed_line_total)),
            tax: self
                .total_tax
                .unwrap_or_else(|| sum(LineItem::computed_tax_amount)),
            grand: self
                .grand_total
                .unwrap_or_else(|| sum(LineItem::computed_total_with_tax)),
        }
    }

    /// The other party from the tenant's point of view
    pub fn counterparty(&self) -> &Party {
        match self.flow {
            Flow::Sales => &self.buyer,
            Flow::Purchase => &self.seller,
        }
    }

    pub fn is_simplified(&self) -> bool {
        self.invoice_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("simplified"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Period {
    #[serde(deserialize_with = "de::string")]
    pub from: String,
    #[serde(deserialize_with = "de::string")]
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportTotals {
    #[serde(deserialize_with = "de::number")]
    pub sales: f64,
    #[serde(deserialize_with = "de::number")]
    pub purchases: f64,
    #[serde(deserialize_with = "de::number")]
    pub expenses: f64,
    #[serde(deserialize_with = "de::number")]
    pub net: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionTypeRow {
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub kind: String,
    #[serde(deserialize_with = "de::opt_number")]
    pub count: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerRow {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::opt_number")]
    pub invoice_count: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseRow {
    #[serde(deserialize_with = "de::string")]
    pub category: String,
    #[serde(deserialize_with = "de::number")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Breakdown {
    #[serde(deserialize_with = "de::list")]
    pub sales_by_transaction_type: Vec<TransactionTypeRow>,
    #[serde(deserialize_with = "de::list")]
    pub top_customers: Vec<CustomerRow>,
    #[serde(deserialize_with = "de::list")]
    pub expenses_by_category: Vec<ExpenseRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRecord {
    #[serde(deserialize_with = "de::opt_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "de::object")]
    pub period: Period,
    #[serde(deserialize_with = "de::object")]
    pub totals: ReportTotals,
    #[serde(deserialize_with = "de::object")]
    pub breakdown: Breakdown,
    #[serde(deserialize_with = "de::opt_string")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressUpdate {
    #[serde(deserialize_with = "de::string")]
    pub date: String,
    #[serde(deserialize_with = "de::number")]
    pub progress: f64,
    #[serde(deserialize_with = "de::string")]
    pub note: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "de::string")]
    pub code: String,
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(deserialize_with = "de::string")]
    pub owner: String,
    #[serde(deserialize_with = "de::string")]
    pub due_date: String,
    /// Percent complete
    #[serde(deserialize_with = "de::number")]
    pub progress: f64,
    #[serde(deserialize_with = "de::number")]
    pub budget: f64,
    #[serde(deserialize_with = "de::opt_string")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "de::list")]
    pub progress_updates: Vec<ProgressUpdate>,
}

/// A record tagged with the composer it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRecord {
    Invoice(InvoiceRecord),
    Report(ReportRecord),
    Project(ProjectRecord),
}

impl DocumentRecord {
    /// Deserialize leniently; a value of the wrong shape yields an empty record
    pub fn from_value(kind: DocumentKind, value: &Value) -> Self {
        fn lenient<T: serde::de::DeserializeOwned + Default>(value: &Value) -> T {
            T::deserialize(value).unwrap_or_else(|e| {
                log::warn!("Record could not be read, rendering defaults: {e}");
                T::default()
            })
        }

        match kind {
            DocumentKind::Invoice => DocumentRecord::Invoice(lenient(value)),
            DocumentKind::Report => DocumentRecord::Report(lenient(value)),
            DocumentKind::Project => DocumentRecord::Project(lenient(value)),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRecord::Invoice(_) => DocumentKind::Invoice,
            DocumentRecord::Report(_) => DocumentKind::Report,
            DocumentRecord::Project(_) => DocumentKind::Project,
        }
    }

    /// Identifier the artifact file is named after
    pub fn identifier(&self) -> String {
        match self {
            DocumentRecord::Invoice(invoice) => invoice.invoice_number.clone(),
            DocumentRecord::Report(report) => {
                format!("report_{}_{}", report.period.from, report.period.to)
            }
            DocumentRecord::Project(project) => {
                if project.code.trim().is_empty() {
                    project.name.clone()
                } else {
                    project.code.clone()
                }
            }
        }
    }
}
