//! Tenant brand configuration

use serde::{Deserialize, Serialize};

use crate::de;

/// Per-tenant brand settings as stored by the ERP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TenantBranding {
    /// Primary brand color (`#RGB` / `#RRGGBB`)
    #[serde(deserialize_with = "de::opt_string")]
    pub primary_color: Option<String>,

    #[serde(deserialize_with = "de::opt_string")]
    pub secondary_color: Option<String>,

    /// Logo as a `data:image/...` URI
    #[serde(deserialize_with = "de::opt_string")]
    pub logo: Option<String>,

    /// Page skin, 1-5
    #[serde(deserialize_with = "de::opt_integer")]
    pub invoice_pdf_template: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_case_fields() {
        let branding: TenantBranding = serde_json::from_str(
            r##"{"primaryColor":"#0F766E","invoicePdfTemplate":"3","logo":null}"##,
        )
        .unwrap();
        assert_eq!(branding.primary_color.as_deref(), Some("#0F766E"));
        assert_eq!(branding.secondary_color, None);
        assert_eq!(branding.logo, None);
        assert_eq!(branding.invoice_pdf_template, Some(3));
    }

    #[test]
    fn test_empty_object() {
        let branding: TenantBranding = serde_json::from_str("{}").unwrap();
        assert_eq!(branding, TenantBranding::default());
    }
}
