//! CSS custom properties for the UI, derived from the same palette scales
//! the PDF renderer draws with

use std::collections::BTreeMap;

use crate::branding::TenantBranding;
use crate::palette::{build_scale, resolve_brand_colors, BrandColors};

/// Holds the `--primary-*` / `--secondary-*` custom properties for one UI root
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    applied: Option<BrandColors>,
    variables: BTreeMap<String, String>,
}

impl ThemeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the branding and rewrite every property if the colors changed
    ///
    /// Returns whether anything changed.
    pub fn apply(&mut self, branding: &TenantBranding) -> bool {
        let colors = resolve_brand_colors(branding);
        if self.applied == Some(colors) {
            return false;
        }

        self.variables.clear();
        for (prefix, base) in [("primary", colors.primary), ("secondary", colors.secondary)] {
            for (stop, color) in build_scale(base).entries() {
                self.variables
                    .insert(format!("--{prefix}-{stop}"), color.channels());
            }
            self.variables.insert(format!("--{prefix}"), base.to_hex());
        }
        self.applied = Some(colors);
        log::debug!(
            "Theme context applied: primary {}, secondary {}",
            colors.primary,
            colors.secondary
        );
        true
    }

    pub fn colors(&self) -> Option<BrandColors> {
        self.applied
    }

    pub fn css_variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Render the properties as a `:root` rule
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn branding(primary: &str) -> TenantBranding {
        TenantBranding {
            primary_color: Some(primary.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_writes_all_properties() {
        let mut ctx = ThemeContext::new();
        assert!(ctx.apply(&branding("#2563eb")));

        // 11 stops plus the hex entry, for two prefixes
        assert_eq!(ctx.css_variables().len(), 24);
        assert_eq!(ctx.get("--primary"), Some("#2563EB"));
        assert_eq!(ctx.get("--primary-500"), Some("37 99 235"));
        assert_eq!(ctx.get("--secondary"), Some("#D946EF"));
    }

    #[test]
    fn test_apply_is_change_detecting() {
        let mut ctx = ThemeContext::new();
        assert!(ctx.apply(&branding("#2563eb")));
        assert!(!ctx.apply(&branding("#2563EB")));
        assert!(ctx.apply(&branding("#0f766e")));
        assert_eq!(ctx.get("--primary"), Some("#0F766E"));
    }

    #[test]
    fn test_to_css() {
        let mut ctx = ThemeContext::new();
        ctx.apply(&TenantBranding::default());
        let css = ctx.to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --primary-500: 37 99 235;\n"));
        assert!(css.ends_with("}\n"));
    }

    #[test]
    fn test_empty_context() {
        let ctx = ThemeContext::new();
        assert_eq!(ctx.colors(), None);
        assert_eq!(ctx.to_css(), ":root {\n}\n");
    }
}
