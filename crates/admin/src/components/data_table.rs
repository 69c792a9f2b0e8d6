//! Data table component types.

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Display label for the column header.
    pub label: &'static str,
    /// Right-aligned numeric column.
    pub numeric: bool,
}

impl TableColumn {
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            numeric: false,
        }
    }

    /// A right-aligned column for amounts and counts.
    #[must_use]
    pub const fn numeric(label: &'static str) -> Self {
        Self {
            label,
            numeric: true,
        }
    }

    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        if self.numeric { "num" } else { "" }
    }
}

/// One tab of a single-select filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Query value; empty for "all".
    pub value: String,
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str, count: usize) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            count,
            selected: false,
        }
    }

    /// Mark as the active tab when `current` matches.
    #[must_use]
    pub fn selected_if(mut self, current: &str) -> Self {
        self.selected = self.value == current;
        self
    }

    /// Link target for a list page at `base`.
    #[must_use]
    pub fn href(&self, base: &str, param: &str) -> String {
        if self.value.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{param}={}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_option_href_and_selection() {
        let all = FilterOption::new("", "Toutes", 5).selected_if("");
        assert!(all.selected);
        assert_eq!(all.href("/dashboard/orders", "status"), "/dashboard/orders");

        let active = FilterOption::new("active", "Active", 2).selected_if("");
        assert!(!active.selected);
        assert_eq!(
            active.href("/dashboard/orders", "status"),
            "/dashboard/orders?status=active"
        );
    }

    #[test]
    fn test_numeric_column_class() {
        assert_eq!(TableColumn::numeric("Montant").css_class(), "num");
        assert_eq!(TableColumn::new("Client").css_class(), "");
    }
}
