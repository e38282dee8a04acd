// Run configuration: which headers carry which field, how the derived
// series is filtered, and the palette handed to chart renderers.
use crate::types::QuarterSelector;
use serde::Serialize;

/// Header name for one logical column plus the alternatives accepted in
/// its place. `name` is what gets reported when the column is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub aliases: Vec<String>,
}

impl ColumnSpec {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Only the given header is accepted.
    pub fn exact(name: &str) -> Self {
        Self::new(name, &[])
    }

    /// Find the first header (compared after trimming) matching the name or
    /// one of its aliases.
    pub fn resolve<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .find_map(|want| {
                headers
                    .iter()
                    .find(|h| h.trim() == want.trim())
                    .map(|h| h.as_str())
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub period: ColumnSpec,
    pub revenue: ColumnSpec,
    pub revenue_prior_year: ColumnSpec,
    pub reported_growth_rate: ColumnSpec,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            period: ColumnSpec::new("월", &["period"]),
            revenue: ColumnSpec::new("매출액", &["revenue"]),
            revenue_prior_year: ColumnSpec::new("전년동월", &["revenue_prior_year", "prior_year"]),
            reported_growth_rate: ColumnSpec::new("증감률", &["growth_rate", "reported_growth_rate"]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterParams {
    pub quarter: QuarterSelector,
    pub yoy_min: Option<f64>,
    pub yoy_max: Option<f64>,
}

/// Chart colours. Only the presentation layer reads these; they travel with
/// the chart bundle so a renderer does not need its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Revenue bars.
    pub primary: String,
    /// Growth lines and decreases.
    pub secondary: String,
    /// Cumulative / Pareto share line.
    pub accent1: String,
    /// Rolling average and increases.
    pub accent2: String,
    /// Connectors.
    pub neutral: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#3366CC".to_string(),
            secondary: "#DC3912".to_string(),
            accent1: "#FF9900".to_string(),
            accent2: "#109618".to_string(),
            neutral: "#AAAAAA".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub columns: ColumnMap,
    pub filter: FilterParams,
    pub palette: Palette,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_name_then_aliases() {
        let headers = vec!["revenue".to_string(), "매출액".to_string()];
        let spec = ColumnSpec::new("매출액", &["revenue"]);
        assert_eq!(spec.resolve(&headers), Some("매출액"));

        let headers = vec!["period".to_string()];
        assert_eq!(ColumnMap::default().period.resolve(&headers), Some("period"));
        assert_eq!(ColumnMap::default().revenue.resolve(&headers), None);
    }

    #[test]
    fn exact_spec_ignores_aliases() {
        let headers = vec!["revenue".to_string()];
        assert_eq!(ColumnSpec::exact("sales").resolve(&headers), None);
        assert_eq!(ColumnSpec::exact(" revenue ").resolve(&headers), Some("revenue"));
    }
}
