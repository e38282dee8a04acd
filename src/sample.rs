// Built-in twelve-month series used when no input is supplied.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleMonth {
    pub period: &'static str,
    pub revenue: f64,
    pub revenue_prior_year: f64,
    pub reported_growth_rate: f64,
}

/// A read-only series handed to the loader as the explicit fallback input.
#[derive(Debug, Clone, Copy)]
pub struct SampleSeries(pub &'static [SampleMonth]);

const fn month(period: &'static str, revenue: f64, prior: f64, growth: f64) -> SampleMonth {
    SampleMonth {
        period,
        revenue,
        revenue_prior_year: prior,
        reported_growth_rate: growth,
    }
}

pub const SAMPLE_SERIES: SampleSeries = SampleSeries(&[
    month("2024-01", 12_000_000.0, 10_500_000.0, 14.3),
    month("2024-02", 13_500_000.0, 11_200_000.0, 20.5),
    month("2024-03", 11_000_000.0, 12_800_000.0, -14.1),
    month("2024-04", 18_000_000.0, 15_200_000.0, 18.4),
    month("2024-05", 21_000_000.0, 18_500_000.0, 13.5),
    month("2024-06", 16_500_000.0, 15_000_000.0, 10.0),
    month("2024-07", 17_500_000.0, 16_000_000.0, 9.4),
    month("2024-08", 19_000_000.0, 16_800_000.0, 13.1),
    month("2024-09", 20_000_000.0, 17_200_000.0, 16.3),
    month("2024-10", 22_000_000.0, 19_000_000.0, 15.8),
    month("2024-11", 25_000_000.0, 21_000_000.0, 19.0),
    month("2024-12", 28_000_000.0, 23_500_000.0, 19.1),
]);
