use api_types::{Report, ReportAverages};

/// Number of most recent reports shown with a workspace and averaged into its conditions.
pub const RECENT_REPORTS_WINDOW: i64 = 10;

/// Averages crowd, noise and wifi over `reports`.
///
/// Returns `None` for an empty slice. The wifi average only counts reports that measured
/// wifi and is `None` when none did.
pub fn summarize(reports: &[Report]) -> Option<ReportAverages> {
    if reports.is_empty() {
        return None;
    }

    let count = reports.len() as f64;
    let crowd_total: f64 = reports
        .iter()
        .map(|r| f64::from(r.crowd_level.value()))
        .sum();
    let noise_total: f64 = reports
        .iter()
        .map(|r| f64::from(r.noise_level.value()))
        .sum();

    let (wifi_total, wifi_count) = reports
        .iter()
        .filter_map(|r| r.wifi_speed)
        .fold((0.0, 0_usize), |(total, n), speed| (total + speed, n + 1));

    let avg_wifi_speed = if wifi_count == 0 {
        None
    } else {
        Some(wifi_total / wifi_count as f64)
    };

    Some(ReportAverages {
        avg_crowd_level: crowd_total / count,
        avg_noise_level: noise_total / count,
        avg_wifi_speed,
    })
}
