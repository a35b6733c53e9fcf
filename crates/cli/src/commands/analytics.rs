//! `analytics` - the most-added report.

use stockroom_client::views::AnalyticsDashboard;

use super::context::{ClientContext, FrontendError};

const BAR_WIDTH: f64 = 30.0;

/// Print the summary cards and the ranked table.
///
/// # Errors
///
/// Returns `FrontendError` when not logged in or the request fails.
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &ClientContext) -> Result<(), FrontendError> {
    let client = ctx.authenticated()?;
    let dashboard = AnalyticsDashboard::new(ctx.check(client.most_added().await)?);

    if dashboard.is_empty() {
        println!("No products added yet.");
        return Ok(());
    }

    println!("Products tracked: {}", dashboard.rows().len());
    println!("Total added:      {}", dashboard.total());
    if let Some(top) = dashboard.top() {
        println!("Most added:       {} ({})", top.key.name, top.count);
    }
    println!();

    for row in dashboard.rows() {
        println!(
            "{:>2}. {:<36} {:<20} {:>4} {:>6.1}%  {}",
            row.rank,
            row.name,
            row.sku,
            row.count,
            row.percent_of_total,
            bar(row.bar_ratio)
        );
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(ratio: f64) -> String {
    "#".repeat((ratio.clamp(0.0, 1.0) * BAR_WIDTH).round() as usize)
}
