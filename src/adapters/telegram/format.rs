//! Renders typed replies into the chat text blocks crews read.

use crate::application::reply::{RejectReason, Reply, ReportAck};
use crate::domain::replay::{CycleStanding, Forecast};

/// Renders one reply to its outbound text.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Greeting => "✅ Kelp ledger ready\n\
             Report: A27 30d 40b 220k (delta, sacks, price)\n\
             Full cut: A27 40b 220k\n\
             Rest day: rest wind | rest shore\n\
             Queries: today | month | season | cycles | sites | schedule\n\
             Fixes: edit A27 35d 40b 220k | undo | reset"
            .to_string(),
        Reply::Report(ack) => render_report(ack),
        Reply::Rest(ack) => format!(
            "✅ Rest day recorded: {} on {}",
            ack.status.label(),
            ack.work_date
        ),
        Reply::TodaySummary { date, totals } => format!(
            "📊 TODAY ({})\n• Standard sacks: {}\n• Revenue: {}",
            date,
            totals.standard_sacks,
            money(totals.revenue)
        ),
        Reply::MonthSummary(summary) => format!(
            "📊 MONTH {}-{:02}\n• Work days: {}\n• Wind rest: {}\n• Shore rest: {}\n• Revenue: {}",
            summary.year,
            summary.month,
            summary.active_work_days,
            summary.wind_rest_days,
            summary.shore_rest_days,
            money(summary.revenue)
        ),
        Reply::SeasonSummary(totals) => format!(
            "📈 SEASON\n• Standard sacks: {}\n• Revenue: {}",
            totals.standard_sacks,
            money(totals.revenue)
        ),
        Reply::CycleBreakdown(grouped) => {
            if grouped.combined.is_empty() {
                return "📊 CYCLES\n• no completed cycle yet".to_string();
            }
            let mut lines = vec!["📊 CYCLES".to_string()];
            for (cycle, revenue) in &grouped.combined {
                lines.push(format!("• Cycle {}: {}", cycle, money(*revenue)));
            }
            for (site, cycles) in &grouped.by_site {
                let parts: Vec<String> = cycles
                    .iter()
                    .map(|(cycle, revenue)| format!("c{} {}", cycle, money(*revenue)))
                    .collect();
                lines.push(format!("• {}: {}", site, parts.join(", ")));
            }
            lines.join("\n")
        }
        Reply::SiteBreakdown(summaries) => {
            let mut lines = vec!["📊 SITES".to_string()];
            for s in summaries {
                let standing = match s.standing {
                    CycleStanding::LastCleanCut { cycle, date } => {
                        format!("last clean cut {} (cycle {})", date, cycle)
                    }
                    CycleStanding::NoCompletedCycle => "no completed cycle yet".to_string(),
                };
                lines.push(format!(
                    "• {} [{} lines]: {} raw → {} std • {} • {}",
                    s.site,
                    s.capacity,
                    s.sack_count_raw,
                    s.sack_count_standard,
                    money(s.revenue),
                    standing
                ));
            }
            lines.join("\n")
        }
        Reply::Schedule(entries) => {
            let mut lines = vec!["🗓 NEXT HARVESTS".to_string()];
            for entry in entries {
                let when = match entry.forecast {
                    Forecast::Scheduled(date) => date.to_string(),
                    Forecast::Unknown => "no clean cut yet".to_string(),
                };
                lines.push(format!("• {} → {}", entry.site, when));
            }
            lines.join("\n")
        }
        Reply::SiteConfigured {
            site,
            capacity,
            change,
        } => {
            use crate::domain::sites::SiteChange;
            match change {
                SiteChange::Added => format!("✅ Site {} added with {} lines", site, capacity),
                SiteChange::Revised { previous } => format!(
                    "✅ Site {} revised to {} lines (was {})",
                    site, capacity, previous
                ),
            }
        }
        Reply::ConfirmRequired { action, ttl_secs } => format!(
            "⚠️ About to {}. Reply with the PIN within {} minutes to confirm.",
            action.label(),
            ttl_secs / 60
        ),
        Reply::ConfirmRejected(RejectReason::PinMismatch) => {
            "❌ Wrong PIN. Nothing was deleted.".to_string()
        }
        Reply::ConfirmRejected(RejectReason::Expired) => {
            "❌ Confirmation window closed. Nothing was deleted.".to_string()
        }
        Reply::DeletedLast { position } => {
            format!("✅ Last report removed (row {})", position)
        }
        Reply::ClearedAll => "✅ Ledger cleared; header kept".to_string(),
        Reply::NothingToDelete => "❌ Nothing to delete".to_string(),
        Reply::NoMatchingReport { site } => {
            format!("❌ No report of yours for {} to edit", site)
        }
        Reply::UnknownSite { site } => format!(
            "❌ Unknown site {}. Add it first: site {} <lines>",
            site, site
        ),
        Reply::SyntaxError => "❌ Bad syntax. Example: A27 30d 40b 220k".to_string(),
        Reply::Failure => "❌ Something went wrong. Try again shortly.".to_string(),
    }
}

fn render_report(ack: &ReportAck) -> String {
    let verb = if ack.amended { "Amended" } else { "Saved" };
    let mut lines = vec![
        format!("✅ {}: {} • {}", verb, ack.site, ack.work_date),
        format!(
            "• Cycle {} • {} {}/{}",
            ack.cycle_index,
            ack.status.label(),
            ack.progress_after,
            ack.capacity
        ),
        format!(
            "• Sacks: {} raw → {} std @ {}k",
            ack.sack_count_raw, ack.sack_count_standard, ack.unit_price
        ),
        format!("• Revenue: {}", money(ack.revenue)),
        format!(
            "• Day total: {} • Season: {}",
            money(ack.day_revenue),
            money(ack.season_revenue)
        ),
    ];
    // No forecast line at all when there is nothing to forecast from.
    if let Forecast::Scheduled(date) = ack.forecast {
        lines.push(format!("• Next harvest: {}", date));
    }
    lines.join("\n")
}

/// Thousands-separated money rendering.
fn money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
