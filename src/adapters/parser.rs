//! Thin chat-line parser.
//!
//! One message, one command. The grammar mirrors how crews actually type:
//!
//! ```text
//! A27 30d 40b 220k          delta 30 lines, 40 sacks at 220k
//! A27 40b 220k              no delta: cut everything remaining
//! A27 30d 40b 220k clean    delta plus an explicit clean-cut call
//! A27 40b 220k @4 east end  day-of-month override, trailing note
//! edit A27 35d 40b 220k     amend the latest A27 report
//! rest wind | rest shore    rest day (optional @day and note)
//! site C11 80               add or revise a site
//! today | month | season | cycles | sites | schedule
//! undo | reset              delete-last / delete-all (PIN follows)
//! ```
//!
//! Anything unrecognized returns `None`; the dispatcher answers with a
//! syntax example. Tokenization stays here — the core only ever sees the
//! parsed command.

use crate::domain::command::{Command, QueryKind, RestReport, WorkReport};
use crate::domain::ledger::RowStatus;
use crate::domain::sites::SiteId;

/// Parses one chat line into a command.
pub fn parse(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    if lower == "/start" || lower == "start" {
        return Some(Command::Start);
    }
    match lower.as_str() {
        "today" => return Some(Command::Query(QueryKind::Today)),
        "month" => return Some(Command::Query(QueryKind::Month)),
        "season" => return Some(Command::Query(QueryKind::Season)),
        "cycles" => return Some(Command::Query(QueryKind::Cycles)),
        "sites" => return Some(Command::Query(QueryKind::Sites)),
        "schedule" => return Some(Command::Query(QueryKind::Schedule)),
        "undo" => return Some(Command::DeleteLast),
        "reset" => return Some(Command::DeleteAll),
        _ => {}
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    if lower.starts_with("rest ") {
        return parse_rest(&tokens[1..]);
    }
    if lower.starts_with("site ") {
        return parse_site(&tokens[1..]);
    }
    if lower.starts_with("edit ") {
        return parse_report(&tokens[1..]).map(Command::Amend);
    }
    parse_report(&tokens).map(Command::Work)
}

fn parse_rest(tokens: &[&str]) -> Option<Command> {
    let (kind, rest) = tokens.split_first()?;
    let status = match kind.to_lowercase().as_str() {
        "wind" => RowStatus::RestWind,
        "shore" => RowStatus::RestShore,
        _ => return None,
    };

    let mut day_override = None;
    let mut note_words = Vec::new();
    for token in rest {
        if let Some(day) = token.strip_prefix('@') {
            day_override = Some(day.parse().ok()?);
        } else {
            note_words.push(*token);
        }
    }

    Some(Command::Rest(RestReport {
        status,
        day_override,
        note: note_words.join(" "),
    }))
}

fn parse_site(tokens: &[&str]) -> Option<Command> {
    let [site, capacity] = tokens else {
        return None;
    };
    Some(Command::ConfigureSite {
        site: SiteId::new(site).ok()?,
        capacity: capacity.parse().ok()?,
    })
}

/// Parses `<site> [Nd] <Nb> <Nk> [@D] [clean] [note...]`.
fn parse_report(tokens: &[&str]) -> Option<WorkReport> {
    let (site, rest) = tokens.split_first()?;
    let site = SiteId::new(site).ok()?;

    let mut progress_delta = None;
    let mut sack_count_raw = None;
    let mut unit_price = None;
    let mut day_override = None;
    let mut clean_cut = false;
    let mut note_words = Vec::new();

    for token in rest {
        let lower = token.to_lowercase();
        if lower == "clean" {
            clean_cut = true;
        } else if let Some(day) = lower.strip_prefix('@') {
            day_override = Some(day.parse().ok()?);
        } else if let Some(n) = numeric_suffix(&lower, 'd') {
            progress_delta = Some(n);
        } else if let Some(n) = numeric_suffix(&lower, 'b') {
            sack_count_raw = Some(n);
        } else if let Some(n) = numeric_suffix(&lower, 'k') {
            unit_price = Some(n);
        } else {
            note_words.push(*token);
        }
    }

    Some(WorkReport {
        site,
        progress_delta,
        sack_count_raw: sack_count_raw?,
        unit_price: unit_price?,
        day_override,
        clean_cut,
        note: note_words.join(" "),
    })
}

fn numeric_suffix(token: &str, suffix: char) -> Option<u32> {
    token.strip_suffix(suffix)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(text: &str) -> WorkReport {
        match parse(text) {
            Some(Command::Work(report)) => report,
            other => panic!("expected Work from '{}', got {:?}", text, other),
        }
    }

    #[test]
    fn full_work_report_parses_every_field() {
        let report = work("A27 30d 40b 220k @4 east end first");
        assert_eq!(report.site.as_str(), "A27");
        assert_eq!(report.progress_delta, Some(30));
        assert_eq!(report.sack_count_raw, 40);
        assert_eq!(report.unit_price, 220);
        assert_eq!(report.day_override, Some(4));
        assert!(!report.clean_cut);
        assert_eq!(report.note, "east end first");
    }

    #[test]
    fn omitted_delta_parses_as_none() {
        let report = work("a27 40b 220k");
        assert_eq!(report.progress_delta, None);
        assert_eq!(report.site.as_str(), "A27");
    }

    #[test]
    fn clean_keyword_sets_the_flag() {
        let report = work("A27 30d 40b 220k clean");
        assert!(report.clean_cut);
        assert_eq!(report.progress_delta, Some(30));
    }

    #[test]
    fn numeric_site_names_work() {
        let report = work("34 55d 50b 210k");
        assert_eq!(report.site.as_str(), "34");
        assert_eq!(report.progress_delta, Some(55));
    }

    #[test]
    fn missing_sacks_or_price_fails() {
        assert_eq!(parse("A27 30d 220k"), None);
        assert_eq!(parse("A27 30d 40b"), None);
        assert_eq!(parse("A27"), None);
    }

    #[test]
    fn edit_prefix_becomes_an_amend() {
        match parse("edit A27 35d 40b 220k") {
            Some(Command::Amend(report)) => {
                assert_eq!(report.progress_delta, Some(35));
            }
            other => panic!("expected Amend, got {:?}", other),
        }
    }

    #[test]
    fn rest_reports_parse_with_day_and_note() {
        match parse("rest wind @12 gale warning") {
            Some(Command::Rest(report)) => {
                assert_eq!(report.status, RowStatus::RestWind);
                assert_eq!(report.day_override, Some(12));
                assert_eq!(report.note, "gale warning");
            }
            other => panic!("expected Rest, got {:?}", other),
        }
        assert!(matches!(
            parse("rest shore"),
            Some(Command::Rest(RestReport {
                status: RowStatus::RestShore,
                ..
            }))
        ));
        assert_eq!(parse("rest sleepy"), None);
    }

    #[test]
    fn site_command_parses_capacity() {
        assert_eq!(
            parse("site c11 80"),
            Some(Command::ConfigureSite {
                site: SiteId::new("C11").unwrap(),
                capacity: 80,
            })
        );
        assert_eq!(parse("site c11"), None);
        assert_eq!(parse("site c11 lots"), None);
    }

    #[test]
    fn queries_and_deletes_parse_case_insensitively() {
        assert_eq!(parse("Today"), Some(Command::Query(QueryKind::Today)));
        assert_eq!(parse("SEASON"), Some(Command::Query(QueryKind::Season)));
        assert_eq!(parse("schedule"), Some(Command::Query(QueryKind::Schedule)));
        assert_eq!(parse("undo"), Some(Command::DeleteLast));
        assert_eq!(parse("reset"), Some(Command::DeleteAll));
        assert_eq!(parse("/start"), Some(Command::Start));
    }

    #[test]
    fn noise_is_unrecognized() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("what is the weather"), None);
    }
}
