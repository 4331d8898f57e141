//! Date phrase resolution against the reference time.

use chrono::{Days, Months, NaiveDate, TimeZone, Utc};
use chrono_english::{Dialect, parse_date_string};

use crate::api::{Context, ParsedTaskData};
use crate::engine::{Stage, StageError, find_bounded_from};
use crate::vocab::Vocabulary;
use crate::{Span, excise};

use super::scan;
use super::scan::DateMatch;

/// The due date/time extraction stage.
pub(crate) struct DateStage {
    triggers: Vec<String>,
    connectives: Vec<String>,
    default_to_due: bool,
}

impl DateStage {
    pub(crate) fn new(vocab: &Vocabulary, default_to_due: bool) -> Self {
        DateStage {
            triggers: vocab.due_triggers.clone(),
            connectives: vocab.connectives.clone(),
            default_to_due,
        }
    }

    /// Earliest boundary-flanked trigger occurrence at or after `from`; on a
    /// shared start position the longest trigger wins ("scheduled for" over
    /// "scheduled").
    fn next_trigger(&self, line: &str, from: usize) -> Option<Span> {
        let mut best: Option<Span> = None;
        for trigger in &self.triggers {
            if let Some(span) = find_bounded_from(line, trigger, from) {
                let better = match best {
                    None => true,
                    Some(b) => span.start < b.start || (span.start == b.start && span.end > b.end),
                };
                if better {
                    best = Some(span);
                }
            }
        }
        best
    }

    /// The date phrase directly after a trigger, if the gap holds nothing but
    /// connective words.
    fn date_after(
        &self,
        line: &str,
        after: usize,
        ctx: &Context,
    ) -> Option<(Span, NaiveDate, Option<(u32, u32)>)> {
        let tail = line.get(after..)?;
        let m = scan::scan(tail).into_iter().next()?;
        let lead = &tail[..m.span.start];
        if !self.lead_is_connective(lead) {
            return None;
        }
        let (date, time) = resolve_match(&m, ctx)?;
        let span = Span { start: after + m.span.start, end: after + m.span.end };
        Some((span, date, time))
    }

    fn lead_is_connective(&self, lead: &str) -> bool {
        lead.split_whitespace().all(|word| {
            let word = word.to_lowercase();
            self.connectives.iter().any(|c| *c == word)
        })
    }
}

impl Stage for DateStage {
    fn name(&self) -> &'static str {
        "date"
    }

    fn extract(
        &self,
        text: &str,
        draft: &mut ParsedTaskData,
        ctx: &Context,
    ) -> Result<String, StageError> {
        let mut line = text.to_string();
        let mut triggered = false;

        // Triggered phase. A consumed trigger restarts the search from the
        // left; a rejected one is skipped past so it cannot loop.
        let mut search_from = 0;
        while let Some(tspan) = self.next_trigger(&line, search_from) {
            match self.date_after(&line, tspan.end, ctx) {
                Some((dspan, date, time)) => {
                    draft.due_date = Some(date.format("%Y-%m-%d").to_string());
                    draft.due_time = time.map(|(h, m)| format!("{h:02}:{m:02}"));
                    // The gap holds only connectives; drop it with the rest.
                    line = excise(&line, Span { start: tspan.start, end: dspan.end });
                    search_from = 0;
                    triggered = true;
                }
                None => search_from = tspan.end,
            }
        }

        if !triggered {
            for m in scan::scan(&line) {
                let Some((date, time)) = resolve_match(&m, ctx) else {
                    continue;
                };
                // A due keyword in or just before the phrase (a trigger the
                // triggered phase rejected, like "due soon friday") still
                // marks the date as due.
                let lead: Vec<&str> = line[..m.span.start].split_whitespace().collect();
                let from = lead.len().saturating_sub(2);
                let mut window = lead[from..].join(" ");
                if !window.is_empty() {
                    window.push(' ');
                }
                window.push_str(&line[m.span.start..m.span.end]);
                let is_due = self
                    .triggers
                    .iter()
                    .any(|t| crate::engine::contains_bounded(&window, t));
                if is_due || self.default_to_due {
                    draft.due_date = Some(date.format("%Y-%m-%d").to_string());
                    draft.due_time = time.map(|(h, m)| format!("{h:02}:{m:02}"));
                }
                // The span goes either way.
                line = excise(&line, m.span);
                break;
            }
        }

        Ok(line)
    }
}

/// Resolve one scanned phrase. For a range the due date is the range end,
/// falling back to the start when the end does not resolve.
fn resolve_match(m: &DateMatch, ctx: &Context) -> Option<(NaiveDate, Option<(u32, u32)>)> {
    let date = match &m.end {
        Some(end) => resolve_core(end, ctx).or_else(|| resolve_core(&m.core, ctx))?,
        None => resolve_core(&m.core, ctx)?,
    };
    let time = m.time.as_deref().and_then(scan::parse_clock);
    Some((date, time))
}

/// Resolve a core date phrase to a calendar date.
///
/// Deterministic shapes (ISO, today/tomorrow, "in N periods") are handled
/// with plain `chrono` arithmetic; everything else goes through
/// `chrono-english`, with ambiguous relative phrases forward-dated past the
/// reference when they land behind it.
fn resolve_core(core: &str, ctx: &Context) -> Option<NaiveDate> {
    let core = core.trim();
    let reference = ctx.reference_time.date();

    if let Ok(date) = NaiveDate::parse_from_str(core, "%Y-%m-%d") {
        return Some(date);
    }

    match core.to_lowercase().as_str() {
        "today" | "tonight" => return Some(reference),
        "tomorrow" => return reference.succ_opt(),
        "yesterday" => return reference.pred_opt(),
        _ => {}
    }

    let offset = regex!(r"(?i)^in\s+(\d{1,3})\s+(day|week|month|year)s?$");
    if let Some(caps) = offset.captures(core) {
        let n: u32 = caps[1].parse().ok()?;
        return match caps[2].to_lowercase().as_str() {
            "day" => reference.checked_add_days(Days::new(u64::from(n))),
            "week" => reference.checked_add_days(Days::new(u64::from(n) * 7)),
            "month" => reference.checked_add_months(Months::new(n)),
            _ => reference.checked_add_months(Months::new(n.checked_mul(12)?)),
        };
    }

    // Relative period words are calendar arithmetic; the english parser only
    // knows "next <weekday>"/"next <month name>" shapes.
    let relative = regex!(r"(?i)^(next|this|last)\s+(week|month|year)$");
    if let Some(caps) = relative.captures(core) {
        let months = match caps[2].to_lowercase().as_str() {
            "month" => 1u32,
            "year" => 12,
            _ => 0,
        };
        return match caps[1].to_lowercase().as_str() {
            "this" => Some(reference),
            "next" if months == 0 => reference.checked_add_days(Days::new(7)),
            "next" => reference.checked_add_months(Months::new(months)),
            _ if months == 0 => reference.checked_sub_days(Days::new(7)),
            _ => reference.checked_sub_months(Months::new(months)),
        };
    }

    let now = Utc.from_utc_datetime(&ctx.reference_time);
    let mut date = parse_date_string(core, now, Dialect::Us).ok()?.date_naive();

    if date < reference {
        if scan::is_bare_weekday(core) {
            date = date.checked_add_days(Days::new(7))?;
        } else if scan::is_yearless_month_day(core) {
            date = date.checked_add_months(Months::new(12))?;
        }
    }
    Some(date)
}
