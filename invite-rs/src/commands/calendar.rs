//! Date picker grid rendering

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use invite_flow::{MonthCursor, WEEKDAY_NAMES, parse_iso};

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM); defaults to the selected date's month or today
    #[arg(short, long)]
    pub month: Option<String>,

    /// Highlight this day (YYYY-MM-DD)
    #[arg(short, long)]
    pub selected: Option<String>,
}

pub fn execute(args: CalendarArgs) -> Result<()> {
    let selected = args.selected.as_deref().map(parse_iso).transpose()?;
    let cursor = match (&args.month, selected) {
        (Some(month), _) => month.parse::<MonthCursor>()?,
        (None, Some(date)) => MonthCursor::containing(date),
        (None, None) => MonthCursor::containing(Local::now().date_naive()),
    };

    print!("{}", render_month(&cursor, selected));
    Ok(())
}

/// Text grid: title, weekday header, then one line per week
pub fn render_month(cursor: &MonthCursor, selected: Option<NaiveDate>) -> String {
    let mut out = format!("{:^28}\n", cursor.title());
    for name in WEEKDAY_NAMES {
        out.push_str(&format!(" {name} "));
    }
    out.push('\n');

    for week in cursor.weeks() {
        for cell in week {
            let text = match cell {
                None => "    ".to_string(),
                Some(day) if cursor.pick(Some(day)) == selected => format!("[{day:>2}]"),
                Some(day) => format!(" {day:>2} "),
            };
            out.push_str(&text);
        }
        out.push('\n');
    }
    out
}
