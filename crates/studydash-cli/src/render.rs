//! Plain-text rendering of the dashboard tabs.

use chrono::{Datelike, NaiveDate};
use studydash_core::calendar::{DayCell, GridCell, MonthGrid, WEEKDAY_HEADERS};
use studydash_core::{Dashboard, PomodoroMode, Tab, ValidationError};

/// Columns per day cell: space, two-digit day, today marker, three
/// decoration slots.
const CELL_WIDTH: usize = 7;

/// Render a month grid. `decorate` turns a cell's decoration into at most
/// three characters shown after the day number.
pub fn calendar<D>(grid: &MonthGrid<D>, decorate: impl Fn(&D) -> String) -> String {
    let mut out = String::new();
    let title = format!("{:^width$}", grid.title(), width = CELL_WIDTH * 7);
    push_line(&mut out, &title);

    let header: String = WEEKDAY_HEADERS
        .iter()
        .map(|h| format!("{h:^width$}", width = CELL_WIDTH))
        .collect();
    push_line(&mut out, &header);

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => " ".repeat(CELL_WIDTH),
                GridCell::Day(day) => day_cell(day, &decorate),
            })
            .collect();
        push_line(&mut out, &row);
    }
    out
}

fn day_cell<D>(day: &DayCell<D>, decorate: &impl Fn(&D) -> String) -> String {
    let today = if day.is_today { '*' } else { ' ' };
    format!(
        " {:>2}{}{:<3}",
        day.date.day(),
        today,
        decorate(&day.decoration)
    )
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// The whole screen for the active tab, alert banner first.
pub fn dashboard(dash: &Dashboard, today: NaiveDate) -> Result<String, ValidationError> {
    let mut out = String::new();
    if let Some(description) = dash.alerts().current_alert() {
        out.push_str(&alert_banner(description));
    }
    push_line(&mut out, &tab_bar(dash.tab()));
    out.push('\n');

    match dash.tab() {
        Tab::Daily => {
            let grid = dash.task_calendar(today)?;
            out.push_str(&calendar(&grid, |dots| "•".repeat(*dots)));
            out.push('\n');
            out.push_str(&task_list(dash));
        }
        Tab::Progress => {
            let grid = dash.progress_calendar(today)?;
            out.push_str(&calendar(&grid, |mark| {
                mark.map(|m| m.symbol().to_string()).unwrap_or_default()
            }));
            out.push('\n');
            let (year, month) = dash.progress_month();
            let summary = dash.progress().month_summary(year, month);
            let brush = dash.progress().selected_mark();
            push_line(
                &mut out,
                &format!(
                    "Brush: {} {}   This month: {} ✓  {} ✗",
                    brush.symbol(),
                    brush,
                    summary.checks,
                    summary.crosses
                ),
            );
        }
        Tab::Pomodoro => out.push_str(&pomodoro(dash)),
        Tab::Alarms => out.push_str(&alarm_list(dash)),
    }
    Ok(out)
}

pub fn alert_banner(description: &str) -> String {
    format!("*** {description} ***  (type `dismiss` to silence)\n")
}

pub fn task_list(dash: &Dashboard) -> String {
    let tasks = dash.tasks();
    let date = tasks.selected_date();
    let mut out = format!("Tasks for {}:\n", date.format("%A, %B %-d, %Y"));
    let day = tasks.for_selected_date();
    if day.is_empty() {
        out.push_str("  (no tasks)\n");
    }
    for (i, task) in day.iter().enumerate() {
        let check = if task.completed { 'x' } else { ' ' };
        out.push_str(&format!("  {}. [{}] {}\n", i + 1, check, task.text));
    }
    out
}

pub fn pomodoro(dash: &Dashboard) -> String {
    let engine = dash.pomodoro();
    let buttons: Vec<String> = PomodoroMode::ALL
        .iter()
        .map(|&mode| {
            if mode == engine.mode() {
                format!("[{}]", mode.button_label())
            } else {
                mode.button_label()
            }
        })
        .collect();
    let mut out = String::new();
    push_line(&mut out, &buttons.join("  "));
    push_line(
        &mut out,
        &format!("  {}  {}", engine.display(), engine.status_text()),
    );
    out
}

pub fn alarm_list(dash: &Dashboard) -> String {
    let alarms = dash.alarms().alarms();
    if alarms.is_empty() {
        return "  (no alarms)\n".to_string();
    }
    alarms
        .iter()
        .enumerate()
        .map(|(i, alarm)| {
            format!(
                "  {}. {}  {}  ({})\n",
                i + 1,
                alarm.time_label(),
                alarm.description,
                alarm.repeat_label()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use studydash_core::calendar::month_grid;
    use studydash_core::AlertSink;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dash(today: NaiveDate) -> Dashboard {
        Dashboard::new(
            today,
            AlertSink::silent(),
            Duration::from_secs(30),
            Instant::now(),
        )
    }

    #[test]
    fn calendar_lays_out_february_2024() {
        let grid = month_grid(2024, 2, date(2024, 2, 14), |_| ()).unwrap();
        let text = calendar(&grid, |_| String::new());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + 5);
        assert_eq!(lines[0].trim(), "February 2024");
        assert!(lines[1].contains("Sun") && lines[1].contains("Sat"));
        // Thursday is the fifth column.
        assert_eq!(lines[2], format!("{}  1", " ".repeat(CELL_WIDTH * 4)));
        assert!(text.contains("14*"));
        assert!(lines[6].ends_with("29"));
    }

    #[test]
    fn decorations_follow_the_day_number() {
        let grid = month_grid(2024, 2, date(2000, 1, 1), |d| d.day() == 3).unwrap();
        let text = calendar(&grid, |busy| if *busy { "••".into() } else { String::new() });
        assert!(text.contains(" 3 ••"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn tab_bar_brackets_the_active_tab() {
        assert_eq!(
            tab_bar(Tab::Alarms),
            "Daily Tasks | Progress Tracker | Pomodoro Timer | [Alarms]"
        );
    }

    #[test]
    fn daily_view_lists_tasks_for_selected_day() {
        let mut d = dash(date(2024, 10, 7));
        let id = d.tasks_mut().add_to_selected("Read chapter 3").unwrap();
        d.tasks_mut().toggle(id);
        let text = dashboard(&d, date(2024, 10, 7)).unwrap();
        assert!(text.contains("Tasks for Monday, October 7, 2024:"));
        assert!(text.contains("  1. [x] Read chapter 3"));
        assert!(text.contains(" 7*•"));
    }

    #[test]
    fn pomodoro_view_shows_countdown() {
        let mut d = dash(date(2024, 10, 7));
        d.set_tab(Tab::Pomodoro);
        let text = dashboard(&d, date(2024, 10, 7)).unwrap();
        assert!(text.contains("[Focus (25m)]"));
        assert!(text.contains("25:00  Ready to focus!"));
    }

    #[test]
    fn banner_leads_when_ringing() {
        let mut d = dash(date(2024, 10, 7));
        d.alerts_mut().notify("Study");
        let text = dashboard(&d, date(2024, 10, 7)).unwrap();
        assert!(text.starts_with("*** Study ***"));
    }

    #[test]
    fn alarm_list_shows_repeat_label() {
        let mut d = dash(date(2024, 10, 7));
        d.alarms_mut().add("Wake up", "07:00", true).unwrap();
        assert_eq!(alarm_list(&d), "  1. 07:00  Wake up  (Daily)\n");
    }
}
