//! Interactive dashboard session.
//!
//! One `select!` loop owns the dashboard: it either handles a line from
//! stdin or wakes at the earliest poller deadline to drive the Pomodoro
//! countdown and the alarm checks. Each branch runs to completion before
//! the next, so no tick observes a half-applied command.

use std::error::Error;
use std::time::Instant;

use chrono::NaiveDate;
use indoc::indoc;
use studydash_core::{Clock, Config, Dashboard, Event, Mark, PomodoroMode, SystemClock, Tab};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use uuid::Uuid;

use crate::bell;
use crate::render;

const HELP: &str = indoc! {"
    Commands:
      tab daily|progress|pomodoro|alarms   switch tab
      view                                 redraw the current tab
      task add <text>                      add a task to the selected day
      task toggle <n> | task rm <n>        complete / delete the n-th task
      task list                            list tasks for the selected day
      task date <YYYY-MM-DD>               select a day
      mark [YYYY-MM-DD]                    apply the brush to a day (default today)
      brush check|cross                    choose the progress brush
      cal next|prev                        move the calendar on this tab
      pomo mode focus|short|long           choose a Pomodoro preset
      pomo toggle | pomo reset | pomo status
      alarm add <HH:MM> [--repeat] <description>
      alarm rm <n> | alarm list
      ambient                              toggle ambient sound
      dismiss                              silence the ringing alert
      help | quit
"};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    View,
    Tab(Tab),
    TaskAdd(String),
    TaskToggle(usize),
    TaskRemove(usize),
    TaskList,
    TaskDate(NaiveDate),
    Mark(Option<NaiveDate>),
    Brush(Mark),
    Calendar(i32),
    PomoMode(PomodoroMode),
    PomoToggle,
    PomoReset,
    PomoStatus,
    AlarmAdd {
        time: String,
        description: String,
        repeat: bool,
    },
    AlarmRemove(usize),
    AlarmList,
    Ambient,
    Dismiss,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a list number, got '{raw}'")),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got '{raw}'"))
}

pub fn parse(line: &str) -> Result<Command, String> {
    let (head, rest) = split_word(line);
    let (sub, arg) = split_word(rest);
    let cmd = match (head, sub) {
        ("" | "view", _) => Command::View,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        ("tab", name) => Command::Tab(name.parse::<Tab>().map_err(|e| e.to_string())?),

        ("task", "add") if !arg.is_empty() => Command::TaskAdd(arg.to_string()),
        ("task", "add") => return Err("usage: task add <text>".into()),
        ("task", "toggle") => Command::TaskToggle(parse_index(arg)?),
        ("task", "rm") => Command::TaskRemove(parse_index(arg)?),
        ("task", "list" | "") => Command::TaskList,
        ("task", "date") => Command::TaskDate(parse_date(arg)?),

        ("mark", "") => Command::Mark(None),
        ("mark", date) => Command::Mark(Some(parse_date(date)?)),
        ("brush", mark) => Command::Brush(mark.parse::<Mark>().map_err(|e| e.to_string())?),

        ("cal", "next") => Command::Calendar(1),
        ("cal", "prev") => Command::Calendar(-1),

        ("pomo", "mode") => Command::PomoMode(arg.parse::<PomodoroMode>().map_err(|e| e.to_string())?),
        ("pomo", "toggle" | "start" | "pause") => Command::PomoToggle,
        ("pomo", "reset") => Command::PomoReset,
        ("pomo", "status" | "") => Command::PomoStatus,

        ("alarm", "add") => {
            let (time, rest) = split_word(arg);
            let (flag, after_flag) = split_word(rest);
            let (repeat, description) = match flag {
                "--repeat" | "-r" => (true, after_flag),
                _ => (false, rest),
            };
            if time.is_empty() {
                return Err("usage: alarm add <HH:MM> [--repeat] <description>".into());
            }
            Command::AlarmAdd {
                time: time.to_string(),
                description: description.to_string(),
                repeat,
            }
        }
        ("alarm", "rm") => Command::AlarmRemove(parse_index(arg)?),
        ("alarm", "list" | "") => Command::AlarmList,

        ("ambient", _) => Command::Ambient,
        ("dismiss", _) => Command::Dismiss,
        _ => return Err(format!("unknown command '{}' (try `help`)", line.trim())),
    };
    Ok(cmd)
}

fn task_id(dash: &Dashboard, n: usize) -> Result<Uuid, String> {
    let tasks = dash.tasks().for_selected_date();
    n.checked_sub(1)
        .and_then(|i| tasks.get(i))
        .map(|t| t.id)
        .ok_or_else(|| format!("no task #{n} on this day"))
}

fn alarm_id(dash: &Dashboard, n: usize) -> Result<Uuid, String> {
    let alarms = dash.alarms().alarms();
    n.checked_sub(1)
        .and_then(|i| alarms.get(i))
        .map(|a| a.id)
        .ok_or_else(|| format!("no alarm #{n}"))
}

/// Apply one command. Errors leave the dashboard unchanged.
pub fn apply(
    dash: &mut Dashboard,
    command: Command,
    today: NaiveDate,
    now: Instant,
) -> Result<Reply, Box<dyn Error>> {
    debug!(?command, "session command");
    let output = match command {
        Command::Quit => return Ok(Reply::Quit),
        Command::Help => HELP.to_string(),
        Command::View => render::dashboard(dash, today)?,
        Command::Tab(tab) => {
            dash.set_tab(tab);
            render::dashboard(dash, today)?
        }

        Command::TaskAdd(text) => {
            dash.tasks_mut().add_to_selected(&text)?;
            render::task_list(dash)
        }
        Command::TaskToggle(n) => {
            let id = task_id(dash, n)?;
            dash.tasks_mut().toggle(id);
            render::task_list(dash)
        }
        Command::TaskRemove(n) => {
            let id = task_id(dash, n)?;
            dash.tasks_mut().remove(id);
            render::task_list(dash)
        }
        Command::TaskList => render::task_list(dash),
        Command::TaskDate(date) => {
            dash.tasks_mut().select_date(date);
            render::task_list(dash)
        }

        Command::Mark(date) => {
            let date = date.unwrap_or(today);
            match dash.progress_mut().mark_selected(date) {
                Some(mark) => format!("{date}: {}\n", mark.symbol()),
                None => format!("{date}: cleared\n"),
            }
        }
        Command::Brush(mark) => {
            dash.progress_mut().select_mark(mark);
            format!("brush: {} {mark}\n", mark.symbol())
        }
        Command::Calendar(delta) => {
            match dash.tab() {
                Tab::Daily => dash.shift_task_month(delta)?,
                Tab::Progress => dash.shift_progress_month(delta)?,
                tab => return Err(format!("the {} tab has no calendar", tab.label()).into()),
            }
            render::dashboard(dash, today)?
        }

        Command::PomoMode(mode) => {
            dash.pomodoro_mut().select_mode(mode);
            render::pomodoro(dash)
        }
        Command::PomoToggle => {
            if dash.pomodoro_mut().toggle(now).is_none() {
                return Err("session finished; `pomo reset` or pick a mode first".into());
            }
            render::pomodoro(dash)
        }
        Command::PomoReset => {
            dash.pomodoro_mut().reset();
            render::pomodoro(dash)
        }
        Command::PomoStatus => render::pomodoro(dash),

        Command::AlarmAdd {
            time,
            description,
            repeat,
        } => {
            dash.alarms_mut().add(&description, &time, repeat)?;
            render::alarm_list(dash)
        }
        Command::AlarmRemove(n) => {
            let id = alarm_id(dash, n)?;
            dash.alarms_mut().remove(id);
            render::alarm_list(dash)
        }
        Command::AlarmList => render::alarm_list(dash),

        Command::Ambient => match dash.alerts_mut().toggle_ambient() {
            Event::AmbientToggled { playing: true, .. } => "ambient sound on\n".to_string(),
            _ => "ambient sound off\n".to_string(),
        },
        Command::Dismiss => match dash.dismiss_alert() {
            Some(_) => "alert dismissed\n".to_string(),
            None => "nothing is ringing\n".to_string(),
        },
    };
    Ok(Reply::Output(output))
}

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(config))
}

async fn session(config: &Config) -> Result<(), Box<dyn Error>> {
    let clock = SystemClock;
    let mut dash = Dashboard::from_config(config, bell::alert_sink(config), clock.today(), Instant::now());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", render::dashboard(&dash, clock.today())?);
    println!("Type `help` for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let reply = parse(&line)
                    .map_err(Box::<dyn Error>::from)
                    .and_then(|cmd| apply(&mut dash, cmd, clock.today(), Instant::now()));
                match reply {
                    Ok(Reply::Quit) => break,
                    Ok(Reply::Output(text)) => print!("{text}"),
                    Err(e) => println!("error: {e}"),
                }
            }
            _ = dash.wait() => {
                for event in dash.poll(Instant::now(), &clock) {
                    if let Event::AlertRaised { description, .. } = event {
                        print!("\n{}", render::alert_banner(&description));
                    }
                }
            }
        }
    }
    Ok(())
}
