//! Interactive dashboard: a line-oriented loop that routes between the views,
//! runs the add/edit forms, and re-renders after every action.

use std::io::{BufRead, Write};

use prio_core::{FilterSet, InitiativeDraft, InitiativeId, Selection, TimeHorizon, WorkStream};
use prio_store::{CommitOutcome, StoreError};

use crate::dashboard::Dashboard;
use crate::error::format_error;
use crate::render::{render_view, selector_help, RenderOptions};
use crate::router::{Navigation, Router, View};

enum Step {
    Continue,
    Quit,
}

pub struct Session<'a, R, W> {
    dashboard: &'a mut Dashboard,
    router: Router,
    input: R,
    out: W,
    render: RenderOptions,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(dashboard: &'a mut Dashboard, input: R, out: W, render: RenderOptions) -> Self {
        Self {
            dashboard,
            router: Router::new(),
            input,
            out,
            render,
        }
    }

    pub fn starting_at(mut self, view: View) -> Self {
        self.router = Router::starting_at(view);
        self
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if !self.dashboard.is_loaded() {
            self.dashboard.refresh()?;
        }
        self.show()?;
        writeln!(self.out, "Type `help` for commands.")?;
        loop {
            write!(self.out, "prio> ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            if let Step::Quit = self.execute(&line)? {
                break;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn execute(&mut self, line: &str) -> anyhow::Result<Step> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Step::Continue);
        }
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match head.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Ok(Step::Quit),
            "help" | "?" => self.help()?,
            "refresh" => {
                let count = self.dashboard.refresh()?;
                tracing::info!(count, "manual refresh");
                self.show()?;
            }
            "edit" => match parse_id(rest) {
                Some(id) => self.edit(id)?,
                None => writeln!(self.out, "usage: edit <id>")?,
            },
            "remove" | "rm" => match parse_id(rest) {
                Some(id) => self.remove(id)?,
                None => writeln!(self.out, "usage: remove <id>")?,
            },
            "filter" => self.filter(rest)?,
            _ => match Navigation::parse(line) {
                Some(nav) => {
                    let view = self.router.navigate(nav);
                    self.show()?;
                    if view == View::Add {
                        self.fill_form(InitiativeDraft::default())?;
                    }
                }
                None => writeln!(self.out, "unknown command: {head} (type `help`)")?,
            },
        }
        Ok(Step::Continue)
    }

    fn show(&mut self) -> anyhow::Result<()> {
        let model = self.dashboard.view_model(self.router.current());
        write!(self.out, "{}", render_view(&model, self.render))?;
        Ok(())
    }

    fn help(&mut self) -> anyhow::Result<()> {
        let lines = [
            "add                          open the add form".to_string(),
            "browse [work stream]         one work stream's matrix".to_string(),
            "master                       every work stream".to_string(),
            "edit <id>                    edit a record (Enter keeps a value)".to_string(),
            "remove <id>                  delete a record".to_string(),
            "filter ws <choice>           work stream selector".to_string(),
            "filter horizon <choice>      time horizon selector".to_string(),
            "filter clear                 reset both selectors".to_string(),
            "refresh                      re-fetch from the store".to_string(),
            "quit".to_string(),
            String::new(),
            format!("work streams:  {}", selector_help::<WorkStream>()),
            format!("time horizons: {}", selector_help::<TimeHorizon>()),
        ];
        for line in lines {
            writeln!(self.out, "  {line}")?;
        }
        Ok(())
    }

    fn edit(&mut self, id: InitiativeId) -> anyhow::Result<()> {
        match self.dashboard.load_for_edit(id) {
            Ok(draft) => self.fill_form(draft),
            Err(e) => {
                self.report(e)?;
                self.show()
            }
        }
    }

    fn remove(&mut self, id: InitiativeId) -> anyhow::Result<()> {
        writeln!(self.out, "warning: removing initiative {id} cannot be undone")?;
        let confirmed = self
            .ask("type yes to confirm", "")?
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"));
        if !confirmed {
            writeln!(self.out, "remove cancelled")?;
            return Ok(());
        }
        match self.dashboard.remove(id) {
            Ok(record) => writeln!(self.out, "removed initiative {id} ({})", record.name())?,
            Err(e) => self.report(e)?,
        }
        self.show()
    }

    fn filter(&mut self, args: &str) -> anyhow::Result<()> {
        let (which, choice) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
        let current = self.dashboard.filters();
        let updated = match which.to_lowercase().as_str() {
            "clear" | "reset" => Ok(FilterSet::all()),
            "ws" | "stream" | "work-stream" => {
                Selection::<WorkStream>::parse(choice).map(|s| current.with_work_stream(s))
            }
            "horizon" | "time-horizon" => {
                Selection::<TimeHorizon>::parse(choice).map(|s| current.with_time_horizon(s))
            }
            _ => {
                writeln!(self.out, "usage: filter <ws|horizon> <choice> | filter clear")?;
                return Ok(());
            }
        };
        match updated {
            Ok(filters) => {
                self.dashboard.set_filters(filters);
                self.show()
            }
            Err(e) => self.report(StoreError::Validation(e)),
        }
    }

    /// Prompts for every field with the draft's values as defaults, then
    /// submits. A rejected draft can be corrected without retyping the rest.
    fn fill_form(&mut self, mut draft: InitiativeDraft) -> anyhow::Result<()> {
        loop {
            if !self.prompt_fields(&mut draft)? {
                writeln!(self.out, "form discarded")?;
                return Ok(());
            }
            match self.dashboard.submit(&draft) {
                Ok(CommitOutcome::Created(id)) => {
                    writeln!(self.out, "created initiative {id}")?;
                    break;
                }
                Ok(CommitOutcome::Updated(id)) => {
                    writeln!(self.out, "updated initiative {id}")?;
                    break;
                }
                Err(StoreError::Validation(e)) => {
                    self.report(StoreError::Validation(e))?;
                    let retry = self
                        .ask("fix and resubmit? [y/N]", "")?
                        .is_some_and(|answer| answer.eq_ignore_ascii_case("y"));
                    if !retry {
                        writeln!(self.out, "nothing saved")?;
                        break;
                    }
                }
                Err(e) => {
                    self.report(e)?;
                    break;
                }
            }
        }
        self.show()
    }

    /// Returns false when input ran out part way through.
    fn prompt_fields(&mut self, draft: &mut InitiativeDraft) -> anyhow::Result<bool> {
        let Some(name) = self.ask("name", &draft.name)? else {
            return Ok(false);
        };
        draft.name = name;
        let Some(impact) = self.ask_score("impact", draft.impact)? else {
            return Ok(false);
        };
        draft.impact = impact;
        let Some(feasibility) = self.ask_score("feasibility", draft.feasibility)? else {
            return Ok(false);
        };
        draft.feasibility = feasibility;
        let Some(work_stream) = self.ask("work stream", &draft.work_stream)? else {
            return Ok(false);
        };
        draft.work_stream = work_stream;
        let Some(time_horizon) = self.ask("time horizon", &draft.time_horizon)? else {
            return Ok(false);
        };
        draft.time_horizon = time_horizon;

        let current = draft.description.clone().unwrap_or_default();
        let Some(description) = self.ask("description (- clears)", &current)? else {
            return Ok(false);
        };
        draft.description = match description.as_str() {
            "-" | "" => None,
            _ => Some(description),
        };
        Ok(true)
    }

    fn ask_score(&mut self, label: &str, current: i64) -> anyhow::Result<Option<i64>> {
        loop {
            let Some(answer) = self.ask(label, &current.to_string())? else {
                return Ok(None);
            };
            match answer.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "{label} must be a whole number")?,
            }
        }
    }

    /// One prompt. An empty answer keeps `current`; `None` means end of input.
    fn ask(&mut self, label: &str, current: &str) -> anyhow::Result<Option<String>> {
        if current.is_empty() {
            write!(self.out, "{label}: ")?;
        } else {
            write!(self.out, "{label} [{current}]: ")?;
        }
        self.out.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        let answer = line.trim();
        Ok(Some(if answer.is_empty() {
            current.to_string()
        } else {
            answer.to_string()
        }))
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Recoverable store failures are shown and the session carries on.
    fn report(&mut self, err: StoreError) -> anyhow::Result<()> {
        if !err.is_recoverable() {
            return Err(err.into());
        }
        writeln!(self.out, "{}", format_error(&err.into()))?;
        Ok(())
    }
}

fn parse_id(s: &str) -> Option<InitiativeId> {
    s.trim()
        .trim_start_matches('#')
        .parse::<i64>()
        .ok()
        .map(InitiativeId::new)
}
