use crate::app::controller::{Controller, Outcome};
use crate::core::render::{render_health, render_view};
use crate::core::session::View;
use crate::domain::model::{parse_domain_list, parse_num_results, SearchType};
use crate::domain::ports::{SearchApi, Storage};
use crate::utils::error::{ClientError, Result};
use crate::config::MAX_NUM_RESULTS;
use crate::utils::validation::{validate_domains, validate_range};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const HELP: &str = "\
Commands:
  /<query>, search <query>   run a search
  select <n...>              select results (by number)
  unselect <n...>            clear results from the selection
  toggle <n...>              flip results in/out of the selection
  summarize                  AI summary of 1-5 selected results
  close                      close the summary
  back, esc                  go back one view
  new                        start a new search
  retry                      dismiss an error
  export                     save the summary as JSON
  copy                       copy the summary to the clipboard
  options                    show/hide advanced search options
  set <option> <value>       num | type | include | exclude
  health                     check the API status
  help                       show this help
  quit                       exit";

#[derive(Debug, Clone, PartialEq)]
pub enum SetOption {
    NumResults(u32),
    SearchType(SearchType),
    IncludeDomains(Option<Vec<String>>),
    ExcludeDomains(Option<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Select(Vec<usize>),
    Unselect(Vec<usize>),
    Toggle(Vec<usize>),
    Summarize,
    Close,
    Back,
    New,
    Retry,
    Export,
    Copy,
    Options,
    Set(SetOption),
    Health,
    Help,
    Quit,
    Empty,
}

/// Parses 1-based result numbers into 0-based indices.
fn parse_indices(args: &str) -> Result<Vec<usize>> {
    let indices = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(ClientError::validation(format!("'{}' is not a result number", s))),
        })
        .collect::<Result<Vec<_>>>()?;
    if indices.is_empty() {
        return Err(ClientError::validation("Give at least one result number"));
    }
    Ok(indices)
}

fn parse_set(args: &str) -> Result<SetOption> {
    let (name, value) = match args.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (args, ""),
    };
    match name {
        "num" | "num_results" => {
            let n = parse_num_results(value);
            validate_range("num_results", n, 1, MAX_NUM_RESULTS)?;
            Ok(SetOption::NumResults(n))
        }
        "type" | "search_type" => value
            .parse::<SearchType>()
            .map(SetOption::SearchType)
            .map_err(ClientError::validation),
        "include" | "include_domains" => {
            let domains = parse_domain_list(value);
            validate_domains("include_domains", domains.as_deref().unwrap_or(&[]))?;
            Ok(SetOption::IncludeDomains(domains))
        }
        "exclude" | "exclude_domains" => {
            let domains = parse_domain_list(value);
            validate_domains("exclude_domains", domains.as_deref().unwrap_or(&[]))?;
            Ok(SetOption::ExcludeDomains(domains))
        }
        other => Err(ClientError::validation(format!(
            "Unknown option '{}', expected num, type, include or exclude",
            other
        ))),
    }
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if let Some(query) = line.strip_prefix('/') {
        return Ok(Command::Search(query.trim().to_string()));
    }

    let (word, args) = match line.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(args.to_string()),
        "select" => Command::Select(parse_indices(args)?),
        "unselect" | "deselect" => Command::Unselect(parse_indices(args)?),
        "toggle" | "t" => Command::Toggle(parse_indices(args)?),
        "summarize" | "summary" => Command::Summarize,
        "close" => Command::Close,
        "back" | "esc" | "escape" => Command::Back,
        "new" => Command::New,
        "retry" => Command::Retry,
        "export" => Command::Export,
        "copy" => Command::Copy,
        "options" | "advanced" => Command::Options,
        "set" => Command::Set(parse_set(args)?),
        "health" => Command::Health,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(ClientError::validation(format!(
                "Unknown command '{}' (try `help`)",
                other
            )))
        }
    };
    Ok(command)
}

/// Interactive loop over stdin; writes views to `out`.
pub struct Repl<A: SearchApi, S: Storage, W: AsyncWrite + Unpin> {
    controller: Controller<A, S>,
    out: W,
}

impl<A: SearchApi, S: Storage, W: AsyncWrite + Unpin> Repl<A, S, W> {
    pub fn new(controller: Controller<A, S>, out: W) -> Self {
        Self { controller, out }
    }

    pub fn controller(&self) -> &Controller<A, S> {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn print(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn print_view(&mut self) -> Result<()> {
        let text = render_view(&self.controller.session);
        self.print(&text).await
    }

    pub async fn run<R: tokio::io::AsyncRead + Unpin>(&mut self, input: R) -> Result<()> {
        let status = self.controller.check_health().await;
        self.print(&render_health(status)).await?;
        self.print_view().await?;

        let mut lines = BufReader::new(input).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command).await?,
                Err(e) => self.print(&format!("⚠ {}", e.user_friendly_message())).await?,
            }
        }
        Ok(())
    }

    /// Applies one command and prints the result.
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Empty => return Ok(()),
            Command::Search(query) => {
                if self.controller.search(&query).await == Outcome::Skipped {
                    return self.print("⚠ Type something to search for").await;
                }
            }
            Command::Select(_) | Command::Unselect(_) | Command::Toggle(_)
                if self.controller.session.view() != &View::Results =>
            {
                return self.print("⚠ Selection is only available on the results view").await;
            }
            Command::Select(indices) => {
                for index in indices {
                    if let Err(e) = self.controller.session.select(index) {
                        return self.print(&format!("⚠ {}", e.user_friendly_message())).await;
                    }
                }
            }
            Command::Unselect(indices) => {
                for index in indices {
                    if let Err(e) = self.controller.session.deselect(index) {
                        return self.print(&format!("⚠ {}", e.user_friendly_message())).await;
                    }
                }
            }
            Command::Toggle(indices) => {
                for index in indices {
                    if let Err(e) = self.controller.session.toggle(index) {
                        return self.print(&format!("⚠ {}", e.user_friendly_message())).await;
                    }
                }
            }
            Command::Summarize => {
                if self.controller.generate_summary().await == Outcome::Skipped {
                    let label = self.controller.session.selection_label();
                    return self
                        .print(&format!("⚠ Select 1 to 5 results first ({})", label))
                        .await;
                }
            }
            Command::Close => self.controller.session.close_summary(),
            Command::Back => self.controller.session.back(),
            Command::New => self.controller.session.reset(),
            Command::Retry => self.controller.session.retry(),
            Command::Export => {
                let message = match self.controller.export_summary().await {
                    Ok(path) => format!("📁 Summary saved to: {}", path),
                    Err(e) => format!("⚠ {}", e.user_friendly_message()),
                };
                return self.print(&message).await;
            }
            Command::Copy => {
                let message = if self.controller.copy_summary() {
                    "✓ Copied!"
                } else {
                    "⚠ Nothing copied"
                };
                return self.print(message).await;
            }
            Command::Options => {
                self.controller.session.toggle_options();
            }
            Command::Set(option) => {
                match option {
                    SetOption::NumResults(n) => self.controller.session.options.num_results = n,
                    SetOption::SearchType(t) => self.controller.session.options.search_type = t,
                    SetOption::IncludeDomains(d) => self.controller.session.options.include_domains = d,
                    SetOption::ExcludeDomains(d) => self.controller.session.options.exclude_domains = d,
                }
                self.controller.session.options_open = true;
            }
            Command::Health => {
                let status = self.controller.check_health().await;
                return self.print(&render_health(status)).await;
            }
            Command::Help => return self.print(HELP).await,
            Command::Quit => return Ok(()),
        }
        self.print_view().await
    }
}
