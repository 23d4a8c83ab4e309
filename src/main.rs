mod app;
mod help;
mod toast;
use crate::app::App;
use crate::toast::Toast;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use weekcal::CalendarModel;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { date, log_file })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { date, log_file } => {
                // Dropping the handle would stop file logging
                let _logger = log_file.map(init_logging).transpose()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let seed = date.unwrap_or(today);
                log::info!("starting at {seed} (today is {today})");
                let model = CalendarModel::new(seed).with_listener(Toast::new());
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(today, model).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Paged seven-day terminal calendar with day selection");
                println!();
                println!("The calendar starts at the given date, or at today if none is given.");
                println!();
                println!("Options:");
                println!("  -l, --log-file <PATH>  Write logs to PATH (level set by $RUST_LOG)");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: PathBuf) -> anyhow::Result<LoggerHandle> {
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    let released = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    let value = r?;
    released.context("failed to disable mouse capture")?;
    Ok(value)
}
