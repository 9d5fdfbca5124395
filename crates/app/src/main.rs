use std::fmt;
use std::io::{self, Write};

use quiz_core::model::CardSource;
use services::{ApiConfig, AppServices, Clock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod interactive;
mod render;

const DEFAULT_DB_URL: &str = "sqlite://flashquiz.sqlite3";
const DEFAULT_LOG_FILTER: &str = "services=info,storage=info,app=info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidSource(String),
    InvalidDbUrl { raw: String },
    ConflictingInput,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing {name}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidSource(raw) => {
                write!(f, "invalid --source value: {raw} (expected generated or saved)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::ConflictingInput => write!(f, "use either --text or --file, not both"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

/// 1-based card number from the command line to a 0-based index.
fn parse_card_number(raw: String) -> Result<usize, ArgsError> {
    let number: usize = parse_number(raw.clone(), "<n>")?;
    number
        .checked_sub(1)
        .ok_or(ArgsError::InvalidNumber { flag: "<n>", raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--db <sqlite_url>] <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login    --email <email> --password <password>");
    eprintln!("  register --name <name> --email <email> --password <password>");
    eprintln!("  logout");
    eprintln!("  whoami");
    eprintln!("  generate (--text <text> | --file <path>) [--lang <code>]");
    eprintln!("  cards                     list the current card set");
    eprintln!("  browse                    step through cards one at a time");
    eprintln!("  save-all                  save every generated card");
    eprintln!("  save <n>                  save generated card n");
    eprintln!("  favorite <n>              toggle the favorite flag on card n");
    eprintln!("  quiz [--source generated|saved] [--count <n>]");
    eprintln!("  progress");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASHQUIZ_DB_URL, FLASHQUIZ_API_URL, FLASHQUIZ_QUIZ_API_URL,");
    eprintln!("  FLASHQUIZ_QUESTIONS, FLASHQUIZ_HTTP_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TextInput {
    Inline(String),
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    Whoami,
    Generate {
        input: TextInput,
        language: Option<String>,
    },
    Cards,
    Browse,
    SaveAll,
    Save {
        index: usize,
    },
    Favorite {
        index: usize,
    },
    Quiz {
        source: CardSource,
        count: Option<u32>,
    },
    Progress,
}

#[derive(Debug)]
struct Args {
    db_url: String,
    command: Command,
}

/// Flags shared by every command, collected before the command is built.
#[derive(Default)]
struct Flags {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    text: Option<String>,
    file: Option<String>,
    lang: Option<String>,
    source: Option<CardSource>,
    count: Option<u32>,
    positional: Option<String>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut args = args.into_iter();
        let mut db_url = std::env::var("FLASHQUIZ_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut command: Option<String> = None;
        let mut flags = Flags::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                "--email" => flags.email = Some(require_value(&mut args, "--email")?),
                "--password" => flags.password = Some(require_value(&mut args, "--password")?),
                "--name" => flags.name = Some(require_value(&mut args, "--name")?),
                "--text" => flags.text = Some(require_value(&mut args, "--text")?),
                "--file" => flags.file = Some(require_value(&mut args, "--file")?),
                "--lang" => flags.lang = Some(require_value(&mut args, "--lang")?),
                "--source" => {
                    let value = require_value(&mut args, "--source")?;
                    let source = value
                        .parse::<CardSource>()
                        .map_err(|_| ArgsError::InvalidSource(value))?;
                    flags.source = Some(source);
                }
                "--count" => {
                    let value = require_value(&mut args, "--count")?;
                    flags.count = Some(parse_number(value, "--count")?);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ if command.is_none() => command = Some(arg),
                _ if flags.positional.is_none() => flags.positional = Some(arg),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let Some(command) = command else {
            return Ok(None);
        };
        let command = Command::build(&command, flags)?;
        Ok(Some(Self { db_url, command }))
    }
}

impl Command {
    fn build(name: &str, flags: Flags) -> Result<Self, ArgsError> {
        let missing = |name: &'static str| ArgsError::MissingArgument { name };
        let command = match name {
            "login" => Self::Login {
                email: flags.email.ok_or_else(|| missing("--email"))?,
                password: flags.password.ok_or_else(|| missing("--password"))?,
            },
            "register" => Self::Register {
                name: flags.name.ok_or_else(|| missing("--name"))?,
                email: flags.email.ok_or_else(|| missing("--email"))?,
                password: flags.password.ok_or_else(|| missing("--password"))?,
            },
            "logout" => Self::Logout,
            "whoami" => Self::Whoami,
            "generate" => {
                let input = match (flags.text, flags.file) {
                    (Some(_), Some(_)) => return Err(ArgsError::ConflictingInput),
                    (Some(text), None) => TextInput::Inline(text),
                    (None, Some(path)) => TextInput::File(path),
                    (None, None) => return Err(missing("--text or --file")),
                };
                Self::Generate {
                    input,
                    language: flags.lang,
                }
            }
            "cards" => Self::Cards,
            "browse" => Self::Browse,
            "save-all" => Self::SaveAll,
            "save" => Self::Save {
                index: parse_card_number(flags.positional.ok_or_else(|| missing("<n>"))?)?,
            },
            "favorite" => Self::Favorite {
                index: parse_card_number(flags.positional.ok_or_else(|| missing("<n>"))?)?,
            },
            "quiz" => Self::Quiz {
                source: flags.source.unwrap_or_default(),
                count: flags.count,
            },
            "progress" => Self::Progress,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };
        Ok(command)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// The store creates the database file itself; only the directory has to exist.
fn ensure_db_dir(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url.contains(":memory:") || db_url.contains("mode=memory") {
        return Ok(());
    }
    let path = db_url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    init_tracing();

    ensure_db_dir(&parsed.db_url)?;
    let config = ApiConfig::from_env()?;
    debug!(db = %parsed.db_url, api = %config.api_base_url, quiz = %config.quiz_base_url, "starting");
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), config).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match parsed.command {
        Command::Login { email, password } => {
            let user = services.auth().login(&email, &password).await?;
            writeln!(out, "{}", render::greeting(Some(&user)))?;
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            services.auth().register(&name, &email, &password).await?;
            writeln!(out, "Registered. Log in with `login --email {email}`.")?;
        }
        Command::Logout => {
            services.auth().logout().await?;
            writeln!(out, "Logged out.")?;
        }
        Command::Whoami => {
            let user = services.auth().current_user().await?;
            writeln!(out, "{}", render::greeting(user.as_ref()))?;
        }
        Command::Generate { input, language } => {
            let text = match input {
                TextInput::Inline(text) => text,
                TextInput::File(path) => std::fs::read_to_string(path)?,
            };
            let cards = services
                .library()
                .generate(&text, language.as_deref())
                .await?;
            writeln!(out, "Generated {} cards.", cards.len())?;
            writeln!(out, "{}", render::card_list(&cards))?;
        }
        Command::Cards => {
            let cards = services.library().browse().await?;
            writeln!(out, "{}", render::card_list(&cards))?;
        }
        Command::Browse => {
            let cards = services.library().browse().await?;
            interactive::run_browse(&cards, io::stdin().lock(), &mut out)?;
        }
        Command::SaveAll => {
            let count = services.library().save_all().await?;
            writeln!(out, "{count} cards saved.")?;
        }
        Command::Save { index } => {
            let card = services.library().save_one(index).await?;
            writeln!(out, "Saved: {}", card.prompt)?;
        }
        Command::Favorite { index } => {
            let library = services.library();
            let mut cards = library.browse().await?;
            let len = cards.len();
            let card = cards
                .get_mut(index)
                .ok_or(services::CardLibraryError::CardOutOfRange { index, len })?;
            let favorited = library.toggle_favorite(card).await?;
            let state = if favorited { "favorited" } else { "unfavorited" };
            writeln!(out, "{} {state}.", card.prompt)?;
        }
        Command::Quiz { source, count } => {
            let mut run = services.quizzes().start(source, count).await?;
            interactive::run_quiz(&mut run, io::stdin().lock(), &mut out)?;
        }
        Command::Progress => {
            let report = services.progress().load().await?;
            writeln!(out, "{}", render::progress(report.as_ref()))?;
        }
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_quiz_with_source_and_count() {
        let args = parse(&["quiz", "--source", "saved", "--count", "7"])
            .unwrap()
            .unwrap();
        assert_eq!(
            args.command,
            Command::Quiz {
                source: CardSource::Saved,
                count: Some(7),
            }
        );
    }

    #[test]
    fn db_flag_is_accepted_before_the_command() {
        let args = parse(&["--db", "sqlite://tmp/test.sqlite3", "cards"])
            .unwrap()
            .unwrap();
        assert_eq!(args.db_url, "sqlite://tmp/test.sqlite3");
        assert_eq!(args.command, Command::Cards);
    }

    #[test]
    fn save_takes_a_one_based_card_number() {
        let args = parse(&["save", "3"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Save { index: 2 });
        assert!(matches!(
            parse(&["save", "0"]),
            Err(ArgsError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn generate_needs_exactly_one_input() {
        assert!(matches!(
            parse(&["generate"]),
            Err(ArgsError::MissingArgument { .. })
        ));
        assert!(matches!(
            parse(&["generate", "--text", "a", "--file", "b"]),
            Err(ArgsError::ConflictingInput)
        ));
        let args = parse(&["generate", "--file", "notes.txt", "--lang", "de"])
            .unwrap()
            .unwrap();
        assert_eq!(
            args.command,
            Command::Generate {
                input: TextInput::File("notes.txt".into()),
                language: Some("de".into()),
            }
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(matches!(
            parse(&["quiz", "--source", "mine"]),
            Err(ArgsError::InvalidSource(_))
        ));
        assert!(matches!(parse(&["dance"]), Err(ArgsError::UnknownCommand(_))));
        assert!(matches!(parse(&["cards", "--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(parse(&[]).unwrap().is_none());
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/app.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/app.sqlite3"));
    }

    #[test]
    fn db_dir_check_skips_memory_and_rejects_foreign_urls() {
        assert!(ensure_db_dir("sqlite::memory:").is_ok());
        assert!(ensure_db_dir("sqlite:file:db?mode=memory&cache=shared").is_ok());
        assert!(ensure_db_dir("postgres://localhost/quiz").is_err());
        assert!(ensure_db_dir("sqlite://").is_err());
    }
}
