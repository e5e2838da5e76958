use super::render::{render_items, render_messages};
use super::setup::{build_cli, find_command, positional_args, COMMANDS};
use clap::ArgMatches;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;
use todocli::api::{CmdMessage, TodoApi};
use todocli::commands::{add, remove};
use todocli::config::{TodoConfig, CONFIG_DIR_ENV, DB_ENV};
use todocli::error::{Result, TodoError};
use todocli::store::sqlite::{SqliteStore, StoreOptions};

/// Everything a handler needs to reach the store. The store itself is opened
/// by the handler, after its arguments have been checked.
pub struct AppContext {
    pub db_path: PathBuf,
    pub options: StoreOptions,
}

impl AppContext {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = match config_dir() {
            Some(dir) => TodoConfig::load(dir)?,
            None => TodoConfig::default(),
        };
        let flag = global_arg::<PathBuf>(matches, "db").cloned();
        let env = std::env::var_os(DB_ENV).map(PathBuf::from);

        Ok(Self {
            db_path: config.resolve_db_path(flag, env),
            options: config.store_options(),
        })
    }

    fn open_api(&self) -> Result<TodoApi<SqliteStore>> {
        let store = SqliteStore::open(&self.db_path, &self.options)?;
        Ok(TodoApi::new(store))
    }
}

pub fn run() -> Result<()> {
    let matches = build_cli(COMMANDS).get_matches();
    init_logging(global_flag(&matches, "verbose"));

    let Some((name, sub)) = matches.subcommand() else {
        build_cli(COMMANDS).print_help()?;
        println!();
        return Ok(());
    };

    let spec = find_command(COMMANDS, name)
        .ok_or_else(|| TodoError::Usage(format!("unknown command: {name}")))?;
    let args = positional_args(sub);

    let ctx = AppContext::from_matches(&matches)?;
    log::debug!(
        "event=dispatch command={} args={} db={}",
        spec.name,
        args.len(),
        ctx.db_path.display()
    );
    (spec.handler)(&ctx, &args)
}

pub fn handle_add(ctx: &AppContext, texts: &[OsString]) -> Result<()> {
    if texts.is_empty() {
        print!("{}", render_messages(&[CmdMessage::info(add::USAGE)]));
        return Ok(());
    }

    let mut api = ctx.open_api()?;
    // One item at a time so each committed item is reported before a later one fails.
    for text in texts {
        let result = api.add_items(&[text.as_encoded_bytes()])?;
        print!("{}", render_messages(&result.messages));
    }
    api.close()
}

pub fn handle_remove(ctx: &AppContext, ids: &[OsString]) -> Result<()> {
    if ids.is_empty() {
        print!("{}", render_messages(&[CmdMessage::info(remove::USAGE)]));
        return Ok(());
    }

    let mut api = ctx.open_api()?;
    for id in ids {
        // Keys are decimal text; an id that is not UTF-8 names nothing.
        let result = api.remove_items(&[id.to_string_lossy()])?;
        print!("{}", render_messages(&result.messages));
    }
    api.close()
}

pub fn handle_show(ctx: &AppContext, _args: &[OsString]) -> Result<()> {
    let api = ctx.open_api()?;
    let result = api.show_items()?;
    print!("{}", render_items(&result.listed_items));
    api.close()
}

fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "todocli", "todocli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Global args may land on either the top-level matches or the subcommand's.
fn global_arg<'a, T: Clone + Send + Sync + 'static>(
    matches: &'a ArgMatches,
    id: &str,
) -> Option<&'a T> {
    matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<T>(id))
        .or_else(|| matches.get_one::<T>(id))
}

fn global_flag(matches: &ArgMatches, id: &str) -> bool {
    matches.get_flag(id) || matches.subcommand().is_some_and(|(_, sub)| sub.get_flag(id))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,todocli=debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .try_init();
}
