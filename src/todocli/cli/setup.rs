use super::commands::{handle_add, handle_remove, handle_show, AppContext};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use todocli::error::Result;

pub const APP_NAME: &str = "todocli";
pub const APP_ABOUT: &str = "Keep track of things you can't remember. What else?";

pub type Handler = fn(&AppContext, &[OsString]) -> Result<()>;

/// One subcommand: how it is spelled, how it is described, what runs it.
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub about: &'static str,
    /// Value name of the trailing positional arguments, if the command takes any
    pub arg_name: Option<&'static str>,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        aliases: &["a"],
        about: "Add an item.",
        arg_name: Some("TEXT"),
        handler: handle_add,
    },
    CommandSpec {
        name: "remove",
        aliases: &["r"],
        about: "Remove an item.",
        arg_name: Some("ID"),
        handler: handle_remove,
    },
    CommandSpec {
        name: "show",
        aliases: &["s"],
        about: "Show all items",
        arg_name: None,
        handler: handle_show,
    },
];

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

pub fn build_cli(registry: &[CommandSpec]) -> Command {
    let mut cmd = Command::new(APP_NAME)
        .version(get_version())
        .about(APP_ABOUT)
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("Store file (overrides TODOCLI_DB and the config file)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Verbose output"),
        );

    for spec in registry {
        let mut sub = Command::new(spec.name)
            .visible_aliases(spec.aliases.iter().copied())
            .about(spec.about);
        if let Some(arg_name) = spec.arg_name {
            sub = sub.arg(
                Arg::new("args")
                    .value_name(arg_name)
                    .value_parser(value_parser!(OsString))
                    .num_args(0..)
                    .action(ArgAction::Append),
            );
        }
        cmd = cmd.subcommand(sub);
    }

    cmd
}

pub fn find_command<'a>(registry: &'a [CommandSpec], name: &str) -> Option<&'a CommandSpec> {
    registry
        .iter()
        .find(|spec| spec.name == name || spec.aliases.iter().any(|a| *a == name))
}

/// Trailing positional values of a matched subcommand, raw as the OS passed them.
///
/// Commands registered without `arg_name` have no `args` argument at all.
pub fn positional_args(sub: &ArgMatches) -> Vec<OsString> {
    sub.try_get_many::<OsString>("args")
        .ok()
        .flatten()
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (String, Vec<OsString>) {
        let matches = build_cli(COMMANDS)
            .try_get_matches_from(args)
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        (name.to_string(), positional_args(sub))
    }

    #[test]
    fn registry_builds_a_valid_command() {
        build_cli(COMMANDS).debug_assert();
    }

    #[test]
    fn aliases_resolve_to_canonical_names() {
        assert_eq!(parse(&["todocli", "a", "milk"]).0, "add");
        assert_eq!(parse(&["todocli", "r", "1"]).0, "remove");
        assert_eq!(parse(&["todocli", "s"]).0, "show");
    }

    #[test]
    fn add_collects_every_text() {
        let (_, texts) = parse(&["todocli", "add", "buy milk", "call mom"]);
        assert_eq!(texts, vec!["buy milk", "call mom"]);
    }

    #[test]
    fn add_accepts_no_texts() {
        let (name, texts) = parse(&["todocli", "add"]);
        assert_eq!(name, "add");
        assert!(texts.is_empty());
    }

    #[test]
    fn show_parses_without_positional_args() {
        let (name, args) = parse(&["todocli", "show"]);
        assert_eq!(name, "show");
        assert!(args.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn add_keeps_non_utf8_text() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"caf\xe9");
        let matches = build_cli(COMMANDS)
            .try_get_matches_from([OsStr::new("todocli"), OsStr::new("add"), raw])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(positional_args(sub), vec![raw.to_os_string()]);
    }

    #[test]
    fn show_rejects_arguments() {
        assert!(build_cli(COMMANDS)
            .try_get_matches_from(["todocli", "show", "extra"])
            .is_err());
    }

    #[test]
    fn db_flag_is_global() {
        let matches = build_cli(COMMANDS)
            .try_get_matches_from(["todocli", "show", "--db", "/tmp/other.db"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(
            sub.get_one::<PathBuf>("db"),
            Some(&PathBuf::from("/tmp/other.db"))
        );
    }

    #[test]
    fn find_command_by_name_or_alias() {
        assert_eq!(find_command(COMMANDS, "remove").unwrap().name, "remove");
        assert_eq!(find_command(COMMANDS, "s").unwrap().name, "show");
        assert!(find_command(COMMANDS, "edit").is_none());
    }
}
