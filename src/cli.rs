//! Composable command line options.
//!
//! Each [`OptionGroup`] contributes a fixed set of flags and knows how to store them into its own
//! record. A [`Parser`] merges the flags of all registered groups into a single command for one
//! parse pass, then offers every flag given on the command line to the groups in registration
//! order. The first group that recognizes the flag consumes it.
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::device::Triplet;
use crate::error::{Error, Status};

/// The identifier of the usage flag, `-h/--help`.
pub const HELP: &str = "help";

/// The answer of a group to a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseState {
    /// The flag belongs to the group and was stored.
    Parsed,
    /// The flag belongs to some other group.
    NotParsed,
    /// The flag belongs to the group but its value is missing or malformed.
    Error,
}

/// A reusable set of flags, writing into its own options record.
pub trait OptionGroup {
    /// Descriptors of the flags of this group.
    fn args(&self) -> Vec<Arg>;

    /// Consume the flag `id` if it belongs to this group.
    fn parse(&mut self, id: &str, matches: &ArgMatches) -> ParseState;
}

/// Options controlling the amount of output.
///
/// Both may be set at the same time: quiet suppresses regular output, verbose adds diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub verbose: bool,
    pub quiet: bool,
}

/// Options choosing one device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleDevice {
    pub triplet: Triplet,
}

/// One parse pass over the flags of several groups.
pub struct Parser<'groups> {
    command: Command,
    groups: Vec<&'groups mut dyn OptionGroup>,
}

/// The result of a parse pass.
#[derive(Debug)]
pub enum Parsed {
    /// All flags were consumed, the program should run.
    Run,
    /// Usage was requested or the command line was malformed.
    Usage(Usage),
}

/// Usage text to show, and the parse error that caused it if any.
#[derive(Debug)]
pub struct Usage {
    pub text: String,
    pub error: Option<Error>,
}

impl<'groups> Parser<'groups> {
    pub fn new(name: &'static str, about: &'static str) -> Self {
        Parser {
            command: Command::new(name)
                .about(about)
                .disable_help_flag(true)
                .disable_version_flag(true)
                .args_override_self(true),
            groups: vec![],
        }
    }

    /// Add the flags of a group, and probe it after all previously added groups.
    pub fn group(mut self, group: &'groups mut dyn OptionGroup) -> Self {
        self.command = self.command.args(group.args());
        self.groups.push(group);
        self
    }

    /// Parse the arguments of this process.
    pub fn parse(self) -> Parsed {
        self.parse_from(std::env::args_os())
    }

    /// Parse arguments, where the first is the program name.
    pub fn parse_from<I, T>(mut self, args: I) -> Parsed
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.command.try_get_matches_from_mut(args) {
            Ok(matches) => matches,
            Err(err) => {
                let error = Error::with_message(Status::INVALID_ARG_VALUE, err.to_string());
                return Parsed::Usage(self.usage(Some(error)));
            }
        };

        let mut help = false;
        let mut error = None;

        let mut given: Vec<&str> = matches
            .ids()
            .map(|id| id.as_str())
            .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
            .collect();
        // Dispatch in command line order, so only errors before `-h` are reported.
        given.sort_by_key(|id| matches.index_of(id));

        for id in given {
            if id == HELP {
                help = true;
                break;
            }

            let mut state = ParseState::NotParsed;
            for group in self.groups.iter_mut() {
                state = group.parse(id, &matches);
                if state != ParseState::NotParsed {
                    break;
                }
            }

            match state {
                ParseState::Parsed => {}
                ParseState::NotParsed => log::debug!("No option group consumed `{}`", id),
                ParseState::Error => {
                    let value = matches
                        .get_raw(id)
                        .and_then(|mut raw| raw.next())
                        .map(|raw| raw.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    error = Some(Error::with_message(
                        Status::INVALID_ARG_VALUE,
                        format!("Invalid value `{}` for `--{}`", value, id),
                    ));
                    break;
                }
            }
        }

        if help || error.is_some() {
            return Parsed::Usage(self.usage(error));
        }

        Parsed::Run
    }

    fn usage(&mut self, error: Option<Error>) -> Usage {
        Usage {
            text: self.command.render_help().to_string(),
            error,
        }
    }
}

impl Usage {
    /// Print the parse error, if any, and the usage text.
    pub fn print(&self) {
        if let Some(error) = &self.error {
            eprintln!("Parse error");
            if let Some(message) = error.message() {
                eprintln!("{}", message);
            }
        }

        println!("{}", self.text);
    }

    /// Zero when usage was requested, the status code of the parse error otherwise.
    pub fn exit_code(&self) -> i32 {
        self.error.as_ref().map_or(0, |err| err.status().code())
    }
}

impl Diagnostic {
    /// The log level matching these options.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}

impl OptionGroup for Diagnostic {
    fn args(&self) -> Vec<Arg> {
        vec![
            Arg::new(HELP)
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Show this help"),
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress standard output"),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Extra informational output"),
        ]
    }

    fn parse(&mut self, id: &str, _: &ArgMatches) -> ParseState {
        match id {
            "quiet" => self.quiet = true,
            "verbose" => self.verbose = true,
            _ => return ParseState::NotParsed,
        }

        ParseState::Parsed
    }
}

impl OptionGroup for SingleDevice {
    fn args(&self) -> Vec<Arg> {
        vec![
            value_arg("platform", 'p', "(positive integer)", "Index of platform to use"),
            value_arg("device", 'd', "(positive integer)", "Index of device to use"),
            value_arg("type", 't', "(all|cpu|gpu|acc|cus|def)", "Type of device to use"),
        ]
    }

    fn parse(&mut self, id: &str, matches: &ArgMatches) -> ParseState {
        match id {
            "platform" => parse_unsigned(matches, id, &mut self.triplet.platform),
            "device" => parse_unsigned(matches, id, &mut self.triplet.device),
            "type" => parse_value(matches, id, &mut self.triplet.kind),
            _ => ParseState::NotParsed,
        }
    }
}

/// A flag taking one value, given either as `-x value`, `-x=value`, `--name value` or
/// `--name=value`.
pub fn value_arg(
    id: &'static str,
    short: char,
    value_name: &'static str,
    help: &'static str,
) -> Arg {
    Arg::new(id)
        .short(short)
        .long(id)
        .value_name(value_name)
        .help(help)
        .action(ArgAction::Set)
        .value_parser(clap::value_parser!(String))
}

/// Store the value of flag `id` into `target`, parsed with [`str::parse`].
pub fn parse_value<T: core::str::FromStr>(
    matches: &ArgMatches,
    id: &str,
    target: &mut T,
) -> ParseState {
    let value = match matches.get_one::<String>(id) {
        Some(value) => value,
        None => return ParseState::Error,
    };

    match value.trim().parse() {
        Ok(parsed) => {
            *target = parsed;
            ParseState::Parsed
        }
        Err(_) => ParseState::Error,
    }
}

/// Store the unsigned value of flag `id` into `target`.
///
/// Accepts decimal, hexadecimal with a `0x` prefix and octal with a leading `0`.
pub fn parse_unsigned(matches: &ArgMatches, id: &str, target: &mut usize) -> ParseState {
    let value = match matches.get_one::<String>(id) {
        Some(value) => value.trim(),
        None => return ParseState::Error,
    };

    let hex = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"));
    let parsed = match hex {
        Some(hex) => usize::from_str_radix(hex, 16),
        None if value.len() > 1 && value.starts_with('0') => usize::from_str_radix(&value[1..], 8),
        None => value.parse(),
    };

    match parsed {
        Ok(parsed) => {
            *target = parsed;
            ParseState::Parsed
        }
        Err(_) => ParseState::Error,
    }
}
