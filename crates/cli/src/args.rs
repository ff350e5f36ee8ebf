//! Command-line parsing.

use anyhow::{anyhow, bail, Context, Result};
use docstore::{ParamValue, Params, Query, RequestOptions};
use serde_json::Value;

pub const USAGE: &str = "\
usage: docstore [--config URL|PATH] [--dry-run] [--start N] [--end N] [--param KEY=VALUE]... <command>

commands:
  info
  get URI
  insert URI JSON
  destroy URI
  destroy-matching JSON
  query JSON
  find QUERY
  nth N QUERY
  first QUERY
  field get|create|destroy NAME
  range get|create|destroy NAME

QUERY is a JSON object for a key/value query, anything else is a text query.";

/// A management action on a field or range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Create,
    Destroy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Info,
    Get { uri: String },
    Insert { uri: String, document: Value },
    Destroy { uri: String },
    DestroyMatching { filter: Params },
    Query { query: Value },
    Find { query: Query },
    Nth { n: u64, query: Query },
    First { query: Query },
    Field { action: Action, name: String },
    Range { action: Action, name: String },
}

impl Command {
    /// The command word as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Info => "info",
            Command::Get { .. } => "get",
            Command::Insert { .. } => "insert",
            Command::Destroy { .. } => "destroy",
            Command::DestroyMatching { .. } => "destroy-matching",
            Command::Query { .. } => "query",
            Command::Find { .. } => "find",
            Command::Nth { .. } => "nth",
            Command::First { .. } => "first",
            Command::Field { .. } => "field",
            Command::Range { .. } => "range",
        }
    }

    /// Whether `--start`, `--end` and `--param` reach the request.
    pub fn accepts_options(&self) -> bool {
        match self {
            Command::Get { .. }
            | Command::Insert { .. }
            | Command::Query { .. }
            | Command::Find { .. } => true,
            Command::Field { action, .. } | Command::Range { action, .. } => {
                *action == Action::Create
            }
            Command::Info
            | Command::Destroy { .. }
            | Command::DestroyMatching { .. }
            | Command::Nth { .. }
            | Command::First { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config: Option<String>,
    pub dry_run: bool,
    pub options: RequestOptions,
    pub command: Command,
}

/// Parses arguments (without the program name).
pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Cli> {
    let mut args = args.into_iter();
    let mut config = None;
    let mut dry_run = false;
    let mut options = RequestOptions::new();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(value_of(&mut args, "--config")?),
            "--dry-run" => dry_run = true,
            "--start" => options = options.start(number(&value_of(&mut args, "--start")?)?),
            "--end" => options = options.end(number(&value_of(&mut args, "--end")?)?),
            "--param" => {
                let pair = value_of(&mut args, "--param")?;
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow!("--param expects KEY=VALUE, got '{pair}'"))?;
                options = options.param(key, value);
            }
            flag if flag.starts_with("--") => bail!("unknown argument: {flag}"),
            _ => positional.push(arg),
        }
    }

    let command = command(positional)?;
    if !options.is_empty() && !command.accepts_options() {
        bail!("`{}` does not accept --param/--start/--end", command.name());
    }

    Ok(Cli {
        config,
        dry_run,
        options,
        command,
    })
}

fn command(positional: Vec<String>) -> Result<Command> {
    let words: Vec<&str> = positional.iter().map(String::as_str).collect();
    let command = match words.as_slice() {
        ["info"] => Command::Info,
        ["get", uri] => Command::Get { uri: uri.to_string() },
        ["insert", uri, doc] => Command::Insert {
            uri: uri.to_string(),
            document: json(doc)?,
        },
        ["destroy", uri] => Command::Destroy { uri: uri.to_string() },
        ["destroy-matching", filter] => Command::DestroyMatching {
            filter: filter_params(filter)?,
        },
        ["query", q] => Command::Query { query: json(q)? },
        ["find", q] => Command::Find { query: query(q)? },
        ["nth", n, q] => Command::Nth {
            n: number(n)?,
            query: query(q)?,
        },
        ["first", q] => Command::First { query: query(q)? },
        ["field", action, name] => Command::Field {
            action: manage_action(action)?,
            name: name.to_string(),
        },
        ["range", action, name] => Command::Range {
            action: manage_action(action)?,
            name: name.to_string(),
        },
        [] => bail!("missing command"),
        other => bail!("unrecognised command: {}", other.join(" ")),
    };
    Ok(command)
}

fn value_of(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn number(raw: &str) -> Result<u64> {
    raw.parse()
        .with_context(|| format!("expected a positive integer, got '{raw}'"))
}

fn json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("invalid JSON: {raw}"))
}

/// A JSON object is a key/value query; anything else is taken as text.
fn query(raw: &str) -> Result<Query> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(Query::parse(value)?),
        _ => Ok(Query::text(raw)),
    }
}

fn filter_params(raw: &str) -> Result<Params> {
    match json(raw)? {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::scalar_from_json(v)))
            .collect()),
        _ => bail!("destroy-matching expects a JSON object, got {raw}"),
    }
}

fn manage_action(raw: &str) -> Result<Action> {
    match raw {
        "get" => Ok(Action::Get),
        "create" => Ok(Action::Create),
        "destroy" => Ok(Action::Destroy),
        other => bail!("unknown action '{other}', expected get, create or destroy"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore::{KeyValueQuery, Window};
    use serde_json::json;

    fn parse_str(line: &str) -> Result<Cli> {
        parse(line.split_whitespace().map(str::to_string))
    }

    #[test]
    fn global_flags_and_window() {
        let cli = parse_str("--config http://db:4830 --start 2 --end 2 --dry-run find hello").unwrap();
        assert_eq!(cli.config.as_deref(), Some("http://db:4830"));
        assert!(cli.dry_run);
        assert_eq!(cli.options.pagination(), Window::single(2));
        assert_eq!(cli.command, Command::Find { query: Query::text("hello") });
    }

    #[test]
    fn object_queries_are_key_value() {
        let cli = parse_str(r#"first {"github":"x"}"#).unwrap();
        assert_eq!(
            cli.command,
            Command::First {
                query: KeyValueQuery::new().field("github", "x").into()
            }
        );
    }

    #[test]
    fn non_object_json_is_text() {
        let cli = parse_str("find 42").unwrap();
        assert_eq!(cli.command, Command::Find { query: Query::text("42") });
    }

    #[test]
    fn params_and_management() {
        let cli = parse_str("--param type=string field create title").unwrap();
        assert_eq!(cli.options.extra().get("type"), Some(&ParamValue::from("string")));
        assert_eq!(
            cli.command,
            Command::Field {
                action: Action::Create,
                name: "title".into()
            }
        );
    }

    #[test]
    fn destroy_matching_takes_an_object() {
        let cli = parse_str(r#"destroy-matching {"collection":"c"}"#).unwrap();
        assert_eq!(
            cli.command,
            Command::DestroyMatching {
                filter: Params::new().with("collection", "c")
            }
        );
        assert!(parse_str("destroy-matching [1]").is_err());
    }

    #[test]
    fn options_are_rejected_where_they_would_be_dropped() {
        for line in [
            "--param collection=c first foo",
            "--start 2 nth 3 foo",
            "--end 1 info",
            "--param a=b destroy x",
            r#"--param a=b destroy-matching {"c":"d"}"#,
            "--param type=string field get title",
            "--start 1 range destroy idx",
        ] {
            let err = parse_str(line).unwrap_err();
            assert!(err.to_string().contains("does not accept"), "{line}: {err}");
        }
        let err = parse_str("--param collection=c first foo").unwrap_err();
        assert_eq!(err.to_string(), "`first` does not accept --param/--start/--end");
    }

    #[test]
    fn options_are_kept_where_they_are_sent() {
        for line in [
            "--param a=b get x",
            r#"--param a=b insert x {}"#,
            r#"--start 1 query {"q":1}"#,
            "--start 1 --end 5 find foo",
            "--param type=int range create idx",
        ] {
            assert!(parse_str(line).is_ok(), "{line}");
        }
    }

    #[test]
    fn errors() {
        assert!(parse_str("").is_err());
        assert!(parse_str("--bogus info").is_err());
        assert!(parse_str("nth x hello").is_err());
        assert!(parse_str("range drop idx").is_err());
        assert!(parse_str("--start").is_err());
        assert!(parse_str("insert a {not-json").is_err());
    }
}
