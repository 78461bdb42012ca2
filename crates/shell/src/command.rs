//! Shell command grammar.
//!
//! One command per line, whitespace-separated, double quotes group words.
//! Entry and lot numbers are 1-based as printed; they are converted to
//! 0-based positions here. Quantities and dates stay raw text so the
//! inventory forms own their validation.

use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create {
        name: String,
        category: String,
        quantity: String,
        expiration_date: Option<String>,
    },
    List,
    Show {
        entry: usize,
    },
    Info {
        entry: usize,
        name: String,
        category: String,
    },
    Add {
        entry: usize,
        quantity: String,
        expiration_date: Option<String>,
    },
    Edit {
        entry: usize,
        lot: usize,
        quantity: String,
        expiration_date: Option<String>,
    },
    Remove {
        entry: usize,
        lot: usize,
    },
    Expirable {
        entry: usize,
        expirable: bool,
    },
    Delete {
        entry: usize,
    },
    Category {
        name: String,
    },
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  create \"<name>\" \"<category>\" <qty> [<yyyy-mm-dd>]   new entry (a date makes it expirable)
  list                                               entries with totals
  show <entry>                                       consolidate and show lots
  info <entry> \"<name>\" \"<category>\"                 edit name and category
  add <entry> <qty> [<yyyy-mm-dd>]                   new lot
  edit <entry> <lot> <qty> [<yyyy-mm-dd>]            replace a lot
  remove <entry> <lot>                               remove a lot
  expirable <entry> on|off                           switch dated stock on or off
  delete <entry>                                     drop an entry
  category <name>                                    entries in a category
  export                                             JSON snapshot
  help | quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ShellError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };
    if head.starts_with('#') {
        return Ok(None);
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "create" | "new" => {
            let [name, category, quantity, rest @ ..] = args else {
                return Err(usage("create \"<name>\" \"<category>\" <qty> [<date>]"));
            };
            Command::Create {
                name: name.clone(),
                category: category.clone(),
                quantity: quantity.clone(),
                expiration_date: optional_date(rest, "create")?,
            }
        }
        "list" | "ls" => {
            expect_none(args, "list")?;
            Command::List
        }
        "show" => match args {
            [entry] => Command::Show {
                entry: position(entry, "entry")?,
            },
            _ => return Err(usage("show <entry>")),
        },
        "info" => match args {
            [entry, name, category] => Command::Info {
                entry: position(entry, "entry")?,
                name: name.clone(),
                category: category.clone(),
            },
            _ => return Err(usage("info <entry> \"<name>\" \"<category>\"")),
        },
        "add" => {
            let [entry, quantity, rest @ ..] = args else {
                return Err(usage("add <entry> <qty> [<date>]"));
            };
            Command::Add {
                entry: position(entry, "entry")?,
                quantity: quantity.clone(),
                expiration_date: optional_date(rest, "add")?,
            }
        }
        "edit" => {
            let [entry, lot, quantity, rest @ ..] = args else {
                return Err(usage("edit <entry> <lot> <qty> [<date>]"));
            };
            Command::Edit {
                entry: position(entry, "entry")?,
                lot: position(lot, "lot")?,
                quantity: quantity.clone(),
                expiration_date: optional_date(rest, "edit")?,
            }
        }
        "remove" | "rm" => match args {
            [entry, lot] => Command::Remove {
                entry: position(entry, "entry")?,
                lot: position(lot, "lot")?,
            },
            _ => return Err(usage("remove <entry> <lot>")),
        },
        "expirable" => match args {
            [entry, flag] => Command::Expirable {
                entry: position(entry, "entry")?,
                expirable: switch(flag)?,
            },
            _ => return Err(usage("expirable <entry> on|off")),
        },
        "delete" => match args {
            [entry] => Command::Delete {
                entry: position(entry, "entry")?,
            },
            _ => return Err(usage("delete <entry>")),
        },
        "category" => match args {
            [name] => Command::Category { name: name.clone() },
            _ => return Err(usage("category <name>")),
        },
        "export" => {
            expect_none(args, "export")?;
            Command::Export
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ShellError::UnknownCommand(head.clone())),
    };

    Ok(Some(command))
}

/// Split on whitespace, keeping double-quoted runs together (quotes removed).
fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(ShellError::parse("unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn usage(text: &str) -> ShellError {
    ShellError::parse(format!("usage: {text}"))
}

fn expect_none(args: &[String], command: &str) -> Result<(), ShellError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(usage(command))
    }
}

fn optional_date(rest: &[String], command: &str) -> Result<Option<String>, ShellError> {
    match rest {
        [] => Ok(None),
        [date] => Ok(Some(date.clone())),
        _ => Err(ShellError::parse(format!("{command}: too many arguments"))),
    }
}

fn position(token: &str, what: &str) -> Result<usize, ShellError> {
    let number: usize = token
        .parse()
        .map_err(|_| ShellError::parse(format!("{what} number expected, got '{token}'")))?;
    number
        .checked_sub(1)
        .ok_or_else(|| ShellError::parse(format!("{what} numbers start at 1")))
}

fn switch(token: &str) -> Result<bool, ShellError> {
    match token.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(ShellError::parse(format!("expected on or off, got '{token}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# restock notes").unwrap(), None);
    }

    #[test]
    fn quoted_arguments_keep_spaces() {
        assert_eq!(
            parse(r#"create "Green Apple" "Fresh Fruit" 20 2017-10-21"#),
            Command::Create {
                name: "Green Apple".to_string(),
                category: "Fresh Fruit".to_string(),
                quantity: "20".to_string(),
                expiration_date: Some("2017-10-21".to_string()),
            }
        );
    }

    #[test]
    fn empty_quotes_give_empty_argument() {
        assert_eq!(
            parse(r#"info 1 "" """#),
            Command::Info {
                entry: 0,
                name: String::new(),
                category: String::new(),
            }
        );
    }

    #[test]
    fn numbers_are_converted_to_positions() {
        assert_eq!(parse("remove 2 3"), Command::Remove { entry: 1, lot: 2 });
        assert_eq!(
            parse("EDIT 1 1 5"),
            Command::Edit {
                entry: 0,
                lot: 0,
                quantity: "5".to_string(),
                expiration_date: None,
            }
        );
    }

    #[test]
    fn zero_and_non_numbers_are_rejected() {
        assert!(matches!(parse_line("show 0"), Err(ShellError::Parse(_))));
        assert!(matches!(parse_line("show apple"), Err(ShellError::Parse(_))));
    }

    #[test]
    fn expirable_switch_accepts_on_off() {
        assert_eq!(parse("expirable 1 on"), Command::Expirable { entry: 0, expirable: true });
        assert_eq!(parse("expirable 1 OFF"), Command::Expirable { entry: 0, expirable: false });
        assert!(parse_line("expirable 1 maybe").is_err());
    }

    #[test]
    fn wrong_arity_reports_usage() {
        let err = parse_line("add 1").unwrap_err();
        assert_eq!(err.to_string(), "usage: add <entry> <qty> [<date>]");
        assert!(parse_line("list extra").is_err());
        assert!(parse_line("add 1 2 2024-01-01 extra").is_err());
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(matches!(parse_line(r#"create "Apple Fruit 2"#), Err(ShellError::Parse(_))));
    }

    #[test]
    fn unknown_command_is_named() {
        let err = parse_line("frobnicate").unwrap_err();
        assert_eq!(err.to_string(), "unknown command 'frobnicate' (try 'help')");
    }
}
