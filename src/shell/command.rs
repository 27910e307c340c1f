//! Command Parsing
//!
//! Turns one input line into a [`Command`]. Tokens are separated by
//! whitespace and verbs are case-insensitive.

use crate::error::{Result, StoreError};

/// A parsed interpreter command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value>`
    Set { key: String, value: String },
    /// `GET <key>`
    Get { key: String },
    /// `DEL <key>`
    Del { key: String },
    /// `PREFIX <prefix>`
    Prefix { prefix: String },
    /// `BLOOM <key>`
    Bloom { key: String },
    /// `STATS`
    Stats,
    /// `HELP`
    Help,
    /// `EXIT` or `QUIT`
    Exit,
}

impl Command {
    /// Parses a line, returning `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match verb.to_ascii_uppercase().as_str() {
            "SET" => {
                let [key, value] = expect_args::<2>("SET", &args)?;
                Command::Set { key, value }
            }
            "GET" => {
                let [key] = expect_args::<1>("GET", &args)?;
                Command::Get { key }
            }
            "DEL" => {
                let [key] = expect_args::<1>("DEL", &args)?;
                Command::Del { key }
            }
            "PREFIX" => {
                let [prefix] = expect_args::<1>("PREFIX", &args)?;
                Command::Prefix { prefix }
            }
            "BLOOM" => {
                let [key] = expect_args::<1>("BLOOM", &args)?;
                Command::Bloom { key }
            }
            "STATS" => {
                expect_args::<0>("STATS", &args)?;
                Command::Stats
            }
            "HELP" => Command::Help,
            "EXIT" | "QUIT" => Command::Exit,
            _ => return Err(StoreError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn expect_args<const N: usize>(command: &'static str, args: &[&str]) -> Result<[String; N]> {
    if args.len() != N {
        return Err(StoreError::WrongArity {
            command,
            expected: N,
            got: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].to_string()))
}
