//! # REPL
//!
//! Line-oriented driver: one command per line from stdin, rendered output on
//! stdout.
//!
//! ```text
//! stdin ──► Command::from_str ──► Repl::execute ──► commands::* ──► render ──► stdout
//!                  │                                     │
//!                  └──────── ApiError ◄──────────────────┘
//!                               │
//!                               ▼
//!                     "! <message>" on stdout
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use storefront_core::FormField;
use tracing::{debug, info};

use crate::commands::{cart, catalog, checkout, coupon, view};
use crate::error::ApiError;
use crate::render;
use crate::state::{ConfigState, Section, Storefront};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Cart,
    Open,
    Close,
    Scroll(Section),
    Add(String),
    Increment(String),
    Decrement(String),
    Remove(String),
    Code(String),
    Apply(Option<String>),
    Set { field: String, value: String },
    Pay(String),
    Checkout,
    Place,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |name: &str| -> Result<String, ApiError> {
            match rest.split_whitespace().next() {
                Some(id) => Ok(id.to_string()),
                None => Err(ApiError::validation(format!("Usage: {} <product id>", name))),
            }
        };

        match word.to_lowercase().as_str() {
            "menu" => Ok(Command::Menu),
            "cart" => Ok(Command::Cart),
            "open" => Ok(Command::Open),
            "close" => Ok(Command::Close),
            "scroll" => match rest.to_lowercase().as_str() {
                "top" => Ok(Command::Scroll(Section::Top)),
                "menu" => Ok(Command::Scroll(Section::Menu)),
                "checkout" => Ok(Command::Scroll(Section::Checkout)),
                _ => Err(ApiError::validation("Usage: scroll top|menu|checkout")),
            },
            "add" => id("add").map(Command::Add),
            "inc" | "+" => id("inc").map(Command::Increment),
            "dec" | "-" => id("dec").map(Command::Decrement),
            "rm" | "remove" => id("rm").map(Command::Remove),
            "code" => Ok(Command::Code(rest.to_string())),
            "apply" => Ok(Command::Apply((!rest.is_empty()).then(|| rest.to_string()))),
            "set" => parse_set(rest),
            "pay" => {
                if rest.is_empty() {
                    Err(ApiError::validation("Usage: pay cod|card|upi"))
                } else {
                    Ok(Command::Pay(rest.to_string()))
                }
            }
            "checkout" => Ok(Command::Checkout),
            "place" | "order" => Ok(Command::Place),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ApiError::validation(format!(
                "Unknown command: '{}'. Type 'help' for a list.",
                other
            ))),
        }
    }
}

/// Longest field name in words ("name on card").
const MAX_FIELD_WORDS: usize = 3;

/// `set <field> <value...>`. Field names may span several words
/// ("card number", "name on card"); the longest known name wins. An unknown
/// field is passed through as its first word so `update_form` can reject it.
fn parse_set(rest: &str) -> Result<Command, ApiError> {
    let words: Vec<&str> = rest.split_whitespace().collect();

    for n in (1..=words.len().min(MAX_FIELD_WORDS)).rev() {
        let field = words[..n].join(" ");
        if field.parse::<FormField>().is_ok() {
            return Ok(Command::Set {
                field,
                value: skip_words(rest, n).to_string(),
            });
        }
    }

    match words.first() {
        Some(field) => Ok(Command::Set {
            field: field.to_string(),
            value: skip_words(rest, 1).to_string(),
        }),
        None => Err(ApiError::validation("Usage: set <field> <value>")),
    }
}

/// Drops the first `n` words, keeping the spacing inside the remainder.
fn skip_words(text: &str, n: usize) -> &str {
    let mut tail = text;
    for _ in 0..n {
        tail = tail.trim_start();
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        tail = &tail[end..];
    }
    tail.trim()
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Owns the controller and the config for one session.
#[derive(Debug)]
pub struct Repl {
    store: Storefront,
    config: ConfigState,
}

impl Repl {
    pub fn new(store: Storefront, config: ConfigState) -> Self {
        Repl { store, config }
    }

    pub fn store(&self) -> &Storefront {
        &self.store
    }

    /// Runs one command to completion.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, ApiError> {
        let store = &mut self.store;
        let config = &self.config;

        let text = match command {
            Command::Menu => {
                view::scroll_to(store, Section::Menu);
                render::menu(&catalog::get_menu(store, config), config)
            }
            Command::Cart => render::cart(&cart::get_cart(store), config),
            Command::Open => {
                view::open_cart(store);
                render::cart(&cart::get_cart(store), config)
            }
            Command::Close => render::view(view::close_cart(store)),
            Command::Scroll(section) => render::view(view::scroll_to(store, section)),
            Command::Add(id) => render::cart(&cart::add_to_cart(store, &id)?, config),
            Command::Increment(id) => render::cart(&cart::increment_item(store, &id), config),
            Command::Decrement(id) => render::cart(&cart::decrement_item(store, &id), config),
            Command::Remove(id) => render::cart(&cart::remove_from_cart(store, &id), config),
            Command::Code(text) => render::cart(&coupon::set_coupon_code(store, &text), config),
            Command::Apply(text) => {
                if let Some(text) = text {
                    coupon::set_coupon_code(store, &text);
                }
                let applied = coupon::apply_coupon(store)?;
                format!(
                    "Applied {}\n{}",
                    applied.applied.label,
                    render::cart(&applied.cart, config)
                )
            }
            Command::Set { field, value } => {
                render::checkout(&checkout::update_form(store, &field, &value)?, config)
            }
            Command::Pay(method) => {
                render::checkout(&checkout::select_payment(store, &method)?, config)
            }
            Command::Checkout => render::checkout(&checkout::go_to_checkout(store), config),
            Command::Place => render::order_placed(&checkout::place_order(store, config)?),
            Command::Help => render::help(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Print(text))
    }

    /// Parses and executes one line. Errors become a printed notice.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Print(String::new());
        }

        match line.parse::<Command>().and_then(|cmd| self.execute(cmd)) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(code = ?e.code, message = %e.message, "Command failed");
                Outcome::Print(render::error(&e))
            }
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(
            output,
            "Welcome to {}. Type 'help' for commands.",
            self.config.store_name
        )?;

        for line in input.lines() {
            match self.handle_line(&line?) {
                Outcome::Print(text) if text.is_empty() => {}
                Outcome::Print(text) => writeln!(output, "{}", text)?,
                Outcome::Quit => break,
            }
            output.flush()?;
        }

        info!("Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl() -> Repl {
        Repl::new(Storefront::default(), ConfigState::default())
    }

    fn print(outcome: Outcome) -> String {
        match outcome {
            Outcome::Print(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("add p1".parse::<Command>().unwrap(), Command::Add("p1".into()));
        assert_eq!(" APPLY ".parse::<Command>().unwrap(), Command::Apply(None));
        assert_eq!(
            "apply save100".parse::<Command>().unwrap(),
            Command::Apply(Some("save100".into()))
        );
        assert_eq!(
            "set address 12 MG Road, Bengaluru".parse::<Command>().unwrap(),
            Command::Set {
                field: "address".into(),
                value: "12 MG Road, Bengaluru".into()
            }
        );
        assert_eq!(
            "set phone".parse::<Command>().unwrap(),
            Command::Set {
                field: "phone".into(),
                value: String::new()
            }
        );
        assert!("set".parse::<Command>().is_err());
        assert_eq!(
            "scroll checkout".parse::<Command>().unwrap(),
            Command::Scroll(Section::Checkout)
        );
        assert!("add".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_set_multi_word_fields() {
        assert_eq!(
            "set card number 4111 1111 1111 1234".parse::<Command>().unwrap(),
            Command::Set {
                field: "card number".into(),
                value: "4111 1111 1111 1234".into()
            }
        );
        assert_eq!(
            "set name on card ASHA R".parse::<Command>().unwrap(),
            Command::Set {
                field: "name on card".into(),
                value: "ASHA R".into()
            }
        );
        assert_eq!(
            "set upi  id asha@okbank".parse::<Command>().unwrap(),
            Command::Set {
                field: "upi id".into(),
                value: "asha@okbank".into()
            }
        );
        // a plain name that happens to start like a longer field
        assert_eq!(
            "set name Asha Rao".parse::<Command>().unwrap(),
            Command::Set {
                field: "name".into(),
                value: "Asha Rao".into()
            }
        );
        assert_eq!(
            "set card-expiry 12/29".parse::<Command>().unwrap(),
            Command::Set {
                field: "card-expiry".into(),
                value: "12/29".into()
            }
        );
    }

    #[test]
    fn test_unknown_field_is_notice() {
        let mut repl = repl();
        let text = print(repl.handle_line("set colour blue"));
        assert!(text.starts_with("! "), "{text}");
    }

    #[test]
    fn test_card_fields_with_spaces() {
        let mut repl = repl();
        repl.handle_line("add p1");
        repl.handle_line("pay card");
        repl.handle_line("set name Asha");
        repl.handle_line("set phone 9876543210");
        repl.handle_line("set address 12 MG Road");
        repl.handle_line("set card number 4111 1111 1111 1234");
        repl.handle_line("set name on card ASHA R");
        repl.handle_line("set expiry 12/29");
        repl.handle_line("set cvv 123");

        let placed = print(repl.handle_line("place"));
        assert!(placed.starts_with("Order placed!\nCustomer: Asha\nPayment: CARD"), "{placed}");
    }

    #[test]
    fn test_unknown_product_is_notice() {
        let mut repl = repl();
        assert_eq!(print(repl.handle_line("add p9")), "! Product not found: p9");
    }

    #[test]
    fn test_full_session() {
        let mut repl = repl();

        repl.handle_line("add p1");
        repl.handle_line("add p1");
        let applied = print(repl.handle_line("apply welcome10"));
        assert!(applied.starts_with("Applied WELCOME10 (10% off)"));

        repl.handle_line("checkout");
        repl.handle_line("set name Asha");
        repl.handle_line("set phone 9876543210");
        repl.handle_line("set address 12 MG Road");
        let placed = print(repl.handle_line("place"));

        assert!(placed.starts_with("Order placed!\nCustomer: Asha\nPayment: COD\nAmount: ₹538.20"));
        assert!(repl.store().cart().is_empty());
        assert_eq!(repl.store().coupon_code(), "");
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut repl = repl();
        let input = b"add p2\n\nbogus\nquit\nadd p3\n";
        let mut output = Vec::new();

        repl.run(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Welcome to RestoShop."));
        assert!(text.contains("Paneer Tikka Wrap"));
        assert!(text.contains("! Unknown command: 'bogus'"));
        assert_eq!(repl.store().cart().len(), 1);
    }

    #[test]
    fn test_quit() {
        assert_eq!(repl().handle_line("exit"), Outcome::Quit);
    }
}
