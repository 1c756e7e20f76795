//! Interactive session: a synchronous command loop over a built network.
//!
//! Reads commands from any `BufRead` and writes prompts and results to any
//! `Write`, so the loop runs the same against a terminal or a byte buffer.
//! Bad answers are reported and the loop continues; only `exit` or end of
//! input stops it.

use std::io::{BufRead, Write};

use crate::model::book::display_unknown;
use crate::model::BookNode;
use crate::network::Network;
use crate::recommend::{recommend, RecommendOptions, Recommendation};
use crate::search::search;
use crate::{Error, Result};

/// Menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Search,
    Recommend,
    Exit,
}

impl Command {
    /// Parse a menu answer: the number or the command name.
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "search" => Ok(Command::Search),
            "2" | "recommend" => Ok(Command::Recommend),
            "3" | "exit" | "quit" => Ok(Command::Exit),
            other => Err(Error::InvalidChoice(other.to_string())),
        }
    }
}

/// Parse a y/n answer.
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" => Ok(false),
        other => Err(Error::InvalidChoice(other.to_string())),
    }
}

/// Human-readable line for one recommendation.
pub fn format_recommendation(rec: &Recommendation) -> String {
    format!(
        "{} ({} people have read/want to read this book)",
        rec.title,
        display_unknown(rec.readinglog_count),
    )
}

/// Interactive session over a borrowed network.
pub struct Session<'n, R, W> {
    network: &'n Network,
    options: RecommendOptions,
    input: R,
    output: W,
}

impl<'n, R: BufRead, W: Write> Session<'n, R, W> {
    pub fn new(network: &'n Network, input: R, output: W) -> Self {
        Self { network, options: RecommendOptions::default(), input, output }
    }

    /// Base options for recommendations; the high-rating flag is asked per
    /// request.
    pub fn with_options(mut self, options: RecommendOptions) -> Self {
        self.options = options;
        self
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to the Book Network!")?;
        writeln!(
            self.output,
            "This network contains {} books linked by {} shared-subject edges.",
            self.network.node_count(),
            self.network.edge_count(),
        )?;
        writeln!(self.output, "Let's explore the network!")?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Options:")?;
            writeln!(self.output, "1. Search for a book")?;
            writeln!(self.output, "2. Recommend books based on a book")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match Command::parse(&choice) {
                Ok(Command::Search) => self.search()?,
                Ok(Command::Recommend) => self.recommend()?,
                Ok(Command::Exit) => break,
                Err(_) => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.output, "Thank you for exploring the network!")?;
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(fragment) = self.prompt("Enter the title of the book to search: ")? else {
            return Ok(());
        };
        let Some(node) = search(self.network, &fragment) else {
            writeln!(self.output, "Book '{}' not found in the network.", fragment.trim())?;
            return Ok(());
        };

        writeln!(self.output, "Book '{}' found in the network.", node.title())?;
        let Some(answer) = self.prompt("Do you want to see more information about this book? (y/n): ")? else {
            return Ok(());
        };
        match parse_yes_no(&answer) {
            Ok(true) => self.show_details(node)?,
            Ok(false) => writeln!(self.output, "Okay, no problem!")?,
            Err(_) => writeln!(self.output, "Invalid choice. Please enter 'y' or 'n'.")?,
        }
        Ok(())
    }

    fn recommend(&mut self) -> Result<()> {
        let Some(title) = self.prompt("Enter the title of the book to recommend other books: ")? else {
            return Ok(());
        };
        let title = title.trim().to_string();
        if !self.network.contains_title(&title) {
            writeln!(self.output, "Book '{title}' not found in the network.")?;
            return Ok(());
        }

        let Some(answer) = self.prompt(
            "Do you want the recommended books to have a high rating (at least 4 stars)? (y/n): ",
        )?
        else {
            return Ok(());
        };
        let high_rating = match parse_yes_no(&answer) {
            Ok(flag) => flag,
            Err(_) => {
                writeln!(self.output, "Invalid choice. Please enter 'y' or 'n'.")?;
                return Ok(());
            }
        };

        let options = self.options.clone().with_high_rating(high_rating);
        match recommend(self.network, &title, &options) {
            Ok(recs) if recs.is_empty() => {
                writeln!(self.output, "No recommendations found for '{title}'.")?;
            }
            Ok(recs) => {
                writeln!(self.output, "Recommended books based on '{title}':")?;
                for rec in &recs {
                    writeln!(self.output, "{}", format_recommendation(rec))?;
                }
            }
            Err(Error::NotFound(msg)) => writeln!(self.output, "{msg}.")?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn show_details(&mut self, node: &BookNode) -> Result<()> {
        let book = &node.book;
        writeln!(self.output, "Here's a little more about this book!")?;
        writeln!(self.output, "Title: {}", book.title)?;
        writeln!(self.output, "Author: {}", book.author.join(", "))?;
        writeln!(self.output, "Subjects: {}", book.subjects.join(", "))?;
        writeln!(self.output, "Ratings_average: {}", display_unknown(book.ratings_average))?;
        writeln!(self.output, "Readinglog_count: {}", display_unknown(book.readinglog_count))?;
        writeln!(self.output, "Size: {}", node.size)?;
        writeln!(self.output, "Color: {}", node.color_band.color_name())?;
        Ok(())
    }

    /// Print a prompt and read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("1").unwrap(), Command::Search);
        assert_eq!(Command::parse(" Recommend ").unwrap(), Command::Recommend);
        assert_eq!(Command::parse("3\n").unwrap(), Command::Exit);
        assert!(matches!(Command::parse("4"), Err(Error::InvalidChoice(_))));
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("Y").unwrap());
        assert!(!parse_yes_no(" n ").unwrap());
        assert!(matches!(parse_yes_no("maybe"), Err(Error::InvalidChoice(_))));
    }

    #[test]
    fn test_format_recommendation() {
        let rec = Recommendation {
            title: "Dune".into(),
            readinglog_count: None,
            ratings_average: None,
            shared_subjects: 2,
        };
        assert_eq!(format_recommendation(&rec), "Dune (N/A people have read/want to read this book)");
    }
}
