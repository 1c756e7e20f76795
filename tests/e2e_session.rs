//! End-to-end tests for the interactive session.
//!
//! Drives the command loop with scripted input and checks the transcript.

use std::io::Cursor;

use book_network::{build, Book, Network, NetworkConfig, Session};

fn network() -> Network {
    build(
        vec![
            Book::new("The Judge's List")
                .with_author(["John Grisham"])
                .with_subjects(["Judges", "Corruption"])
                .with_rating(3.9)
                .with_readinglog_count(410),
            Book::new("The Whistler")
                .with_subjects(["Judges", "Corruption"])
                .with_rating(4.1)
                .with_readinglog_count(220),
            Book::new("Atlas Shrugged")
                .with_subjects(["Judges", "Corruption"]),
        ],
        &NetworkConfig::default(),
    )
}

/// Run a session over `script` and return everything it printed.
fn transcript(script: &str) -> String {
    let net = network();
    let mut out = Vec::new();
    Session::new(&net, Cursor::new(script.as_bytes().to_vec()), &mut out)
        .run()
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_exit_immediately() {
    let out = transcript("3\n");
    assert!(out.contains("This network contains 3 books"));
    assert!(out.contains("Thank you for exploring the network!"));
}

#[test]
fn test_end_of_input_exits() {
    let out = transcript("");
    assert!(out.contains("Thank you for exploring the network!"));
}

#[test]
fn test_invalid_menu_choice_retries() {
    let out = transcript("9\nexit\n");
    assert!(out.contains("Invalid choice. Please try again."));
    assert_eq!(out.matches("Enter your choice: ").count(), 2);
}

#[test]
fn test_search_with_details() {
    let out = transcript("1\nwhistler\ny\n3\n");
    assert!(out.contains("Book 'The Whistler' found in the network."));
    assert!(out.contains("Here's a little more about this book!"));
    assert!(out.contains("Ratings_average: 4.1"));
    assert!(out.contains("Color: green"));
}

#[test]
fn test_search_decline_details() {
    let out = transcript("1\njudge\nn\n3\n");
    assert!(out.contains("Book 'The Judge's List' found in the network."));
    assert!(out.contains("Okay, no problem!"));
    assert!(!out.contains("Here's a little more"));
}

#[test]
fn test_search_not_found() {
    let out = transcript("1\ndune\n3\n");
    assert!(out.contains("Book 'dune' not found in the network."));
}

#[test]
fn test_recommend_flow() {
    let out = transcript("2\nThe Judge's List\nn\n3\n");
    assert!(out.contains("Recommended books based on 'The Judge's List':"));
    let whistler = out.find("The Whistler (220 people").unwrap();
    let atlas = out.find("Atlas Shrugged (N/A people have read/want to read this book)").unwrap();
    assert!(whistler < atlas);
}

#[test]
fn test_recommend_high_rating() {
    let out = transcript("2\nThe Judge's List\ny\n3\n");
    assert!(out.contains("The Whistler (220 people"));
    assert!(!out.contains("Atlas Shrugged ("));
}

#[test]
fn test_recommend_invalid_filter_answer() {
    let out = transcript("2\nThe Judge's List\nmaybe\n3\n");
    assert!(out.contains("Invalid choice. Please enter 'y' or 'n'."));
    assert!(!out.contains("Recommended books"));
    assert!(out.contains("Thank you for exploring the network!"));
}

#[test]
fn test_recommend_unknown_title() {
    let out = transcript("2\nthe judge's list\n3\n");
    assert!(out.contains("Book 'the judge's list' not found in the network."));
}
