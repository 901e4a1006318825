//! Plain-text rendering of console screens

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{BookAvailability, Loan, Patron};

use super::actions::{ActionSet, CommonAction};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn date(value: DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn patron_list(patrons: &[Patron]) -> String {
    let mut out = String::new();
    for (number, patron) in patrons.iter().enumerate() {
        let _ = writeln!(out, "{}) {}", number + 1, patron.name);
    }
    out
}

fn loan_status(loan: &Loan, now: DateTime<Utc>) -> String {
    match loan.return_date {
        Some(returned) => format!("Returned {}", date(returned)),
        None if loan.is_overdue(now) => "Overdue".to_string(),
        None => "On loan".to_string(),
    }
}

fn loan_title(loan: &Loan) -> String {
    loan.book_title()
        .unwrap_or_else(|| format!("Book item #{}", loan.book_item_id))
}

pub(crate) fn patron_details(patron: &Patron, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", patron.name);
    let _ = writeln!(out, "Membership Expiration: {}", date(patron.membership_end));
    if patron.is_membership_expired(now) {
        let _ = writeln!(out, "Membership has expired.");
    }

    if patron.loans.is_empty() {
        let _ = writeln!(out, "No book loans on record.");
        return out;
    }

    let _ = writeln!(out, "Book Loans History:");
    for (number, loan) in patron.loans.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}) {} - Due: {} - {}",
            number + 1,
            loan_title(loan),
            date(loan.due_date),
            loan_status(loan, now)
        );
    }
    out
}

pub(crate) fn loan_details(loan: &Loan, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Book: {}", loan_title(loan));
    let _ = writeln!(out, "Loan Date: {}", date(loan.loan_date));
    let _ = writeln!(out, "Due Date: {}", date(loan.due_date));
    let _ = writeln!(out, "Status: {}", loan_status(loan, now));
    out
}

/// Menu of the valid actions. `item_noun` names what a number selects.
pub(crate) fn action_menu(options: &ActionSet, item_count: usize, item_noun: &str) -> String {
    let mut out = String::from("Input Options:\n");
    for action in options.iter() {
        match action.shortcut() {
            Some(key) => {
                let _ = writeln!(out, " - \"{}\": {}", key, action.label());
            }
            None if item_count > 0 => {
                let _ = writeln!(out, " - 1 to {}: Select a {}", item_count, item_noun);
            }
            None => {}
        }
    }
    let _ = write!(out, "Enter an option: ");
    out
}

pub(crate) fn availability(result: &BookAvailability, title: &str) -> String {
    match result {
        BookAvailability::NotFound => format!("No book found with the title \"{}\".", title),
        BookAvailability::NoPhysicalCopy(book) => {
            format!("No physical copy found for \"{}\".", book.title)
        }
        BookAvailability::Available(book) => format!("\"{}\" is available for loan.", book.title),
        BookAvailability::OnLoan { book, due_date } => format!(
            "\"{}\" is on loan to another patron. The return due date is {}.",
            book.title,
            date(*due_date)
        ),
    }
}

pub(crate) fn unknown_input(options: &ActionSet) -> String {
    let keys: Vec<String> = options
        .iter()
        .filter(|a| *a != CommonAction::Select)
        .filter_map(|a| a.shortcut())
        .map(|c| c.to_string())
        .collect();
    format!("Invalid input. Valid commands: {}", keys.join(", "))
}
