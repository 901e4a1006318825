//! Console navigation states and the session carried between them

use std::fmt;

use crate::models::{Loan, Patron};

/// Screens of the navigation state machine. `Quit` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    PatronSearch,
    PatronSearchResults,
    PatronDetails,
    LoanDetails,
    Quit,
}

impl fmt::Display for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleState::PatronSearch => "PatronSearch",
            ConsoleState::PatronSearchResults => "PatronSearchResults",
            ConsoleState::PatronDetails => "PatronDetails",
            ConsoleState::LoanDetails => "LoanDetails",
            ConsoleState::Quit => "Quit",
        };
        f.write_str(name)
    }
}

/// What the librarian has looked at so far. Each state handler takes the
/// session by value and hands back the one the next state should see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub matching_patrons: Vec<Patron>,
    pub selected_patron: Option<Patron>,
    pub selected_loan: Option<Loan>,
}

impl Session {
    pub fn with_matches(self, matching_patrons: Vec<Patron>) -> Self {
        Self {
            matching_patrons,
            ..self
        }
    }

    /// Selecting a different patron drops the selected loan
    pub fn with_patron(self, patron: Patron) -> Self {
        Self {
            selected_patron: Some(patron),
            selected_loan: None,
            ..self
        }
    }

    pub fn with_loan(self, loan: Option<Loan>) -> Self {
        Self {
            selected_loan: loan,
            ..self
        }
    }
}
