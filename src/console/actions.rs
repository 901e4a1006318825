//! Librarian actions, the per-state action set and input parsing

use std::collections::BTreeSet;
use std::fmt;

/// Every command the console understands. Which ones are valid depends on the
/// current state, see [`ActionSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommonAction {
    /// Numeric selection of a listed patron or loan
    Select,
    SearchPatrons,
    RenewPatronMembership,
    ReturnLoanedBook,
    ExtendLoanedBook,
    SearchBooks,
    Back,
    Quit,
}

impl CommonAction {
    pub const ALL: [CommonAction; 8] = [
        CommonAction::Select,
        CommonAction::SearchPatrons,
        CommonAction::RenewPatronMembership,
        CommonAction::ReturnLoanedBook,
        CommonAction::ExtendLoanedBook,
        CommonAction::SearchBooks,
        CommonAction::Back,
        CommonAction::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommonAction::Select => "Select",
            CommonAction::SearchPatrons => "SearchPatrons",
            CommonAction::RenewPatronMembership => "RenewPatronMembership",
            CommonAction::ReturnLoanedBook => "ReturnLoanedBook",
            CommonAction::ExtendLoanedBook => "ExtendLoanedBook",
            CommonAction::SearchBooks => "SearchBooks",
            CommonAction::Back => "Back",
            CommonAction::Quit => "Quit",
        }
    }

    /// Single-character command. `Select` is typed as a number instead.
    pub fn shortcut(self) -> Option<char> {
        match self {
            CommonAction::Select => None,
            CommonAction::SearchPatrons => Some('s'),
            CommonAction::RenewPatronMembership => Some('m'),
            CommonAction::ReturnLoanedBook => Some('r'),
            CommonAction::ExtendLoanedBook => Some('e'),
            CommonAction::SearchBooks => Some('b'),
            CommonAction::Back => Some('p'),
            CommonAction::Quit => Some('q'),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommonAction::Select => "Select an entry by number",
            CommonAction::SearchPatrons => "Search for a new patron",
            CommonAction::RenewPatronMembership => "Renew the patron's membership",
            CommonAction::ReturnLoanedBook => "Return the loaned book",
            CommonAction::ExtendLoanedBook => "Extend the book loan",
            CommonAction::SearchBooks => "Check book availability",
            CommonAction::Back => "Go back to patron details",
            CommonAction::Quit => "Quit",
        }
    }

    /// Match a typed token against the shortcut or the full name
    fn matches(self, token: &str) -> bool {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if self.shortcut() == Some(c.to_ascii_lowercase()) {
                return true;
            }
        }
        token.eq_ignore_ascii_case(self.name())
    }
}

impl fmt::Display for CommonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The actions valid in the current state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet(BTreeSet<CommonAction>);

impl ActionSet {
    pub fn contains(&self, action: CommonAction) -> bool {
        self.0.contains(&action)
    }

    pub fn insert(&mut self, action: CommonAction) {
        self.0.insert(action);
    }

    pub fn iter(&self) -> impl Iterator<Item = CommonAction> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CommonAction> for ActionSet {
    fn from_iter<I: IntoIterator<Item = CommonAction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[CommonAction; N]> for ActionSet {
    fn from(actions: [CommonAction; N]) -> Self {
        actions.into_iter().collect()
    }
}

/// A validated user choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Action(CommonAction),
    /// 1-based position in the listed entries
    Item(usize),
}

/// Parse one input line against the valid actions. Numbers are accepted only
/// when `Select` is valid and they fall within `1..=item_count`. Returns
/// `None` for anything else so the caller can prompt again.
pub fn parse_input(input: &str, options: &ActionSet, item_count: usize) -> Option<Selection> {
    let token = input.trim();
    if token.is_empty() {
        return None;
    }

    if let Ok(number) = token.parse::<usize>() {
        return (options.contains(CommonAction::Select) && (1..=item_count).contains(&number))
            .then_some(Selection::Item(number));
    }

    options
        .iter()
        .filter(|action| *action != CommonAction::Select)
        .find(|action| action.matches(token))
        .map(Selection::Action)
}
