//! Console state machine: one handler per navigation state

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::{
    config::ConsoleConfig,
    error::{AppError, AppResult},
    repository::Repository,
    services::Services,
};

use super::actions::{parse_input, ActionSet, CommonAction, Selection};
use super::io::ConsoleIo;
use super::render;
use super::state::{ConsoleState, Session};

/// Next state plus the session it starts with
type Step = (ConsoleState, Session);

/// The librarian's console: drives the navigation state machine until the
/// user quits or input ends.
pub struct ConsoleApp {
    repository: Repository,
    services: Services,
    config: ConsoleConfig,
}

impl ConsoleApp {
    pub fn new(repository: Repository, services: Services, config: ConsoleConfig) -> Self {
        Self {
            repository,
            services,
            config,
        }
    }

    /// Run from `PatronSearch` until the `Quit` state is reached
    pub async fn run<R, W>(&self, io: &mut ConsoleIo<R, W>) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut state = ConsoleState::PatronSearch;
        let mut session = Session::default();

        while state != ConsoleState::Quit {
            let (next, next_session) = self.step(state, session, io).await?;
            tracing::debug!(from = %state, to = %next, "Console transition");
            state = next;
            session = next_session;
        }

        tracing::info!("Console session ended");
        Ok(())
    }

    /// Execute one state: render, read input, act, and pick the next state
    pub async fn step<R, W>(
        &self,
        state: ConsoleState,
        session: Session,
        io: &mut ConsoleIo<R, W>,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match state {
            ConsoleState::PatronSearch => self.patron_search(session, io).await,
            ConsoleState::PatronSearchResults => self.patron_search_results(session, io).await,
            ConsoleState::PatronDetails => self.patron_details(session, io).await,
            ConsoleState::LoanDetails => self.loan_details(session, io).await,
            ConsoleState::Quit => Ok((ConsoleState::Quit, session)),
        }
    }

    async fn patron_search<R, W>(&self, session: Session, io: &mut ConsoleIo<R, W>) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Some(name) = io
            .prompt_non_empty("Enter a string to search for patrons by name: ")
            .await?
        else {
            return Ok((ConsoleState::Quit, session));
        };

        let matches = self.repository.patrons.search_patrons(&name).await?;

        if matches.len() > self.config.max_search_results {
            io.println(&format!(
                "More than {} patrons satisfy the search, please provide more specific input...",
                self.config.max_search_results
            ))
            .await?;
            return Ok((ConsoleState::PatronSearch, session.with_matches(Vec::new())));
        }

        if matches.is_empty() {
            io.println("No matching patrons found.").await?;
            return Ok((ConsoleState::PatronSearch, session.with_matches(Vec::new())));
        }

        io.println("Matching Patrons:").await?;
        io.print(&render::patron_list(&matches)).await?;
        Ok((ConsoleState::PatronSearchResults, session.with_matches(matches)))
    }

    async fn patron_search_results<R, W>(
        &self,
        session: Session,
        io: &mut ConsoleIo<R, W>,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let state = ConsoleState::PatronSearchResults;
        let options = ActionSet::from([
            CommonAction::Select,
            CommonAction::SearchPatrons,
            CommonAction::Quit,
        ]);
        let count = session.matching_patrons.len();

        let Some(selection) = read_selection(io, &options, count, "patron").await? else {
            return Ok((ConsoleState::Quit, session));
        };

        match selection {
            Selection::Item(number) => {
                let id = session.matching_patrons[number - 1].id;
                match self.repository.patrons.get_patron(id).await? {
                    Some(patron) => Ok((ConsoleState::PatronDetails, session.with_patron(patron))),
                    None => {
                        tracing::warn!("Patron {} disappeared between search and selection", id);
                        io.println("Patron not found.").await?;
                        Ok((ConsoleState::PatronSearch, session))
                    }
                }
            }
            Selection::Action(CommonAction::SearchPatrons) => {
                Ok((ConsoleState::PatronSearch, Session::default()))
            }
            Selection::Action(CommonAction::Quit) => Ok((ConsoleState::Quit, session)),
            Selection::Action(action) => Err(unhandled(state, action)),
        }
    }

    async fn patron_details<R, W>(&self, session: Session, io: &mut ConsoleIo<R, W>) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let state = ConsoleState::PatronDetails;
        let Some(patron) = session.selected_patron.clone() else {
            return Ok((ConsoleState::PatronSearch, session));
        };

        io.println("Patron Details:").await?;
        io.print(&render::patron_details(&patron, Utc::now())).await?;

        let mut options = ActionSet::from([
            CommonAction::SearchPatrons,
            CommonAction::RenewPatronMembership,
            CommonAction::SearchBooks,
            CommonAction::Quit,
        ]);
        if !patron.loans.is_empty() {
            options.insert(CommonAction::Select);
        }

        let Some(selection) = read_selection(io, &options, patron.loans.len(), "loan").await? else {
            return Ok((ConsoleState::Quit, session));
        };

        match selection {
            Selection::Item(number) => {
                let loan = patron.loans[number - 1].clone();
                Ok((ConsoleState::LoanDetails, session.with_loan(Some(loan))))
            }
            Selection::Action(CommonAction::SearchPatrons) => {
                Ok((ConsoleState::PatronSearch, Session::default()))
            }
            Selection::Action(CommonAction::RenewPatronMembership) => {
                let status = self.services.patrons.renew_membership(patron.id).await?;
                io.println(&status.to_string()).await?;
                self.reload_patron(patron.id, ConsoleState::PatronDetails, session, io)
                    .await
            }
            Selection::Action(CommonAction::SearchBooks) => {
                let next = self.search_books(io).await?;
                Ok((next, session))
            }
            Selection::Action(CommonAction::Quit) => Ok((ConsoleState::Quit, session)),
            Selection::Action(action) => Err(unhandled(state, action)),
        }
    }

    async fn loan_details<R, W>(&self, session: Session, io: &mut ConsoleIo<R, W>) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let state = ConsoleState::LoanDetails;
        let Some(loan) = session.selected_loan.clone() else {
            return Ok((ConsoleState::PatronSearch, session));
        };

        io.println("Loan Details:").await?;
        io.print(&render::loan_details(&loan, Utc::now())).await?;

        let mut options = ActionSet::from([
            CommonAction::Back,
            CommonAction::SearchBooks,
            CommonAction::Quit,
        ]);
        if loan.is_active() {
            options.insert(CommonAction::ReturnLoanedBook);
            options.insert(CommonAction::ExtendLoanedBook);
        }

        let Some(selection) = read_selection(io, &options, 0, "loan").await? else {
            return Ok((ConsoleState::Quit, session));
        };

        match selection {
            Selection::Action(CommonAction::Back) => {
                Ok((ConsoleState::PatronDetails, session.with_loan(None)))
            }
            Selection::Action(CommonAction::ReturnLoanedBook) => {
                let status = self.services.loans.return_loan(loan.id).await?;
                io.println(&status.to_string()).await?;
                self.reload_loan(loan.id, loan.patron_id, session, io).await
            }
            Selection::Action(CommonAction::ExtendLoanedBook) => {
                let status = self.services.loans.extend_loan(loan.id).await?;
                io.println(&status.to_string()).await?;
                self.reload_loan(loan.id, loan.patron_id, session, io).await
            }
            Selection::Action(CommonAction::SearchBooks) => {
                let next = self.search_books(io).await?;
                Ok((next, session))
            }
            Selection::Action(CommonAction::Quit) => Ok((ConsoleState::Quit, session)),
            Selection::Action(action) => Err(unhandled(state, action)),
            Selection::Item(number) => Err(unhandled(state, format!("Select {}", number))),
        }
    }

    /// Ask for a title and report whether a copy can be borrowed. Returns the
    /// state to continue with.
    async fn search_books<R, W>(&self, io: &mut ConsoleIo<R, W>) -> AppResult<ConsoleState>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let Some(title) = io
            .prompt_non_empty("Enter a book title to search for: ")
            .await?
        else {
            return Ok(ConsoleState::Quit);
        };

        let result = self.services.catalog.check_availability(&title).await?;
        tracing::debug!("Availability of {:?}: {:?}", title, result);
        io.println(&render::availability(&result, &title)).await?;

        Ok(ConsoleState::PatronDetails)
    }

    async fn reload_patron<R, W>(
        &self,
        patron_id: i32,
        next: ConsoleState,
        session: Session,
        io: &mut ConsoleIo<R, W>,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match self.repository.patrons.get_patron(patron_id).await? {
            Some(patron) => Ok((next, session.with_patron(patron))),
            None => {
                io.println("Patron not found.").await?;
                Ok((ConsoleState::PatronSearch, Session::default()))
            }
        }
    }

    /// Refresh both the loan and its patron after a loan mutation
    async fn reload_loan<R, W>(
        &self,
        loan_id: i32,
        patron_id: i32,
        session: Session,
        io: &mut ConsoleIo<R, W>,
    ) -> AppResult<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (state, session) = self
            .reload_patron(patron_id, ConsoleState::LoanDetails, session, io)
            .await?;
        if state != ConsoleState::LoanDetails {
            return Ok((state, session));
        }

        match self.repository.loans.get_loan(loan_id).await? {
            Some(loan) => Ok((ConsoleState::LoanDetails, session.with_loan(Some(loan)))),
            None => {
                io.println("Loan not found.").await?;
                Ok((ConsoleState::PatronDetails, session))
            }
        }
    }
}

/// Show the menu and read until the input is one of `options`. `None` means
/// the input stream ended.
async fn read_selection<R, W>(
    io: &mut ConsoleIo<R, W>,
    options: &ActionSet,
    item_count: usize,
    item_noun: &str,
) -> AppResult<Option<Selection>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        io.print(&render::action_menu(options, item_count, item_noun))
            .await?;
        let Some(line) = io.read_line().await? else {
            return Ok(None);
        };
        match parse_input(&line, options, item_count) {
            Some(selection) => return Ok(Some(selection)),
            None => io.println(&render::unknown_input(options)).await?,
        }
    }
}

fn unhandled(state: ConsoleState, action: impl ToString) -> AppError {
    AppError::UnhandledAction {
        state: state.to_string(),
        action: action.to_string(),
    }
}
