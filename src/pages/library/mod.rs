//! Library loans: book catalogue, members and loans.

use serde::{Deserialize, Serialize};

use crate::input::{self, ValidationError};

mod books;
mod loans;
mod members;

pub use self::{books::*, loans::*, members::*};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub copies: i64,
    pub available: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub member_id: i64,
    pub book_id: i64,
    pub loan_date: String,
    pub due_date: String,
    pub return_date: Option<String>,
    pub member_name: String,
    pub book_title: String,
}

impl Loan {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Returned after the due date. Dates are ISO `yyyy-mm-dd`, so they
    /// compare correctly as strings.
    pub fn was_late(&self) -> bool {
        matches!(&self.return_date, Some(returned) if *returned > self.due_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub copies: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLoan {
    pub member_id: i64,
    pub book_id: i64,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnLoan {
    pub loan_id: i64,
}

/// Raw input of the add-book form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub copies: String,
}

impl BookForm {
    pub fn parse(&self) -> Result<NewBook, ValidationError> {
        Ok(NewBook {
            title: input::required_text("Title", &self.title)?,
            author: input::required_text("Author", &self.author)?,
            copies: input::parse_int_at_least("Copies", &self.copies, 0)?,
        })
    }
}

/// Raw input of the borrow form; ids come from selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowForm {
    pub member_id: String,
    pub book_id: String,
    pub days: String,
}

pub const MAX_LOAN_DAYS: i64 = 365;

impl BorrowForm {
    pub fn parse(&self) -> Result<NewLoan, ValidationError> {
        Ok(NewLoan {
            member_id: input::parse_id("member", &self.member_id)?,
            book_id: input::parse_id("book", &self.book_id)?,
            days: input::parse_int_in("Days", &self.days, 1..=MAX_LOAN_DAYS)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberForm {
    pub name: String,
    pub email: String,
}

impl MemberForm {
    pub fn parse(&self) -> Result<NewMember, ValidationError> {
        Ok(NewMember {
            name: input::required_text("Name", &self.name)?,
            email: input::required_text("Email", &self.email)?,
        })
    }
}
