use maud::{html, Markup};

use super::{Book, BookForm, BorrowForm, Member};
use crate::{
    api::{self, Ack, ApiRequest},
    html::empty_state,
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooksModel {
    pub books: Slice<Vec<Book>>,
    pub author_filter: String,
    /// Choices of the borrow form.
    pub members: Slice<Vec<Member>>,
    pub borrowable: Slice<Vec<Book>>,
    pub notifier: Notifier,
    /// Bumped whenever a form was submitted successfully and must be cleared.
    pub add_book_resets: u64,
    pub borrow_resets: u64,
}

#[derive(Debug, Clone)]
pub enum BooksEvent {
    FilterApplied(String),
    FilterCleared,
    BooksLoaded(RequestToken, api::Result<Vec<Book>>),
    MembersLoaded(RequestToken, api::Result<Vec<Member>>),
    BorrowableLoaded(RequestToken, api::Result<Vec<Book>>),
    AddBookSubmitted(BookForm),
    BookAdded(api::Result<Ack>),
    BorrowSubmitted(BorrowForm),
    Borrowed(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct BooksProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub add_book_resets: u64,
    pub borrow_resets: u64,
    pub on_filter: Callback<String>,
    pub on_clear_filter: Callback<()>,
    pub on_add_book: Callback<BookForm>,
    pub on_borrow: Callback<BorrowForm>,
}

/// The catalogue page: book list with author filter, add-book and borrow
/// forms.
pub struct BooksLogic {
    ctx: PageContext,
}

impl BooksLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_books(&self, model: &mut BooksModel) -> Effect<BooksEvent> {
        let token = model.books.begin_load();
        let mut request = ApiRequest::get("/api/books");
        if !model.author_filter.is_empty() {
            request = request.with_query("author", model.author_filter.clone());
        }
        self.ctx
            .request(request, move |result| BooksEvent::BooksLoaded(token, result))
    }

    fn load_members(&self, model: &mut BooksModel) -> Effect<BooksEvent> {
        let token = model.members.begin_load();
        self.ctx.request(ApiRequest::get("/api/members"), move |result| {
            BooksEvent::MembersLoaded(token, result)
        })
    }

    fn load_borrowable(&self, model: &mut BooksModel) -> Effect<BooksEvent> {
        let token = model.borrowable.begin_load();
        self.ctx.request(ApiRequest::get("/api/books"), move |result| {
            BooksEvent::BorrowableLoaded(token, result)
        })
    }
}

impl PageLogic<BooksEvent, BooksModel, BooksProps> for BooksLogic {
    fn init(&self, mut model: BooksModel) -> (BooksModel, Effect<BooksEvent>) {
        let effect = Effect::batch(vec![
            self.load_books(&mut model),
            self.load_members(&mut model),
            self.load_borrowable(&mut model),
        ]);
        (model, effect)
    }

    fn update(&self, event: BooksEvent, model: &BooksModel) -> (BooksModel, Effect<BooksEvent>) {
        let mut model = model.clone();
        let expired = BooksEvent::NotificationExpired;

        let effect = match event {
            BooksEvent::FilterApplied(author) => {
                model.author_filter = author.trim().to_owned();
                self.load_books(&mut model)
            }
            BooksEvent::FilterCleared => {
                model.author_filter.clear();
                self.load_books(&mut model)
            }
            BooksEvent::BooksLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.books, &mut model.notifier, token, result, "books", expired)
            }
            BooksEvent::MembersLoaded(token, result) => self.ctx.loaded(
                &mut model.members,
                &mut model.notifier,
                token,
                result,
                "members",
                expired,
            ),
            BooksEvent::BorrowableLoaded(token, result) => self.ctx.loaded(
                &mut model.borrowable,
                &mut model.notifier,
                token,
                result,
                "books",
                expired,
            ),
            BooksEvent::AddBookSubmitted(form) => match form.parse() {
                Ok(book) => self.ctx.try_request(
                    ApiRequest::post("/api/books").with_json(&book),
                    BooksEvent::BookAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            BooksEvent::BookAdded(Ok(_)) => {
                log::info!("Book added");
                model.add_book_resets += 1;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Book added successfully!",
                    Severity::Success,
                    expired,
                );
                let books = self.load_books(&mut model);
                let borrowable = self.load_borrowable(&mut model);
                Effect::batch(vec![notice, books, borrowable])
            }
            BooksEvent::BookAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the book", expired)
            }
            BooksEvent::BorrowSubmitted(form) => match form.parse() {
                Ok(loan) => self.ctx.try_request(
                    ApiRequest::post("/api/loans/borrow").with_json(&loan),
                    BooksEvent::Borrowed,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            BooksEvent::Borrowed(Ok(_)) => {
                log::info!("Book borrowed");
                model.borrow_resets += 1;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Book borrowed successfully!",
                    Severity::Success,
                    expired,
                );
                let books = self.load_books(&mut model);
                let borrowable = self.load_borrowable(&mut model);
                Effect::batch(vec![notice, books, borrowable])
            }
            BooksEvent::Borrowed(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not borrow the book", expired)
            }
            BooksEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &BooksModel, emitter: &Emitter<BooksEvent>) -> BooksProps {
        BooksProps {
            markup: render_books_page(model).into_string(),
            notification: model.notifier.current().cloned(),
            add_book_resets: model.add_book_resets,
            borrow_resets: model.borrow_resets,
            on_filter: emitter.callback(BooksEvent::FilterApplied),
            on_clear_filter: emitter.callback(|_: ()| BooksEvent::FilterCleared),
            on_add_book: emitter.callback(BooksEvent::AddBookSubmitted),
            on_borrow: emitter.callback(BooksEvent::BorrowSubmitted),
        }
    }
}

pub fn render_books_page(model: &BooksModel) -> Markup {
    let borrowable: Vec<&Book> = model
        .borrowable
        .get()
        .iter()
        .filter(|book| book.available > 0)
        .collect();

    html! {
        section id="books" {
            div class="filter" {
                input type="text" id="authorFilter" placeholder="Filter by author" value=(model.author_filter);
            }
            div id="booksList" { (render_books(model.books.get())) }
        }
        section id="borrow" {
            select id="borrowMember" name="member_id" {
                option value="" { "Choose a member..." }
                @for member in model.members.get() {
                    option value=(member.id) { (member.name) }
                }
            }
            select id="borrowBook" name="book_id" {
                option value="" { "Choose a book..." }
                @for book in &borrowable {
                    option value=(book.id) { (book.title) " (" (book.available) " available)" }
                }
            }
        }
        (model.notifier.render())
    }
}

pub fn render_books(books: &[Book]) -> Markup {
    if books.is_empty() {
        return empty_state("No books found");
    }
    html! {
        @for book in books {
            div class="book-card" {
                h3 { (book.title) }
                p { strong { "Author:" } " " (book.author) }
                p { strong { "Total copies:" } " " (book.copies) }
                @if book.available > 0 {
                    div class="availability available" { "✓ Available: " (book.available) }
                } @else {
                    div class="availability unavailable" { "✗ Unavailable" }
                }
            }
        }
    }
}
