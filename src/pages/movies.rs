//! Movie ranking with star ratings.

use maud::{html, Markup};
use serde::{Deserialize, Serialize};

use crate::{
    api::{self, Ack, ApiRequest},
    html::{empty_state, hidden_unless},
    input::{self, ValidationError},
    notify::{Notification, NotificationTicket, Notifier, Severity},
    store::{RequestToken, Slice},
    Callback, Effect, Emitter, PageContext, PageLogic,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub year: i64,
    pub avg_score: f64,
    pub votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewRating {
    pub movie_id: i64,
    pub score: i64,
}

pub const FIRST_FILM_YEAR: i64 = 1888;
pub const LAST_ACCEPTED_YEAR: i64 = 2100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
}

impl MovieForm {
    pub fn parse(&self) -> Result<NewMovie, ValidationError> {
        Ok(NewMovie {
            title: input::required_text("Title", &self.title)?,
            year: input::parse_int_in("Year", &self.year, FIRST_FILM_YEAR..=LAST_ACCEPTED_YEAR)?,
        })
    }
}

/// The movie the rate modal was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTarget {
    pub movie_id: i64,
    pub title: String,
}

/// Star glyphs for an average score.
///
/// ```rust
/// use rest_mvu::pages::movies::stars;
///
/// assert_eq!(stars(3.7), "⭐⭐⭐½");
/// assert_eq!(stars(0.2), "☆");
/// ```
pub fn stars(score: f64) -> String {
    let full = score.floor().max(0.0) as usize;
    let mut glyphs = "⭐".repeat(full);
    if score.fract() >= 0.5 && full < 5 {
        glyphs.push('½');
    }
    if glyphs.is_empty() {
        glyphs.push('☆');
    }
    glyphs
}

pub fn votes_label(votes: i64) -> String {
    match votes {
        1 => "1 vote".to_owned(),
        n => format!("{n} votes"),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviesModel {
    pub movies: Slice<Vec<Movie>>,
    pub add_movie_open: bool,
    pub rating: Option<RateTarget>,
    pub notifier: Notifier,
}

#[derive(Debug, Clone)]
pub enum MoviesEvent {
    MoviesLoaded(RequestToken, api::Result<Vec<Movie>>),
    AddMovieOpened,
    AddMovieClosed,
    AddMovieSubmitted(MovieForm),
    MovieAdded(api::Result<Ack>),
    RateOpened(RateTarget),
    RateClosed,
    /// The raw score picked in the rate modal.
    RateSubmitted(String),
    Rated(api::Result<Ack>),
    NotificationExpired(NotificationTicket),
}

pub struct MoviesProps {
    pub markup: String,
    pub notification: Option<Notification>,
    pub add_movie_open: bool,
    pub rating: Option<RateTarget>,
    pub on_open_add_movie: Callback<()>,
    pub on_close_add_movie: Callback<()>,
    pub on_add_movie: Callback<MovieForm>,
    pub on_open_rate: Callback<RateTarget>,
    pub on_close_rate: Callback<()>,
    pub on_rate: Callback<String>,
}

pub struct MoviesLogic {
    ctx: PageContext,
}

impl MoviesLogic {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn load_movies(&self, model: &mut MoviesModel) -> Effect<MoviesEvent> {
        let token = model.movies.begin_load();
        self.ctx.request(ApiRequest::get("/api/movies"), move |result| {
            MoviesEvent::MoviesLoaded(token, result)
        })
    }
}

impl PageLogic<MoviesEvent, MoviesModel, MoviesProps> for MoviesLogic {
    fn init(&self, mut model: MoviesModel) -> (MoviesModel, Effect<MoviesEvent>) {
        let effect = self.load_movies(&mut model);
        (model, effect)
    }

    fn update(&self, event: MoviesEvent, model: &MoviesModel) -> (MoviesModel, Effect<MoviesEvent>) {
        let mut model = model.clone();
        let expired = MoviesEvent::NotificationExpired;

        let effect = match event {
            MoviesEvent::MoviesLoaded(token, result) => {
                self.ctx
                    .loaded(&mut model.movies, &mut model.notifier, token, result, "movies", expired)
            }
            MoviesEvent::AddMovieOpened => {
                model.add_movie_open = true;
                Effect::none()
            }
            MoviesEvent::AddMovieClosed => {
                model.add_movie_open = false;
                Effect::none()
            }
            MoviesEvent::AddMovieSubmitted(form) => match form.parse() {
                Ok(movie) => self.ctx.try_request(
                    ApiRequest::post("/api/movies").with_json(&movie),
                    MoviesEvent::MovieAdded,
                ),
                Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
            },
            MoviesEvent::MovieAdded(Ok(_)) => {
                log::info!("Movie added");
                model.add_movie_open = false;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Movie added successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_movies(&mut model)])
            }
            MoviesEvent::MovieAdded(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the movie", expired)
            }
            MoviesEvent::RateOpened(target) => {
                model.rating = Some(target);
                Effect::none()
            }
            MoviesEvent::RateClosed => {
                model.rating = None;
                Effect::none()
            }
            MoviesEvent::RateSubmitted(raw) => {
                let Some(target) = &model.rating else {
                    log::debug!("Rating submitted without an open rate modal");
                    return (model, Effect::none());
                };
                match input::parse_int_in("Score", &raw, 1..=5) {
                    Ok(score) => {
                        let rating = NewRating {
                            movie_id: target.movie_id,
                            score,
                        };
                        self.ctx.try_request(
                            ApiRequest::post("/api/ratings").with_json(&rating),
                            MoviesEvent::Rated,
                        )
                    }
                    Err(err) => self.ctx.invalid(&mut model.notifier, &err, expired),
                }
            }
            MoviesEvent::Rated(Ok(_)) => {
                model.rating = None;
                let notice = self.ctx.notify(
                    &mut model.notifier,
                    "Rating added successfully!",
                    Severity::Success,
                    expired,
                );
                Effect::batch(vec![notice, self.load_movies(&mut model)])
            }
            MoviesEvent::Rated(Err(err)) => {
                self.ctx
                    .failed(&mut model.notifier, &err, "Could not add the rating", expired)
            }
            MoviesEvent::NotificationExpired(ticket) => {
                model.notifier.dismiss(ticket);
                Effect::none()
            }
        };

        (model, effect)
    }

    fn view(&self, model: &MoviesModel, emitter: &Emitter<MoviesEvent>) -> MoviesProps {
        MoviesProps {
            markup: render(model).into_string(),
            notification: model.notifier.current().cloned(),
            add_movie_open: model.add_movie_open,
            rating: model.rating.clone(),
            on_open_add_movie: emitter.callback(|_: ()| MoviesEvent::AddMovieOpened),
            on_close_add_movie: emitter.callback(|_: ()| MoviesEvent::AddMovieClosed),
            on_add_movie: emitter.callback(MoviesEvent::AddMovieSubmitted),
            on_open_rate: emitter.callback(MoviesEvent::RateOpened),
            on_close_rate: emitter.callback(|_: ()| MoviesEvent::RateClosed),
            on_rate: emitter.callback(MoviesEvent::RateSubmitted),
        }
    }
}

pub fn render(model: &MoviesModel) -> Markup {
    html! {
        div id="moviesContainer" {
            (render_ranking(model.movies.get()))
        }
        div id="addMovieModal" class="modal" hidden=[hidden_unless(model.add_movie_open)] {
            div class="modal-content" {
                h2 { "New movie" }
                form id="addMovieForm" {
                    input type="text" name="title" required;
                    input type="number" name="year" min=(FIRST_FILM_YEAR) max=(LAST_ACCEPTED_YEAR) required;
                    button type="submit" class="btn btn-primary" { "Add" }
                }
            }
        }
        div id="rateMovieModal" class="modal" hidden=[hidden_unless(model.rating.is_some())] {
            div class="modal-content" {
                @if let Some(target) = &model.rating {
                    h2 { "Rate " span id="rateMovieTitle" { (target.title) } }
                    form id="rateMovieForm" {
                        input type="hidden" name="movie_id" value=(target.movie_id);
                        select name="score" required {
                            @for score in (1..=5).rev() {
                                option value=(score) { (stars(score as f64)) }
                            }
                        }
                        button type="submit" class="btn btn-primary" { "Rate" }
                    }
                }
            }
        }
        (model.notifier.render())
    }
}

/// The ranking, best first; the server already sorts it.
pub fn render_ranking(movies: &[Movie]) -> Markup {
    if movies.is_empty() {
        return empty_state("No movies yet");
    }
    html! {
        @for (index, movie) in movies.iter().enumerate() {
            div class="movie-card" data-movie-id=(movie.id) {
                div class="movie-rank" { "#" (index + 1) }
                div class="movie-info" {
                    h3 { (movie.title) }
                    p class="movie-year" { (movie.year) }
                }
                div class="movie-rating" {
                    div class="rating-score" {
                        span class="score" { (format!("{:.2}", movie.avg_score)) }
                        span class="stars" { (stars(movie.avg_score)) }
                    }
                    div class="rating-votes" { (votes_label(movie.votes)) }
                }
                button class="btn btn-primary btn-small" { "Rate" }
            }
        }
    }
}
