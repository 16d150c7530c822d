use rest_mvu::api::Method;
use rest_mvu::pages::movies::*;
use serde_json::json;

use super::*;

type MoviesTest = PageTest<MoviesEvent, MoviesModel, MoviesProps, MoviesLogic>;

fn movie(id: i64, title: &str, avg_score: f64, votes: i64) -> Movie {
    Movie {
        id,
        title: title.into(),
        year: 1999,
        avg_score,
        votes,
    }
}

fn movies_backend(movies: Vec<Movie>) -> FakeBackend {
    FakeBackend::new(move |request| match (request.method, request.path.as_str()) {
        (Method::Get, "/api/movies") => ok(&movies),
        (Method::Post, "/api/movies") | (Method::Post, "/api/ratings") => created(),
        _ => unexpected(request),
    })
}

fn start_movies(backend: &FakeBackend) -> MoviesTest {
    start_page(backend, MoviesModel::default(), MoviesLogic::new)
}

fn open_rating(test: &mut MoviesTest, movie_id: i64, title: &str) {
    let target = RateTarget {
        movie_id,
        title: title.into(),
    };
    test.renders.with_latest(|props| props.on_open_rate.call(target));
    test.driver.process_events();
}

#[test]
fn given_a_ranking_should_render_rank_score_stars_and_votes() {
    let test = start_movies(&movies_backend(vec![
        movie(4, "The Matrix", 4.5, 2),
        movie(9, "eXistenZ", 0.4, 1),
    ]));

    test.renders.with_latest(|props| {
        let markup = &props.markup;
        assert!(markup.find("The Matrix").unwrap() < markup.find("eXistenZ").unwrap());
        assert!(markup.contains(r#"<div class="movie-rank">#1</div>"#));
        assert!(markup.contains(r#"<div class="movie-rank">#2</div>"#));
        assert!(markup.contains(r#"<span class="score">4.50</span>"#));
        assert!(markup.contains(r#"<span class="stars">⭐⭐⭐⭐½</span>"#));
        assert!(markup.contains(r#"<span class="stars">☆</span>"#));
        assert!(markup.contains("2 votes"));
        assert!(markup.contains(">1 vote<"));
    });
}

#[test]
fn given_no_movies_should_show_the_empty_state() {
    let test = start_movies(&movies_backend(vec![]));

    test.renders.with_latest(|props| {
        assert!(props.markup.contains("No movies yet"));
    });
}

#[test]
fn given_an_out_of_range_score_should_not_rate() {
    let mut test = start_movies(&movies_backend(vec![movie(4, "The Matrix", 4.5, 2)]));
    open_rating(&mut test, 4, "The Matrix");

    test.renders.with_latest(|props| props.on_rate.call("6".into()));
    test.driver.process_events();

    assert!(test.backend.requests_to(Method::Post, "/api/ratings").is_empty());
    assert_eq!(shown_messages(&test.renders), vec!["Score must be between 1 and 5"]);
    assert!(test.driver.model().rating.is_some());
}

#[test]
fn given_a_rating_should_post_it_for_the_opened_movie_and_reload() {
    let mut test = start_movies(&movies_backend(vec![movie(4, "The Matrix", 4.5, 2)]));
    open_rating(&mut test, 4, "The Matrix");

    test.renders.with_latest(|props| {
        assert!(props.markup.contains(r#"<span id="rateMovieTitle">The Matrix</span>"#));
        props.on_rate.call("4".into());
    });
    test.driver.process_events();

    let ratings = test.backend.requests_to(Method::Post, "/api/ratings");
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].body, Some(json!({ "movie_id": 4, "score": 4 })));
    assert_eq!(test.backend.requests_to(Method::Get, "/api/movies").len(), 2);
    assert!(test.driver.model().rating.is_none());
    assert_eq!(shown_messages(&test.renders), vec!["Rating added successfully!"]);
}

#[test]
fn given_a_pre_cinema_year_should_not_add_the_movie() {
    let mut test = start_movies(&movies_backend(vec![]));

    test.renders.with_latest(|props| {
        props.on_add_movie.call(MovieForm {
            title: "Horse in Motion".into(),
            year: "1878".into(),
        })
    });
    test.driver.process_events();

    assert!(test.backend.requests_to(Method::Post, "/api/movies").is_empty());
    assert_eq!(
        shown_messages(&test.renders),
        vec!["Year must be between 1888 and 2100"]
    );
}
