use std::fmt::Write;

use crate::movies::{available, MovieDetail, SearchResult};

use super::details::{DetailsState, DetailsView};
use super::search::SearchView;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<link rel="stylesheet" href="/app.css">
</head>
<body>
<div class="app-container">
{}</div>
</body>
</html>
"#,
        escape_html(title),
        body
    )
}

pub fn search_page(view: &SearchView) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<section class="hero">
<h1>🎬 OMDB Movie Explorer</h1>
<p class="text-muted">Discover movies, series, and episodes from the comprehensive OMDB database</p>
<form method="get" action="/" class="search-bar">
<input type="text" name="q" placeholder="Search for movies, series, episodes..." value="{}" autofocus>
<button type="submit">Search</button>
</form>
</section>
"#,
        escape_html(view.query())
    );

    if let Some(error) = view.error() {
        let _ = writeln!(body, "<p class=\"error-text\">❌ {}</p>", escape_html(error));
    }

    let movies = view.movies();

    if view.error().is_none() && view.has_searched() && movies.is_empty() {
        body.push_str(
            "<div class=\"empty-state\">\n<h3>No Results Found</h3>\n\
             <p>Try searching for a different movie title</p>\n</div>\n",
        );
    }

    if !movies.is_empty() {
        let _ = write!(
            body,
            "<div class=\"section-header\">\n<h2>Search Results</h2>\n\
             <span class=\"result-count\">{} movies found</span>\n</div>\n",
            movies.len()
        );
        body.push_str(&card_grid(view, movies));
    } else if !view.has_searched() && !view.favorites().is_empty() {
        let _ = write!(
            body,
            "<div class=\"section-header\">\n<h2>Your Favorites</h2>\n\
             <span class=\"result-count\">{} saved</span>\n</div>\n",
            view.favorites().len()
        );
        body.push_str(&card_grid(view, view.favorites().items()));
    }

    page("OMDB Movie Explorer", &body)
}

/// The cards sit in one form that echoes the shown results back, so a
/// favorite toggle can redraw the page without a new lookup.
fn card_grid(view: &SearchView, movies: &[SearchResult]) -> String {
    let shown = serde_json::to_string(view.movies()).unwrap_or_else(|_| "[]".to_string());

    let mut out = format!(
        "<form method=\"post\" action=\"/favorites\">\n\
         <input type=\"hidden\" name=\"q\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"results\" value=\"{}\">\n\
         <div class=\"results\">\n",
        escape_html(view.query()),
        escape_html(&shown)
    );
    for movie in movies {
        out.push_str(&movie_card(movie, view.is_favorite(&movie.imdb_id)));
    }
    out.push_str("</div>\n</form>\n");
    out
}

fn movie_card(movie: &SearchResult, favorite: bool) -> String {
    let (class, heart, label) = if favorite {
        ("favorite-btn is-favorite", "❤️", "Remove from Favorites")
    } else {
        ("favorite-btn", "🤍", "Add to Favorites")
    };

    format!(
        r#"<div class="movie-card">
<a class="movie-click" href="/movie/{id_path}"><img src="{poster}" alt="{title}" loading="lazy"></a>
<div class="movie-info">
<h3>{title}</h3>
<div class="movie-meta"><span class="movie-year">{year}</span><span class="movie-type">{kind}</span></div>
</div>
<button type="submit" name="toggle" value="{id}" class="{class}"><span class="heart-icon">{heart}</span>{label}</button>
</div>
"#,
        id_path = urlencoding::encode(&movie.imdb_id),
        id = escape_html(&movie.imdb_id),
        poster = escape_html(movie.poster_url()),
        title = escape_html(&movie.title),
        year = escape_html(&movie.year),
        kind = escape_html(&movie.item_type),
        class = class,
        heart = heart,
        label = label,
    )
}

const BACK_BUTTON: &str = "<button onclick=\"history.back()\" class=\"back-btn\">";

pub fn details_page(view: &DetailsView) -> String {
    match view.state() {
        DetailsState::Loading => page(
            "Loading",
            "<div class=\"loading-spinner\"><p>Loading movie details...</p></div>\n",
        ),
        DetailsState::Failed(message) => page(
            &format!("{} not available", view.imdb_id()),
            &format!(
                "<p class=\"error-text\">{}</p>\n{}← Go Back</button>\n",
                escape_html(message),
                BACK_BUTTON
            ),
        ),
        DetailsState::Loaded(movie) => page(&movie.title, &movie_details(movie)),
    }
}

fn movie_details(movie: &MovieDetail) -> String {
    let mut badges = format!(
        "<span class=\"meta-badge\">📅 {}</span>\n\
         <span class=\"meta-badge\">⏱️ {}</span>\n\
         <span class=\"meta-badge\">🎭 {}</span>\n",
        escape_html(&movie.year),
        escape_html(&movie.runtime),
        escape_html(&movie.genre)
    );
    if let Some(rating) = available(&movie.imdb_rating) {
        let _ = writeln!(badges, "<span class=\"meta-badge\">⭐ {}/10</span>", escape_html(rating));
    }

    let mut grid = String::new();
    for (label, value) in [
        ("Director", &movie.director),
        ("Writer", &movie.writer),
        ("Actors", &movie.actors),
        ("Language", &movie.language),
        ("Country", &movie.country),
        ("Awards", &movie.awards),
    ] {
        grid.push_str(&detail_item(label, value));
    }
    for (label, value) in [("Box Office", &movie.box_office), ("Rated", &movie.rated)] {
        if let Some(value) = available(value) {
            grid.push_str(&detail_item(label, value));
        }
    }

    format!(
        r#"{back}← Back to Search</button>
<div class="details-container">
<div class="details-header">
<div class="details-poster"><img src="{poster}" alt="{title}"></div>
<div class="details-info">
<h2>{title}</h2>
<div class="details-meta">
{badges}</div>
<p class="details-plot">{plot}</p>
<div class="details-grid">
{grid}</div>
</div>
</div>
</div>
"#,
        back = BACK_BUTTON,
        poster = escape_html(movie.poster_url()),
        title = escape_html(&movie.title),
        badges = badges,
        plot = escape_html(&movie.plot),
        grid = grid,
    )
}

fn detail_item(label: &str, value: &str) -> String {
    format!(
        "<div class=\"detail-item\"><strong>{}</strong><span>{}</span></div>\n",
        label,
        escape_html(value)
    )
}
