//! Movie catalog handlers.
//!
//! Listing and reading annotate each movie with whether the caller may
//! watch it; premium movies require an open premium window.

mod create_movie;
mod delete_movie;
mod get_movie;
mod list_movies;
mod update_movie;
mod view;

// Commands
pub use create_movie::{CreateMovieCommand, CreateMovieHandler};
pub use delete_movie::{DeleteMovieCommand, DeleteMovieHandler};
pub use update_movie::{UpdateMovieCommand, UpdateMovieHandler};

// Queries
pub use get_movie::{GetMovieHandler, GetMovieQuery};
pub use list_movies::{ListMoviesHandler, ListMoviesQuery};

pub use view::MovieView;
