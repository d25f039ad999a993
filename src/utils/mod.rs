pub mod minify;
pub mod time_ago;
