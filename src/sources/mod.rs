pub mod favicon;
pub mod rss_atom;
pub mod reddit;
