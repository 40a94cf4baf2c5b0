//! Pagination over list endpoints.
//!
//! [`Page`] is plain data; a [`Paginator`] binds the list call and walks
//! the server's continuation cursor.

mod page;
mod paginator;

pub use page::{Cursor, Direction, ListParams, ListQuery, Page, continuation_of};
pub use paginator::{ListSource, Paginator};
