pub mod books_manager;

pub use books_manager::BooksManager;
