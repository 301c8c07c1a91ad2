pub mod csv;
pub mod html;
pub mod memory;

pub use self::csv::CsvStorage;
pub use self::html::HtmlStorage;
pub use self::memory::MemoryStorage;
