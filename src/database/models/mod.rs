pub mod saving_entry;

pub use saving_entry::{NewSavingEntry, SavingEntry};
