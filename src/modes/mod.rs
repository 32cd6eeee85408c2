pub mod human;

pub use human::{GridLayout, HumanMode};
