mod generate;
pub use generate::Generate;

mod completions;
pub use completions::Completions;
