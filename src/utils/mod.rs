pub mod table;
pub mod text;

pub use table::{code_block, render_table};
pub use text::{capitalize, closest_matches, names_match, normalize, similarity, truncate_nickname};
