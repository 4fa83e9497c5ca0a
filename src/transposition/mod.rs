pub mod degree_transpose;
pub mod membership;

pub use degree_transpose::{degree_index, degree_interval, transpose_degree, transpose_note};
pub use membership::{is_note_in_key, is_note_in_key_with, MembershipStrategy};
