mod identifier;
mod location;

pub use identifier::Identifier;
pub use location::{LineIndex, Location};
