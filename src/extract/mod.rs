// Per-field extraction rules for one listing card. Each rule reads the card on
// its own; a missing node is an absent value, only DOM faults are errors.

pub mod fallback;
pub mod fields;

pub use fallback::{
    default_name_strategies, AltTextSplitter, LeadingTokenSplitter, NameParts, NameStrategy,
};
pub use fields::SpecList;
