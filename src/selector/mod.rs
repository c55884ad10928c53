//! Selector engine: tokenizer, parser, matcher.

pub mod matcher;
pub mod model;
pub mod parser;
pub mod tokenizer;

pub use matcher::{matches_compound, matches_selector};
pub use model::{Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList, SelectorPart};
pub use parser::{parse_selector_list, SelectorError};

impl std::str::FromStr for SelectorList {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector_list(s)
    }
}
