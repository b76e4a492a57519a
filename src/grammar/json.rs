//! JSON grammar bundle.

use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

use super::{GrammarBundle, Language};

#[derive(Parser)]
#[grammar = "grammar/json.pest"]
pub struct JsonGrammar;

impl GrammarBundle for JsonGrammar {
    type Rule = Rule;

    const LANGUAGE: Language = Language::Json;

    fn parse_start(source: &str) -> Result<Pairs<'_, Rule>, pest::error::Error<Rule>> {
        <Self as Parser<Rule>>::parse(Rule::document, source)
    }
}
