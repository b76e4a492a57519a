//! Java grammar bundle, the baseline language.

use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

use super::{GrammarBundle, Language};

#[derive(Parser)]
#[grammar = "grammar/java.pest"]
pub struct JavaGrammar;

impl GrammarBundle for JavaGrammar {
    type Rule = Rule;

    const LANGUAGE: Language = Language::Java;

    fn parse_start(source: &str) -> Result<Pairs<'_, Rule>, pest::error::Error<Rule>> {
        <Self as Parser<Rule>>::parse(Rule::compilationUnit, source)
    }
}
