//! HCL2 grammar bundle (Terraform configuration files).

use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

use super::{GrammarBundle, Language};

#[derive(Parser)]
#[grammar = "grammar/hcl.pest"]
pub struct HclGrammar;

impl GrammarBundle for HclGrammar {
    type Rule = Rule;

    const LANGUAGE: Language = Language::Hcl;

    fn parse_start(source: &str) -> Result<Pairs<'_, Rule>, pest::error::Error<Rule>> {
        <Self as Parser<Rule>>::parse(Rule::configFile, source)
    }
}
