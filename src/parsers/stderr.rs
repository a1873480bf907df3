use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "parsers/stderr.pest"] // relative to src
pub struct StderrParser;

/// What went wrong, as far as stderr tells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Dataset (or the parent it was going to be created under) doesn't exist.
    DatasetNotFound(String),
    /// Pool doesn't exist. Carries the pool name when the tool reports it, otherwise the name of
    /// the entity the command was run against.
    PoolNotFound(String),
    Other,
}

/// Tidy up stderr: drop the usage text, trim every line, drop blank lines and join the rest with
/// `": "`.
pub fn clean_up(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = match text.find("\nusage:\n") {
        Some(idx) => &text[..idx],
        None => &text[..],
    };
    text.trim().lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>().join(": ")
}

/// Classify cleaned up stderr.
pub fn classify(stderr: &str) -> Failure {
    // Pest: error > dataset_not_found > name: "s/asd/asd"
    let failure_pair = match StderrParser::parse(Rule::error, stderr)
        .ok()
        .and_then(|mut pairs| pairs.next())
        .and_then(|error| error.into_inner().next())
    {
        Some(pair) => pair,
        None => return Failure::Other,
    };
    let rule = failure_pair.as_rule();
    let mut names = failure_pair.into_inner().map(|pair| String::from(pair.as_str()));
    match rule {
        Rule::dataset_not_found | Rule::parent_not_found => {
            names.next().map_or(Failure::Other, Failure::DatasetNotFound)
        },
        Rule::pool_not_found => names.last().map_or(Failure::Other, Failure::PoolNotFound),
        _ => Failure::Other,
    }
}
