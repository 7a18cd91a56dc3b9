use crate::conventional;
use crate::domain::{BumpType, RuleBump, RuleMatcher, VersionRule};

/// Outcome of classifying one physical line of a commit message
#[derive(Debug, Clone, Copy)]
pub enum LineClass<'r> {
    /// A skip rule matched; the whole commit must be dropped
    Veto,
    Classified(Classification<'r>),
    Unclassified,
}

/// The winning rule for a line
#[derive(Debug, Clone, Copy)]
pub struct Classification<'r> {
    pub rule: &'r VersionRule,
    pub bump: BumpType,
}

fn rule_matches(rule: &VersionRule, line: &str) -> bool {
    match &rule.matches {
        RuleMatcher::ConventionalType(expected) => conventional::parse_header(line)
            .is_some_and(|header| header.r#type == expected.as_str()),
        RuleMatcher::Pattern(regex) => regex.is_match(line),
    }
}

/// Classify a single line against the ordered rule table.
///
/// Every rule is evaluated and the highest bump wins; among equal bumps the
/// later rule wins. A matching skip rule short-circuits to [`LineClass::Veto`].
pub fn classify_line<'r>(rules: &'r [VersionRule], line: &str) -> LineClass<'r> {
    let mut best: Option<Classification<'r>> = None;

    for rule in rules {
        if !rule_matches(rule, line) {
            continue;
        }

        let bump = match rule.bump {
            RuleBump::Skip => return LineClass::Veto,
            RuleBump::Level(bump) => bump,
        };

        if best.is_some_and(|current| bump < current.bump) {
            continue;
        }
        best = Some(Classification { rule, bump });
    }

    best.map_or(LineClass::Unclassified, LineClass::Classified)
}
