use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleHierarchyError {
    #[error("rule '{0}' contains an empty authority")]
    EmptyAuthority(String),

    #[error("rule '{0}' must name at least two authorities separated by '>'")]
    IncompleteRule(String),

    #[error("authority '{0}' reaches itself")]
    Cycle(String),
}

/// Authority expansion rules, e.g. `ROLE_OWNER > ROLE_EMPLOYEE`
///
/// Rules are separated by newlines or `;`; a rule may chain several
/// authorities (`A > B > C`). Reachability is transitive and precomputed at
/// parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleHierarchy {
    reachable: BTreeMap<String, BTreeSet<String>>,
}

impl RoleHierarchy {
    pub fn parse(rules: &str) -> Result<Self, RoleHierarchyError> {
        let mut direct: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for rule in rules.split(['\n', ';']).map(str::trim).filter(|r| !r.is_empty()) {
            let authorities: Vec<&str> = rule.split('>').map(str::trim).collect();
            if authorities.iter().any(|a| a.is_empty()) {
                return Err(RoleHierarchyError::EmptyAuthority(rule.to_string()));
            }
            if authorities.len() < 2 {
                return Err(RoleHierarchyError::IncompleteRule(rule.to_string()));
            }
            for pair in authorities.windows(2) {
                direct
                    .entry(pair[0].to_string())
                    .or_default()
                    .insert(pair[1].to_string());
            }
        }

        let mut reachable = BTreeMap::new();
        for higher in direct.keys() {
            let mut seen = BTreeSet::new();
            let mut pending: Vec<&String> = direct[higher].iter().collect();
            while let Some(next) = pending.pop() {
                if next == higher {
                    return Err(RoleHierarchyError::Cycle(higher.clone()));
                }
                if seen.insert(next.clone()) {
                    if let Some(lower) = direct.get(next) {
                        pending.extend(lower.iter());
                    }
                }
            }
            reachable.insert(higher.clone(), seen);
        }

        Ok(Self { reachable })
    }

    /// Granted authorities plus everything reachable from them
    pub fn reachable_authorities<'a, I>(&self, granted: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut expanded = BTreeSet::new();
        for authority in granted {
            expanded.insert(authority.to_string());
            if let Some(lower) = self.reachable.get(authority) {
                expanded.extend(lower.iter().cloned());
            }
        }
        expanded
    }
}
