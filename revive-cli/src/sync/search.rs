use crate::models::Member;

/// Members whose name or email contains `query`, ignoring case.
///
/// Always filters the full list handed in, never a previous result.
pub fn filter_members<'a>(members: &'a [Member], query: &str) -> Vec<&'a Member> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return members.iter().collect();
    }

    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle) || m.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Search box state over the admin member list
#[derive(Debug, Clone, Default)]
pub struct MemberSearch {
    query: String,
}

impl MemberSearch {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn apply<'a>(&self, members: &'a [Member]) -> Vec<&'a Member> {
        filter_members(members, &self.query)
    }
}
