use std::collections::HashSet;

use super::collection::IdCollection;
use crate::models::Program;

/// A member's program enrollment.
///
/// `available` is never stored; it is always "all programs minus enrolled ids", so the
/// two lists stay disjoint and together cover the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrollment {
    all: IdCollection<Program>,
    enrolled: IdCollection<Program>,
}

impl Enrollment {
    pub fn new(all: Vec<Program>, enrolled: Vec<Program>) -> Self {
        let all = IdCollection::new(all);
        let mut kept = IdCollection::default();

        for program in enrolled {
            // Prefer the catalog copy so both lists show the same fields
            match all.get(program.id) {
                Some(canonical) => kept.insert(canonical.clone()),
                None => tracing::warn!("Enrolled program {} is not in the catalog", program.id),
            }
        }

        Self { all, enrolled: kept }
    }

    pub fn all(&self) -> &[Program] {
        self.all.items()
    }

    pub fn enrolled(&self) -> &[Program] {
        self.enrolled.items()
    }

    pub fn available(&self) -> Vec<&Program> {
        let enrolled: HashSet<i64> = self.enrolled.ids().into_iter().collect();
        self.all
            .iter()
            .filter(|p| !enrolled.contains(&p.id))
            .collect()
    }

    pub fn enrolled_ids(&self) -> Vec<i64> {
        self.enrolled.ids()
    }

    pub fn is_enrolled(&self, program_id: i64) -> bool {
        self.enrolled.contains(program_id)
    }

    /// Move an available program to the enrolled list; false if not available
    pub fn join(&mut self, program_id: i64) -> bool {
        if self.is_enrolled(program_id) {
            return false;
        }
        match self.all.get(program_id) {
            Some(program) => {
                self.enrolled.insert(program.clone());
                true
            }
            None => false,
        }
    }

    /// Drop an enrolled program; it reappears among the available ones
    pub fn leave(&mut self, program_id: i64) -> bool {
        self.enrolled.remove(program_id).is_some()
    }

    /// Join if not enrolled, leave otherwise; returns the new enrolled state
    pub fn toggle(&mut self, program_id: i64) -> bool {
        if self.leave(program_id) {
            false
        } else {
            self.join(program_id)
        }
    }

    /// Reflect a catalog edit in both lists
    pub fn replace_program(&mut self, program: Program) {
        self.enrolled.replace(program.clone());
        self.all.insert(program);
    }
}
