use std::collections::BTreeMap;

use crate::source::{base_name, Routine};

/// Resolves a routine or script name (optionally qualified by a class) to the
/// top-level routine holding it. The interpreter's symbol machinery sits
/// behind this trait; tests and the console use the in-memory [`Workspace`].
pub trait RoutineResolver {
    fn find(&self, name: &str, class_name: &str) -> Option<&Routine>;
    fn find_mut(&mut self, name: &str, class_name: &str) -> Option<&mut Routine>;
}

/// In-memory routine registry keyed by name, with class methods stored under
/// `class/name`.
#[derive(Debug, Default)]
pub struct Workspace {
    routines: BTreeMap<String, Routine>,
}

fn key_for(name: &str, class_name: &str) -> String {
    let name = base_name(name);
    if class_name.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", class_name, name)
    }
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    pub fn add(&mut self, routine: Routine) {
        self.routines.insert(routine.name().to_string(), routine);
    }

    pub fn add_method(&mut self, class_name: &str, routine: Routine) {
        self.routines
            .insert(format!("{}/{}", class_name, routine.name()), routine);
    }
}

impl RoutineResolver for Workspace {
    fn find(&self, name: &str, class_name: &str) -> Option<&Routine> {
        self.routines.get(&key_for(name, class_name))
    }

    fn find_mut(&mut self, name: &str, class_name: &str) -> Option<&mut Routine> {
        self.routines.get_mut(&key_for(name, class_name))
    }
}
