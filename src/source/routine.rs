use crate::source::BodyStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    /// A function with a declared `[begin, end]` line range.
    Function,
    /// A script file; defined to contain every line.
    Script,
}

/// One user-defined routine: a top-level function or script, or a
/// sub/nested function. Subroutines are kept in file-declaration order.
#[derive(Debug, Clone)]
pub struct Routine {
    name: String,
    file: String,
    kind: RoutineKind,
    begin: u32,
    end: u32,
    body: BodyStore,
    subroutines: Vec<Routine>,
}

impl Routine {
    pub fn function(name: impl Into<String>, begin: u32, end: u32) -> Self {
        let name = name.into();
        Routine {
            file: name.clone(),
            name,
            kind: RoutineKind::Function,
            begin,
            end,
            body: BodyStore::default(),
            subroutines: Vec::new(),
        }
    }

    pub fn script(name: impl Into<String>) -> Self {
        let name = name.into();
        Routine {
            file: name.clone(),
            name,
            kind: RoutineKind::Script,
            begin: 1,
            end: u32::MAX,
            body: BodyStore::default(),
            subroutines: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_body(mut self, body: BodyStore) -> Self {
        self.body = body;
        self
    }

    pub fn with_subroutine(mut self, sub: Routine) -> Self {
        self.subroutines.push(sub);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn kind(&self) -> RoutineKind {
        self.kind
    }

    pub fn is_function(&self) -> bool {
        self.kind == RoutineKind::Function
    }

    pub fn begin_line(&self) -> u32 {
        self.begin
    }

    pub fn end_line(&self) -> u32 {
        self.end
    }

    pub fn body(&self) -> &BodyStore {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut BodyStore {
        &mut self.body
    }

    pub fn subroutines(&self) -> &[Routine] {
        &self.subroutines
    }

    pub fn subroutine_names(&self) -> Vec<&str> {
        self.subroutines.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn subroutine(&self, name: &str) -> Option<&Routine> {
        self.subroutines.iter().find(|s| s.name == name)
    }

    pub fn subroutine_mut(&mut self, name: &str) -> Option<&mut Routine> {
        self.subroutines.iter_mut().find(|s| s.name == name)
    }

    /// Follow a child-index path produced by line resolution.
    pub fn descend(&self, path: &[usize]) -> Option<&Routine> {
        let mut current = self;
        for &idx in path {
            current = current.subroutines.get(idx)?;
        }
        Some(current)
    }

    pub fn descend_mut(&mut self, path: &[usize]) -> Option<&mut Routine> {
        let mut current = self;
        for &idx in path {
            current = current.subroutines.get_mut(idx)?;
        }
        Some(current)
    }

    /// True if this routine or any subroutine has executable content.
    pub fn has_statements(&self) -> bool {
        self.body.has_statements() || self.subroutines.iter().any(Routine::has_statements)
    }
}
