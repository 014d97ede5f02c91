use std::fmt;

/// Type of an external variable's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Int,
    Char,
    Str,
}

/// Current value of an external variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Int(i64),
    Char(char),
    Str(String),
}

impl VarValue {
    pub fn kind(&self) -> VarKind {
        match self {
            VarValue::Int(_) => VarKind::Int,
            VarValue::Char(_) => VarKind::Char,
            VarValue::Str(_) => VarKind::Str,
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(n) => write!(f, "{}", n),
            VarValue::Char(c) => write!(f, "{}", c),
            VarValue::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone)]
struct Variable {
    name: &'static str,
    value: VarValue,
}

/// Ordered table of variables that templates can reference as `$name`.
///
/// Names are registered once; values are refreshed before each render pass.
/// Registration order matters: the compiler tries names in this order and
/// takes the first one that prefixes the source text.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    vars: Vec<Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        VariableTable::default()
    }

    /// Register a variable, or update its value if already registered
    pub fn set(&mut self, name: &'static str, value: VarValue) {
        match self.vars.iter_mut().find(|v| v.name == name) {
            Some(var) => var.value = value,
            None => self.vars.push(Variable { name, value }),
        }
    }

    /// Current value of a variable
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.vars.iter().find(|v| v.name == name).map(|v| &v.value)
    }

    /// Registered (name, kind) pairs in registration order
    pub fn names(&self) -> impl Iterator<Item = (&'static str, VarKind)> + '_ {
        self.vars.iter().map(|v| (v.name, v.value.kind()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
