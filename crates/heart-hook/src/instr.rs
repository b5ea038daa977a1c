use std::fmt;
use std::sync::Arc;

use crate::error::ExecError;
use crate::value::Value;

/// A branch target, placed in the stream with [`Instruction::Mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04}", self.0)
    }
}

type CtorFn = dyn Fn(Vec<Value>) -> Result<Value, ExecError> + Send + Sync;

/// A constructible host type: its name, how many stack values the
/// constructor takes, and the constructor itself.
#[derive(Clone)]
pub struct TypeRef {
    pub name: String,
    pub arity: usize,
    ctor: Arc<CtorFn>,
}

impl TypeRef {
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        ctor: impl Fn(Vec<Value>) -> Result<Value, ExecError> + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), arity, ctor: Arc::new(ctor) }
    }

    /// Arguments arrive in push order.
    pub fn construct(&self, args: Vec<Value>) -> Result<Value, ExecError> {
        (self.ctor)(args)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

type DelegateFn = dyn Fn(Vec<Value>) -> Result<Option<Value>, ExecError> + Send + Sync;

/// A native callback spliced into a body.
#[derive(Clone)]
pub struct Delegate {
    pub name: String,
    pub inputs: usize,
    pub returns: bool,
    func: Arc<DelegateFn>,
}

impl Delegate {
    pub fn new(
        name: impl Into<String>,
        inputs: usize,
        returns: bool,
        func: impl Fn(Vec<Value>) -> Result<Option<Value>, ExecError> + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), inputs, returns, func: Arc::new(func) }
    }

    /// Pops one value and pushes its replacement.
    pub fn map(
        name: impl Into<String>,
        f: impl Fn(Value) -> Result<Value, ExecError> + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let err_name = name.clone();
        Self::new(name, 1, true, move |mut args| match args.pop() {
            Some(v) => f(v).map(Some),
            None => Err(ExecError::host(err_name.clone(), "called without its argument")),
        })
    }

    /// Pushes a value computed on every call.
    pub fn push(name: impl Into<String>, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::new(name, 0, true, move |_| Ok(Some(f())))
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Option<Value>, ExecError> {
        let out = (self.func)(args)?;
        match (self.returns, out) {
            (true, None) => Err(ExecError::host(self.name.clone(), "returned nothing")),
            (false, Some(_)) => Err(ExecError::host(self.name.clone(), "returned a value it declared void")),
            (_, out) => Ok(out),
        }
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.inputs)
    }
}

/// One step of a routine body.
#[derive(Debug, Clone)]
pub enum Instruction {
    Nop,
    Mark(Label),
    LdcI4(i32),
    LdcR4(f32),
    LdNull,
    LdArg(u16),
    LdLoc(u16),
    StLoc(u16),
    Add,
    Pop,
    Br(Label),
    /// Pops `b` then `a`; branches when `a < b`.
    Blt(Label),
    NewObj(TypeRef),
    Invoke(Delegate),
    /// Pops a value and hands it to whoever resumed the routine.
    Yield,
    Ret,
}

impl Instruction {
    /// How many values the instruction pops, then pushes.
    pub fn stack_effect(&self) -> (usize, usize) {
        match self {
            Instruction::Nop | Instruction::Mark(_) | Instruction::Br(_) | Instruction::Ret => (0, 0),
            Instruction::LdcI4(_)
            | Instruction::LdcR4(_)
            | Instruction::LdNull
            | Instruction::LdArg(_)
            | Instruction::LdLoc(_) => (0, 1),
            Instruction::StLoc(_) | Instruction::Pop | Instruction::Yield => (1, 0),
            Instruction::Add => (2, 1),
            Instruction::Blt(_) => (2, 0),
            Instruction::NewObj(t) => (t.arity, 1),
            Instruction::Invoke(d) => (d.inputs, d.returns as usize),
        }
    }

    pub fn branch_target(&self) -> Option<Label> {
        match self {
            Instruction::Br(l) | Instruction::Blt(l) => Some(*l),
            _ => None,
        }
    }

    pub fn match_newobj(&self, type_name: &str) -> bool {
        matches!(self, Instruction::NewObj(t) if t.name == type_name)
    }

    pub fn match_ldc_i4(&self, value: i32) -> bool {
        matches!(self, Instruction::LdcI4(v) if *v == value)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Nop => write!(f, "nop"),
            Instruction::Mark(l) => write!(f, "{l}:"),
            Instruction::LdcI4(v) => write!(f, "ldc.i4 {v}"),
            Instruction::LdcR4(v) => write!(f, "ldc.r4 {v}"),
            Instruction::LdNull => write!(f, "ldnull"),
            Instruction::LdArg(i) => write!(f, "ldarg {i}"),
            Instruction::LdLoc(i) => write!(f, "ldloc {i}"),
            Instruction::StLoc(i) => write!(f, "stloc {i}"),
            Instruction::Add => write!(f, "add"),
            Instruction::Pop => write!(f, "pop"),
            Instruction::Br(l) => write!(f, "br {l}"),
            Instruction::Blt(l) => write!(f, "blt {l}"),
            Instruction::NewObj(t) => write!(f, "newobj {}/{}", t.name, t.arity),
            Instruction::Invoke(d) => write!(f, "call {}/{}", d.name, d.inputs),
            Instruction::Yield => write!(f, "yield"),
            Instruction::Ret => write!(f, "ret"),
        }
    }
}
