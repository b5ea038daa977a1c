use std::collections::HashMap;
use std::sync::Arc;

use crate::body::MethodBody;
use crate::error::ExecError;
use crate::instr::{Instruction, Label};
use crate::value::Value;

const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// A running instance of a body. Each [`Coroutine::resume`] runs until the
/// next `yield` or the final `ret`.
pub struct Coroutine {
    body: Arc<MethodBody>,
    marks: HashMap<Label, usize>,
    args: Vec<Value>,
    locals: Vec<Value>,
    stack: Vec<Value>,
    pc: usize,
    steps: usize,
    step_limit: usize,
    done: bool,
}

impl Coroutine {
    /// Refuses bodies that do not verify.
    pub fn new(body: Arc<MethodBody>, args: Vec<Value>) -> Result<Self, ExecError> {
        body.verify()?;
        let marks = body.label_positions()?;
        let locals = (0..body.locals).map(|_| Value::Null).collect();
        Ok(Self {
            body,
            marks,
            args,
            locals,
            stack: Vec::new(),
            pc: 0,
            steps: 0,
            step_limit: DEFAULT_STEP_LIMIT,
            done: false,
        })
    }

    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn pop(&mut self) -> Result<Value, ExecError> {
        self.stack.pop().ok_or(ExecError::StackUnderflow { at: self.pc.saturating_sub(1) })
    }

    fn pop_n(&mut self, n: usize) -> Result<Vec<Value>, ExecError> {
        if self.stack.len() < n {
            return Err(ExecError::StackUnderflow { at: self.pc.saturating_sub(1) });
        }
        Ok(self.stack.split_off(self.stack.len() - n))
    }

    fn copy(&self, v: &Value) -> Result<Value, ExecError> {
        v.try_clone().ok_or(ExecError::NotCopyable(v.kind()))
    }

    fn jump(&mut self, label: Label) -> Result<(), ExecError> {
        self.pc = *self.marks.get(&label).ok_or(ExecError::UndefinedLabel(label))?;
        Ok(())
    }

    /// Run to the next yielded value. `Ok(None)` once the body has returned.
    pub fn resume(&mut self) -> Result<Option<Value>, ExecError> {
        let body = self.body.clone();
        while !self.done {
            self.steps += 1;
            if self.steps > self.step_limit {
                self.done = true;
                return Err(ExecError::StepLimit(self.step_limit));
            }
            let Some(instr) = body.instructions.get(self.pc) else {
                self.done = true;
                break;
            };
            let at = self.pc;
            self.pc += 1;
            match instr {
                Instruction::Nop | Instruction::Mark(_) => {}
                Instruction::LdcI4(v) => self.stack.push(Value::Int(*v)),
                Instruction::LdcR4(v) => self.stack.push(Value::Float(*v)),
                Instruction::LdNull => self.stack.push(Value::Null),
                Instruction::LdArg(i) => {
                    let v = self.args.get(*i as usize).ok_or(ExecError::NoArgument { index: *i })?;
                    let v = self.copy(v)?;
                    self.stack.push(v);
                }
                Instruction::LdLoc(i) => {
                    let v = self.locals.get(*i as usize).ok_or(ExecError::NoLocal { index: *i })?;
                    let v = self.copy(v)?;
                    self.stack.push(v);
                }
                Instruction::StLoc(i) => {
                    let v = self.pop()?;
                    let slot = self.locals.get_mut(*i as usize).ok_or(ExecError::NoLocal { index: *i })?;
                    *slot = v;
                }
                Instruction::Add => {
                    let b = self.pop()?;
                    let a = self.pop()?;
                    let sum = match (a, b) {
                        (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_add(b)),
                        (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
                        (Value::Vector(a), Value::Vector(b)) => Value::Vector(a + b),
                        (a, _) => return Err(mismatch(at, "matching numbers", &a)),
                    };
                    self.stack.push(sum);
                }
                Instruction::Pop => {
                    self.pop()?;
                }
                Instruction::Br(label) => self.jump(*label)?,
                Instruction::Blt(label) => {
                    let b = self.pop()?;
                    let a = self.pop()?;
                    let less = match (&a, &b) {
                        (Value::Int(a), Value::Int(b)) => a < b,
                        (Value::Float(a), Value::Float(b)) => a < b,
                        _ => return Err(mismatch(at, "two ints or two floats", &a)),
                    };
                    if less {
                        self.jump(*label)?;
                    }
                }
                Instruction::NewObj(ty) => {
                    let args = self.pop_n(ty.arity)?;
                    let obj = ty.construct(args)?;
                    self.stack.push(obj);
                }
                Instruction::Invoke(delegate) => {
                    let args = self.pop_n(delegate.inputs)?;
                    if let Some(out) = delegate.call(args)? {
                        self.stack.push(out);
                    }
                }
                Instruction::Yield => {
                    let v = self.pop()?;
                    return Ok(Some(v));
                }
                Instruction::Ret => self.done = true,
            }
        }
        Ok(None)
    }
}

fn mismatch(at: usize, expected: &'static str, found: &Value) -> ExecError {
    ExecError::TypeMismatch { at, expected, found: found.kind() }
}

impl Iterator for Coroutine {
    type Item = Result<Value, ExecError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.resume() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
