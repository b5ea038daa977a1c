use std::fmt;

use crate::body::MethodBody;
use crate::error::{ExecError, HookError};
use crate::instr::{Delegate, Instruction};
use crate::value::Value;

/// Where the cursor lands relative to a matched instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Before,
    After,
}

/// A named instruction predicate. The name is what a failed search reports.
pub struct Pattern {
    description: String,
    pred: Box<dyn Fn(&Instruction) -> bool>,
}

impl Pattern {
    pub fn new(description: impl Into<String>, pred: impl Fn(&Instruction) -> bool + 'static) -> Self {
        Self { description: description.into(), pred: Box::new(pred) }
    }

    pub fn new_obj(type_name: &str) -> Self {
        let name = type_name.to_string();
        Self::new(format!("newobj {type_name}"), move |i| i.match_newobj(&name))
    }

    pub fn ldc_i4(value: i32) -> Self {
        Self::new(format!("ldc.i4 {value}"), move |i| i.match_ldc_i4(value))
    }

    pub fn matches(&self, instruction: &Instruction) -> bool {
        (self.pred)(instruction)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// An insertion point inside a body being rewritten. The cursor sits
/// between instructions: `index` is the instruction right after it.
pub struct ILCursor<'a> {
    body: &'a mut MethodBody,
    index: usize,
}

impl<'a> ILCursor<'a> {
    pub fn new(body: &'a mut MethodBody) -> Self {
        Self { body, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn body(&self) -> &MethodBody {
        self.body
    }

    /// The instruction right after the cursor.
    pub fn next_instruction(&self) -> Option<&Instruction> {
        self.body.instructions.get(self.index)
    }

    /// Move to the first instruction at or after the cursor that matches.
    pub fn goto_next(&mut self, move_type: MoveType, pattern: &Pattern) -> Result<&mut Self, HookError> {
        let found = self.body.instructions[self.index..]
            .iter()
            .position(|i| pattern.matches(i))
            .map(|offset| self.index + offset);
        match found {
            Some(at) => {
                self.index = match move_type {
                    MoveType::Before => at,
                    MoveType::After => at + 1,
                };
                Ok(self)
            }
            None => Err(HookError::PatchNotFound {
                method: self.body.name.clone(),
                pattern: pattern.to_string(),
            }),
        }
    }

    /// Delete the instruction after the cursor.
    pub fn remove(&mut self) -> Result<Instruction, HookError> {
        if self.index >= self.body.instructions.len() {
            return Err(HookError::NothingToRemove {
                method: self.body.name.clone(),
                index: self.index,
            });
        }
        Ok(self.body.instructions.remove(self.index))
    }

    /// Insert before the instruction after the cursor and step past it.
    pub fn emit(&mut self, instruction: Instruction) -> &mut Self {
        self.body.instructions.insert(self.index, instruction);
        self.index += 1;
        self
    }

    pub fn emit_delegate(&mut self, delegate: Delegate) -> &mut Self {
        self.emit(Instruction::Invoke(delegate))
    }

    /// Replace the value on top of the stack with `f(value)`.
    pub fn emit_delegate_map(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(Value) -> Result<Value, ExecError> + Send + Sync + 'static,
    ) -> &mut Self {
        self.emit_delegate(Delegate::map(name, f))
    }

    /// Push the result of `f()`.
    pub fn emit_delegate_push(
        &mut self,
        name: impl Into<String>,
        f: impl Fn() -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.emit_delegate(Delegate::push(name, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Instruction::*;

    fn sample() -> MethodBody {
        let mut body = MethodBody::new("sample", 0, 0);
        body.emit(LdcI4(3)).emit(LdcI4(10)).emit(Add).emit(Yield).emit(Ret);
        body
    }

    #[test]
    fn test_goto_before_and_after() {
        let mut body = sample();
        let mut cursor = ILCursor::new(&mut body);
        cursor.goto_next(MoveType::Before, &Pattern::ldc_i4(10)).unwrap();
        assert_eq!(cursor.index(), 1);
        cursor.goto_next(MoveType::After, &Pattern::ldc_i4(10)).unwrap();
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_missing_pattern_names_method() {
        let mut body = sample();
        let mut cursor = ILCursor::new(&mut body);
        let err = cursor.goto_next(MoveType::After, &Pattern::new_obj("AbsorbOrb")).err().unwrap();
        assert_eq!(
            err.to_string(),
            "patch point not found in sample: no instruction matching newobj AbsorbOrb"
        );
    }

    #[test]
    fn test_search_starts_at_cursor() {
        let mut body = sample();
        let mut cursor = ILCursor::new(&mut body);
        cursor.goto_next(MoveType::After, &Pattern::ldc_i4(10)).unwrap();
        assert!(cursor.goto_next(MoveType::Before, &Pattern::ldc_i4(3)).is_err());
    }

    #[test]
    fn test_remove_then_emit_replaces_in_place() {
        let mut body = sample();
        {
            let mut cursor = ILCursor::new(&mut body);
            cursor.goto_next(MoveType::Before, &Pattern::ldc_i4(10)).unwrap();
            assert!(matches!(cursor.remove().unwrap(), LdcI4(10)));
            cursor.emit_delegate_push("seven", || Value::Int(7));
            assert_eq!(cursor.index(), 2);
        }
        assert_eq!(body.listing(), ["ldc.i4 3", "call seven/0", "add", "yield", "ret"]);
        assert_eq!(body.verify(), Ok(()));
    }

    #[test]
    fn test_remove_past_end() {
        let mut body = MethodBody::new("empty", 0, 0);
        let mut cursor = ILCursor::new(&mut body);
        assert!(matches!(cursor.remove(), Err(HookError::NothingToRemove { index: 0, .. })));
    }
}
