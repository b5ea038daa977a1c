use std::collections::HashMap;

use crate::error::VerifyError;
use crate::instr::{Instruction, Label};

/// A routine body: a flat instruction list plus its argument and local
/// counts.
#[derive(Debug, Clone)]
pub struct MethodBody {
    pub name: String,
    pub args: u16,
    pub locals: u16,
    pub instructions: Vec<Instruction>,
    next_label: u32,
}

impl MethodBody {
    pub fn new(name: impl Into<String>, args: u16, locals: u16) -> Self {
        Self { name: name.into(), args, locals, instructions: Vec::new(), next_label: 0 }
    }

    /// Allocate a fresh label. Place it with [`Instruction::Mark`].
    pub fn define_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    pub fn emit(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// One line per instruction, for diffing and diagnostics.
    pub fn listing(&self) -> Vec<String> {
        self.instructions.iter().map(|i| i.to_string()).collect()
    }

    /// Index of every marked label.
    pub fn label_positions(&self) -> Result<HashMap<Label, usize>, VerifyError> {
        let mut marks = HashMap::new();
        for (at, instr) in self.instructions.iter().enumerate() {
            if let Instruction::Mark(label) = instr {
                if marks.insert(*label, at).is_some() {
                    return Err(VerifyError::DuplicateLabel { label: *label });
                }
            }
        }
        Ok(marks)
    }

    /// Check the structural invariants every runnable body must hold:
    /// operands in range, no stack underflow, a single stack depth at every
    /// reachable instruction, every branch target marked once, and an empty
    /// stack at each `ret`.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let marks = self.label_positions()?;

        for (at, instr) in self.instructions.iter().enumerate() {
            if let Some(label) = instr.branch_target() {
                if !marks.contains_key(&label) {
                    return Err(VerifyError::UndefinedLabel { label });
                }
            }
            match *instr {
                Instruction::LdArg(index) if index >= self.args => {
                    return Err(VerifyError::BadArgument { at, index, count: self.args });
                }
                Instruction::LdLoc(index) | Instruction::StLoc(index) if index >= self.locals => {
                    return Err(VerifyError::BadLocal { at, index, count: self.locals });
                }
                _ => {}
            }
        }

        let mut depth_at: Vec<Option<usize>> = vec![None; self.instructions.len()];
        let mut pending = vec![(0usize, 0usize)];
        while let Some((mut pc, mut depth)) = pending.pop() {
            loop {
                let Some(instr) = self.instructions.get(pc) else {
                    return Err(VerifyError::FallsOffEnd);
                };
                match depth_at[pc] {
                    Some(expected) if expected == depth => break,
                    Some(expected) => {
                        return Err(VerifyError::InconsistentStack { at: pc, expected, found: depth });
                    }
                    None => depth_at[pc] = Some(depth),
                }

                let (pops, pushes) = instr.stack_effect();
                if depth < pops {
                    return Err(VerifyError::StackUnderflow { at: pc });
                }
                depth = depth - pops + pushes;

                match instr {
                    Instruction::Ret => {
                        if depth != 0 {
                            return Err(VerifyError::NonEmptyReturn { at: pc, depth });
                        }
                        break;
                    }
                    Instruction::Br(label) => {
                        pc = marks[label];
                        continue;
                    }
                    Instruction::Blt(label) => pending.push((marks[label], depth)),
                    _ => {}
                }
                pc += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Instruction::*;

    fn counting_loop(bound: i32) -> MethodBody {
        let mut body = MethodBody::new("count", 0, 1);
        let top = body.define_label();
        let check = body.define_label();
        body.emit(LdcI4(0))
            .emit(StLoc(0))
            .emit(Br(check))
            .emit(Mark(top))
            .emit(LdLoc(0))
            .emit(Yield)
            .emit(LdLoc(0))
            .emit(LdcI4(1))
            .emit(Add)
            .emit(StLoc(0))
            .emit(Mark(check))
            .emit(LdLoc(0))
            .emit(LdcI4(bound))
            .emit(Blt(top))
            .emit(Ret);
        body
    }

    #[test]
    fn test_loop_verifies() {
        assert_eq!(counting_loop(10).verify(), Ok(()));
    }

    #[test]
    fn test_underflow() {
        let mut body = MethodBody::new("bad", 0, 0);
        body.emit(LdcI4(1)).emit(Add).emit(Pop).emit(Ret);
        assert_eq!(body.verify(), Err(VerifyError::StackUnderflow { at: 1 }));
    }

    #[test]
    fn test_leftover_value_at_ret() {
        let mut body = MethodBody::new("bad", 0, 0);
        body.emit(LdcI4(1)).emit(Ret);
        assert_eq!(body.verify(), Err(VerifyError::NonEmptyReturn { at: 1, depth: 1 }));
    }

    #[test]
    fn test_unmarked_branch_target() {
        let mut body = MethodBody::new("bad", 0, 0);
        let nowhere = body.define_label();
        body.emit(Br(nowhere)).emit(Ret);
        assert_eq!(body.verify(), Err(VerifyError::UndefinedLabel { label: nowhere }));
    }

    #[test]
    fn test_duplicate_mark() {
        let mut body = MethodBody::new("bad", 0, 0);
        let l = body.define_label();
        body.emit(Mark(l)).emit(Mark(l)).emit(Ret);
        assert_eq!(body.verify(), Err(VerifyError::DuplicateLabel { label: l }));
    }

    #[test]
    fn test_depth_mismatch_at_merge() {
        let mut body = MethodBody::new("bad", 0, 0);
        let join = body.define_label();
        body.emit(LdcI4(0))
            .emit(LdcI4(1))
            .emit(Blt(join))
            .emit(LdcI4(5))
            .emit(Mark(join))
            .emit(Pop)
            .emit(Ret);
        assert!(matches!(body.verify(), Err(VerifyError::InconsistentStack { .. })));
    }

    #[test]
    fn test_falls_off_end() {
        let mut body = MethodBody::new("bad", 0, 0);
        body.emit(Nop);
        assert_eq!(body.verify(), Err(VerifyError::FallsOffEnd));
    }

    #[test]
    fn test_operand_ranges() {
        let mut body = MethodBody::new("bad", 1, 0);
        body.emit(LdArg(1)).emit(Pop).emit(Ret);
        assert_eq!(body.verify(), Err(VerifyError::BadArgument { at: 0, index: 1, count: 1 }));
    }

    #[test]
    fn test_listing() {
        let listing = counting_loop(10).listing();
        assert_eq!(listing[2], "br IL_0001");
        assert_eq!(listing[12], "ldc.i4 10");
    }
}
