//! A small instruction-stream model of a host routine, and the tools to
//! patch one in place: pattern-matching cursors, a structural verifier and
//! reversible hooks. [`Coroutine`] runs a body so patched routines can be
//! driven and observed.

pub mod body;
pub mod cursor;
pub mod error;
pub mod exec;
pub mod hook;
pub mod instr;
pub mod value;

pub use body::MethodBody;
pub use cursor::{ILCursor, MoveType, Pattern};
pub use error::{ExecError, HookError, VerifyError};
pub use exec::Coroutine;
pub use hook::{ILHook, MethodSlot};
pub use instr::{Delegate, Instruction, Label, TypeRef};
pub use value::{Object, Value};
