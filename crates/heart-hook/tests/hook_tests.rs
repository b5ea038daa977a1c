use heart_hook::{
    Coroutine, ExecError, HookError, ILCursor, ILHook, Instruction, MethodBody, MethodSlot, MoveType,
    Object, Pattern, TypeRef, Value,
};
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

// ── Helpers ──────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
struct Spark {
    index: i32,
}

#[derive(Debug, PartialEq)]
struct BigSpark {
    index: i32,
}

fn spark_type() -> TypeRef {
    TypeRef::new("Spark", 1, |mut args| match args.pop() {
        Some(Value::Int(index)) => Ok(Value::Object(Object::new("Spark", Spark { index }))),
        other => Err(ExecError::host("Spark", format!("bad index {other:?}"))),
    })
}

/// `for i in 0..10 { yield new Spark(i) }`
fn spawn_routine() -> MethodBody {
    use Instruction::*;
    let mut body = MethodBody::new("Emitter::SpawnRoutine", 0, 1);
    let top = body.define_label();
    let check = body.define_label();
    body.emit(LdcI4(0))
        .emit(StLoc(0))
        .emit(Br(check))
        .emit(Mark(top))
        .emit(LdLoc(0))
        .emit(NewObj(spark_type()))
        .emit(Yield)
        .emit(LdLoc(0))
        .emit(LdcI4(1))
        .emit(Add)
        .emit(StLoc(0))
        .emit(Mark(check))
        .emit(LdLoc(0))
        .emit(LdcI4(10))
        .emit(Blt(top))
        .emit(Ret);
    body
}

fn run(slot: &MethodSlot) -> Vec<Object> {
    Coroutine::new(slot.body(), vec![])
        .unwrap()
        .map(|v| v.unwrap().into_object().unwrap())
        .collect()
}

fn type_names(objects: &[Object]) -> Vec<String> {
    objects.iter().map(|o| o.type_name().to_string()).collect()
}

fn hook(slot: &Arc<MethodSlot>, count: Arc<AtomicI32>) -> Result<ILHook, HookError> {
    ILHook::new(slot, "sparks", move |cursor: &mut ILCursor<'_>| {
        cursor.goto_next(MoveType::After, &Pattern::new_obj("Spark"))?;
        cursor.emit_delegate_map("Upgrade", |v| match v.into_object().map(|o| o.downcast::<Spark>()) {
            Some(Ok(s)) => Ok(Value::Object(Object::new("BigSpark", BigSpark { index: s.index }))),
            _ => Err(ExecError::host("Upgrade", "expected a Spark")),
        });
        cursor.goto_next(MoveType::Before, &Pattern::ldc_i4(10))?;
        cursor.remove()?;
        cursor.emit_delegate_push("Count", move || Value::Int(count.load(Ordering::Relaxed)));
        Ok(())
    })
}

// ── 1. Unpatched routine ─────────────────────────────────────────

#[test]
fn unpatched_routine_yields_ten_sparks() {
    let slot = MethodSlot::new(spawn_routine());
    let out = run(&slot);
    assert_eq!(out.len(), 10);
    assert!(type_names(&out).iter().all(|n| n == "Spark"));
}

// ── 2. Patched routine ───────────────────────────────────────────

#[test]
fn patch_replaces_objects_and_count() {
    let slot = MethodSlot::new(spawn_routine());
    let count = Arc::new(AtomicI32::new(3));
    let _hook = hook(&slot, count.clone()).unwrap();

    let out = run(&slot);
    assert_eq!(type_names(&out), ["BigSpark", "BigSpark", "BigSpark"]);
    let indices: Vec<i32> = out.into_iter().map(|o| o.downcast::<BigSpark>().unwrap().index).collect();
    assert_eq!(indices, [0, 1, 2]);

    // Count is read every time the loop checks its bound.
    count.store(5, Ordering::Relaxed);
    assert_eq!(run(&slot).len(), 5);
}

#[test]
fn patch_keeps_control_flow() {
    let original = spawn_routine();
    let slot = MethodSlot::new(original.clone());
    let hook = hook(&slot, Arc::new(AtomicI32::new(10))).unwrap();
    let patched = hook.patched();

    let branches = |body: &MethodBody| -> Vec<String> {
        body.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Br(_) | Instruction::Blt(_) | Instruction::Mark(_)))
            .map(|i| i.to_string())
            .collect()
    };
    assert_eq!(branches(patched.as_ref()), branches(&original));
    assert_eq!(patched.len(), original.len() + 1);
}

// ── 3. Reversal ──────────────────────────────────────────────────

#[test]
fn apply_remove_apply_matches_single_apply() {
    let slot = MethodSlot::new(spawn_routine());
    let count = Arc::new(AtomicI32::new(4));

    let once = {
        let _hook = hook(&slot, count.clone()).unwrap();
        (slot.body().listing(), type_names(&run(&slot)))
    };
    assert_eq!(type_names(&run(&slot)), vec!["Spark"; 10]);

    let mut again = hook(&slot, count.clone()).unwrap();
    assert_eq!(slot.body().listing(), once.0);
    assert_eq!(type_names(&run(&slot)), once.1);
    again.dispose();
    assert_eq!(slot.body().listing(), spawn_routine().listing());
}

#[test]
fn missing_patch_point_fails_load() {
    use Instruction::*;
    let mut body = MethodBody::new("Emitter::SpawnRoutine", 0, 0);
    body.emit(LdcI4(1)).emit(NewObj(spark_type())).emit(Yield).emit(Ret);
    let slot = MethodSlot::new(body);

    let err = hook(&slot, Arc::new(AtomicI32::new(1))).err().unwrap();
    match err {
        HookError::PatchNotFound { method, pattern } => {
            assert_eq!(method, "Emitter::SpawnRoutine");
            assert_eq!(pattern, "ldc.i4 10");
        }
        other => panic!("unexpected {other}"),
    }
    assert!(!slot.is_hooked());
}

#[test]
fn replaced_body_is_restored_on_dispose() {
    let slot = MethodSlot::new(spawn_routine());
    let mut h = hook(&slot, Arc::new(AtomicI32::new(1))).unwrap();
    slot.replace(MethodBody::new("Emitter::SpawnRoutine", 0, 0));
    h.dispose();
    assert_eq!(slot.body().listing(), spawn_routine().listing());
}
