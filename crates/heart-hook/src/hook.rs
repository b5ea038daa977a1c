use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::body::MethodBody;
use crate::cursor::ILCursor;
use crate::error::HookError;

struct SlotState {
    current: Arc<MethodBody>,
    hooked: bool,
}

/// The host's handle on one routine. Runners take a snapshot of the
/// current body with [`MethodSlot::body`]; hooks swap it.
pub struct MethodSlot {
    name: String,
    state: Mutex<SlotState>,
}

impl MethodSlot {
    pub fn new(body: MethodBody) -> Arc<Self> {
        Arc::new(Self {
            name: body.name.clone(),
            state: Mutex::new(SlotState { current: Arc::new(body), hooked: false }),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The body a freshly started routine will run.
    pub fn body(&self) -> Arc<MethodBody> {
        self.lock().current.clone()
    }

    pub fn is_hooked(&self) -> bool {
        self.lock().hooked
    }

    /// Swap in a new body from outside any hook, as a host reload would.
    pub fn replace(&self, body: MethodBody) {
        self.lock().current = Arc::new(body);
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An installed rewrite of a [`MethodSlot`]. Dropping or disposing it puts
/// the original body back.
pub struct ILHook {
    owner: String,
    slot: Arc<MethodSlot>,
    original: Arc<MethodBody>,
    patched: Arc<MethodBody>,
    applied: bool,
}

impl ILHook {
    /// Copy the slot's body, let `manipulate` rewrite the copy through a
    /// cursor, verify the result and install it.
    ///
    /// Nothing is installed if the manipulator fails or the rewritten body
    /// does not verify.
    pub fn new(
        slot: &Arc<MethodSlot>,
        owner: impl Into<String>,
        manipulate: impl FnOnce(&mut ILCursor<'_>) -> Result<(), HookError>,
    ) -> Result<Self, HookError> {
        let owner = owner.into();
        let original = {
            let state = slot.lock();
            if state.hooked {
                return Err(HookError::AlreadyHooked { method: slot.name.clone() });
            }
            state.current.clone()
        };

        let mut body = (*original).clone();
        manipulate(&mut ILCursor::new(&mut body))?;
        body.verify().map_err(|source| HookError::Invalid {
            method: slot.name.clone(),
            source,
        })?;

        let patched = Arc::new(body);
        {
            let mut state = slot.lock();
            // Someone else hooked or swapped the body while we were rewriting.
            if state.hooked || !Arc::ptr_eq(&state.current, &original) {
                return Err(HookError::AlreadyHooked { method: slot.name.clone() });
            }
            state.current = patched.clone();
            state.hooked = true;
        }
        log::info!(
            "{owner}: hooked {} ({} -> {} instructions)",
            slot.name,
            original.len(),
            patched.len()
        );

        Ok(Self { owner, slot: slot.clone(), original, patched, applied: true })
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn original(&self) -> &Arc<MethodBody> {
        &self.original
    }

    pub fn patched(&self) -> &Arc<MethodBody> {
        &self.patched
    }

    /// Restore the original body. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if !self.applied {
            return;
        }
        let mut state = self.slot.lock();
        if !Arc::ptr_eq(&state.current, &self.patched) {
            log::warn!(
                "{}: {} was replaced while hooked, restoring the pre-hook body anyway",
                self.owner,
                self.slot.name
            );
        }
        state.current = self.original.clone();
        state.hooked = false;
        self.applied = false;
        log::info!("{}: unhooked {}", self.owner, self.slot.name);
    }
}

impl Drop for ILHook {
    fn drop(&mut self) {
        self.dispose();
    }
}
