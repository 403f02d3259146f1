//! Resolution-stack bookkeeping for circular dependency detection.

use std::sync::Mutex;

/// Names currently being resolved, outermost first. Empty outside an
/// active resolution.
pub(crate) type ResolutionStack = Mutex<Vec<&'static str>>;

/// Pushes `name` onto the stack, or reports the cycle when `name` is
/// already being resolved. The returned path runs from the first
/// occurrence of `name` back to itself, e.g. `["a", "b", "a"]`.
pub(crate) fn enter<'a>(
    stack: &'a ResolutionStack,
    name: &'static str,
) -> Result<StackGuard<'a>, Vec<&'static str>> {
    let mut frames = stack.lock().unwrap();
    if let Some(pos) = frames.iter().position(|&frame| frame == name) {
        let mut path: Vec<&'static str> = frames[pos..].to_vec();
        path.push(name);
        return Err(path);
    }
    frames.push(name);
    Ok(StackGuard { stack, name })
}

/// Guard for one resolution frame. Pops its name when dropped, so early
/// returns and error paths unwind the stack correctly.
#[derive(Debug)]
pub(crate) struct StackGuard<'a> {
    stack: &'a ResolutionStack,
    name: &'static str,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        let mut frames = self.stack.lock().unwrap();
        if let Some(last) = frames.pop() {
            debug_assert_eq!(last, self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_path_starts_at_first_occurrence() {
        let stack = ResolutionStack::default();
        let _outer = enter(&stack, "a").unwrap();
        let _mid = enter(&stack, "b").unwrap();
        let _inner = enter(&stack, "c").unwrap();

        let path = enter(&stack, "b").unwrap_err();
        assert_eq!(path, vec!["b", "c", "b"]);
    }

    #[test]
    fn guard_pops_on_drop() {
        let stack = ResolutionStack::default();
        {
            let _guard = enter(&stack, "a").unwrap();
            assert_eq!(stack.lock().unwrap().len(), 1);
        }
        assert!(stack.lock().unwrap().is_empty());
    }
}
