use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("call stack capacity exceeded, pushing of address {address_not_pushed:X} failed")]
pub struct CallStackCapacityExceededError {
    pub address_not_pushed: u16,
}

/// Return addresses of the active subroutine calls.
///
/// The number of entries is the stack pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    vec: Vec<u16>,
    max_len: usize,
}

impl CallStack {
    /// Maximum nesting depth of subroutine calls.
    pub const MAX_DEPTH: usize = 16;

    pub fn new_with_max_len(max_len: usize) -> Self {
        Self {
            vec: Vec::with_capacity(max_len),
            max_len,
        }
    }

    /// The stack pointer, i.e. the number of used entries.
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.vec.pop()
    }

    pub fn push(&mut self, address: u16) -> Result<(), CallStackCapacityExceededError> {
        if self.vec.len() < self.max_len {
            self.vec.push(address);
            Ok(())
        } else {
            Err(CallStackCapacityExceededError {
                address_not_pushed: address,
            })
        }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.vec
    }
}

impl From<Vec<u16>> for CallStack {
    fn from(vec: Vec<u16>) -> Self {
        Self {
            max_len: Self::MAX_DEPTH.max(vec.len()),
            vec,
        }
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new_with_max_len(Self::MAX_DEPTH)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn push_until_full() {
        let mut call_stack = CallStack::default();
        for i in 0..CallStack::MAX_DEPTH as u16 {
            call_stack.push(0x200 + 2 * i).unwrap();
        }

        assert_eq!(call_stack.len(), 16);
        assert_eq!(
            call_stack.push(0x300),
            Err(CallStackCapacityExceededError {
                address_not_pushed: 0x300
            })
        );
        assert_eq!(call_stack.len(), 16);
    }

    #[test]
    fn pop_is_lifo() {
        let mut call_stack = CallStack::from(vec![0x202, 0x30A]);

        assert_eq!(call_stack.pop(), Some(0x30A));
        assert_eq!(call_stack.pop(), Some(0x202));
        assert_eq!(call_stack.pop(), None);
        assert!(call_stack.is_empty());
    }
}
