/// Orders asynchronous fetch completions.
///
/// Each request takes a ticket from [`Sequencer::issue`]. A completion is
/// applied only if its ticket is newer than the last applied one, so a slow
/// early fetch cannot overwrite a newer result.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequencer {
	issued: u64,
	applied: u64,
}

impl Sequencer {
	pub fn issue(&mut self) -> u64 {
		self.issued += 1;
		self.issued
	}

	/// Returns `true` and records the ticket if it is the newest completion so far.
	pub fn accept(&mut self, ticket: u64) -> bool {
		if ticket <= self.applied {
			return false;
		}
		self.applied = ticket;
		true
	}

	pub fn applied(&self) -> u64 {
		self.applied
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn in_order_completions_apply() {
		let mut seq = Sequencer::default();
		let a = seq.issue();
		let b = seq.issue();
		assert!(seq.accept(a));
		assert!(seq.accept(b));
		assert_eq!(seq.applied(), b);
	}

	#[test]
	fn stale_completion_is_discarded() {
		let mut seq = Sequencer::default();
		let slow = seq.issue();
		let fast = seq.issue();
		assert!(seq.accept(fast));
		assert!(!seq.accept(slow));
		assert_eq!(seq.applied(), fast);
	}

	#[test]
	fn ticket_applies_once() {
		let mut seq = Sequencer::default();
		let t = seq.issue();
		assert!(seq.accept(t));
		assert!(!seq.accept(t));
	}

	#[test]
	fn failed_newer_fetch_does_not_block_older_one() {
		// A ticket that never completes leaves `applied` untouched.
		let mut seq = Sequencer::default();
		let first = seq.issue();
		let _lost = seq.issue();
		assert!(seq.accept(first));
	}
}
