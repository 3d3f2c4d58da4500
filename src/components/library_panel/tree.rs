//! Expansion state for the library tree. At most one category is open at a
//! time, and within it at most one sub.

use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TreeId {
	Category(usize),
	Sub(usize, usize),
}

impl TreeId {
	fn category(self) -> usize {
		match self {
			TreeId::Category(c) | TreeId::Sub(c, _) => c,
		}
	}

	fn is_within(self, ancestor: TreeId) -> bool {
		match (self, ancestor) {
			(TreeId::Sub(c, _), TreeId::Category(a)) => c == a,
			_ => self == ancestor,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction {
	Toggle(TreeId),
	CollapseAll,
}

pub type Expanded = BTreeSet<TreeId>;

/// Applies `action` and returns the new expansion set. Opening a node closes
/// its parent's other children (and everything under them); closing a node
/// closes its descendants.
pub fn reduce(expanded: &Expanded, action: TreeAction) -> Expanded {
	match action {
		TreeAction::CollapseAll => Expanded::new(),
		TreeAction::Toggle(id) if expanded.contains(&id) => expanded
			.iter()
			.copied()
			.filter(|open| !open.is_within(id))
			.collect(),
		TreeAction::Toggle(id @ TreeId::Category(c)) => {
			let mut next: Expanded = expanded
				.iter()
				.copied()
				.filter(|open| open.category() == c)
				.collect();
			next.insert(id);
			next
		}
		TreeAction::Toggle(id @ TreeId::Sub(c, _)) => {
			let mut next = Expanded::from([TreeId::Category(c)]);
			next.insert(id);
			next
		}
	}
}

pub fn is_open(expanded: &Expanded, id: TreeId) -> bool {
	expanded.contains(&id)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toggle(set: &Expanded, id: TreeId) -> Expanded {
		reduce(set, TreeAction::Toggle(id))
	}

	fn valid(set: &Expanded) -> bool {
		let cats: Vec<_> = set
			.iter()
			.filter(|id| matches!(id, TreeId::Category(_)))
			.collect();
		let subs: Vec<_> = set.iter().filter(|id| matches!(id, TreeId::Sub(..))).collect();
		cats.len() <= 1
			&& subs.len() <= 1
			&& subs
				.iter()
				.all(|s| set.contains(&TreeId::Category(s.category())))
	}

	#[test]
	fn opening_a_category_closes_the_others() {
		let set = toggle(&Expanded::new(), TreeId::Category(0));
		let set = toggle(&set, TreeId::Sub(0, 2));
		let set = toggle(&set, TreeId::Category(1));
		assert_eq!(set, Expanded::from([TreeId::Category(1)]));
	}

	#[test]
	fn opening_a_sub_closes_siblings_and_opens_parent() {
		let set = toggle(&Expanded::new(), TreeId::Sub(3, 1));
		assert_eq!(set, Expanded::from([TreeId::Category(3), TreeId::Sub(3, 1)]));
		let set = toggle(&set, TreeId::Sub(3, 4));
		assert_eq!(set, Expanded::from([TreeId::Category(3), TreeId::Sub(3, 4)]));
	}

	#[test]
	fn closing_a_category_closes_its_subs() {
		let set = toggle(&Expanded::new(), TreeId::Sub(2, 0));
		let set = toggle(&set, TreeId::Category(2));
		assert!(set.is_empty());
	}

	#[test]
	fn closing_a_sub_keeps_its_category() {
		let set = toggle(&Expanded::new(), TreeId::Sub(1, 1));
		let set = toggle(&set, TreeId::Sub(1, 1));
		assert_eq!(set, Expanded::from([TreeId::Category(1)]));
	}

	#[test]
	fn invariant_holds_over_any_sequence() {
		let ids = [
			TreeId::Category(0),
			TreeId::Category(1),
			TreeId::Sub(0, 0),
			TreeId::Sub(0, 1),
			TreeId::Sub(1, 0),
		];
		let mut set = Expanded::new();
		for step in 0..200usize {
			let id = ids[(step * 7 + step / 3) % ids.len()];
			set = toggle(&set, id);
			assert!(valid(&set), "step {step}: {set:?}");
		}
		assert!(reduce(&set, TreeAction::CollapseAll).is_empty());
	}
}
