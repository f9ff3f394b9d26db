#![cfg(test)]

// Property tests for LinkedList and Cursor, kept inside the crate so they
// can call the link walker.

use crate::linked_list::LinkedList;
use crate::list_cursor::Cursor;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Pop,
    Append(i32),
    Slice,
    // Remove the element at this (wrapped) position through a cursor.
    RemoveAt(usize),
    SortAsc,
    SortDesc,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        any::<i32>().prop_map(Op::Push),
        Just(Op::Pop),
        any::<i32>().prop_map(Op::Append),
        Just(Op::Slice),
        (0usize..16).prop_map(Op::RemoveAt),
        Just(Op::SortAsc),
        Just(Op::SortDesc),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: state-machine equivalence against VecDeque.
// - push/pop behave as a stack at the head, append/slice at the tail.
// - cursor removal at any position splices exactly that element out and
//   leaves the cursor on its successor (or invalid past the tail).
// - sort agrees with a stable sort in either direction.
// - links, head/tail and len are consistent after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vecdeque(ops in arb_ops()) {
        let mut sut: LinkedList<i32> = LinkedList::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(v) => { sut.push(v); model.push_front(v); }
                Op::Pop => prop_assert_eq!(sut.pop(), model.pop_front()),
                Op::Append(v) => { sut.append(v); model.push_back(v); }
                Op::Slice => prop_assert_eq!(sut.slice(), model.pop_back()),
                Op::RemoveAt(i) => {
                    if model.is_empty() {
                        let mut c = Cursor::new(&sut);
                        prop_assert!(!c.remove(&mut sut, drop));
                    } else {
                        let i = i % model.len();
                        let mut c = Cursor::new(&sut);
                        for _ in 0..i { prop_assert!(c.advance(&sut)); }
                        let mut released = None;
                        let still_valid = c.remove(&mut sut, |p| released = Some(p));
                        prop_assert_eq!(released, model.remove(i));
                        prop_assert_eq!(still_valid, i < model.len());
                        prop_assert_eq!(c.get(&sut), model.get(i));
                    }
                }
                Op::SortAsc => {
                    sut.sort(true, |a, b| a.cmp(b));
                    model.make_contiguous().sort();
                }
                Op::SortDesc => {
                    sut.sort(false, |a, b| a.cmp(b));
                    model.make_contiguous().sort_by(|a, b| b.cmp(a));
                }
            }

            sut.assert_consistent();
            prop_assert_eq!(sut.len(), model.len());
            let items: Vec<i32> = sut.iter().copied().collect();
            let expected: Vec<i32> = model.iter().copied().collect();
            prop_assert_eq!(items, expected);
        }
    }
}
