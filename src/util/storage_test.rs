use super::*;

#[test]
fn memory_slot_starts_empty() {
    assert_eq!(MemorySlot::default().load(), None);
}

#[test]
fn memory_slot_round_trips_and_removes() {
    let slot = MemorySlot::default();
    slot.store("abc");
    assert_eq!(slot.load().as_deref(), Some("abc"));
    slot.store("def");
    assert_eq!(slot.load().as_deref(), Some("def"));
    slot.remove();
    assert_eq!(slot.load(), None);
}

#[test]
fn memory_slot_clones_share_state() {
    let slot = MemorySlot::with_token("abc");
    let other = slot.clone();
    other.remove();
    assert_eq!(slot.load(), None);
}
