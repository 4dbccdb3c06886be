use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut state = ToastState::default();
    let a = state.push("network error, please check your connection");
    let b = state.push("access denied");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[1].message, "access denied");
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push("a");
    let b = state.push("b");
    state.dismiss(a);
    assert_eq!(state.items, vec![Toast { id: b, message: "b".to_owned() }]);
    state.dismiss(a);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn oldest_toasts_drop_past_capacity() {
    let mut state = ToastState::default();
    for i in 0..(MAX_VISIBLE_TOASTS + 2) {
        state.push(&format!("m{i}"));
    }
    assert_eq!(state.items.len(), MAX_VISIBLE_TOASTS);
    assert_eq!(state.items[0].message, "m2");
}
