use super::*;

use std::sync::Mutex;

fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static)
where
    T: Sync,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
}

#[test]
fn get_returns_initial_value() {
    let cell = Observable::new(7_u32);
    assert_eq!(cell.get(), 7);
}

#[test]
fn set_notifies_subscribers_with_new_value() {
    let cell = Observable::new(String::from("/"));
    let (seen, handler) = recorder::<String>();
    let _sub = cell.subscribe(handler);

    assert!(cell.set("/chats".to_owned()));
    assert!(cell.set("/settings".to_owned()));

    assert_eq!(*seen.lock().unwrap(), vec!["/chats".to_owned(), "/settings".to_owned()]);
    assert_eq!(cell.get(), "/settings");
}

#[test]
fn set_same_value_does_not_notify() {
    let cell = Observable::new(1_u8);
    let (seen, handler) = recorder::<u8>();
    let _sub = cell.subscribe(handler);

    assert!(!cell.set(1));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn subscribe_does_not_replay_current_value() {
    let cell = Observable::new(3_i32);
    let (seen, handler) = recorder::<i32>();
    let _sub = cell.subscribe(handler);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn handlers_run_in_subscription_order() {
    let cell = Observable::new(0_u8);
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&order);
    let second = Arc::clone(&order);
    let _a = cell.subscribe(move |_| first.lock().unwrap().push("a"));
    let _b = cell.subscribe(move |_| second.lock().unwrap().push("b"));

    cell.set(1);
    assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
}

#[test]
fn dropped_subscription_is_not_invoked() {
    let cell = Observable::new(0_u8);
    let (seen, handler) = recorder::<u8>();
    let sub = cell.subscribe(handler);
    assert_eq!(cell.subscriber_count(), 1);

    drop(sub);
    assert_eq!(cell.subscriber_count(), 0);

    cell.set(5);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn explicit_unsubscribe_releases_entry() {
    let cell = Observable::new(0_u8);
    let (seen, handler) = recorder::<u8>();
    let sub = cell.subscribe(handler);

    sub.unsubscribe();
    cell.set(9);

    assert_eq!(cell.subscriber_count(), 0);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn subscription_released_by_earlier_handler_is_skipped() {
    let cell = Observable::new(0_u8);
    let (seen, handler) = recorder::<u8>();
    let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&victim);
    let _killer = cell.subscribe(move |_| {
        slot.lock().unwrap().take();
    });
    *victim.lock().unwrap() = Some(cell.subscribe(handler));

    cell.set(1);
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(cell.subscriber_count(), 1);
}

#[test]
fn reentrant_set_delivers_latest_value_last() {
    let cell = Observable::new(0_u8);
    let bounce = cell.clone();
    let _clamp = cell.subscribe(move |v| {
        if *v > 10 {
            bounce.set(10);
        }
    });
    let (seen, handler) = recorder::<u8>();
    let _watch = cell.subscribe(handler);

    cell.set(42);

    assert_eq!(cell.get(), 10);
    assert_eq!(seen.lock().unwrap().last().copied(), Some(10));
    assert!(!seen.lock().unwrap().contains(&42));
}

#[test]
fn subscription_may_outlive_cell() {
    let cell = Observable::new(0_u8);
    let sub = cell.subscribe(|_| {});
    drop(cell);
    drop(sub);
}

#[test]
fn clones_share_the_same_cell() {
    let cell = Observable::new(1_u8);
    let other = cell.clone();
    let (seen, handler) = recorder::<u8>();
    let _sub = other.subscribe(handler);

    cell.set(2);
    assert_eq!(other.get(), 2);
    assert_eq!(*seen.lock().unwrap(), vec![2]);
}

#[test]
fn default_cell_holds_default_value() {
    let cell = Observable::<u32>::default();
    assert_eq!(cell.get(), 0);
    assert_eq!(cell.subscriber_count(), 0);
}

#[test]
fn concurrent_writers_deliver_in_store_order() {
    let cell = Observable::new(0_u32);
    let (seen, handler) = recorder::<u32>();
    let _sub = cell.subscribe(handler);

    let writers: Vec<_> = (1..=4_u32)
        .map(|w| {
            let cell = cell.clone();
            std::thread::spawn(move || (0..250_u32).filter(|i| cell.set(w * 1000 + i)).count())
        })
        .collect();
    let stored: usize = writers.into_iter().map(|h| h.join().unwrap()).sum();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), stored);
    assert_eq!(seen.last().copied(), Some(cell.get()));
}

#[test]
fn reentrant_set_does_not_wait_on_its_own_turn() {
    let cell = Observable::new(0_u8);
    let bounce = cell.clone();
    let _step = cell.subscribe(move |v| {
        if *v < 3 {
            bounce.set(v + 1);
        }
    });

    cell.set(1);
    assert_eq!(cell.get(), 3);
}
