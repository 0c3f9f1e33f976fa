use prof_simulator::menu::{CommandSet, SectionCommand};
use prof_simulator::{Window, WindowSize};

type Callback = Box<dyn Fn() -> &'static str>;

fn window<A>() -> Window<A> {
    Window::new(
        "PROF SIMULATOR",
        WindowSize {
            width: 80,
            height: 24,
        },
    )
}

#[test]
fn group_and_leaf_sections_bind_their_callbacks() {
    let f: Callback = Box::new(|| "f");
    let g: Callback = Box::new(|| "g");

    let mut window = window();
    window.build_bar(
        &["A", "B"],
        vec![CommandSet::group([("x", f)]), CommandSet::Leaf(g)],
    );

    let bar = window.bar();
    assert_eq!(bar.len(), 2);

    let a = bar.section(0).expect("section A");
    assert_eq!(a.label(), "A");
    assert_eq!(a.items().len(), 1);
    assert_eq!(a.items()[0].label, "x");
    assert_eq!((a.items()[0].action)(), "f");

    let b = bar.section(1).expect("section B");
    assert_eq!(b.label(), "B");
    assert!(b.is_leaf());
    match b.command() {
        SectionCommand::Leaf(callback) => assert_eq!(callback(), "g"),
        SectionCommand::Items(_) => panic!("B should be bound directly"),
    }
    assert_eq!(bar.activate(1, None).map(|callback| callback()), Some("g"));
}

#[test]
fn rebuilding_replaces_the_previous_bar() {
    let mut window = window();
    window.build_bar(
        &["Menu", "Classes"],
        vec![CommandSet::Leaf(1), CommandSet::group([("3A", 2), ("3B", 3)])],
    );
    window.build_bar(&["Menu"], vec![CommandSet::Leaf(9)]);

    assert_eq!(window.bar().len(), 1);
    assert_eq!(window.bar().activate(0, None), Some(&9));
}

#[test]
fn group_entries_keep_insertion_order() {
    let mut window = window();
    window.build_bar(
        &["Classes"],
        vec![CommandSet::group([("3B", 'b'), ("1A", 'a'), ("2C", 'c')])],
    );
    let labels: Vec<_> = window.bar().sections()[0]
        .items()
        .iter()
        .map(|item| item.label.clone())
        .collect();
    assert_eq!(labels, vec!["3B", "1A", "2C"]);
}

#[test]
#[should_panic(expected = "exactly one command set")]
fn mismatched_lists_are_a_programmer_error() {
    let mut window = window();
    window.build_bar(&["Menu", "Classes"], vec![CommandSet::Leaf(())]);
}
